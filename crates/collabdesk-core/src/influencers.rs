use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind};
use crate::validate::{Validate, ValidationErrors};

labelled_enum! {
    pub enum Platform {
        Instagram => "Instagram",
        YouTube => "YouTube",
        TikTok => "TikTok",
        Twitter => "Twitter",
        LinkedIn => "LinkedIn",
    }
}

labelled_enum! {
    pub enum InfluencerStatus {
        Active => "active",
        Inactive => "inactive",
        Pending => "pending",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Influencer {
    pub id: EntityId,
    pub name: String,
    /// Handle including the leading `@`, e.g. `"@mumbaicityexplore"`.
    pub username: String,
    pub email: String,
    pub phone: String,
    pub platform: Platform,
    pub followers: u64,
    /// Percentage in `[0, 100]`.
    pub engagement_rate: f64,
    pub category: String,
    pub location: String,
    pub status: InfluencerStatus,
    pub profile_image: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInfluencer {
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone: String,
    pub platform: Platform,
    pub followers: u64,
    pub engagement_rate: f64,
    pub category: String,
    pub location: String,
    pub status: InfluencerStatus,
    pub profile_image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InfluencerPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<InfluencerStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl From<NewInfluencer> for InfluencerPatch {
    fn from(new: NewInfluencer) -> Self {
        Self {
            name: Some(new.name),
            username: Some(new.username),
            email: Some(new.email),
            phone: Some(new.phone),
            platform: Some(new.platform),
            followers: Some(new.followers),
            engagement_rate: Some(new.engagement_rate),
            category: Some(new.category),
            location: Some(new.location),
            status: Some(new.status),
            profile_image: Some(new.profile_image),
        }
    }
}

impl Entity for Influencer {
    const KIND: EntityKind = EntityKind::Influencer;

    type New = NewInfluencer;
    type Patch = InfluencerPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_new(id: EntityId, new: NewInfluencer) -> Self {
        Self {
            id,
            name: new.name,
            username: new.username,
            email: new.email,
            phone: new.phone,
            platform: new.platform,
            followers: new.followers,
            engagement_rate: new.engagement_rate,
            category: new.category,
            location: new.location,
            status: new.status,
            profile_image: new.profile_image,
        }
    }

    fn apply(&mut self, patch: InfluencerPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.username {
            self.username = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.platform {
            self.platform = v;
        }
        if let Some(v) = patch.followers {
            self.followers = v;
        }
        if let Some(v) = patch.engagement_rate {
            self.engagement_rate = v;
        }
        if let Some(v) = patch.category {
            self.category = v;
        }
        if let Some(v) = patch.location {
            self.location = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.profile_image {
            self.profile_image = v;
        }
    }

    fn to_new(&self) -> NewInfluencer {
        NewInfluencer {
            name: self.name.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            platform: self.platform,
            followers: self.followers,
            engagement_rate: self.engagement_rate,
            category: self.category.clone(),
            location: self.location.clone(),
            status: self.status,
            profile_image: self.profile_image.clone(),
        }
    }
}

fn check_followers(errors: &mut ValidationErrors, followers: u64) {
    if followers == 0 {
        errors.add("followers", "Must be positive");
    }
}

fn check_engagement_rate(errors: &mut ValidationErrors, rate: f64) {
    if !(0.0..=100.0).contains(&rate) {
        errors.add(
            "engagementRate",
            "Engagement rate must be between 0 and 100",
        );
    }
}

impl Validate for NewInfluencer {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "Name is required");
        errors.require("username", &self.username, "Username is required");
        errors.email("email", &self.email);
        errors.require("phone", &self.phone, "Phone is required");
        check_followers(&mut errors, self.followers);
        check_engagement_rate(&mut errors, self.engagement_rate);
        errors.require("category", &self.category, "Category is required");
        errors.require("location", &self.location, "Location is required");
        errors.url(
            "profileImage",
            &self.profile_image,
            "Profile image URL is required",
        );
        errors.into_result()
    }
}

impl Validate for InfluencerPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(ref v) = self.name {
            errors.require("name", v, "Name is required");
        }
        if let Some(ref v) = self.username {
            errors.require("username", v, "Username is required");
        }
        if let Some(ref v) = self.email {
            errors.email("email", v);
        }
        if let Some(ref v) = self.phone {
            errors.require("phone", v, "Phone is required");
        }
        if let Some(v) = self.followers {
            check_followers(&mut errors, v);
        }
        if let Some(v) = self.engagement_rate {
            check_engagement_rate(&mut errors, v);
        }
        if let Some(ref v) = self.category {
            errors.require("category", v, "Category is required");
        }
        if let Some(ref v) = self.location {
            errors.require("location", v, "Location is required");
        }
        if let Some(ref v) = self.profile_image {
            errors.url("profileImage", v, "Profile image URL is required");
        }
        errors.into_result()
    }
}

#[cfg(test)]
#[path = "influencers_test.rs"]
mod tests;
