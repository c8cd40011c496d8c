use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::brands::Brand;
use crate::entity::{deserialize_some, Entity, EntityId, EntityKind};
use crate::influencers::Influencer;
use crate::validate::{Validate, ValidationErrors};

/// Display placeholder for a campaign whose influencer or brand is missing.
pub const UNKNOWN: &str = "Unknown";

labelled_enum! {
    pub enum CampaignStatus {
        Draft => "draft",
        Posted => "posted",
        Scheduled => "scheduled",
        Cancelled => "cancelled",
    }
}

labelled_enum! {
    pub enum CampaignType {
        Collab => "collab",
        Paid => "paid",
        Sponsored => "sponsored",
    }
}

labelled_enum! {
    pub enum PaymentStatus {
        Pending => "pending",
        Paid => "paid",
        Overdue => "overdue",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub id: EntityId,
    pub influencer_id: EntityId,
    pub brand_id: EntityId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub shoot_date: NaiveDate,
    pub notes: Option<String>,
    pub approved: bool,
    pub post_link: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,
    pub paid_date: Option<NaiveDate>,
    pub status: CampaignStatus,
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,
    pub payment_status: PaymentStatus,
}

impl Campaign {
    /// Amount still owed to the influencer, never negative.
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        (self.amount - self.paid_amount).max(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaign {
    pub influencer_id: EntityId,
    pub brand_id: EntityId,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub shoot_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub post_link: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
    pub status: CampaignStatus,
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,
    pub payment_status: PaymentStatus,
}

// Option<Option<T>>: outer None = not in request, Some(None) = explicitly cleared.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CampaignPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub influencer_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shoot_date: Option<NaiveDate>,
    #[serde(
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
    #[serde(
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub post_link: Option<Option<String>>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub paid_amount: Option<Decimal>,
    #[serde(
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub paid_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CampaignStatus>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub campaign_type: Option<CampaignType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl From<NewCampaign> for CampaignPatch {
    fn from(new: NewCampaign) -> Self {
        Self {
            influencer_id: Some(new.influencer_id),
            brand_id: Some(new.brand_id),
            name: Some(new.name),
            amount: Some(new.amount),
            shoot_date: Some(new.shoot_date),
            notes: Some(new.notes),
            approved: Some(new.approved),
            post_link: Some(new.post_link),
            paid_amount: Some(new.paid_amount),
            paid_date: Some(new.paid_date),
            status: Some(new.status),
            campaign_type: Some(new.campaign_type),
            payment_status: Some(new.payment_status),
        }
    }
}

impl Entity for Campaign {
    const KIND: EntityKind = EntityKind::Campaign;

    type New = NewCampaign;
    type Patch = CampaignPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_new(id: EntityId, new: NewCampaign) -> Self {
        Self {
            id,
            influencer_id: new.influencer_id,
            brand_id: new.brand_id,
            name: new.name,
            amount: new.amount,
            shoot_date: new.shoot_date,
            notes: new.notes,
            approved: new.approved,
            post_link: new.post_link,
            paid_amount: new.paid_amount,
            paid_date: new.paid_date,
            status: new.status,
            campaign_type: new.campaign_type,
            payment_status: new.payment_status,
        }
    }

    fn apply(&mut self, patch: CampaignPatch) {
        if let Some(v) = patch.influencer_id {
            self.influencer_id = v;
        }
        if let Some(v) = patch.brand_id {
            self.brand_id = v;
        }
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.amount {
            self.amount = v;
        }
        if let Some(v) = patch.shoot_date {
            self.shoot_date = v;
        }
        if let Some(v) = patch.notes {
            self.notes = v;
        }
        if let Some(v) = patch.approved {
            self.approved = v;
        }
        if let Some(v) = patch.post_link {
            self.post_link = v;
        }
        if let Some(v) = patch.paid_amount {
            self.paid_amount = v;
        }
        if let Some(v) = patch.paid_date {
            self.paid_date = v;
        }
        if let Some(v) = patch.status {
            self.status = v;
        }
        if let Some(v) = patch.campaign_type {
            self.campaign_type = v;
        }
        if let Some(v) = patch.payment_status {
            self.payment_status = v;
        }
    }

    fn to_new(&self) -> NewCampaign {
        NewCampaign {
            influencer_id: self.influencer_id,
            brand_id: self.brand_id,
            name: self.name.clone(),
            amount: self.amount,
            shoot_date: self.shoot_date,
            notes: self.notes.clone(),
            approved: self.approved,
            post_link: self.post_link.clone(),
            paid_amount: self.paid_amount,
            paid_date: self.paid_date,
            status: self.status,
            campaign_type: self.campaign_type,
            payment_status: self.payment_status,
        }
    }
}

fn check_amount(errors: &mut ValidationErrors, amount: Decimal) {
    if amount <= Decimal::ZERO {
        errors.add("amount", "Amount must be positive");
    }
}

fn check_paid_amount(errors: &mut ValidationErrors, paid: Decimal) {
    if paid < Decimal::ZERO {
        errors.add("paidAmount", "Paid amount cannot be negative");
    }
}

impl Validate for NewCampaign {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.influencer_id == 0 {
            errors.add("influencerId", "Influencer is required");
        }
        if self.brand_id == 0 {
            errors.add("brandId", "Brand is required");
        }
        errors.require("name", &self.name, "Campaign name is required");
        check_amount(&mut errors, self.amount);
        errors.optional_url("postLink", self.post_link.as_deref());
        check_paid_amount(&mut errors, self.paid_amount);
        errors.into_result()
    }
}

impl Validate for CampaignPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.influencer_id == Some(0) {
            errors.add("influencerId", "Influencer is required");
        }
        if self.brand_id == Some(0) {
            errors.add("brandId", "Brand is required");
        }
        if let Some(ref v) = self.name {
            errors.require("name", v, "Campaign name is required");
        }
        if let Some(v) = self.amount {
            check_amount(&mut errors, v);
        }
        if let Some(Some(ref v)) = self.post_link {
            errors.optional_url("postLink", Some(v));
        }
        if let Some(v) = self.paid_amount {
            check_paid_amount(&mut errors, v);
        }
        errors.into_result()
    }
}

// ---------------------------------------------------------------------------
// Display-name resolution
// ---------------------------------------------------------------------------

/// A campaign joined with the display names of its influencer and brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedCampaign {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub influencer_name: String,
    pub influencer_username: String,
    pub brand_name: String,
}

/// `(name, username)` of the influencer, or `("Unknown", "")` on a miss.
#[must_use]
pub fn resolve_influencer(influencers: &[Influencer], id: EntityId) -> (&str, &str) {
    influencers
        .iter()
        .find(|i| i.id == id)
        .map_or((UNKNOWN, ""), |i| (i.name.as_str(), i.username.as_str()))
}

#[must_use]
pub fn resolve_brand_name(brands: &[Brand], id: EntityId) -> &str {
    brands
        .iter()
        .find(|b| b.id == id)
        .map_or(UNKNOWN, |b| b.name.as_str())
}

/// Joins every campaign with its display names. Never fails: dangling ids
/// resolve to [`UNKNOWN`].
#[must_use]
pub fn resolve_campaigns(
    campaigns: &[Campaign],
    influencers: &[Influencer],
    brands: &[Brand],
) -> Vec<ResolvedCampaign> {
    campaigns
        .iter()
        .map(|c| {
            let (influencer_name, influencer_username) =
                resolve_influencer(influencers, c.influencer_id);
            ResolvedCampaign {
                campaign: c.clone(),
                influencer_name: influencer_name.to_string(),
                influencer_username: influencer_username.to_string(),
                brand_name: resolve_brand_name(brands, c.brand_id).to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "campaigns_test.rs"]
mod tests;
