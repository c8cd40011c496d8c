use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityId, EntityKind};
use crate::validate::{Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: EntityId,
    pub name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub industry: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBrand {
    pub name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub industry: String,
    pub logo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BrandPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl From<NewBrand> for BrandPatch {
    fn from(new: NewBrand) -> Self {
        Self {
            name: Some(new.name),
            owner_name: Some(new.owner_name),
            email: Some(new.email),
            phone: Some(new.phone),
            industry: Some(new.industry),
            logo: Some(new.logo),
        }
    }
}

impl Entity for Brand {
    const KIND: EntityKind = EntityKind::Brand;

    type New = NewBrand;
    type Patch = BrandPatch;

    fn id(&self) -> EntityId {
        self.id
    }

    fn from_new(id: EntityId, new: NewBrand) -> Self {
        Self {
            id,
            name: new.name,
            owner_name: new.owner_name,
            email: new.email,
            phone: new.phone,
            industry: new.industry,
            logo: new.logo,
        }
    }

    fn apply(&mut self, patch: BrandPatch) {
        if let Some(v) = patch.name {
            self.name = v;
        }
        if let Some(v) = patch.owner_name {
            self.owner_name = v;
        }
        if let Some(v) = patch.email {
            self.email = v;
        }
        if let Some(v) = patch.phone {
            self.phone = v;
        }
        if let Some(v) = patch.industry {
            self.industry = v;
        }
        if let Some(v) = patch.logo {
            self.logo = v;
        }
    }

    fn to_new(&self) -> NewBrand {
        NewBrand {
            name: self.name.clone(),
            owner_name: self.owner_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            industry: self.industry.clone(),
            logo: self.logo.clone(),
        }
    }
}

impl Validate for NewBrand {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", &self.name, "Brand name is required");
        errors.require("ownerName", &self.owner_name, "Owner name is required");
        errors.email("email", &self.email);
        errors.require("phone", &self.phone, "Phone is required");
        errors.require("industry", &self.industry, "Industry is required");
        errors.url("logo", &self.logo, "Logo URL is required");
        errors.into_result()
    }
}

impl Validate for BrandPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(ref v) = self.name {
            errors.require("name", v, "Brand name is required");
        }
        if let Some(ref v) = self.owner_name {
            errors.require("ownerName", v, "Owner name is required");
        }
        if let Some(ref v) = self.email {
            errors.email("email", v);
        }
        if let Some(ref v) = self.phone {
            errors.require("phone", v, "Phone is required");
        }
        if let Some(ref v) = self.industry {
            errors.require("industry", v, "Industry is required");
        }
        if let Some(ref v) = self.logo {
            errors.url("logo", v, "Logo URL is required");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yff() -> NewBrand {
        NewBrand {
            name: "YFF (Borivali)".to_string(),
            owner_name: "Rajesh Kumar".to_string(),
            email: "rajesh@yff.com".to_string(),
            phone: "+91 11 2345 6789".to_string(),
            industry: "Food & Beverage".to_string(),
            logo: "https://images.example.com/yff.jpeg".to_string(),
        }
    }

    #[test]
    fn valid_brand_passes() {
        assert!(yff().validate().is_ok());
    }

    #[test]
    fn missing_owner_and_logo() {
        let mut form = yff();
        form.owner_name = String::new();
        form.logo = String::new();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("ownerName"), Some("Owner name is required"));
        assert_eq!(errors.get("logo"), Some("Logo URL is required"));
    }

    #[test]
    fn patch_with_bad_email_fails() {
        let patch = BrandPatch {
            email: Some("priya@".to_string()),
            ..Default::default()
        };
        assert_eq!(
            patch.validate().unwrap_err().get("email"),
            Some("Invalid email")
        );
    }

    #[test]
    fn deserializes_camel_case_body() {
        let body = serde_json::json!({
            "name": "Nike",
            "ownerName": "Phil",
            "email": "phil@nike.com",
            "phone": "555",
            "industry": "Apparel",
            "logo": "https://nike.com/logo.png"
        });
        let form: NewBrand = serde_json::from_value(body).expect("parse");
        assert_eq!(form.owner_name, "Phil");
    }
}
