#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use collabdesk_core::{
    Brand, BrandPatch, CampaignStatus, CampaignType, EntityId, EntityService, InfluencerStatus,
    NewBrand, NewCampaign, NewInfluencer, PaymentStatus, Platform, ServiceError,
};
use collabdesk_store::Store;
use rust_decimal::Decimal;

pub fn influencer(name: &str, category: &str) -> NewInfluencer {
    NewInfluencer {
        name: name.to_string(),
        username: format!("@{}", name.to_lowercase()),
        email: "someone@example.com".to_string(),
        phone: "+1 555 0100".to_string(),
        platform: Platform::Instagram,
        followers: 125_000,
        engagement_rate: 4.2,
        category: category.to_string(),
        location: "Los Angeles".to_string(),
        status: InfluencerStatus::Active,
        profile_image: "https://example.com/p.jpg".to_string(),
    }
}

pub fn brand(name: &str, owner: &str) -> NewBrand {
    NewBrand {
        name: name.to_string(),
        owner_name: owner.to_string(),
        email: "owner@example.com".to_string(),
        phone: "+1 555 0199".to_string(),
        industry: "Sportswear".to_string(),
        logo: "https://example.com/logo.png".to_string(),
    }
}

pub fn campaign(influencer_id: EntityId, brand_id: EntityId) -> NewCampaign {
    NewCampaign {
        influencer_id,
        brand_id,
        name: "Spring Launch".to_string(),
        amount: Decimal::new(11_000, 0),
        shoot_date: NaiveDate::from_ymd_opt(2024, 7, 1).expect("valid date"),
        notes: None,
        approved: false,
        post_link: None,
        paid_amount: Decimal::ZERO,
        paid_date: None,
        status: CampaignStatus::Draft,
        campaign_type: CampaignType::Paid,
        payment_status: PaymentStatus::Pending,
    }
}

/// Brand service over a real store that can be switched to fail every call.
pub struct Flaky {
    pub store: Arc<Store>,
    failing: AtomicBool,
}

impl Flaky {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            failing: AtomicBool::new(false),
        }
    }

    pub fn fail(&self, on: bool) {
        self.failing.store(on, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), ServiceError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(ServiceError::Unavailable("backend offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EntityService<Brand> for Flaky {
    async fn list(&self) -> Result<Vec<Brand>, ServiceError> {
        self.check()?;
        EntityService::<Brand>::list(&self.store).await
    }

    async fn add(&self, new: NewBrand) -> Result<Brand, ServiceError> {
        self.check()?;
        EntityService::<Brand>::add(&self.store, new).await
    }

    async fn update(&self, id: EntityId, patch: BrandPatch) -> Result<Brand, ServiceError> {
        self.check()?;
        EntityService::<Brand>::update(&self.store, id, patch).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), ServiceError> {
        self.check()?;
        EntityService::<Brand>::delete(&self.store, id).await
    }
}
