use chrono::NaiveDate;
use collabdesk_core::{
    CampaignStatus, CampaignType, EntityId, InfluencerStatus, NewBrand, NewCampaign,
    NewInfluencer, PaymentStatus, Platform,
};
use rust_decimal::Decimal;

pub fn sarah() -> NewInfluencer {
    NewInfluencer {
        name: "Sarah".to_string(),
        username: "@sarah".to_string(),
        email: "sarah@example.com".to_string(),
        phone: "+1 555 0100".to_string(),
        platform: Platform::Instagram,
        followers: 125_000,
        engagement_rate: 4.2,
        category: "Fitness".to_string(),
        location: "Los Angeles".to_string(),
        status: InfluencerStatus::Active,
        profile_image: "https://example.com/sarah.jpg".to_string(),
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
