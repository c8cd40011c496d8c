#[macro_use]
mod labels;

pub mod app_config;
pub mod brands;
pub mod campaigns;
pub mod config;
pub mod dashboard;
pub mod entity;
pub mod influencers;
pub mod notifications;
pub mod search;
pub mod seed;
pub mod service;
pub mod validate;

pub use app_config::{AppConfig, Environment};
pub use brands::{Brand, BrandPatch, NewBrand};
pub use campaigns::{
    resolve_brand_name, resolve_campaigns, resolve_influencer, Campaign, CampaignPatch,
    CampaignStatus, CampaignType, NewCampaign, PaymentStatus, ResolvedCampaign, UNKNOWN,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use dashboard::{summarize, DashboardStats, DashboardSummary};
pub use entity::{Entity, EntityId, EntityKind};
pub use influencers::{Influencer, InfluencerPatch, InfluencerStatus, NewInfluencer, Platform};
pub use notifications::{NewNotification, Notification, NotificationKind};
pub use search::{filter, Searchable};
pub use seed::{load_seed, SeedData};
pub use service::{EntityService, ServiceError};
pub use validate::{Validate, ValidationErrors};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {kind}: '{value}'")]
    InvalidLabel { kind: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read seed file {path}: {source}")]
    SeedFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse seed file: {0}")]
    SeedFileParse(#[from] serde_yaml::Error),

    #[error("seed validation failed: {0}")]
    Validation(String),
}
