//! Initial dataset loaded into the store at startup.

use std::path::Path;

use serde::Deserialize;

use crate::brands::NewBrand;
use crate::campaigns::NewCampaign;
use crate::influencers::NewInfluencer;
use crate::notifications::NewNotification;
use crate::validate::Validate;
use crate::ConfigError;

/// Seed file contents.
///
/// Campaign `influencerId` / `brandId` values are 1-based positions in the
/// `influencers` / `brands` lists of the same file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SeedData {
    pub influencers: Vec<NewInfluencer>,
    pub brands: Vec<NewBrand>,
    pub campaigns: Vec<NewCampaign>,
    pub notifications: Vec<NewNotification>,
}

/// Load and validate the seed file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_seed(path: &Path) -> Result<SeedData, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SeedFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_seed(&content)
}

/// Parse and validate seed YAML.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or a record is invalid.
pub fn parse_seed(content: &str) -> Result<SeedData, ConfigError> {
    let seed: SeedData = serde_yaml::from_str(content)?;
    validate_seed(&seed)?;
    Ok(seed)
}

fn validate_seed(seed: &SeedData) -> Result<(), ConfigError> {
    for (i, influencer) in seed.influencers.iter().enumerate() {
        influencer.validate().map_err(|e| {
            ConfigError::Validation(format!("influencer #{} ('{}'): {e}", i + 1, influencer.name))
        })?;
    }

    for (i, brand) in seed.brands.iter().enumerate() {
        brand.validate().map_err(|e| {
            ConfigError::Validation(format!("brand #{} ('{}'): {e}", i + 1, brand.name))
        })?;
    }

    for (i, campaign) in seed.campaigns.iter().enumerate() {
        campaign.validate().map_err(|e| {
            ConfigError::Validation(format!("campaign #{} ('{}'): {e}", i + 1, campaign.name))
        })?;

        let in_range = |position: u64, len: usize| {
            usize::try_from(position).is_ok_and(|p| (1..=len).contains(&p))
        };
        if !in_range(campaign.influencer_id, seed.influencers.len()) {
            return Err(ConfigError::Validation(format!(
                "campaign #{} ('{}') references influencer #{} which is not in the seed file",
                i + 1,
                campaign.name,
                campaign.influencer_id
            )));
        }
        if !in_range(campaign.brand_id, seed.brands.len()) {
            return Err(ConfigError::Validation(format!(
                "campaign #{} ('{}') references brand #{} which is not in the seed file",
                i + 1,
                campaign.name,
                campaign.brand_id
            )));
        }
    }

    for (i, notification) in seed.notifications.iter().enumerate() {
        if notification.title.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "notification #{} has an empty title",
                i + 1
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r"
influencers:
  - name: mumbaicityexplore
    username: '@mumbaicityexplore'
    email: mumbai@example.com
    phone: '+91 98765 43210'
    platform: Instagram
    followers: 125000
    engagementRate: 4.2
    category: Travel
    location: Mumbai, India
    status: active
    profileImage: https://images.example.com/1.jpeg
brands:
  - name: YFF (Borivali)
    ownerName: Rajesh Kumar
    email: rajesh@yff.com
    phone: '+91 11 2345 6789'
    industry: Food & Beverage
    logo: https://images.example.com/yff.jpeg
campaigns:
  - influencerId: 1
    brandId: 1
    name: Summer Food Festival
    amount: 11000
    shootDate: 2024-07-01
    approved: true
    paidAmount: 11000
    status: Posted
    type: Collab
    paymentStatus: Paid
";

    #[test]
    fn parses_minimal_seed() {
        let seed = parse_seed(MINIMAL).expect("valid seed");
        assert_eq!(seed.influencers.len(), 1);
        assert_eq!(seed.brands.len(), 1);
        assert_eq!(seed.campaigns.len(), 1);
        assert!(seed.notifications.is_empty());
    }

    #[test]
    fn empty_document_is_empty_seed() {
        let seed = parse_seed("{}").expect("valid seed");
        assert!(seed.influencers.is_empty());
    }

    #[test]
    fn rejects_out_of_range_brand_position() {
        let broken = MINIMAL.replace("brandId: 1", "brandId: 2");
        let err = parse_seed(&broken).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("brand #2")),
            "got: {err:?}"
        );
    }

    #[test]
    fn rejects_invalid_record() {
        let broken = MINIMAL.replace("rajesh@yff.com", "rajesh");
        let err = parse_seed(&broken).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("Invalid email")),
            "got: {err:?}"
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_seed(Path::new("/definitely/not/here/seed.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::SeedFileIo { .. }));
    }

    #[test]
    fn repository_seed_file_is_valid() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/seed.yaml");
        let seed = load_seed(&path).expect("config/seed.yaml should be valid");
        assert_eq!(seed.influencers.len(), 3);
        assert_eq!(seed.brands.len(), 2);
        assert_eq!(seed.campaigns.len(), 3);
        assert_eq!(seed.notifications.len(), 5);
    }
}
