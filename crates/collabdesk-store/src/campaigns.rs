//! Store operations for the campaigns collection.
//!
//! Campaigns point at an influencer and a brand by id. By default those ids
//! are not checked and a miss shows up as "Unknown" when the campaign is
//! displayed. With [`StoreConfig::enforce_campaign_refs`] set, add and update
//! reject ids that do not exist and write nothing.
//!
//! Locks are always taken in the order influencers, brands, campaigns,
//! notifications.
//!
//! [`StoreConfig::enforce_campaign_refs`]: crate::StoreConfig::enforce_campaign_refs

use collabdesk_core::{
    resolve_brand_name, resolve_influencer, Brand, Campaign, CampaignPatch, EntityId, Influencer,
    NewCampaign, NewNotification,
};

use crate::{Store, StoreError, Table};

fn check_refs(
    influencers: &Table<Influencer>,
    brands: &Table<Brand>,
    influencer_id: Option<EntityId>,
    brand_id: Option<EntityId>,
) -> Result<(), StoreError> {
    if let Some(id) = influencer_id.filter(|id| !influencers.contains(*id)) {
        return Err(StoreError::DanglingReference {
            field: "influencerId",
            id,
        });
    }
    if let Some(id) = brand_id.filter(|id| !brands.contains(*id)) {
        return Err(StoreError::DanglingReference {
            field: "brandId",
            id,
        });
    }
    Ok(())
}

impl Store {
    pub async fn list_campaigns(&self) -> Vec<Campaign> {
        self.simulate_latency().await;
        self.list_rows().await
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no campaign has `id`.
    pub async fn get_campaign(&self, id: EntityId) -> Result<Campaign, StoreError> {
        self.get(id).await
    }

    /// Stores the campaign and pushes an unread "New Campaign Created"
    /// notification naming its influencer and brand.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DanglingReference`] when reference enforcement is
    /// on and the influencer or brand does not exist.
    pub async fn add_campaign(&self, new: NewCampaign) -> Result<Campaign, StoreError> {
        self.simulate_latency().await;

        let influencers = self.influencers.read().await;
        let brands = self.brands.read().await;
        if self.config.enforce_campaign_refs {
            check_refs(
                &influencers,
                &brands,
                Some(new.influencer_id),
                Some(new.brand_id),
            )?;
        }

        let campaign = self.campaigns.write().await.insert(new);
        tracing::debug!(id = campaign.id, "campaign added");

        let influencer_rows = influencers.snapshot();
        let brand_rows = brands.snapshot();
        let (influencer_name, _) = resolve_influencer(&influencer_rows, campaign.influencer_id);
        let notice = NewNotification::campaign_created(
            influencer_name,
            resolve_brand_name(&brand_rows, campaign.brand_id),
        );
        drop(brands);
        drop(influencers);
        self.push_notification(notice).await;

        Ok(campaign)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no campaign has `id`, or
    /// [`StoreError::DanglingReference`] when enforcement is on and the patch
    /// points at a missing influencer or brand.
    pub async fn update_campaign(
        &self,
        id: EntityId,
        patch: CampaignPatch,
    ) -> Result<Campaign, StoreError> {
        self.simulate_latency().await;

        let influencers = self.influencers.read().await;
        let brands = self.brands.read().await;
        let mut campaigns = self.campaigns.write().await;
        if !campaigns.contains(id) {
            return Err(StoreError::not_found::<Campaign>(id));
        }
        if self.config.enforce_campaign_refs {
            check_refs(&influencers, &brands, patch.influencer_id, patch.brand_id)?;
        }

        let updated = campaigns
            .patch(id, patch)
            .ok_or_else(|| StoreError::not_found::<Campaign>(id))?;
        tracing::debug!(id, "campaign updated");
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no campaign has `id`.
    pub async fn delete_campaign(&self, id: EntityId) -> Result<(), StoreError> {
        self.simulate_latency().await;
        self.remove_row::<Campaign>(id).await
    }
}
