//! Store operations for the influencers collection.

use collabdesk_core::{EntityId, Influencer, InfluencerPatch, NewInfluencer};

use crate::{Store, StoreError};

impl Store {
    /// All influencers in insertion order.
    pub async fn list_influencers(&self) -> Vec<Influencer> {
        self.simulate_latency().await;
        self.list_rows().await
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no influencer has `id`.
    pub async fn get_influencer(&self, id: EntityId) -> Result<Influencer, StoreError> {
        self.get(id).await
    }

    pub async fn add_influencer(&self, new: NewInfluencer) -> Influencer {
        self.simulate_latency().await;
        self.insert_row::<Influencer>(new).await
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no influencer has `id`.
    pub async fn update_influencer(
        &self,
        id: EntityId,
        patch: InfluencerPatch,
    ) -> Result<Influencer, StoreError> {
        self.simulate_latency().await;
        self.patch_row::<Influencer>(id, patch).await
    }

    /// Campaigns that reference the influencer are left as they are.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no influencer has `id`.
    pub async fn delete_influencer(&self, id: EntityId) -> Result<(), StoreError> {
        self.simulate_latency().await;
        self.remove_row::<Influencer>(id).await
    }
}
