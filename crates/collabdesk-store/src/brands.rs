//! Store operations for the brands collection.

use collabdesk_core::{Brand, BrandPatch, EntityId, NewBrand};

use crate::{Store, StoreError};

impl Store {
    pub async fn list_brands(&self) -> Vec<Brand> {
        self.simulate_latency().await;
        self.list_rows().await
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no brand has `id`.
    pub async fn get_brand(&self, id: EntityId) -> Result<Brand, StoreError> {
        self.get(id).await
    }

    pub async fn add_brand(&self, new: NewBrand) -> Brand {
        self.simulate_latency().await;
        self.insert_row::<Brand>(new).await
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no brand has `id`.
    pub async fn update_brand(&self, id: EntityId, patch: BrandPatch) -> Result<Brand, StoreError> {
        self.simulate_latency().await;
        self.patch_row::<Brand>(id, patch).await
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no brand has `id`.
    pub async fn delete_brand(&self, id: EntityId) -> Result<(), StoreError> {
        self.simulate_latency().await;
        self.remove_row::<Brand>(id).await
    }
}
