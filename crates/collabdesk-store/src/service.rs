//! [`EntityService`] over the in-memory store.
//!
//! Forms and patches are validated here before anything is written, so every
//! caller of the generic contract gets the same field errors.

use async_trait::async_trait;
use collabdesk_core::{
    Brand, Campaign, Entity, EntityId, EntityService, Influencer, ServiceError, Validate,
};

use crate::Store;

fn validated<T: Validate>(form: T) -> Result<T, ServiceError> {
    form.validate().map_err(ServiceError::Validation)?;
    Ok(form)
}

#[async_trait]
impl EntityService<Influencer> for Store {
    async fn list(&self) -> Result<Vec<Influencer>, ServiceError> {
        Ok(self.list_influencers().await)
    }

    async fn add(&self, new: <Influencer as Entity>::New) -> Result<Influencer, ServiceError> {
        Ok(self.add_influencer(validated(new)?).await)
    }

    async fn update(
        &self,
        id: EntityId,
        patch: <Influencer as Entity>::Patch,
    ) -> Result<Influencer, ServiceError> {
        Ok(self.update_influencer(id, validated(patch)?).await?)
    }

    async fn delete(&self, id: EntityId) -> Result<(), ServiceError> {
        Ok(self.delete_influencer(id).await?)
    }
}

#[async_trait]
impl EntityService<Brand> for Store {
    async fn list(&self) -> Result<Vec<Brand>, ServiceError> {
        Ok(self.list_brands().await)
    }

    async fn add(&self, new: <Brand as Entity>::New) -> Result<Brand, ServiceError> {
        Ok(self.add_brand(validated(new)?).await)
    }

    async fn update(
        &self,
        id: EntityId,
        patch: <Brand as Entity>::Patch,
    ) -> Result<Brand, ServiceError> {
        Ok(self.update_brand(id, validated(patch)?).await?)
    }

    async fn delete(&self, id: EntityId) -> Result<(), ServiceError> {
        Ok(self.delete_brand(id).await?)
    }
}

#[async_trait]
impl EntityService<Campaign> for Store {
    async fn list(&self) -> Result<Vec<Campaign>, ServiceError> {
        Ok(self.list_campaigns().await)
    }

    async fn add(&self, new: <Campaign as Entity>::New) -> Result<Campaign, ServiceError> {
        Ok(self.add_campaign(validated(new)?).await?)
    }

    async fn update(
        &self,
        id: EntityId,
        patch: <Campaign as Entity>::Patch,
    ) -> Result<Campaign, ServiceError> {
        Ok(self.update_campaign(id, validated(patch)?).await?)
    }

    async fn delete(&self, id: EntityId) -> Result<(), ServiceError> {
        Ok(self.delete_campaign(id).await?)
    }
}
