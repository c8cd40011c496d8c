//! In-memory entity store: the single mutation gateway for influencers,
//! brands, campaigns and notifications.
//!
//! Every call waits a fixed, configurable latency before touching the
//! collections so callers see the same timing as a remote backend would
//! give them. Writes are last-write-wins; there are no transactions.

use std::time::Duration;

use collabdesk_core::{AppConfig, EntityId, EntityKind, ServiceError};
use thiserror::Error;
use tokio::sync::RwLock;

mod brands;
mod campaigns;
mod influencers;
mod notifications;
mod seed;
mod service;
mod table;

pub use table::{Stored, Table};

use collabdesk_core::{Brand, Campaign, Entity, Influencer};
use notifications::NotificationFeed;

#[derive(Debug, Clone, Copy, Default)]
pub struct StoreConfig {
    /// Delay applied before every operation. Zero disables it.
    pub latency: Duration,
    /// When set, campaigns must reference an existing influencer and brand.
    pub enforce_campaign_refs: bool,
}

impl StoreConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.store_latency_ms),
            enforce_campaign_refs: config.enforce_campaign_refs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: EntityId },

    #[error("{field} references missing record {id}")]
    DanglingReference { field: &'static str, id: EntityId },
}

impl StoreError {
    pub(crate) fn not_found<E: Entity>(id: EntityId) -> Self {
        Self::NotFound { kind: E::KIND, id }
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { kind, id } => ServiceError::NotFound { kind, id },
            StoreError::DanglingReference { field, id } => ServiceError::DanglingReference {
                field: field.to_string(),
                id,
            },
        }
    }
}

/// Record counts per collection, used by health reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreCounts {
    pub influencers: usize,
    pub brands: usize,
    pub campaigns: usize,
    pub notifications: usize,
}

pub struct Store {
    config: StoreConfig,
    influencers: RwLock<Table<Influencer>>,
    brands: RwLock<Table<Brand>>,
    campaigns: RwLock<Table<Campaign>>,
    notifications: RwLock<NotificationFeed>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl Store {
    /// An empty store.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            influencers: RwLock::new(Table::new()),
            brands: RwLock::new(Table::new()),
            campaigns: RwLock::new(Table::new()),
            notifications: RwLock::new(NotificationFeed::default()),
        }
    }

    pub async fn counts(&self) -> StoreCounts {
        StoreCounts {
            influencers: self.influencers.read().await.len(),
            brands: self.brands.read().await.len(),
            campaigns: self.campaigns.read().await.len(),
            notifications: self.notifications.read().await.len(),
        }
    }

    /// Looks up one record of any stored kind.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no record of that kind has `id`.
    pub async fn get<E: Stored>(&self, id: EntityId) -> Result<E, StoreError> {
        self.simulate_latency().await;
        self.get_row(id).await
    }

    async fn simulate_latency(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }

    // -----------------------------------------------------------------------
    // Generic operations over one table. Latency is applied by the typed
    // public methods, once per call.
    // -----------------------------------------------------------------------

    async fn list_rows<E: Stored>(&self) -> Vec<E> {
        E::table(self).read().await.snapshot()
    }

    async fn get_row<E: Stored>(&self, id: EntityId) -> Result<E, StoreError> {
        E::table(self)
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::not_found::<E>(id))
    }

    async fn insert_row<E: Stored>(&self, new: E::New) -> E {
        let record = E::table(self).write().await.insert(new);
        tracing::debug!(kind = %E::KIND, id = record.id(), "record added");
        record
    }

    async fn patch_row<E: Stored>(&self, id: EntityId, patch: E::Patch) -> Result<E, StoreError> {
        let updated = E::table(self)
            .write()
            .await
            .patch(id, patch)
            .ok_or_else(|| StoreError::not_found::<E>(id))?;
        tracing::debug!(kind = %E::KIND, id, "record updated");
        Ok(updated)
    }

    async fn remove_row<E: Stored>(&self, id: EntityId) -> Result<(), StoreError> {
        E::table(self)
            .write()
            .await
            .remove(id)
            .ok_or_else(|| StoreError::not_found::<E>(id))?;
        tracing::debug!(kind = %E::KIND, id, "record deleted");
        Ok(())
    }
}
