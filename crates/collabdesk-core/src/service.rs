//! The CRUD contract every data backend implements.
//!
//! The in-memory store implements it directly; the CLI implements it over
//! HTTP. Page controllers only ever talk to this trait.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::entity::{Entity, EntityId, EntityKind};
use crate::validate::ValidationErrors;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: EntityId },

    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{field} references missing record {id}")]
    DanglingReference { field: String, id: EntityId },

    #[error("service unavailable: {0}")]
    Unavailable(String),

    #[error("request timed out")]
    Timeout,
}

/// Asynchronous list/add/update/delete over one entity collection.
#[async_trait]
pub trait EntityService<E: Entity>: Send + Sync {
    /// Snapshot of the collection in insertion order.
    async fn list(&self) -> Result<Vec<E>, ServiceError>;

    /// Stores a new record under a freshly assigned id.
    async fn add(&self, new: E::New) -> Result<E, ServiceError>;

    /// Overwrites the fields present in `patch`; `NotFound` if `id` is absent.
    async fn update(&self, id: EntityId, patch: E::Patch) -> Result<E, ServiceError>;

    /// Removes the record; `NotFound` if `id` is absent.
    async fn delete(&self, id: EntityId) -> Result<(), ServiceError>;
}

#[async_trait]
impl<E, S> EntityService<E> for Arc<S>
where
    E: Entity,
    S: EntityService<E> + ?Sized,
{
    async fn list(&self) -> Result<Vec<E>, ServiceError> {
        (**self).list().await
    }

    async fn add(&self, new: E::New) -> Result<E, ServiceError> {
        (**self).add(new).await
    }

    async fn update(&self, id: EntityId, patch: E::Patch) -> Result<E, ServiceError> {
        (**self).update(id, patch).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), ServiceError> {
        (**self).delete(id).await
    }
}
