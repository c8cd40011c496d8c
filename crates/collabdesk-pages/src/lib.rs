//! Page controllers: the state behind each list/create/edit/delete screen.
//!
//! A controller owns a cached list, a modal slot and an error banner, and
//! drives any [`EntityService`](collabdesk_core::EntityService). It never
//! touches the store's collections directly; after every successful mutation
//! it re-lists.

mod campaigns;
mod controller;

pub use campaigns::CampaignPage;
pub use controller::{Modal, PageController, PageState};

use collabdesk_core::{EntityId, EntityKind, ServiceError, ValidationErrors};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("another dialog is already open")]
    ModalOpen,

    #[error("no {0} dialog is open")]
    NoDialog(&'static str),

    #[error("{kind} {id} is not in the loaded list")]
    NotLoaded { kind: EntityKind, id: EntityId },

    #[error("form has errors: {0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Service(#[from] ServiceError),
}
