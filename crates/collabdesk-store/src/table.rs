use collabdesk_core::{Brand, Campaign, Entity, EntityId, Influencer};
use tokio::sync::RwLock;

use crate::Store;

/// One entity collection in insertion order plus its id counter.
///
/// Ids start at 1 and are never handed out twice, even after deletes.
#[derive(Debug)]
pub struct Table<E> {
    rows: Vec<E>,
    next_id: EntityId,
}

impl<E> Default for Table<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Table<E> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }
}

impl<E: Entity> Table<E> {
    #[must_use]
    pub fn snapshot(&self) -> Vec<E> {
        self.rows.clone()
    }

    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.rows.iter().find(|row| row.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    pub fn insert(&mut self, new: E::New) -> E {
        let id = self.next_id;
        self.next_id += 1;
        let record = E::from_new(id, new);
        self.rows.push(record.clone());
        record
    }

    /// Merges `patch` into the row with `id`; `None` leaves the table untouched.
    pub fn patch(&mut self, id: EntityId, patch: E::Patch) -> Option<E> {
        let row = self.rows.iter_mut().find(|row| row.id() == id)?;
        row.apply(patch);
        Some(row.clone())
    }

    pub fn remove(&mut self, id: EntityId) -> Option<E> {
        let pos = self.rows.iter().position(|row| row.id() == id)?;
        Some(self.rows.remove(pos))
    }
}

/// An entity kind with a table inside [`Store`].
pub trait Stored: Entity {
    #[doc(hidden)]
    fn table(store: &Store) -> &RwLock<Table<Self>>;
}

impl Stored for Influencer {
    fn table(store: &Store) -> &RwLock<Table<Self>> {
        &store.influencers
    }
}

impl Stored for Brand {
    fn table(store: &Store) -> &RwLock<Table<Self>> {
        &store.brands
    }
}

impl Stored for Campaign {
    fn table(store: &Store) -> &RwLock<Table<Self>> {
        &store.campaigns
    }
}
