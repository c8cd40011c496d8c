use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};

use crate::validate::Validate;

/// Store-assigned record identifier. Never reused within a collection.
pub type EntityId = u64;

labelled_enum! {
    /// Which collection a record belongs to.
    pub enum EntityKind {
        Influencer => "influencer",
        Brand => "brand",
        Campaign => "campaign",
        Notification => "notification",
    }
}

/// A record type managed through the CRUD contract.
///
/// `New` is the create form (every field except `id`); `Patch` carries only
/// the fields an update overwrites. A full create form converts into a patch
/// that overwrites everything, which is how edit modals submit.
pub trait Entity:
    Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: EntityKind;

    type New: Validate + Clone + std::fmt::Debug + Serialize + DeserializeOwned + Send + Sync + 'static;
    type Patch: Validate
        + From<Self::New>
        + Default
        + Clone
        + std::fmt::Debug
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static;

    fn id(&self) -> EntityId;

    /// Build the stored record from a create form and a freshly assigned id.
    fn from_new(id: EntityId, new: Self::New) -> Self;

    /// Shallow merge: only fields present in `patch` are overwritten.
    fn apply(&mut self, patch: Self::Patch);

    /// The create form pre-filled from this record (edit modal contents).
    fn to_new(&self) -> Self::New;
}

/// Distinguishes an absent field (`None`) from an explicit `null`
/// (`Some(None)`) in patch bodies.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
