//! Building a store from seed data.

use collabdesk_core::{Brand, Campaign, EntityId, Influencer, SeedData};

use crate::{Store, StoreConfig};

impl Store {
    /// A store pre-loaded with `seed`.
    ///
    /// Records are inserted in file order through the regular insert path, so
    /// ids come from the collection counters. Campaign `influencerId` and
    /// `brandId` are 1-based positions in the seed lists and are rewritten to
    /// the ids those records were given. Seeding skips the simulated latency
    /// and does not push "New Campaign Created" notifications.
    pub async fn seeded(config: StoreConfig, seed: SeedData) -> Self {
        let store = Self::new(config);

        let mut influencer_ids = Vec::with_capacity(seed.influencers.len());
        for new in seed.influencers {
            influencer_ids.push(store.insert_row::<Influencer>(new).await.id);
        }

        let mut brand_ids = Vec::with_capacity(seed.brands.len());
        for new in seed.brands {
            brand_ids.push(store.insert_row::<Brand>(new).await.id);
        }

        for mut new in seed.campaigns {
            new.influencer_id = remap(&influencer_ids, new.influencer_id);
            new.brand_id = remap(&brand_ids, new.brand_id);
            store.insert_row::<Campaign>(new).await;
        }

        for new in seed.notifications {
            store.push_notification(new).await;
        }

        let counts = store.counts().await;
        tracing::info!(
            influencers = counts.influencers,
            brands = counts.brands,
            campaigns = counts.campaigns,
            notifications = counts.notifications,
            "store seeded"
        );
        store
    }
}

/// Position → assigned id. Out-of-range positions pass through unchanged and
/// resolve to "Unknown" later.
fn remap(ids: &[EntityId], position: EntityId) -> EntityId {
    usize::try_from(position)
        .ok()
        .and_then(|p| p.checked_sub(1))
        .and_then(|i| ids.get(i).copied())
        .unwrap_or(position)
}
