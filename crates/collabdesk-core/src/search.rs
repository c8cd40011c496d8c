//! Client-side list filtering.
//!
//! A record matches when any of its searchable fields contains the term as
//! a case-insensitive substring. An empty (or whitespace-only) term matches
//! everything.

use crate::brands::Brand;
use crate::campaigns::ResolvedCampaign;
use crate::influencers::Influencer;

pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        needle.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl Searchable for Influencer {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str()]
    }
}

impl Searchable for Brand {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.owner_name.as_str()]
    }
}

impl Searchable for ResolvedCampaign {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.influencer_name.as_str(), self.brand_name.as_str()]
    }
}

/// Records matching `term`, in their original order.
#[must_use]
pub fn filter<'a, T: Searchable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| item.matches(term)).collect()
}
