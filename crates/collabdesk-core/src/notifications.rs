use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

labelled_enum! {
    pub enum NotificationKind {
        Payment => "payment",
        Draft => "draft",
        Overdue => "overdue",
        Campaign => "campaign",
    }
}

/// An activity notice shown on the notifications page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: EntityId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    /// Defaults to the time the store accepts it.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewNotification {
    /// Unread "New Campaign Created" notice for a freshly added campaign.
    #[must_use]
    pub fn campaign_created(influencer_name: &str, brand_name: &str) -> Self {
        Self {
            kind: NotificationKind::Campaign,
            title: "New Campaign Created".to_string(),
            message: format!("{influencer_name} assigned to new {brand_name} campaign"),
            read: false,
            created_at: None,
        }
    }
}
