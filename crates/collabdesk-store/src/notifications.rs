//! The notifications feed.
//!
//! Notifications are not edited through the CRUD contract; they are pushed by
//! the store itself (or loaded from seed data) and only ever flipped to read.

use chrono::Utc;
use collabdesk_core::{EntityId, EntityKind, NewNotification, Notification};

use crate::{Store, StoreError};

#[derive(Debug)]
pub(crate) struct NotificationFeed {
    rows: Vec<Notification>,
    next_id: EntityId,
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl NotificationFeed {
    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub(crate) fn push(&mut self, new: NewNotification) -> Notification {
        let notification = Notification {
            id: self.next_id,
            kind: new.kind,
            title: new.title,
            message: new.message,
            read: new.read,
            created_at: new.created_at.unwrap_or_else(Utc::now),
        };
        self.next_id += 1;
        self.rows.push(notification.clone());
        notification
    }
}

impl Store {
    /// Every notification, newest first. Ties keep insertion order.
    pub async fn list_notifications(&self) -> Vec<Notification> {
        self.simulate_latency().await;
        let mut rows = self.notifications.read().await.rows.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        rows
    }

    pub async fn unread_notification_count(&self) -> usize {
        self.notifications
            .read()
            .await
            .rows
            .iter()
            .filter(|n| !n.read)
            .count()
    }

    pub(crate) async fn push_notification(&self, new: NewNotification) -> Notification {
        let notification = self.notifications.write().await.push(new);
        tracing::debug!(id = notification.id, kind = %notification.kind, "notification pushed");
        notification
    }

    /// Marking an already-read notification is a no-op that still succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no notification has `id`.
    pub async fn mark_notification_read(&self, id: EntityId) -> Result<Notification, StoreError> {
        self.simulate_latency().await;
        let mut feed = self.notifications.write().await;
        let row = feed
            .rows
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotFound {
                kind: EntityKind::Notification,
                id,
            })?;
        row.read = true;
        Ok(row.clone())
    }

    /// Returns how many notifications changed from unread to read.
    pub async fn mark_all_notifications_read(&self) -> usize {
        self.simulate_latency().await;
        let mut feed = self.notifications.write().await;
        let mut changed = 0;
        for row in feed.rows.iter_mut().filter(|n| !n.read) {
            row.read = true;
            changed += 1;
        }
        if changed > 0 {
            tracing::info!(changed, "marked all notifications read");
        }
        changed
    }
}
