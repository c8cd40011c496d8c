//! Notification feed handlers.
//!
//! - `GET  /api/v1/notifications`           newest first, with unread count
//! - `POST /api/v1/notifications/{id}/read` mark one read
//! - `POST /api/v1/notifications/read-all`  mark every unread one read

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension, Json,
};
use collabdesk_core::{EntityId, Notification};
use serde::Serialize;

use crate::middleware::RequestId;

use super::records::path_id;
use super::{map_service_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NotificationFeed {
    pub items: Vec<Notification>,
    pub unread_count: usize,
}

#[derive(Debug, Serialize)]
pub(super) struct MarkedRead {
    pub changed: usize,
}

pub(super) async fn list_notifications(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<NotificationFeed>> {
    let items = state.store.list_notifications().await;
    let unread_count = items.iter().filter(|n| !n.read).count();
    ApiResponse::new(
        NotificationFeed {
            items,
            unread_count,
        },
        req_id,
    )
}

pub(super) async fn mark_read(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<ApiResponse<Notification>>, ApiError> {
    let id = path_id(&req_id, path)?;
    let notification = state
        .store
        .mark_notification_read(id)
        .await
        .map_err(|e| map_service_error(&req_id.0, e.into()))?;
    Ok(ApiResponse::new(notification, req_id))
}

pub(super) async fn mark_all_read(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<MarkedRead>> {
    let changed = state.store.mark_all_notifications_read().await;
    ApiResponse::new(MarkedRead { changed }, req_id)
}
