//! CRUD handlers shared by influencers, brands and campaigns.
//!
//! - `GET    /api/v1/{kind}`      list, optionally filtered by `?search=`
//! - `POST   /api/v1/{kind}`      create (201)
//! - `GET    /api/v1/{kind}/{id}` fetch one
//! - `PATCH  /api/v1/{kind}/{id}` sparse update
//! - `DELETE /api/v1/{kind}/{id}` delete (204)

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use collabdesk_core::{Entity, EntityId, EntityService, Searchable};
use collabdesk_store::{Store, Stored};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{
    map_json_rejection, map_path_rejection, map_service_error, ApiError, ApiResponse, AppState,
};

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchParams {
    pub search: Option<String>,
}

pub(super) fn path_id(
    req_id: &RequestId,
    path: Result<Path<EntityId>, PathRejection>,
) -> Result<EntityId, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|rejection| map_path_rejection(&req_id.0, &rejection))
}

pub(super) fn json_body<T>(
    req_id: &RequestId,
    body: Result<Json<T>, JsonRejection>,
) -> Result<T, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| map_json_rejection(&req_id.0, &rejection))
}

/// GET /api/v1/{kind}?search=
pub(super) async fn list_records<E>(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Result<Json<ApiResponse<Vec<E>>>, ApiError>
where
    E: Stored + Searchable,
    Store: EntityService<E>,
{
    let rows = EntityService::<E>::list(state.store.as_ref())
        .await
        .map_err(|e| map_service_error(&req_id.0, e))?;
    let term = params.search.unwrap_or_default();
    let data: Vec<E> = rows.into_iter().filter(|row| row.matches(&term)).collect();
    Ok(ApiResponse::new(data, req_id))
}

/// GET /api/v1/{kind}/{id}
pub(super) async fn get_record<E>(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: Result<Path<EntityId>, PathRejection>,
) -> Result<Json<ApiResponse<E>>, ApiError>
where
    E: Stored,
{
    let id = path_id(&req_id, path)?;
    let record = state
        .store
        .get::<E>(id)
        .await
        .map_err(|e| map_service_error(&req_id.0, e.into()))?;
    Ok(ApiResponse::new(record, req_id))
}

/// POST /api/v1/{kind}
pub(super) async fn create_record<E>(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Result<Json<E::New>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<E>>), ApiError>
where
    E: Stored,
    Store: EntityService<E>,
{
    let new = json_body(&req_id, body)?;
    let record = EntityService::<E>::add(state.store.as_ref(), new)
        .await
        .map_err(|e| map_service_error(&req_id.0, e))?;
    tracing::info!(kind = %E::KIND, id = record.id(), "record created");
    Ok((StatusCode::CREATED, ApiResponse::new(record, req_id)))
}

/// PATCH /api/v1/{kind}/{id}
pub(super) async fn update_record<E>(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: Result<Path<EntityId>, PathRejection>,
    body: Result<Json<E::Patch>, JsonRejection>,
) -> Result<Json<ApiResponse<E>>, ApiError>
where
    E: Stored,
    Store: EntityService<E>,
{
    let id = path_id(&req_id, path)?;
    let patch = json_body(&req_id, body)?;
    let record = EntityService::<E>::update(state.store.as_ref(), id, patch)
        .await
        .map_err(|e| map_service_error(&req_id.0, e))?;
    tracing::info!(kind = %E::KIND, id, "record updated");
    Ok(ApiResponse::new(record, req_id))
}

/// DELETE /api/v1/{kind}/{id}
pub(super) async fn delete_record<E>(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    path: Result<Path<EntityId>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
    E: Stored,
    Store: EntityService<E>,
{
    let id = path_id(&req_id, path)?;
    EntityService::<E>::delete(state.store.as_ref(), id)
        .await
        .map_err(|e| map_service_error(&req_id.0, e))?;
    tracing::info!(kind = %E::KIND, id, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}
