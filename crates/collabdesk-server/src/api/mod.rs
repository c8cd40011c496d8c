mod campaigns;
mod dashboard;
mod notifications;
mod records;

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use collabdesk_core::{Brand, Campaign, Influencer, ServiceError, ValidationErrors};
use collabdesk_store::Store;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, REQUEST_ID_HEADER};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// Per-field messages for `validation_error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<ValidationErrors>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    influencers: usize,
    brands: usize,
    campaigns: usize,
    notifications: usize,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub(super) fn new(data: T, req_id: RequestId) -> Json<Self> {
        Json(Self {
            data,
            meta: ResponseMeta::new(req_id.0),
        })
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                fields: None,
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    #[must_use]
    pub fn with_fields(mut self, fields: ValidationErrors) -> Self {
        self.error.fields = Some(fields);
        self
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "validation_error" => StatusCode::UNPROCESSABLE_ENTITY,
            "conflict" => StatusCode::CONFLICT,
            "unavailable" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_service_error(request_id: &str, error: ServiceError) -> ApiError {
    match error {
        ServiceError::NotFound { .. } => ApiError::new(request_id, "not_found", error.to_string()),
        ServiceError::Validation(fields) => {
            ApiError::new(request_id, "validation_error", "validation failed").with_fields(fields)
        }
        ServiceError::DanglingReference { .. } => {
            ApiError::new(request_id, "conflict", error.to_string())
        }
        ServiceError::Unavailable(_) => {
            tracing::error!(error = %error, "backing service unavailable");
            ApiError::new(request_id, "unavailable", error.to_string())
        }
        ServiceError::Timeout => {
            tracing::error!("backing service timed out");
            ApiError::new(request_id, "internal_error", error.to_string())
        }
    }
}

/// Well-formed JSON that does not fit the record is a field-level validation
/// failure (422); anything else about the body is a 400.
pub(super) fn map_json_rejection(request_id: &str, rejection: &JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(e) => {
            ApiError::new(request_id, "validation_error", "validation failed")
                .with_fields(data_error_fields(&e.body_text()))
        }
        _ => ApiError::new(request_id, "bad_request", rejection.body_text()),
    }
}

/// Splits a deserialization message ("`{path}: {reason} at line ..`") into a
/// field entry. Errors without a path land under `form`, except a missing
/// field, which is keyed by its own name.
fn data_error_fields(text: &str) -> ValidationErrors {
    let detail = text
        .split_once("target type: ")
        .map_or(text, |(_, detail)| detail);
    let detail = detail
        .rsplit_once(" at line ")
        .map_or(detail, |(head, _)| head);

    let (field, message) = match detail.split_once(": ") {
        Some((path, reason)) if !path.is_empty() && path != "." && !path.contains(' ') => {
            (path, reason)
        }
        _ => {
            let missing = detail
                .strip_prefix("missing field `")
                .and_then(|rest| rest.split_once('`'))
                .map(|(name, _)| name);
            (missing.unwrap_or("form"), detail)
        }
    };

    let mut fields = ValidationErrors::new();
    fields.add(field, message);
    fields
}

pub(super) fn map_path_rejection(request_id: &str, rejection: &PathRejection) -> ApiError {
    ApiError::new(request_id, "bad_request", rejection.body_text())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)])
}

fn entity_router() -> Router<AppState> {
    Router::new()
        .route(
            "/api/v1/influencers",
            get(records::list_records::<Influencer>).post(records::create_record::<Influencer>),
        )
        .route(
            "/api/v1/influencers/{id}",
            get(records::get_record::<Influencer>)
                .patch(records::update_record::<Influencer>)
                .delete(records::delete_record::<Influencer>),
        )
        .route(
            "/api/v1/brands",
            get(records::list_records::<Brand>).post(records::create_record::<Brand>),
        )
        .route(
            "/api/v1/brands/{id}",
            get(records::get_record::<Brand>)
                .patch(records::update_record::<Brand>)
                .delete(records::delete_record::<Brand>),
        )
        .route(
            "/api/v1/campaigns",
            get(campaigns::list_campaigns).post(records::create_record::<Campaign>),
        )
        .route("/api/v1/campaigns/overview", get(campaigns::campaign_overview))
        .route(
            "/api/v1/campaigns/{id}",
            get(records::get_record::<Campaign>)
                .patch(records::update_record::<Campaign>)
                .delete(records::delete_record::<Campaign>),
        )
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .merge(entity_router())
        .route("/api/v1/dashboard", get(dashboard::get_dashboard))
        .route("/api/v1/notifications", get(notifications::list_notifications))
        .route(
            "/api/v1/notifications/read-all",
            post(notifications::mark_all_read),
        )
        .route(
            "/api/v1/notifications/{id}/read",
            post(notifications::mark_read),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let counts = state.store.counts().await;
    ApiResponse::new(
        HealthData {
            status: "ok",
            influencers: counts.influencers,
            brands: counts.brands,
            campaigns: counts.campaigns,
            notifications: counts.notifications,
        },
        req_id,
    )
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
