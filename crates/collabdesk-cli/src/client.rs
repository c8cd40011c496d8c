//! HTTP client for the collabdesk server.
//!
//! [`ApiClient`] implements [`EntityService`] for influencers, brands and
//! campaigns, so the page controllers run against a remote server exactly as
//! they do against an in-process store. HTTP failures are mapped back onto
//! [`ServiceError`]: 404 → `NotFound`, 400 and 422 → `Validation`, 409 →
//! `DanglingReference`, connection failures and 5xx → `Unavailable`, and
//! request timeouts → `Timeout`.

use std::time::Duration;

use async_trait::async_trait;
use collabdesk_core::{
    Brand, Campaign, DashboardSummary, Entity, EntityId, EntityKind, EntityService, Influencer,
    Notification, ServiceError, ValidationErrors,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::ClientError;

/// An entity kind with a collection under `/api/v1/`.
pub trait Resource: Entity {
    const PATH: &'static str;
}

impl Resource for Influencer {
    const PATH: &'static str = "influencers";
}

impl Resource for Brand {
    const PATH: &'static str = "brands";
}

impl Resource for Campaign {
    const PATH: &'static str = "campaigns";
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    fields: Option<ValidationErrors>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationFeed {
    pub items: Vec<Notification>,
    pub unread_count: usize,
}

#[derive(Debug, Deserialize)]
struct MarkedRead {
    changed: usize,
}

/// What a failed request was addressing, for `NotFound` errors.
#[derive(Debug, Clone, Copy)]
struct Target {
    kind: EntityKind,
    id: EntityId,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ClientError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(concat!("collabdesk-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ServiceError> {
        let url = self
            .base_url
            .join(&format!("api/v1/{path}"))
            .map_err(|e| ServiceError::Unavailable(format!("invalid request path '{path}': {e}")))?;
        Ok(self.client.request(method, url))
    }

    async fn send(
        &self,
        builder: RequestBuilder,
        target: Option<Target>,
    ) -> Result<Response, ServiceError> {
        let response = builder.send().await.map_err(map_transport_error)?;
        if response.status().is_success() {
            return Ok(response);
        }
        Err(map_status_error(response, target).await)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        target: Option<Target>,
    ) -> Result<T, ServiceError> {
        let response = self.send(builder, target).await?;
        let envelope: Envelope<T> = response.json().await.map_err(|e| {
            ServiceError::Unavailable(format!("unexpected response body: {e}"))
        })?;
        Ok(envelope.data)
    }

    /// # Errors
    ///
    /// Returns [`ServiceError`] if the request fails.
    pub async fn dashboard(&self) -> Result<DashboardSummary, ServiceError> {
        self.fetch(self.request(Method::GET, "dashboard")?, None).await
    }

    /// # Errors
    ///
    /// Returns [`ServiceError`] if the request fails.
    pub async fn notifications(&self) -> Result<NotificationFeed, ServiceError> {
        self.fetch(self.request(Method::GET, "notifications")?, None)
            .await
    }

    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if no notification has `id`.
    pub async fn mark_notification_read(&self, id: EntityId) -> Result<Notification, ServiceError> {
        let builder = self.request(Method::POST, &format!("notifications/{id}/read"))?;
        let target = Target {
            kind: EntityKind::Notification,
            id,
        };
        self.fetch(builder, Some(target)).await
    }

    /// Returns how many notifications changed to read.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the request fails.
    pub async fn mark_all_notifications_read(&self) -> Result<usize, ServiceError> {
        let marked: MarkedRead = self
            .fetch(self.request(Method::POST, "notifications/read-all")?, None)
            .await?;
        Ok(marked.changed)
    }
}

#[async_trait]
impl<E> EntityService<E> for ApiClient
where
    E: Resource,
{
    async fn list(&self) -> Result<Vec<E>, ServiceError> {
        self.fetch(self.request(Method::GET, E::PATH)?, None).await
    }

    async fn add(&self, new: E::New) -> Result<E, ServiceError> {
        let builder = self.request(Method::POST, E::PATH)?.json(&new);
        self.fetch(builder, None).await
    }

    async fn update(&self, id: EntityId, patch: E::Patch) -> Result<E, ServiceError> {
        let builder = self
            .request(Method::PATCH, &format!("{}/{id}", E::PATH))?
            .json(&patch);
        self.fetch(builder, Some(Target { kind: E::KIND, id })).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), ServiceError> {
        let builder = self.request(Method::DELETE, &format!("{}/{id}", E::PATH))?;
        self.send(builder, Some(Target { kind: E::KIND, id }))
            .await
            .map(|_| ())
    }
}

fn map_transport_error(error: reqwest::Error) -> ServiceError {
    if error.is_timeout() {
        ServiceError::Timeout
    } else {
        tracing::debug!(error = %error, "request failed before a response");
        ServiceError::Unavailable(error.to_string())
    }
}

async fn map_status_error(response: Response, target: Option<Target>) -> ServiceError {
    let status = response.status();
    let body: ErrorEnvelope = response.json().await.unwrap_or_default();
    let message = if body.error.message.is_empty() {
        status.to_string()
    } else {
        body.error.message
    };

    match status {
        StatusCode::NOT_FOUND => match target {
            Some(Target { kind, id }) => ServiceError::NotFound { kind, id },
            None => ServiceError::Unavailable(message),
        },
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            let fields = body.error.fields.unwrap_or_else(|| {
                let mut fields = ValidationErrors::new();
                fields.add("form", message);
                fields
            });
            ServiceError::Validation(fields)
        }
        StatusCode::CONFLICT => parse_dangling_reference(&message)
            .unwrap_or(ServiceError::Unavailable(message)),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ServiceError::Timeout,
        _ => ServiceError::Unavailable(message),
    }
}

/// Recovers `field` and `id` from "`{field} references missing record {id}`".
fn parse_dangling_reference(message: &str) -> Option<ServiceError> {
    let (field, id) = message.split_once(" references missing record ")?;
    let id = id.trim().parse().ok()?;
    Some(ServiceError::DanglingReference {
        field: field.trim().to_string(),
        id,
    })
}

/// Serializes `value` for `--json`-style output.
pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("<unprintable: {e}>"))
}
