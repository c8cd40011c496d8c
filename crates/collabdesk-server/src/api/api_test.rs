use super::*;
use axum::body::{to_bytes, Body};
use axum::http::Request;
use collabdesk_core::{EntityService, NewBrand};
use collabdesk_store::StoreConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

fn nike() -> NewBrand {
    NewBrand {
        name: "Nike".to_string(),
        owner_name: "Phil Knight".to_string(),
        email: "phil@nike.com".to_string(),
        phone: "+1 555 0100".to_string(),
        industry: "Sportswear".to_string(),
        logo: "https://nike.com/logo.png".to_string(),
    }
}

fn influencer_body(name: &str) -> Value {
    json!({
        "name": name,
        "username": format!("@{}", name.to_lowercase()),
        "email": "sarah@example.com",
        "phone": "+1 555 0101",
        "platform": "instagram",
        "followers": 125_000,
        "engagementRate": 4.2,
        "category": "Fitness",
        "location": "Los Angeles",
        "status": "Active",
        "profileImage": "https://example.com/sarah.jpg"
    })
}

fn campaign_body(influencer_id: u64, brand_id: u64) -> Value {
    json!({
        "influencerId": influencer_id,
        "brandId": brand_id,
        "name": "Spring Launch",
        "amount": 11000,
        "shootDate": "2024-07-01",
        "approved": false,
        "paidAmount": 0,
        "status": "draft",
        "type": "paid",
        "paymentStatus": "pending"
    })
}

fn app_with(store: Arc<Store>) -> Router {
    build_app(AppState { store })
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

#[test]
fn api_error_codes_map_to_statuses() {
    let cases = [
        ("not_found", StatusCode::NOT_FOUND),
        ("bad_request", StatusCode::BAD_REQUEST),
        ("validation_error", StatusCode::UNPROCESSABLE_ENTITY),
        ("conflict", StatusCode::CONFLICT),
        ("unavailable", StatusCode::SERVICE_UNAVAILABLE),
        ("internal_error", StatusCode::INTERNAL_SERVER_ERROR),
    ];
    for (code, status) in cases {
        let response = ApiError::new("req-1", code, "msg").into_response();
        assert_eq!(response.status(), status, "code {code}");
    }
}

#[test]
fn validation_service_error_carries_fields() {
    let mut fields = ValidationErrors::new();
    fields.add("email", "Invalid email");
    let err = map_service_error("req-1", ServiceError::Validation(fields));
    assert_eq!(err.error.code, "validation_error");
    assert_eq!(
        err.error.fields.as_ref().and_then(|f| f.get("email")),
        Some("Invalid email")
    );
}

#[tokio::test]
async fn health_reports_counts_and_request_id() {
    let store = Arc::new(Store::default());
    store.add_brand(nike()).await;
    let app = app_with(store);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/health")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-request-id").map(|v| v.as_bytes()),
        Some(&b"abc-123"[..])
    );
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let json: Value = serde_json::from_slice(&body).expect("json");
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["brands"], 1);
    assert_eq!(json["meta"]["requestId"], "abc-123");
}

#[tokio::test]
async fn generated_request_id_is_set_when_absent() {
    let app = app_with(Arc::new(Store::default()));
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/brands")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    let id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .expect("request id header");
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn influencer_crud_round_trip() {
    let app = app_with(Arc::new(Store::default()));

    let (status, created) = send(&app, "POST", "/api/v1/influencers", Some(influencer_body("Sarah"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_u64().expect("id");
    assert_eq!(created["data"]["platform"], "Instagram");
    assert_eq!(created["data"]["status"], "active");

    let (status, patched) = send(
        &app,
        "PATCH",
        &format!("/api/v1/influencers/{id}"),
        Some(json!({ "followers": 130_000 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["data"]["followers"], 130_000);
    assert_eq!(patched["data"]["name"], "Sarah");

    let (status, fetched) = send(&app, "GET", &format!("/api/v1/influencers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["followers"], 130_000);

    let (status, _) = send(&app, "DELETE", &format!("/api/v1/influencers/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, "DELETE", &format!("/api/v1/influencers/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn invalid_create_is_422_with_fields() {
    let app = app_with(Arc::new(Store::default()));
    let mut body = influencer_body("Sarah");
    body["email"] = json!("nope");
    body["engagementRate"] = json!(120.0);

    let (status, json) = send(&app, "POST", "/api/v1/influencers", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["fields"]["email"], "Invalid email");
    assert_eq!(
        json["error"]["fields"]["engagementRate"],
        "Engagement rate must be between 0 and 100"
    );
}

async fn send_raw(app: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request");
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    (status, serde_json::from_slice(&bytes).expect("json body"))
}

#[tokio::test]
async fn malformed_json_and_bad_id_are_400() {
    let app = app_with(Arc::new(Store::default()));

    let (status, json) = send_raw(&app, "POST", "/api/v1/brands", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");

    let (status, json) = send(&app, "GET", "/api/v1/brands/not-a-number", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "bad_request");
}

#[tokio::test]
async fn ill_typed_fields_are_422_with_field_errors() {
    let store = Arc::new(Store::default());
    let app = app_with(Arc::clone(&store));

    let mut body = influencer_body("Sarah");
    body["followers"] = json!(-5);
    let (status, json) = send(&app, "POST", "/api/v1/influencers", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json["error"]["fields"]["followers"].is_string());

    let (status, json) = send(&app, "POST", "/api/v1/brands", Some(json!({ "name": 5 }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"]["fields"]["name"].is_string());

    let (status, json) = send(&app, "POST", "/api/v1/brands", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["fields"].as_object().map(serde_json::Map::len), Some(1));

    assert!(EntityService::<collabdesk_core::Influencer>::list(store.as_ref())
        .await
        .expect("list")
        .is_empty());
}

#[test]
fn data_error_text_is_split_into_a_field() {
    let fields = data_error_fields(
        "Failed to deserialize the JSON body into the target type: followers: invalid value: \
         integer `-5`, expected u64 at line 1 column 16",
    );
    assert_eq!(
        fields.get("followers"),
        Some("invalid value: integer `-5`, expected u64")
    );

    let fields = data_error_fields(
        "Failed to deserialize the JSON body into the target type: missing field `name` at line 1 column 2",
    );
    assert_eq!(fields.get("name"), Some("missing field `name`"));

    let fields = data_error_fields("something unexpected");
    assert_eq!(fields.get("form"), Some("something unexpected"));
}

#[tokio::test]
async fn brand_search_filters_case_insensitively() {
    let store = Arc::new(Store::default());
    store.add_brand(nike()).await;
    let mut adidas = nike();
    adidas.name = "Adidas".to_string();
    adidas.owner_name = "Adi Dassler".to_string();
    store.add_brand(adidas).await;
    let app = app_with(store);

    let (status, json) = send(&app, "GET", "/api/v1/brands?search=NIKE", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = json["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|b| b["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, ["Nike"]);
}

#[tokio::test]
async fn campaign_overview_resolves_unknown_brand() {
    let store = Arc::new(Store::default());
    let app = app_with(Arc::clone(&store));

    let (_, inf) = send(&app, "POST", "/api/v1/influencers", Some(influencer_body("Sarah"))).await;
    let influencer_id = inf["data"]["id"].as_u64().expect("id");
    let (status, created) = send(&app, "POST", "/api/v1/campaigns", Some(campaign_body(influencer_id, 42))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["amount"], 11000.0);
    assert_eq!(created["data"]["type"], "paid");

    let (status, json) = send(&app, "GET", "/api/v1/campaigns/overview", None).await;
    assert_eq!(status, StatusCode::OK);
    let row = &json["data"][0];
    assert_eq!(row["influencerName"], "Sarah");
    assert_eq!(row["brandName"], "Unknown");
    assert_eq!(row["name"], "Spring Launch");

    let (_, json) = send(&app, "GET", "/api/v1/campaigns?search=sarah", None).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(1));
    let (_, json) = send(&app, "GET", "/api/v1/campaigns?search=puma", None).await;
    assert_eq!(json["data"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn dangling_reference_is_409_when_enforced() {
    let store = Arc::new(Store::new(StoreConfig {
        enforce_campaign_refs: true,
        ..StoreConfig::default()
    }));
    let app = app_with(store);

    let (status, json) = send(&app, "POST", "/api/v1/campaigns", Some(campaign_body(1, 1))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "conflict");
}

#[tokio::test]
async fn patch_can_clear_optional_campaign_fields() {
    let store = Arc::new(Store::default());
    let app = app_with(Arc::clone(&store));
    let mut body = campaign_body(1, 1);
    body["notes"] = json!("Collab Done");
    let (_, created) = send(&app, "POST", "/api/v1/campaigns", Some(body)).await;
    let id = created["data"]["id"].as_u64().expect("id");

    let (status, json) = send(
        &app,
        "PATCH",
        &format!("/api/v1/campaigns/{id}"),
        Some(json!({ "notes": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["notes"], Value::Null);
    assert_eq!(json["data"]["name"], "Spring Launch");
}

#[tokio::test]
async fn dashboard_and_notifications() {
    let store = Arc::new(Store::default());
    let brand = EntityService::<collabdesk_core::Brand>::add(store.as_ref(), nike())
        .await
        .expect("brand");
    let app = app_with(Arc::clone(&store));
    let (_, inf) = send(&app, "POST", "/api/v1/influencers", Some(influencer_body("Sarah"))).await;
    let influencer_id = inf["data"]["id"].as_u64().expect("id");
    send(&app, "POST", "/api/v1/campaigns", Some(campaign_body(influencer_id, brand.id))).await;

    let (status, json) = send(&app, "GET", "/api/v1/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["stats"]["upcomingCampaigns"], 1);
    assert_eq!(json["data"]["pendingPayments"][0]["brandName"], "Nike");
    assert_eq!(json["data"]["pendingDrafts"][0]["influencerName"], "Sarah");

    let (status, json) = send(&app, "GET", "/api/v1/notifications", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["unreadCount"], 1);
    let id = json["data"]["items"][0]["id"].as_u64().expect("id");
    assert_eq!(
        json["data"]["items"][0]["message"],
        "Sarah assigned to new Nike campaign"
    );

    let (status, json) = send(&app, "POST", &format!("/api/v1/notifications/{id}/read"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["read"], true);

    let (_, json) = send(&app, "POST", "/api/v1/notifications/read-all", None).await;
    assert_eq!(json["data"]["changed"], 0);

    let (status, _) = send(&app, "POST", "/api/v1/notifications/999/read", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
