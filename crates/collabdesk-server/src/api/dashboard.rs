use axum::{extract::State, Extension, Json};
use chrono::Utc;
use collabdesk_core::{summarize, DashboardSummary};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

/// GET /api/v1/dashboard: stats and widgets computed against today's date (UTC).
pub(super) async fn get_dashboard(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<DashboardSummary>> {
    let (campaigns, influencers, brands) = tokio::join!(
        state.store.list_campaigns(),
        state.store.list_influencers(),
        state.store.list_brands(),
    );
    let today = Utc::now().date_naive();
    ApiResponse::new(summarize(&campaigns, &influencers, &brands, today), req_id)
}
