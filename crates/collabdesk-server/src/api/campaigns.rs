//! Campaign listing, filtered on the resolved influencer and brand names.

use axum::{
    extract::{Query, State},
    Extension, Json,
};
use collabdesk_core::{resolve_campaigns, Campaign, ResolvedCampaign, Searchable};

use crate::middleware::RequestId;

use super::records::SearchParams;
use super::{ApiResponse, AppState};

async fn resolved(state: &AppState, term: &str) -> Vec<ResolvedCampaign> {
    let (campaigns, influencers, brands) = tokio::join!(
        state.store.list_campaigns(),
        state.store.list_influencers(),
        state.store.list_brands(),
    );
    resolve_campaigns(&campaigns, &influencers, &brands)
        .into_iter()
        .filter(|row| row.matches(term))
        .collect()
}

/// GET /api/v1/campaigns?search=: raw campaign records.
pub(super) async fn list_campaigns(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Json<ApiResponse<Vec<Campaign>>> {
    let term = params.search.unwrap_or_default();
    let data = resolved(&state, &term)
        .await
        .into_iter()
        .map(|row| row.campaign)
        .collect();
    ApiResponse::new(data, req_id)
}

/// GET /api/v1/campaigns/overview?search=: campaigns with display names.
pub(super) async fn campaign_overview(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<SearchParams>,
) -> Json<ApiResponse<Vec<ResolvedCampaign>>> {
    let term = params.search.unwrap_or_default();
    ApiResponse::new(resolved(&state, &term).await, req_id)
}
