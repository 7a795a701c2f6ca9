use axum::{
    extract::{Query, State},
    Extension, Json,
};
use lapstore_core::Product;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{normalize_limit, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<String>,
}

pub(super) async fn search_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Json<ApiResponse<Vec<Product>>> {
    let limit = normalize_limit(query.limit.as_deref());
    let result = state.catalog.search(&query.q, limit).await;
    tracing::debug!(
        query = %query.q,
        matches = result.data.len(),
        source = %result.source,
        "catalog search"
    );
    Json(ApiResponse::sourced(result.data, req_id.0, result.source))
}
