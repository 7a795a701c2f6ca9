use axum::{extract::State, Extension, Json};
use lapstore_core::CategorySummary;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState};

pub(super) async fn list_categories(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<Vec<CategorySummary>>> {
    let result = state.catalog.get_categories().await;
    Json(ApiResponse::sourced(result.data, req_id.0, result.source))
}
