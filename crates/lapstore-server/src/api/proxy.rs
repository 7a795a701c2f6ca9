use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};

use super::AppState;

/// Response header naming the tier that served a proxied payload.
pub(super) const CATALOG_SOURCE_HEADER: &str = "x-catalog-source";

/// Raw ERP item list, without the API envelope, so storefront pages can
/// consume the upstream shape directly. The upstream body is sent on as
/// received, not re-serialized.
pub(super) async fn proxy_item_list(State(state): State<AppState>) -> Response {
    let result = state.catalog.proxy_payload().await;
    let mut response =
        ([(header::CONTENT_TYPE, "application/json")], result.data).into_response();
    if let Ok(value) = HeaderValue::from_str(&result.source.to_string()) {
        response.headers_mut().insert(CATALOG_SOURCE_HEADER, value);
    }
    response
}
