use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use lapstore_core::{Product, ProductDetail};
use lapstore_erp::ProductFilters;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{normalize_limit, ApiError, ApiResponse, AppState};

/// Query parameters are kept as strings so malformed values are ignored
/// rather than rejected.
#[derive(Debug, Deserialize)]
pub(super) struct ProductQuery {
    pub category: Option<String>,
    pub featured: Option<String>,
    pub limit: Option<String>,
}

impl ProductQuery {
    fn into_filters(self) -> ProductFilters {
        ProductFilters {
            category: self.category.filter(|c| !c.trim().is_empty()),
            featured: self.featured.as_deref() == Some("true"),
            limit: normalize_limit(self.limit.as_deref()),
        }
    }
}

pub(super) async fn list_products(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProductQuery>,
) -> Json<ApiResponse<Vec<Product>>> {
    let filters = query.into_filters();
    let result = state.catalog.get_products(&filters).await;

    Json(ApiResponse::sourced(result.data, req_id.0, result.source))
}

pub(super) async fn get_product(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<ProductDetail>>, ApiError> {
    let result = state.catalog.get_product_by_slug(&slug).await;

    match result.data {
        Some(detail) => Ok(Json(ApiResponse::sourced(detail, req_id.0, result.source))),
        None => Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("product {slug} not found"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(category: Option<&str>, featured: Option<&str>, limit: Option<&str>) -> ProductQuery {
        ProductQuery {
            category: category.map(str::to_owned),
            featured: featured.map(str::to_owned),
            limit: limit.map(str::to_owned),
        }
    }

    #[test]
    fn featured_flag_requires_literal_true() {
        assert!(query(None, Some("true"), None).into_filters().featured);
        assert!(!query(None, Some("1"), None).into_filters().featured);
        assert!(!query(None, None, None).into_filters().featured);
    }

    #[test]
    fn blank_category_is_no_filter() {
        assert_eq!(query(Some("  "), None, None).into_filters().category, None);
        assert_eq!(
            query(Some("Laptops"), None, Some("5")).into_filters(),
            ProductFilters {
                category: Some("Laptops".to_owned()),
                featured: false,
                limit: Some(5),
            }
        );
    }
}
