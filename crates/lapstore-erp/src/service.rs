//! Catalog orchestration: fetch, normalize, filter, and fall back.
//!
//! Every public method on [`CatalogService`] succeeds. Upstream failures
//! move the request down the tier chain (primary endpoint, secondary
//! endpoint, built-in sample data) and are reported through logs and the
//! [`CatalogSource`] tag rather than as errors.

use lapstore_core::{AppConfig, CatalogSource, CategorySummary, Product, ProductDetail};
use crate::catalog;
use crate::client::{parse_json, ErpClient};
use crate::error::ErpError;
use crate::fallback;
use crate::normalize::normalize_item;
use crate::retry::RetryPolicy;
use crate::types::{parse_item_list, RawItem};

/// How many cross-sell products a product page carries.
const RELATED_PRODUCT_COUNT: usize = 3;

/// Everything [`CatalogService`] needs, injected at construction.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// ERP item-controller base; `itemList` is appended.
    pub base_url: String,
    /// Full URL of the secondary item-list endpoint, used as-is.
    pub fallback_url: Option<String>,
    pub asset_base_url: String,
    pub timeout_secs: u64,
    pub user_agent: String,
    pub retry: RetryPolicy,
    /// How many products `featured` listings keep.
    pub featured_count: usize,
}

impl CatalogConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            base_url: config.erp_base_url.clone(),
            fallback_url: config.erp_fallback_url.clone(),
            asset_base_url: config.asset_base_url.clone(),
            timeout_secs: config.erp_timeout_secs,
            user_agent: config.erp_user_agent.clone(),
            retry: RetryPolicy::new(config.erp_max_retries, config.erp_initial_backoff_ms),
            featured_count: config.featured_count,
        }
    }
}

/// Query options for [`CatalogService::get_products`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    pub category: Option<String>,
    /// Keep only the first `featured_count` products.
    pub featured: bool,
    pub limit: Option<usize>,
}

/// A result tagged with the tier that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub data: T,
    pub source: CatalogSource,
}

impl<T> Sourced<T> {
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        Sourced {
            data: f(self.data),
            source: self.source,
        }
    }
}

pub struct CatalogService {
    client: ErpClient,
    config: CatalogConfig,
    primary_url: String,
}

impl CatalogService {
    /// Builds the service and its HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ErpError::InvalidBaseUrl`] if `config.base_url` is not an
    /// absolute URL, or [`ErpError::Http`] if the HTTP client cannot be
    /// built.
    pub fn new(config: CatalogConfig) -> Result<Self, ErpError> {
        let primary_url = ErpClient::item_list_url(&config.base_url)?;
        let client = ErpClient::new(config.timeout_secs, &config.user_agent, config.retry)?;
        Ok(Self {
            client,
            config,
            primary_url,
        })
    }

    /// The full normalized catalog, services included, in upstream order.
    pub async fn load_catalog(&self) -> Sourced<Vec<Product>> {
        let raw = self.load_raw_items().await;
        let products = self.normalize_all(&raw.data);
        tracing::info!(
            source = %raw.source,
            raw = raw.data.len(),
            products = products.len(),
            "catalog loaded"
        );
        Sourced {
            data: products,
            source: raw.source,
        }
    }

    /// Storefront product listing.
    ///
    /// Services are removed, in-stock items come first, then the category,
    /// featured, and limit filters apply in that order.
    pub async fn get_products(&self, filters: &ProductFilters) -> Sourced<Vec<Product>> {
        let featured_count = self.config.featured_count;
        self.load_catalog().await.map(|products| {
            let mut products = catalog::sort_stock_first(&catalog::excluding_services(&products));
            if let Some(category) = filters.category.as_deref() {
                products = catalog::by_category(&products, category);
            }
            if filters.featured {
                products.truncate(featured_count);
            }
            if let Some(n) = filters.limit {
                products = catalog::limit(&products, n);
            }
            products
        })
    }

    /// A single product plus up to three related products, or `None` when
    /// no product has `slug` as its id, item code, or slug.
    pub async fn get_product_by_slug(&self, slug: &str) -> Sourced<Option<ProductDetail>> {
        self.load_catalog().await.map(|products| {
            let product = catalog::find_by_key(&products, slug)?.clone();
            let others: Vec<Product> = products
                .iter()
                .filter(|p| p.id != product.id)
                .cloned()
                .collect();
            let related = catalog::limit(
                &catalog::sort_stock_first(&catalog::excluding_services(&others)),
                RELATED_PRODUCT_COUNT,
            );
            Some(ProductDetail {
                product,
                related_products: related,
            })
        })
    }

    /// Distinct categories across the whole catalog.
    pub async fn get_categories(&self) -> Sourced<Vec<CategorySummary>> {
        self.load_catalog()
            .await
            .map(|products| catalog::categories(&products))
    }

    /// Products whose name, specs, or category contain `query`, services
    /// excluded and in-stock first.
    pub async fn search(&self, query: &str, limit: Option<usize>) -> Sourced<Vec<Product>> {
        self.load_catalog().await.map(|products| {
            let matches =
                catalog::sort_stock_first(&catalog::excluding_services(&catalog::search(
                    &products, query,
                )));
            match limit {
                Some(n) => catalog::limit(&matches, n),
                None => matches,
            }
        })
    }

    /// The primary endpoint's body text, exactly as received, when it is a
    /// well-formed item list; otherwise the sample catalog in the same
    /// envelope.
    pub async fn proxy_payload(&self) -> Sourced<String> {
        match self.fetch_valid_body(&self.primary_url).await {
            Ok(body) => Sourced {
                data: body,
                source: CatalogSource::Primary,
            },
            Err(error) => {
                tracing::warn!(
                    url = %self.primary_url,
                    error = %error,
                    "ERP proxy request failed; serving sample catalog"
                );
                Sourced {
                    data: fallback::sample_payload().to_string(),
                    source: CatalogSource::Fallback,
                }
            }
        }
    }

    async fn load_raw_items(&self) -> Sourced<Vec<RawItem>> {
        match self.client.fetch_item_list(&self.primary_url).await {
            Ok(items) => {
                return Sourced {
                    data: items,
                    source: CatalogSource::Primary,
                };
            }
            Err(error) => tracing::warn!(
                url = %self.primary_url,
                error = %error,
                "primary ERP endpoint failed"
            ),
        }

        if let Some(url) = self.config.fallback_url.as_deref() {
            match self.client.fetch_item_list(url).await {
                Ok(items) => {
                    return Sourced {
                        data: items,
                        source: CatalogSource::Secondary,
                    };
                }
                Err(error) => tracing::warn!(
                    url,
                    error = %error,
                    "secondary ERP endpoint failed"
                ),
            }
        }

        tracing::warn!("all ERP endpoints failed; serving sample catalog");
        Sourced {
            data: fallback::sample_raw_items(),
            source: CatalogSource::Fallback,
        }
    }

    async fn fetch_valid_body(&self, url: &str) -> Result<String, ErpError> {
        let body = self.client.fetch_body(url).await?;
        parse_item_list(url, &parse_json(url, &body)?)?;
        Ok(body)
    }

    fn normalize_all(&self, raw: &[RawItem]) -> Vec<Product> {
        normalize_items(raw, &self.config.asset_base_url)
    }
}

/// Normalizes every item, dropping (and logging) those with unusable
/// prices.
#[must_use]
pub fn normalize_items(raw: &[RawItem], asset_base_url: &str) -> Vec<Product> {
    raw.iter()
        .filter_map(|item| match normalize_item(item, asset_base_url) {
            Ok(product) => Some(product),
            Err(error) => {
                tracing::warn!(error = %error, "dropping ERP item");
                None
            }
        })
        .collect()
}
