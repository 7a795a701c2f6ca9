use serde::{Deserialize, Serialize};

/// Placeholder shown when the ERP has no image for an item.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.jpg";

/// Shown for hardware specs the ERP leaves blank.
pub const NOT_SPECIFIED: &str = "Not specified";

/// A catalog product in the shape every storefront view consumes,
/// regardless of which ERP endpoint version produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// ERP item ID, stringified (the ERP sends both numbers and strings).
    pub id: String,
    pub name: String,
    /// URL segment for the product page, e.g. `"L-TP-X1C"`.
    pub slug: String,
    /// ERP item/product code when present.
    pub item_code: Option<String>,
    /// What the customer is charged: the promotion price when one is
    /// active, otherwise the sale price.
    pub price: f64,
    /// Pre-promotion reference price.
    pub original_price: f64,
    /// Promotion price, `None` when no promotion is active.
    pub discount_price: Option<f64>,
    /// Whole percent off `original_price`. Only non-zero when the ERP
    /// flags an explicit promotion.
    pub discount_percentage: u32,
    pub category: Option<String>,
    pub brand: Option<String>,
    /// Units on hand. `None` means the ERP does not track stock for the
    /// item, which storefront views treat as available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    pub image_url: String,
    pub specs: ProductSpecs,
}

impl Product {
    /// Returns `true` unless the ERP reports zero or negative stock.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock.is_none_or(|units| units > 0)
    }

    /// Returns `true` for repair/service line items that share the ERP
    /// feed with laptops.
    #[must_use]
    pub fn is_service(&self) -> bool {
        self.category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains("service"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpecs {
    pub processor: String,
    pub ram: String,
    pub storage: String,
    pub display: String,
    /// `"<duration> <unit>"`, e.g. `"1 Year"`, or `"No warranty"`.
    pub warranty: String,
}

impl ProductSpecs {
    /// Spec values in display order.
    #[must_use]
    pub fn values(&self) -> [&str; 5] {
        [
            self.processor.as_str(),
            self.ram.as_str(),
            self.storage.as_str(),
            self.display.as_str(),
            self.warranty.as_str(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// 1-based position in first-seen order.
    pub id: usize,
    pub name: String,
    pub slug: String,
}

/// A product page payload: the product plus a few others to cross-sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub related_products: Vec<Product>,
}

/// Which tier of the fetch chain produced a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Primary,
    Secondary,
    Fallback,
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogSource::Primary => write!(f, "primary"),
            CatalogSource::Secondary => write!(f, "secondary"),
            CatalogSource::Fallback => write!(f, "fallback"),
        }
    }
}
