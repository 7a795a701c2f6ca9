//! Raw item records from the ERP `itemList` endpoint.
//!
//! ## Observed schema drift
//!
//! The ERP has shipped several versions of the item controller and the
//! storefront has seen all of them in production:
//!
//! - Names arrive as `item_name` (current) or `name` (older exports).
//! - Prices are decimal strings (`"1499.99"`) on the current endpoint and
//!   bare numbers on the newer products API. The sale price is `sale_price`
//!   or `price`.
//! - `whole_sale_price` is the pre-promotion reference price. A separate
//!   `promotion_price` is set only while a promotion runs.
//! - `warranty` is a duration (`"1"`, `1`, or `"0"` for none) and
//!   `warranty_date` carries its unit (`"Year"`, `"Months"`).
//! - Images come as `image_url`, `photo`, or `image`, either an absolute URL
//!   or a path relative to the ERP upload directory.
//! - `stock` is absent on endpoints that do not track inventory.
//!
//! Every field is therefore an optional [`serde_json::Value`] and the
//! normalizer decides what each one means. Fields the storefront does not
//! read are kept in [`RawItem::extra`].

use serde::Deserialize;
use serde_json::Value;

use crate::error::ErpError;

/// One item from the ERP item list, exactly as sent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawItem {
    pub id: Option<Value>,

    pub item_name: Option<Value>,
    pub name: Option<Value>,

    pub item_code: Option<Value>,
    pub product_code: Option<Value>,
    pub slug: Option<Value>,

    pub sale_price: Option<Value>,
    pub price: Option<Value>,
    pub whole_sale_price: Option<Value>,
    pub promotion_price: Option<Value>,

    pub category_name: Option<Value>,
    pub brand_name: Option<Value>,

    pub warranty: Option<Value>,
    pub warranty_date: Option<Value>,

    pub stock: Option<Value>,

    pub image_url: Option<Value>,
    pub photo: Option<Value>,
    pub image: Option<Value>,

    pub processor: Option<Value>,
    pub ram: Option<Value>,
    pub storage: Option<Value>,
    pub display: Option<Value>,

    /// Everything else on the record.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Extracts the item list from an ERP envelope (`{ "status": .., "data": [..] }`).
///
/// Entries that are not JSON objects are skipped with a warning; one bad
/// entry does not invalidate the list.
///
/// # Errors
///
/// Returns [`ErpError::MalformedPayload`] if the payload has no `data`
/// array.
pub fn parse_item_list(url: &str, payload: &Value) -> Result<Vec<RawItem>, ErpError> {
    let data = payload
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| ErpError::MalformedPayload {
            url: url.to_owned(),
            reason: "expected a `data` array".to_owned(),
        })?;

    let items = data
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            if !entry.is_object() {
                tracing::warn!(url, index, "skipping non-object entry in ERP item list");
                return None;
            }
            match RawItem::deserialize(entry) {
                Ok(item) => Some(item),
                Err(error) => {
                    tracing::warn!(url, index, error = %error, "skipping undecodable ERP item");
                    None
                }
            }
        })
        .collect();

    Ok(items)
}
