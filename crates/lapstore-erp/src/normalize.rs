//! Normalization from raw ERP items to [`lapstore_core::Product`].
//!
//! This is the only place price and discount arithmetic happens. The
//! discount percentage comes exclusively from an explicit
//! `promotion_price`; a sale price below the wholesale reference is not a
//! promotion and never produces a discount badge.

use lapstore_core::products::{NOT_SPECIFIED, PLACEHOLDER_IMAGE};
use lapstore_core::{Product, ProductSpecs};
use serde_json::Value;

use crate::error::ErpError;
use crate::types::RawItem;

const UNKNOWN_NAME: &str = "Unknown Product";
const NO_WARRANTY: &str = "No warranty";

/// Normalizes a [`RawItem`] into a [`Product`].
///
/// Relative image paths are joined onto `asset_base_url`.
///
/// # Errors
///
/// Returns [`ErpError::DataQuality`] if the sale price or the reference
/// price is missing or not a number. Callers drop the item rather than
/// list it at a made-up price.
pub fn normalize_item(raw: &RawItem, asset_base_url: &str) -> Result<Product, ErpError> {
    let id = raw.id.as_ref().and_then(text).unwrap_or_default();

    let name = present(raw.item_name.as_ref())
        .or_else(|| present(raw.name.as_ref()))
        .and_then(text)
        .unwrap_or_else(|| UNKNOWN_NAME.to_owned());

    let item_code = present(raw.item_code.as_ref())
        .or_else(|| present(raw.product_code.as_ref()))
        .and_then(text);
    let slug = item_code
        .clone()
        .or_else(|| present(raw.slug.as_ref()).and_then(text))
        .unwrap_or_else(|| id.clone());

    let (sale_field, sale_value) = match present(raw.sale_price.as_ref()) {
        Some(v) => ("sale_price", Some(v)),
        None => ("price", present(raw.price.as_ref())),
    };
    let sale_price = required_number(&id, sale_field, sale_value)?;

    let (regular_field, regular_value) = match present(raw.whole_sale_price.as_ref()) {
        Some(v) => ("whole_sale_price", Some(v)),
        None => (sale_field, sale_value),
    };
    let regular_price = required_number(&id, regular_field, regular_value)?;

    let promotion_price = present(raw.promotion_price.as_ref())
        .and_then(number)
        .filter(|p| *p > 0.0);

    let (price, discount_percentage) = match promotion_price {
        Some(promo) => (promo, percent_off(regular_price, promo)),
        None => (sale_price, 0),
    };

    let stock = present(raw.stock.as_ref()).and_then(number).map(whole_units);

    let image_path = present(raw.image_url.as_ref())
        .or_else(|| present(raw.photo.as_ref()))
        .or_else(|| present(raw.image.as_ref()))
        .and_then(text);

    Ok(Product {
        id,
        name,
        slug,
        item_code,
        price,
        original_price: regular_price,
        discount_price: promotion_price,
        discount_percentage,
        category: present(raw.category_name.as_ref()).and_then(text),
        brand: present(raw.brand_name.as_ref()).and_then(text),
        stock,
        image_url: resolve_image_url(image_path.as_deref(), asset_base_url),
        specs: extract_specs(raw),
    })
}

/// Whole percent saved by `promo` against `regular`, clamped to `0..=100`.
///
/// Returns 0 when the reference price is not positive.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn percent_off(regular: f64, promo: f64) -> u32 {
    if regular <= 0.0 {
        return 0;
    }
    ((regular - promo) / regular * 100.0).round().clamp(0.0, 100.0) as u32
}

/// Whole units on hand. A positive fraction still counts as one unit so
/// that the item stays in stock.
#[allow(clippy::cast_possible_truncation)]
fn whole_units(units: f64) -> i64 {
    if units > 0.0 {
        units.ceil() as i64
    } else {
        units.trunc() as i64
    }
}

fn extract_specs(raw: &RawItem) -> ProductSpecs {
    let spec = |value: Option<&Value>| {
        present(value)
            .and_then(text)
            .unwrap_or_else(|| NOT_SPECIFIED.to_owned())
    };

    ProductSpecs {
        processor: spec(raw.processor.as_ref()),
        ram: spec(raw.ram.as_ref()),
        storage: spec(raw.storage.as_ref()),
        display: spec(raw.display.as_ref()),
        warranty: warranty_text(raw),
    }
}

/// `"<duration> <unit>"` from `warranty` + `warranty_date`, or
/// `"No warranty"` when the duration is absent or `"0"`.
fn warranty_text(raw: &RawItem) -> String {
    let Some(duration) = present(raw.warranty.as_ref()).and_then(text) else {
        return NO_WARRANTY.to_owned();
    };
    if duration.trim() == "0" {
        return NO_WARRANTY.to_owned();
    }
    match present(raw.warranty_date.as_ref()).and_then(text) {
        Some(unit) => format!("{} {}", duration.trim(), unit.trim()),
        None => duration.trim().to_owned(),
    }
}

/// Absolute URLs pass through; relative paths are joined onto the ERP
/// upload directory; a missing image becomes the storefront placeholder.
pub(crate) fn resolve_image_url(path: Option<&str>, asset_base_url: &str) -> String {
    let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
        return PLACEHOLDER_IMAGE.to_owned();
    };
    let lower = path.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return path.to_owned();
    }
    format!(
        "{}/{}",
        asset_base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Treats `null` and blank strings as absent.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| match v {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        _ => true,
    })
}

/// Renders a scalar as display text. Objects, arrays, and `null` have no
/// text form.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Reads a number from a JSON number or a numeric string.
///
/// Strings may carry thousands separators (`"1,499.99"`). Anything else,
/// including non-finite values, is not a number.
fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

fn required_number(
    item_id: &str,
    field: &'static str,
    value: Option<&Value>,
) -> Result<f64, ErpError> {
    value
        .and_then(number)
        .ok_or_else(|| ErpError::DataQuality {
            item_id: item_id.to_owned(),
            field,
            value: value.map_or_else(|| "missing".to_owned(), ToString::to_string),
        })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
