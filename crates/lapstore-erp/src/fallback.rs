//! Built-in sample catalog served when every ERP endpoint is unavailable.
//!
//! Items are kept in the ERP's own `itemList` shape so they flow through
//! the same normalizer and filters as live data.

use serde::Deserialize;
use serde_json::{json, Value};

use crate::types::RawItem;

/// The sample items as raw ERP JSON objects.
#[must_use]
pub fn sample_items() -> Vec<Value> {
    vec![
        json!({
            "id": 1,
            "item_name": "Lenovo ThinkPad X1 Carbon",
            "item_code": "L-TP-X1C",
            "sale_price": "1499.99",
            "whole_sale_price": "1699.99",
            "category_name": "Laptops",
            "brand_name": "Lenovo",
            "processor": "Intel Core i7-1165G7",
            "ram": "16GB DDR4",
            "storage": "512GB SSD",
            "display": "14-inch 4K IPS",
            "warranty": "1",
            "warranty_date": "Year"
        }),
        json!({
            "id": 2,
            "item_name": "MacBook Pro 14-inch",
            "item_code": "A-MB-P14",
            "sale_price": "1999.99",
            "whole_sale_price": "2199.99",
            "category_name": "Laptops",
            "brand_name": "Apple",
            "processor": "Apple M2 Pro",
            "ram": "16GB Unified Memory",
            "storage": "512GB SSD",
            "display": "14-inch Liquid Retina XDR",
            "warranty": "1",
            "warranty_date": "Year"
        }),
        json!({
            "id": 3,
            "item_name": "Dell XPS 15",
            "item_code": "D-XPS-15",
            "sale_price": "1799.99",
            "whole_sale_price": "1899.99",
            "category_name": "Laptops",
            "brand_name": "Dell",
            "processor": "Intel Core i9-12900H",
            "ram": "32GB DDR5",
            "storage": "1TB SSD",
            "display": "15.6-inch 4K OLED",
            "warranty": "2",
            "warranty_date": "Years"
        }),
        json!({
            "id": 4,
            "item_name": "HP Spectre x360",
            "item_code": "HP-SP-X360",
            "sale_price": "1399.99",
            "whole_sale_price": "1599.99",
            "category_name": "Laptops",
            "brand_name": "HP",
            "processor": "Intel Core i7-1255U",
            "ram": "16GB DDR4",
            "storage": "1TB SSD",
            "display": "13.5-inch 3K2K OLED",
            "warranty": "1",
            "warranty_date": "Year"
        }),
    ]
}

/// The sample items wrapped in the `itemList` envelope, as the proxy
/// route returns them.
#[must_use]
pub fn sample_payload() -> Value {
    json!({ "status": 200, "data": sample_items() })
}

/// The sample items decoded into [`RawItem`]s.
#[must_use]
pub fn sample_raw_items() -> Vec<RawItem> {
    sample_items()
        .iter()
        .filter_map(|item| RawItem::deserialize(item).ok())
        .collect()
}
