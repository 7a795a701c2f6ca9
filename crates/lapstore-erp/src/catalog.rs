//! In-memory filtering, sorting, and search over normalized products.
//!
//! Every function takes a slice and returns a fresh `Vec`; nothing here
//! mutates its input or performs I/O.

use std::sync::LazyLock;

use lapstore_core::{CategorySummary, Product};
use regex::Regex;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid non-word regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+").expect("valid hyphen regex"));

/// Shortest token that counts towards a fuzzy category match.
const MIN_TOKEN_LEN: usize = 3;

/// Filters products by category name.
///
/// Matching falls through three tiers and stops at the first that yields
/// anything:
///
/// 1. exact, case-insensitive, by name or by slug (so the slugs handed out
///    by [`categories`] select their own category);
/// 2. substring in either direction, by name or by slug (`"gaming"` matches
///    `"Gaming Laptops"` and `"Laptops"` matches query
///    `"laptops & notebooks"`);
/// 3. any shared word of three or more characters.
///
/// A blank query returns every product.
#[must_use]
pub fn by_category(products: &[Product], name: &str) -> Vec<Product> {
    let query = name.trim().to_lowercase();
    if query.is_empty() {
        return products.to_vec();
    }
    let query_slug = slugify(&query);

    let keys: Vec<Option<CategoryKey>> = products
        .iter()
        .map(|p| p.category.as_deref().map(CategoryKey::new))
        .collect();
    let pick = |keep: &dyn Fn(&CategoryKey) -> bool| -> Vec<Product> {
        products
            .iter()
            .zip(&keys)
            .filter(|(_, key)| key.as_ref().is_some_and(keep))
            .map(|(product, _)| product.clone())
            .collect()
    };

    let exact = pick(&|k| k.name == query || (!k.slug.is_empty() && k.slug == query_slug));
    if !exact.is_empty() {
        return exact;
    }

    let overlaps =
        |a: &str, b: &str| !a.is_empty() && !b.is_empty() && (a.contains(b) || b.contains(a));
    let partial = pick(&|k| overlaps(&k.name, &query) || overlaps(&k.slug, &query_slug));
    if !partial.is_empty() {
        return partial;
    }

    let query_tokens = tokens(&query);
    if query_tokens.is_empty() {
        return Vec::new();
    }
    pick(&|k| tokens(&k.name).iter().any(|t| query_tokens.contains(t)))
}

/// A category name in the two forms [`by_category`] compares against.
struct CategoryKey {
    name: String,
    slug: String,
}

impl CategoryKey {
    fn new(category: &str) -> Self {
        let name = category.trim().to_lowercase();
        let slug = slugify(&name);
        Self { name, slug }
    }
}

/// Drops repair/service line items.
#[must_use]
pub fn excluding_services(products: &[Product]) -> Vec<Product> {
    products
        .iter()
        .filter(|p| !p.is_service())
        .cloned()
        .collect()
}

/// Moves out-of-stock products to the end, otherwise keeping input order.
#[must_use]
pub fn sort_stock_first(products: &[Product]) -> Vec<Product> {
    let mut sorted = products.to_vec();
    sorted.sort_by_key(|p| !p.is_in_stock());
    sorted
}

/// Case-insensitive substring search over name, spec values, and category.
///
/// A blank query matches everything.
#[must_use]
pub fn search(products: &[Product], query: &str) -> Vec<Product> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|p| searchable_text(p).contains(&query))
        .cloned()
        .collect()
}

/// The first `n` products.
#[must_use]
pub fn limit(products: &[Product], n: usize) -> Vec<Product> {
    products.iter().take(n).cloned().collect()
}

/// Distinct categories in first-seen order, with 1-based ids.
///
/// Names are compared trimmed and case-insensitively, the same way
/// [`by_category`] matches them; the first spelling seen is kept.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<CategorySummary> {
    let mut seen: Vec<CategorySummary> = Vec::new();
    for name in products.iter().filter_map(|p| p.category.as_deref()) {
        let name = name.trim();
        let lowered = name.to_lowercase();
        if name.is_empty() || seen.iter().any(|c| c.name.to_lowercase() == lowered) {
            continue;
        }
        seen.push(CategorySummary {
            id: seen.len() + 1,
            name: name.to_owned(),
            slug: slugify(name),
        });
    }
    seen
}

/// URL slug for a category name: `"Gaming  Laptops!"` → `"gaming-laptops"`.
#[must_use]
pub fn slugify(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(&stripped, "-");
    HYPHENS.replace_all(&hyphenated, "-").into_owned()
}

/// Finds a product by id, then item code, then slug.
///
/// Each key is tried across the whole list before falling to the next, so
/// a product whose id equals `key` wins over another whose slug does.
#[must_use]
pub fn find_by_key<'a>(products: &'a [Product], key: &str) -> Option<&'a Product> {
    products
        .iter()
        .find(|p| p.id == key)
        .or_else(|| {
            products
                .iter()
                .find(|p| p.item_code.as_deref() == Some(key))
        })
        .or_else(|| products.iter().find(|p| p.slug == key))
}

fn searchable_text(product: &Product) -> String {
    let mut text = product.name.to_lowercase();
    for value in product.specs.values() {
        text.push(' ');
        text.push_str(&value.to_lowercase());
    }
    if let Some(category) = &product.category {
        text.push(' ');
        text.push_str(&category.to_lowercase());
    }
    text
}

fn tokens(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .collect()
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
