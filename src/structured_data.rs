//! # Structured Data Module
//!
//! Reads the JSON-LD blocks (`<script type="application/ld+json">`) embedded
//! in a listing page. Only the first block describing a listing is used: an
//! object carrying an `image` or `offers` key.

use lazy_static::lazy_static;
use scraper::{Html, Selector};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::listing_model::non_empty;
use crate::url_normalizer::{dedup_preserving_order, normalize_url};

lazy_static! {
    static ref JSON_LD_SELECTOR: Selector = Selector::parse(r#"script[type="application/ld+json"]"#)
        .expect("JSON-LD selector should be valid");
}

/// Listing fields read from a JSON-LD block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredListing {
    pub title: Option<String>,
    /// Normalized image URLs in block order
    pub images: Vec<String>,
    pub price: Option<String>,
}

/// Find the first JSON-LD object describing a listing
///
/// Blocks that fail to parse, or that parse to something other than an
/// object, are skipped. Scanning stops at the first object with an `image`
/// or `offers` key, even if that object yields no usable fields.
pub fn find_listing_json_ld(document: &Html, origin: &str) -> Option<StructuredListing> {
    for (index, script) in document.select(&JSON_LD_SELECTOR).enumerate() {
        let raw: String = script.text().collect();

        let value = match serde_json::from_str::<Value>(raw.trim()) {
            Ok(value) => value,
            Err(e) => {
                trace!(block = index, error = %e, "Skipping malformed JSON-LD block");
                continue;
            }
        };

        let Some(object) = value.as_object() else {
            trace!(block = index, "Skipping non-object JSON-LD block");
            continue;
        };

        if object.contains_key("image") || object.contains_key("offers") {
            debug!(block = index, "Using JSON-LD block for listing fields");
            return Some(read_listing_object(object, origin));
        }
    }

    None
}

fn read_listing_object(object: &Map<String, Value>, origin: &str) -> StructuredListing {
    let title = string_field(object, "name").or_else(|| string_field(object, "headline"));

    let images: Vec<String> = match object.get("image") {
        Some(Value::String(single)) => vec![single.as_str()],
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
    .into_iter()
    .filter_map(|raw| normalize_url(Some(raw), origin))
    .collect();
    let images = dedup_preserving_order(images);

    let price = object
        .get("offers")
        .and_then(Value::as_object)
        .and_then(|offers| offers.get("price"))
        .and_then(scalar_to_string);

    StructuredListing {
        title,
        images,
        price,
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).and_then(|s| non_empty(s))
}

// Prices show up both as "12000000" and as 12000000.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => non_empty(s.as_str()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
