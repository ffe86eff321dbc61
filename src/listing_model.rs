//! # Listing Data Model
//!
//! The record produced for a single listing URL. Records are built fresh for
//! every incoming message, rendered once and then dropped.

use serde::{Deserialize, Serialize};

/// Fields scraped from one marketplace listing page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// The URL exactly as the user sent it (trimmed)
    pub url: String,
    /// Listing title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Absolute photo URLs, de-duplicated, in first-seen order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    /// Price as a digit string, currency stripped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Mileage in kilometers as a digit string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage_km: Option<String>,
    /// Four digit model year
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
}

impl ListingRecord {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn has_images(&self) -> bool {
        !self.images.is_empty()
    }

    /// Number of optional fields that were found
    pub fn populated_fields(&self) -> usize {
        [
            self.title.is_some(),
            self.has_images(),
            self.price.is_some(),
            self.mileage_km.is_some(),
            self.year.is_some(),
        ]
        .iter()
        .filter(|found| **found)
        .count()
    }
}

/// Turn an extracted value into an optional field, dropping blank strings
pub(crate) fn non_empty(value: impl Into<String>) -> Option<String> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else if trimmed.len() == value.len() {
        Some(value)
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty() {
        let record = ListingRecord::new("https://m.encar.com/1");
        assert_eq!(record.url, "https://m.encar.com/1");
        assert!(!record.has_images());
        assert_eq!(record.populated_fields(), 0);
    }

    #[test]
    fn test_serialization_skips_absent_fields() {
        let mut record = ListingRecord::new("https://m.encar.com/1");
        record.year = Some("2019".to_string());

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "https://m.encar.com/1", "year": "2019"})
        );
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty("  "), None);
        assert_eq!(non_empty(""), None);
        assert_eq!(non_empty(" Kia "), Some("Kia".to_string()));
        assert_eq!(non_empty("Kia"), Some("Kia".to_string()));
    }
}
