//! # Text Patterns Module
//!
//! Regex rules applied to the flattened visible text of a listing page.
//!
//! Each rule is independent: it either finds its field or returns `None`.
//! The patterns target Encar's Korean labels and won amounts.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

// Number with thousands separators followed by a won marker, e.g. "15,230,000원"
const PRICE_PATTERN: &str = r"([0-9,]+)\s*(원|₩|KRW)";

// Mileage label followed by a number, e.g. "주행거리: 45,000"
const MILEAGE_PATTERN: &str = r"(주행거리|주행)\s*[:\-]?\s*([0-9,]+)";

// 19xx/20xx not embedded in a longer run of digits
const YEAR_PATTERN: &str = r"(?:^|[^0-9])((?:19|20)[0-9]{2})(?:[^0-9]|$)";

lazy_static! {
    static ref PRICE_REGEX: Regex =
        Regex::new(PRICE_PATTERN).expect("Price pattern should be valid");
    static ref MILEAGE_REGEX: Regex =
        Regex::new(MILEAGE_PATTERN).expect("Mileage pattern should be valid");
    static ref YEAR_REGEX: Regex = Regex::new(YEAR_PATTERN).expect("Year pattern should be valid");
}

/// Keep only ASCII digits; an input without digits yields `None`
///
/// # Examples
///
/// ```rust
/// use encar_bot::text_patterns::digits_only;
///
/// assert_eq!(digits_only("15,230,000").as_deref(), Some("15230000"));
/// assert_eq!(digits_only(",,"), None);
/// ```
pub fn digits_only(value: &str) -> Option<String> {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}

/// Find the first won-denominated amount in the text
pub fn find_price(text: &str) -> Option<String> {
    let captures = PRICE_REGEX.captures(text)?;
    trace!(matched = %&captures[0], "Price pattern matched");
    digits_only(&captures[1])
}

/// Find the mileage that follows a mileage label
pub fn find_mileage(text: &str) -> Option<String> {
    let captures = MILEAGE_REGEX.captures(text)?;
    trace!(matched = %&captures[0], "Mileage pattern matched");
    digits_only(&captures[2])
}

/// Find the first standalone 19xx/20xx number
pub fn find_year(text: &str) -> Option<String> {
    YEAR_REGEX
        .captures(text)
        .map(|captures| captures[1].to_string())
}
