//! # Listing Extractor Module
//!
//! Fetches a listing page and turns it into a [`ListingRecord`].
//!
//! Extraction is a fixed sequence of independent rules. Each rule fills the
//! field it is responsible for when an earlier rule left it empty, and a rule
//! that finds nothing simply leaves the field absent. Only the HTTP fetch can
//! fail; page content never produces an error.

use lazy_static::lazy_static;
use reqwest::Client;
use scraper::{Html, Node, Selector};
use tracing::{debug, info, instrument, warn};

use crate::config::ExtractorConfig;
use crate::listing_errors::FetchError;
use crate::listing_model::ListingRecord;
use crate::structured_data::find_listing_json_ld;
use crate::text_patterns::{find_mileage, find_price, find_year};
use crate::url_normalizer::{dedup_preserving_order, normalize_url};

lazy_static! {
    static ref IMG_SELECTOR: Selector = Selector::parse("img").expect("img selector should be valid");
}

// Elements whose text is never shown to the reader
const HIDDEN_TEXT_ELEMENTS: [&str; 4] = ["script", "style", "noscript", "template"];

/// A parsed listing page together with its flattened visible text
pub struct ListingPage<'a> {
    pub document: Html,
    pub text: String,
    pub origin: &'a str,
}

impl<'a> ListingPage<'a> {
    pub fn parse(html: &str, origin: &'a str) -> Self {
        let document = Html::parse_document(html);
        let text = visible_text(&document);
        Self {
            document,
            text,
            origin,
        }
    }
}

/// One extraction step
pub type ExtractionRule = fn(&ListingPage<'_>, &mut ListingRecord);

/// Extraction rules in the order they run
pub const EXTRACTION_RULES: [(&str, ExtractionRule); 5] = [
    ("structured_data", apply_structured_data),
    ("text_price", apply_text_price),
    ("text_mileage", apply_text_mileage),
    ("text_year", apply_text_year),
    ("image_elements", apply_image_elements),
];

fn apply_structured_data(page: &ListingPage<'_>, record: &mut ListingRecord) {
    if let Some(listing) = find_listing_json_ld(&page.document, page.origin) {
        record.title = listing.title;
        record.images = listing.images;
        record.price = listing.price;
    }
}

fn apply_text_price(page: &ListingPage<'_>, record: &mut ListingRecord) {
    if record.price.is_none() {
        record.price = find_price(&page.text);
    }
}

fn apply_text_mileage(page: &ListingPage<'_>, record: &mut ListingRecord) {
    record.mileage_km = find_mileage(&page.text);
}

fn apply_text_year(page: &ListingPage<'_>, record: &mut ListingRecord) {
    record.year = find_year(&page.text);
}

fn apply_image_elements(page: &ListingPage<'_>, record: &mut ListingRecord) {
    if record.images.is_empty() {
        record.images = image_sources(&page.document, page.origin);
    }
}

/// Collect `img` sources, preferring the lazy-load `data-src` attribute
pub fn image_sources(document: &Html, origin: &str) -> Vec<String> {
    let sources = document
        .select(&IMG_SELECTOR)
        .filter_map(|img| {
            let element = img.value();
            let raw = element
                .attr("data-src")
                .filter(|src| !src.trim().is_empty())
                .or_else(|| element.attr("src"));
            normalize_url(raw, origin)
        })
        .collect();

    dedup_preserving_order(sources)
}

/// Flatten the document's visible text: trimmed text nodes joined by a space
pub fn visible_text(document: &Html) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_TEXT_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }

        let trimmed = text.trim();
        if !trimmed.is_empty() {
            parts.push(trimmed);
        }
    }

    parts.join(" ")
}

/// Run every extraction rule over an already fetched page
pub fn parse_listing_html(url: &str, html: &str, origin: &str) -> ListingRecord {
    let page = ListingPage::parse(html, origin);
    let mut record = ListingRecord::new(url);

    for (name, rule) in EXTRACTION_RULES {
        rule(&page, &mut record);
        debug!(rule = name, populated = record.populated_fields(), "Extraction rule applied");
    }

    record
}

/// Fetches listing pages over HTTP and extracts their fields
#[derive(Debug, Clone)]
pub struct ListingExtractor {
    client: Client,
    config: ExtractorConfig,
}

impl ListingExtractor {
    /// Build an extractor with its own HTTP client
    ///
    /// The client carries the fixed `User-Agent` header and the request
    /// timeout for every fetch.
    pub fn new(config: ExtractorConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Fetch a listing page and extract whatever fields it carries
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the request fails, times out or the server
    /// answers with a non-success status.
    #[instrument(skip(self), fields(origin = %self.config.site_origin))]
    pub async fn extract(&self, url: &str) -> Result<ListingRecord, FetchError> {
        let body = self.fetch_page(url).await?;

        // Html is not Send; parsing stays after the last await.
        let record = parse_listing_html(url, &body, &self.config.site_origin);

        info!(
            fields_found = record.populated_fields(),
            images = record.images.len(),
            "Listing extracted"
        );

        Ok(record)
    }

    /// GET the page body, mapping transport and status failures to [`FetchError`]
    pub async fn fetch_page(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(error = %e, "Listing request failed");
            FetchError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Listing request returned error status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Listing page downloaded");
        Ok(body)
    }
}
