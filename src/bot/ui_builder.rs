//! UI Builder module for formatting replies and preparing photos

use reqwest::Url;
use teloxide::types::{InputFile, InputMedia, InputMediaPhoto};

use crate::listing_errors::FetchError;
use crate::listing_model::ListingRecord;
use crate::localization::LocalizationManager;

/// Format a listing as the reply text
///
/// Lines appear in a fixed order: title, price, mileage, year, link. Price,
/// mileage and year lines are left out when the field is absent.
pub fn format_listing_reply(
    record: &ListingRecord,
    localization: &LocalizationManager,
    language: &str,
) -> String {
    let untitled;
    let title = match record.title.as_deref() {
        Some(title) => title,
        None => {
            untitled = localization.message("listing-untitled", language);
            untitled.as_str()
        }
    };

    let mut reply = localization.message_with_args("listing-title", language, &[("title", title)]);
    reply.push('\n');

    let optional_lines = [
        ("listing-price", "price", record.price.as_deref()),
        ("listing-mileage", "mileage", record.mileage_km.as_deref()),
        ("listing-year", "year", record.year.as_deref()),
    ];
    for (key, arg, value) in optional_lines {
        if let Some(value) = value {
            reply.push_str(&localization.message_with_args(key, language, &[(arg, value)]));
            reply.push('\n');
        }
    }

    reply.push_str(&localization.message_with_args(
        "listing-link",
        language,
        &[("url", record.url.as_str())],
    ));

    reply
}

/// Format the reply sent when a listing could not be fetched
pub fn format_error_reply(
    error: &FetchError,
    localization: &LocalizationManager,
    language: &str,
) -> String {
    let error_text = error.to_string();
    localization.message_with_args("error-parse", language, &[("error", error_text.as_str())])
}

/// What to send after the text reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoPlan {
    Nothing,
    Single(Url),
    Album(Vec<Url>),
}

impl PhotoPlan {
    pub fn len(&self) -> usize {
        match self {
            PhotoPlan::Nothing => 0,
            PhotoPlan::Single(_) => 1,
            PhotoPlan::Album(urls) => urls.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Media items for an album, one photo per URL
    pub fn album_media(&self) -> Vec<InputMedia> {
        match self {
            PhotoPlan::Album(urls) => urls
                .iter()
                .map(|url| InputMedia::Photo(InputMediaPhoto::new(InputFile::url(url.clone()))))
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Pick the photos to send from the first `max` images
///
/// Entries that are not valid http(s) URLs are dropped without pulling in
/// images from further down the list. One photo is sent on its own, two or
/// more as a grouped album.
pub fn plan_photos(images: &[String], max: usize) -> PhotoPlan {
    let mut urls: Vec<Url> = images
        .iter()
        .take(max)
        .filter_map(|image| Url::parse(image).ok())
        .filter(|url| matches!(url.scheme(), "http" | "https"))
        .collect();

    match urls.len() {
        0 => PhotoPlan::Nothing,
        1 => PhotoPlan::Single(urls.remove(0)),
        _ => PhotoPlan::Album(urls),
    }
}
