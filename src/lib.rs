//! # Encar Listing Bot
//!
//! A Telegram bot that takes an Encar car-listing URL, scrapes the page and
//! replies with the title, price, mileage, year and up to five photos.

pub mod bot;
pub mod config;
pub mod extractor;
pub mod listing_errors;
pub mod listing_model;
pub mod localization;
pub mod logging;
pub mod structured_data;
pub mod text_patterns;
pub mod url_normalizer;
