//! Bot module for handling Telegram interactions
//!
//! This module is split into several submodules:
//! - `message_handler`: Classifies incoming text and runs the listing flow
//! - `ui_builder`: Formats replies and plans which photos to send
//! - `dispatcher`: Wires the handler into a teloxide dispatcher

pub mod dispatcher;
pub mod message_handler;
pub mod ui_builder;

// Re-export main entry points for use in main.rs
pub use dispatcher::run;
pub use message_handler::message_handler;

// Re-export utility functions that might be used elsewhere
pub use message_handler::{classify_message, IncomingMessage};
pub use ui_builder::{format_error_reply, format_listing_reply, plan_photos, PhotoPlan};
