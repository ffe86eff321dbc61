//! # Listing Error Types Module
//!
//! This module defines the error type returned when a listing page cannot be
//! fetched. Missing fields on a fetched page are never errors.

/// Errors raised while fetching a listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP client construction errors
    Client(String),
    /// Transport and request-building errors (DNS, connection, invalid URL)
    Request(String),
    /// The request exceeded the configured timeout
    Timeout(String),
    /// Non-success HTTP status
    Status { status: u16, url: String },
    /// Response body could not be read
    Body(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Client(msg) => write!(f, "HTTP client error: {msg}"),
            FetchError::Request(msg) => write!(f, "Request error: {msg}"),
            FetchError::Timeout(msg) => write!(f, "Timeout error: {msg}"),
            FetchError::Status { status, url } => {
                write!(f, "HTTP status {status} for url {url}")
            }
            FetchError::Body(msg) => write!(f, "Body read error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            }
        } else if err.is_body() || err.is_decode() {
            FetchError::Body(err.to_string())
        } else {
            FetchError::Request(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = FetchError::Status {
            status: 404,
            url: "https://m.encar.com/x".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP status 404 for url https://m.encar.com/x");
    }

    #[test]
    fn test_variant_prefixes() {
        assert_eq!(
            FetchError::Timeout("15s".to_string()).to_string(),
            "Timeout error: 15s"
        );
        assert_eq!(
            FetchError::Request("dns".to_string()).to_string(),
            "Request error: dns"
        );
    }
}
