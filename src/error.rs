// Error types for sitefront.
// Covers HTTP fetch failures, routing misses, configuration and parsing errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} {reason} for {url}")]
    Status {
        url: String,
        status: u16,
        reason: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("No route matches {0}")]
    RouteNotFound(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl From<toml::de::Error> for SiteError {
    fn from(err: toml::de::Error) -> Self {
        SiteError::Config(err.to_string())
    }
}

impl From<url::ParseError> for SiteError {
    fn from(err: url::ParseError) -> Self {
        SiteError::InvalidUrl(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = SiteError::Status {
            url: "http://localhost/data/cards.json".to_string(),
            status: 503,
            reason: "Service Unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 503 Service Unavailable for http://localhost/data/cards.json"
        );
    }

    #[test]
    fn test_url_error_conversion() {
        let err: SiteError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, SiteError::InvalidUrl(_)));
    }
}
