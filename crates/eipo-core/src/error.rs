use thiserror::Error;

/// Application-wide error types for the e-IPO scraper.
#[derive(Error, Debug)]
pub enum AppError {
    /// Server answered with a non-2xx status other than 403.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The site's anti-automation defenses rejected the request (HTTP 403).
    #[error(
        "HTTP 403 for {url}: access blocked by the site's anti-automation defenses; \
         a browser-automation fetcher is required"
    )]
    AccessDenied { url: String },

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Invalid site or run configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Writing an output file failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV encoding failed.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl AppError {
    /// Returns true if the lightweight HTTP client cannot get past the site
    /// and a real browser is needed.
    pub fn requires_browser(&self) -> bool {
        matches!(self, AppError::AccessDenied { .. })
    }
}
