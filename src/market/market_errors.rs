use thiserror::Error;

/// Errors that can occur when fetching upstream fund data
#[derive(Error, Debug)]
pub enum MarketError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request exceeded its deadline
    #[error("Request timed out for fund {0}")]
    Timeout(String),

    /// No data available for the requested fund
    #[error("No data available for fund {0}")]
    NoData(String),

    /// Failed to parse an upstream response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Upstream returned a non-success status
    #[error("API error: {0}")]
    ApiError(String),
}
