use thiserror::Error;

/// The only failure the parser reports. Everything else is skipped and logged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty report text")]
    EmptyInput,
}

/// Failures inside the extract client. They never leave `fetch`; callers see an empty string.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("wikipedia responded with {0}")]
    Status(reqwest::StatusCode),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("there must be only one page, got {0}")]
    PageCount(usize),
}
