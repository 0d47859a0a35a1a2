use thiserror::Error;

/// Failure while pulling rows from the spreadsheet service.
///
/// Every variant is a "source unavailable" condition; an empty sheet is
/// not an error and is reported through [`crate::pipeline::Fetch::Empty`].
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - API key rejected")]
    Unauthorized,

    #[error("Sheet not found: {0}")]
    NotFound(String),

    #[error("Rate limited by the sheets service")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl SheetError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let mut end = MAX_ERROR_BODY_LENGTH;
            while !body.is_char_boundary(end) {
                end -= 1;
            }
            format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => SheetError::Unauthorized,
            403 => SheetError::AccessDenied(truncated),
            404 => SheetError::NotFound(truncated),
            429 => SheetError::RateLimited,
            500..=599 => SheetError::ServerError(truncated),
            _ => SheetError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}

/// Invalid or incomplete site configuration, detected before any fetch.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Failure loading one of the static markdown documents.
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
