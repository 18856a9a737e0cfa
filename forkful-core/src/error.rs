use thiserror::Error;

/// Errors from the external meal catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid response payload: {0}")]
    InvalidPayload(String),
}

/// Errors from the favorites API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response payload: {0}")]
    InvalidPayload(String),
}
