use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy for the remote data pipeline
// ---------------------------------------------------------------------------

/// Any failure of a pipeline operation.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("listing {path} failed: {reason}")]
    Listing { path: String, reason: ListingError },

    #[error("fetching {path} failed: {reason}")]
    Fetch { path: String, reason: FetchError },

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// The request never produced a response (connection, TLS, timeout, body read).
#[derive(Debug, Error)]
#[error("request to {url} failed: {message}")]
pub struct TransportError {
    pub url: String,
    pub message: String,
}

/// A folder listing came back but could not be used.
#[derive(Debug, Error, PartialEq)]
pub enum ListingError {
    /// Anything other than 207 Multi-Status.
    #[error("unexpected HTTP status {0} (expected 207)")]
    Status(u16),
    #[error("malformed multistatus XML: {0}")]
    Xml(String),
}

/// A file download came back but could not be decoded into a table.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unexpected HTTP status {0} (expected 200)")]
    Status(u16),
    #[error("body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {message}")]
    Parse { line: u64, message: String },
}

/// Min-max normalization is undefined for the given column.
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    #[error("degenerate range: every value equals {value}")]
    DegenerateRange { value: f64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
