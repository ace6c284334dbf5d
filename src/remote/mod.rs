/// Remote access layer: one request per call against a WebDAV server.
///
/// ```text
///   Session ──► listing::list_entries ──► PROPFIND {base}{folder}/  (207)
///          └──► fetch::fetch_text     ──► GET      {base}{file}     (200)
///                          │
///                          ▼
///                  dyn Transport  (HttpTransport | MemoryTransport)
/// ```

pub mod fetch;
pub mod http;
pub mod listing;
pub mod memory;

use std::fmt;

use crate::error::TransportError;

pub use http::HttpTransport;
pub use memory::MemoryTransport;

/// The HTTP methods the pipeline issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Propfind,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Propfind => "PROPFIND",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and body of a completed request, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Sends a single request. Non-2xx statuses are responses, not errors; only
/// failures to obtain a response at all are [`TransportError`]s.
pub trait Transport {
    fn send(&self, method: Method, url: &str) -> Result<RawResponse, TransportError>;
}

/// `{base}{path}` with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_normalizes_slashes() {
        assert_eq!(join_url("https://h/dav/", "/master.csv"), "https://h/dav/master.csv");
        assert_eq!(join_url("https://h/dav", "master.csv"), "https://h/dav/master.csv");
        assert_eq!(join_url("https://h/dav", "/processed/"), "https://h/dav/processed/");
    }
}
