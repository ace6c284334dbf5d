use std::fmt;

use crate::cache::{CacheKey, Cached, FetchCache};
use crate::config::{Config, PathsConfig};
use crate::data::model::{MasterTable, SpectrumTable};
use crate::data::normalize::NormRange;
use crate::error::Result;
use crate::remote::{fetch, listing, HttpTransport, Transport};

// ---------------------------------------------------------------------------
// Warnings surfaced to the user instead of aborting
// ---------------------------------------------------------------------------

/// A failed operation that was downgraded to an empty result.
#[derive(Debug, Clone, PartialEq)]
pub struct Warning {
    /// What was being attempted, e.g. `list /processed`.
    pub context: String,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.message)
    }
}

// ---------------------------------------------------------------------------
// Session – configuration, transport and memoized fetches
// ---------------------------------------------------------------------------

/// Everything one dashboard session shares: where the data lives, how to
/// reach it, and what has already been fetched.
pub struct Session<T: Transport> {
    base_url: String,
    paths: PathsConfig,
    range: NormRange,
    transport: T,
    cache: FetchCache,
    warnings: Vec<Warning>,
}

impl Session<HttpTransport> {
    /// Session over HTTPS using the configured credentials.
    pub fn connect(config: &Config) -> Self {
        let transport = HttpTransport::new(&config.nextcloud.credentials(), config.nextcloud.timeout());
        Session::new(config, transport)
    }
}

impl<T: Transport> Session<T> {
    pub fn new(config: &Config, transport: T) -> Self {
        Session {
            base_url: config.nextcloud.url.clone(),
            paths: config.paths.clone(),
            range: config.normalization,
            transport,
            cache: FetchCache::new(),
            warnings: Vec::new(),
        }
    }

    // -- memoized operations --

    /// Names under `folder_path`. One PROPFIND per distinct folder per session;
    /// `/processed` and `/processed/` name the same folder.
    pub fn list_entries(&mut self, folder_path: &str) -> Result<Vec<String>> {
        let key = CacheKey::Listing(folder_path.trim_end_matches('/').to_string());
        if let Some(Cached::Listing(v)) = self.cache.get(&key) {
            return Ok(v.clone());
        }
        let entries = listing::list_entries(&self.transport, &self.base_url, folder_path)?;
        log::info!("Listed {} entries under {folder_path}", entries.len());
        self.cache.insert(key, Cached::Listing(entries.clone()));
        Ok(entries)
    }

    /// The master inventory at `path`. One GET per distinct path per session.
    pub fn fetch_master(&mut self, path: &str) -> Result<MasterTable> {
        let key = CacheKey::Master(path.to_string());
        if let Some(Cached::Master(m)) = self.cache.get(&key) {
            return Ok(m.clone());
        }
        let master = fetch::fetch_master(&self.transport, &self.base_url, path)?;
        log::info!(
            "Loaded master inventory {path}: {} rows, columns {:?}",
            master.len(),
            master.columns
        );
        self.cache.insert(key, Cached::Master(master.clone()));
        Ok(master)
    }

    /// One raw (un-normalized) spectrum. One GET per distinct path per session.
    pub fn fetch_spectrum(&mut self, path: &str) -> Result<SpectrumTable> {
        let key = CacheKey::Spectrum(path.to_string());
        if let Some(Cached::Spectrum(s)) = self.cache.get(&key) {
            return Ok(s.clone());
        }
        let spectrum = fetch::fetch_spectrum(&self.transport, &self.base_url, path)?;
        log::debug!("Loaded spectrum {path}: {} points", spectrum.len());
        self.cache.insert(key, Cached::Spectrum(spectrum.clone()));
        Ok(spectrum)
    }

    // -- warn-and-continue wrappers --

    pub fn list_entries_or_warn(&mut self, folder_path: &str) -> Vec<String> {
        match self.list_entries(folder_path) {
            Ok(v) => v,
            Err(e) => {
                self.warn(format!("list {folder_path}"), &e);
                Vec::new()
            }
        }
    }

    pub fn fetch_master_or_warn(&mut self, path: &str) -> Option<MasterTable> {
        match self.fetch_master(path) {
            Ok(m) => Some(m),
            Err(e) => {
                self.warn(format!("load master {path}"), &e);
                None
            }
        }
    }

    /// Master inventory at the configured path.
    pub fn master(&mut self) -> Option<MasterTable> {
        let path = self.paths.master.clone();
        self.fetch_master_or_warn(&path)
    }

    /// Listing of the configured spectra folder.
    pub fn spectra_entries(&mut self) -> Vec<String> {
        let folder = self.paths.spectra_folder.clone();
        self.list_entries_or_warn(&folder)
    }

    /// Remote path of a spectrum file inside the spectra folder.
    pub fn spectrum_path(&self, name: &str) -> String {
        format!("{}/{}", self.paths.spectra_folder.trim_end_matches('/'), name)
    }

    pub fn warn(&mut self, context: String, error: &dyn std::error::Error) {
        log::warn!("{context}: {error}");
        self.warnings.push(Warning {
            context,
            message: error.to_string(),
        });
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<Warning> {
        std::mem::take(&mut self.warnings)
    }

    pub fn norm_range(&self) -> NormRange {
        self.range
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache(&self) -> &FetchCache {
        &self.cache
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::{Error, ListingError};
    use crate::remote::{MemoryTransport, Method};

    pub const BASE: &str = "https://cloud.example.org/dav";

    pub fn config() -> Config {
        let mut config = Config::default();
        config.nextcloud.url = BASE.to_string();
        config
    }

    #[test]
    fn repeated_fetch_issues_one_request() {
        let url = format!("{BASE}/processed/a.dpt");
        let transport = MemoryTransport::new().with_response(Method::Get, &url, 200, "1,2\n3,4\n");
        let mut session = Session::new(&config(), transport);

        let first = session.fetch_spectrum("/processed/a.dpt").unwrap();
        let second = session.fetch_spectrum("/processed/a.dpt").unwrap();
        assert_eq!(first, second);
        assert_eq!(session.transport().count(Method::Get, &url), 1);
        assert_eq!(session.cache().hits(), 1);
    }

    const LISTING: &str = r#"<d:multistatus xmlns:d="DAV:">
        <d:response><d:href>/dav/processed/</d:href></d:response>
        <d:response><d:href>/dav/processed/a.dpt</d:href></d:response>
    </d:multistatus>"#;

    #[test]
    fn repeated_listing_issues_one_propfind() {
        let url = format!("{BASE}/processed/");
        let transport = MemoryTransport::new().with_response(Method::Propfind, &url, 207, LISTING);
        let mut session = Session::new(&config(), transport);

        let first = session.list_entries("/processed").unwrap();
        let second = session.list_entries("/processed").unwrap();
        assert_eq!(first, vec!["a.dpt"]);
        assert_eq!(first, second);
        assert_eq!(session.transport().count(Method::Propfind, &url), 1);
        assert_eq!(session.cache().hits(), 1);
    }

    #[test]
    fn trailing_slash_shares_listing_cache() {
        let url = format!("{BASE}/processed/");
        let transport = MemoryTransport::new().with_response(Method::Propfind, &url, 207, LISTING);
        let mut session = Session::new(&config(), transport);

        let plain = session.list_entries("/processed").unwrap();
        let slashed = session.list_entries("/processed/").unwrap();
        assert_eq!(plain, slashed);
        assert_eq!(session.transport().count(Method::Propfind, &url), 1);
        assert_eq!(session.cache().len(), 1);
    }

    #[test]
    fn repeated_master_issues_one_get() {
        let url = format!("{BASE}/master.csv");
        let transport = MemoryTransport::new().with_response(Method::Get, &url, 200, "Code,BET\nBC01,512.4\n");
        let mut session = Session::new(&config(), transport);

        let first = session.fetch_master("/master.csv").unwrap();
        let second = session.master().unwrap();
        assert_eq!(first.codes(), vec!["BC01"]);
        assert_eq!(first, second);
        assert_eq!(session.transport().count(Method::Get, &url), 1);
        assert_eq!(session.cache().hits(), 1);
    }

    #[test]
    fn failures_are_not_memoized() {
        let mut session = Session::new(&config(), MemoryTransport::new());
        assert!(session.fetch_master("/master.csv").is_err());
        assert!(session.fetch_master("/master.csv").is_err());
        let url = format!("{BASE}/master.csv");
        assert_eq!(session.transport().count(Method::Get, &url), 2);
        assert!(session.cache().is_empty());
    }

    #[test]
    fn listing_404_warns_and_returns_empty() {
        let mut session = Session::new(&config(), MemoryTransport::new());
        assert!(matches!(
            session.list_entries("/processed"),
            Err(Error::Listing { reason: ListingError::Status(404), .. })
        ));
        assert!(session.spectra_entries().is_empty());
        let warnings = session.warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].context, "list /processed");
        assert!(warnings[0].message.contains("404"));
    }

    #[test]
    fn master_failure_is_absent_not_fatal() {
        let url = format!("{BASE}/master.csv");
        let transport = MemoryTransport::new().with_failure(Method::Get, &url, "timed out");
        let mut session = Session::new(&config(), transport);
        assert!(session.master().is_none());
        assert_eq!(session.take_warnings().len(), 1);
        assert!(session.warnings().is_empty());
    }

    #[test]
    fn spectrum_path_joins_folder() {
        let session = Session::new(&config(), MemoryTransport::new());
        assert_eq!(session.spectrum_path("a.dpt"), "/processed/a.dpt");
    }
}
