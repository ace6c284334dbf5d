//! TOML configuration with environment overrides for secrets.
//!
//! ```toml
//! # bcviz.toml
//! [nextcloud]
//! url = "https://cloud.example.org/remote.php/dav/files/brian"
//! username = "brian"
//! # password usually comes from BCVIZ_PASSWORD
//! timeout_secs = 30
//!
//! [paths]
//! master = "/master.csv"
//! spectra_folder = "/processed"
//!
//! [normalization]
//! min = 0.0
//! max = 1.0
//!
//! [dashboard]
//! parameters = ["BET", "pH", "Yield", "pore size", "pore volume"]
//! show_methodology = true
//! synthetic_panel = false
//! ```

use std::fmt;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

use crate::data::normalize::NormRange;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "bcviz.toml";

pub const ENV_URL: &str = "BCVIZ_URL";
pub const ENV_USERNAME: &str = "BCVIZ_USERNAME";
pub const ENV_PASSWORD: &str = "BCVIZ_PASSWORD";

/// Root configuration structure for bcviz.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub nextcloud: RemoteConfig,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub normalization: NormRange,
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Server and credentials.
#[derive(Clone, Default, Deserialize)]
pub struct RemoteConfig {
    /// WebDAV root, e.g. `https://host/remote.php/dav/files/<user>`.
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Per-request timeout. Unset means the client default (none).
    pub timeout_secs: Option<u64>,
}

/// `{url, username, password}` as handed to the transport.
#[derive(Clone, PartialEq)]
pub struct Credentials {
    pub url: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RemoteConfig {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Remote locations of the inputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub master: String,
    pub spectra_folder: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            master: "/master.csv".to_string(),
            spectra_folder: "/processed".to_string(),
        }
    }
}

/// Presentation switches. These replace the separate script variants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub title: String,
    /// Master columns offered in the parameter picker.
    pub parameters: Vec<String>,
    pub show_methodology: bool,
    pub methodology: String,
    /// Illustrative scatter of random points, unrelated to fetched data.
    pub synthetic_panel: bool,
    /// Displayed wavenumber axis, left edge first.
    pub wavenumber_range: [f64; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            title: "AC/BC Viz".to_string(),
            parameters: ["BET", "pH", "Yield", "pore size", "pore volume"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            show_methodology: false,
            methodology: String::new(),
            synthetic_panel: false,
            wavenumber_range: [4000.0, 400.0],
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Explicit file, else `bcviz.toml` if present, else defaults; then
    /// environment overrides and validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Override credentials from `BCVIZ_*` variables found by `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_URL) {
            self.nextcloud.url = url;
        }
        if let Some(user) = lookup(ENV_USERNAME) {
            self.nextcloud.username = user;
        }
        if let Some(pass) = lookup(ENV_PASSWORD) {
            self.nextcloud.password = pass;
        }
    }

    pub fn validate(&self) -> Result<()> {
        let url = &self.nextcloud.url;
        if url.is_empty() {
            bail!("No server URL configured (set [nextcloud].url or {ENV_URL})");
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            bail!("Server URL must start with http:// or https://, got '{url}'");
        }
        if self.normalization.min == self.normalization.max {
            bail!(
                "Normalization range is empty: min and max are both {}",
                self.normalization.min
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [nextcloud]
            url = "https://cloud.example.org/remote.php/dav/files/brian"
            username = "brian"
            timeout_secs = 15

            [paths]
            spectra_folder = "/atr"

            [normalization]
            min = -1.0

            [dashboard]
            parameters = ["BET"]
            synthetic_panel = true
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.nextcloud.username, "brian");
        assert_eq!(config.nextcloud.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.paths.master, "/master.csv");
        assert_eq!(config.paths.spectra_folder, "/atr");
        assert_eq!(config.normalization, NormRange { min: -1.0, max: 1.0 });
        assert_eq!(config.dashboard.parameters, vec!["BET"]);
        assert!(config.dashboard.synthetic_panel);
        assert_eq!(config.dashboard.wavenumber_range, [4000.0, 400.0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert_eq!(config.paths.spectra_folder, "/processed");
        assert_eq!(config.dashboard.parameters.len(), 5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides_credentials() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_URL, "https://other.example.org/dav"),
            (ENV_PASSWORD, "s3cret"),
        ]);
        let mut config = Config::from_str("[nextcloud]\nurl = \"https://x\"\nusername = \"u\"\n").unwrap();
        config.apply_env(|k| env.get(k).map(|v| v.to_string()));
        let creds = config.nextcloud.credentials();
        assert_eq!(creds.url, "https://other.example.org/dav");
        assert_eq!(creds.username, "u");
        assert_eq!(creds.password, "s3cret");
    }

    #[test]
    fn test_password_redacted() {
        let mut config = Config::default();
        config.nextcloud.password = "hunter2".into();
        assert!(!format!("{config:?}").contains("hunter2"));
        assert!(!format!("{:?}", config.nextcloud.credentials()).contains("hunter2"));
    }

    #[test]
    fn test_rejects_bad_url_and_range() {
        let mut config = Config::default();
        config.nextcloud.url = "ftp://host".into();
        assert!(config.validate().is_err());
        config.nextcloud.url = "https://host".into();
        config.normalization = NormRange { min: 1.0, max: 1.0 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[nextcloud]\nurl = \"https://host/dav\"").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert!(config.nextcloud.url.starts_with("https://"));
    }
}
