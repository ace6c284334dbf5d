//! Remote data pipeline behind the AC/BC dashboard.
//!
//! ```text
//!  Nextcloud (WebDAV)
//!        │  PROPFIND / GET, Basic auth
//!        ▼
//!   remote::{listing, fetch} ──► data::loader ──► MasterTable / SpectrumTable
//!        │                                              │
//!        ▼                                              ▼
//!   Session (cache, warnings) ──► batch::load_batch ──► data::normalize
//!                                        │
//!                                        ▼
//!                                 SampleCollection ──► dashboard / CLI
//! ```

pub mod batch;
pub mod cache;
pub mod config;
pub mod data;
pub mod error;
pub mod remote;
pub mod session;
pub mod synthetic;

pub use error::{Error, Result};
pub use session::Session;
