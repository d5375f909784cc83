//! Version resolution layer
//!
//! Combines installed package metadata with administrator-supplied release
//! override files to answer "what version is this, and who built it".
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────────┐
//! │ Distribution │────▶│ VersionInfo  │◀────│ ConfigFileLocator│
//! │    Index     │     │  (memoized)  │     │  (release.conf)  │
//! └──────────────┘     └──────────────┘     └──────────────────┘
//!        │                    │
//!        ▼                    ▼
//! ┌──────────────┐     ┌──────────────┐
//! │   Provider   │     │ BuildMetadata│
//! │  (PKG-INFO)  │     │  (setup.cfg) │
//! └──────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`info`]: `VersionInfo`, the per-package facade
//! - [`release`]: Short version derivation from a release string
//! - [`error`]: Error type for version resolution

pub mod error;
pub mod info;
mod memo;
pub mod release;

pub use error::VersionError;
pub use info::{VendorStrings, VersionInfo};
pub use release::short_version;
