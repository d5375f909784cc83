//! Package metadata sources
//!
//! # Modules
//!
//! - [`provider`]: `Provider` and `DistributionIndex` traits for installed metadata
//! - [`site_packages`]: Index over `.dist-info` / `.egg-info` directories
//! - [`setup_cfg`]: Build-time fallback read from a source tree
//! - [`error`]: Error type for metadata lookups

pub mod error;
pub mod provider;
pub mod setup_cfg;
pub mod site_packages;

pub use error::MetadataError;
pub use provider::{DistributionIndex, Provider};
pub use setup_cfg::{BuildMetadata, SetupCfg, VendorDefaults};
pub use site_packages::{InstalledDistribution, SitePackagesIndex};
