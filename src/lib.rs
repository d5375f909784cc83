//! Runtime version and vendor information for installed packages.
//!
//! ```no_run
//! use version_info::VersionInfo;
//!
//! let info = VersionInfo::new("nova");
//! println!("{} {}", info.version()?, info.vendor()?.unwrap_or_default());
//! # Ok::<(), version_info::VersionError>(())
//! ```

pub mod config;
pub mod locator;
pub mod logging;
pub mod metadata;
pub mod parser;
pub mod version;

pub use locator::ConfigFileLocator;
pub use version::{VendorStrings, VersionError, VersionInfo};
