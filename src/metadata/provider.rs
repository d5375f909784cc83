//! Traits for looking up installed package metadata

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;

use crate::metadata::error::MetadataError;

/// Handle to one installed distribution
#[cfg_attr(test, automock)]
pub trait Provider: Send + Sync {
    /// Installed version string, including any VCS-derived suffix
    fn version(&self) -> String;

    /// Reads a metadata file of the distribution (e.g. `PKG-INFO`)
    fn get_metadata(&self, name: &str) -> Result<String, MetadataError>;
}

/// Index of installed distributions
#[cfg_attr(test, automock)]
pub trait DistributionIndex: Send + Sync {
    /// Finds the distribution for `package`
    ///
    /// # Returns
    /// * `Ok(Some(provider))` - The package is installed
    /// * `Ok(None)` - The package is not installed; this is not an error
    /// * `Err(MetadataError)` - The package name is invalid or its metadata is unreadable
    fn get_provider(&self, package: &str) -> Result<Option<Arc<dyn Provider>>, MetadataError>;
}
