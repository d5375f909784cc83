//! Build-time metadata from an uninstalled source tree
//!
//! Used when a package has no installed metadata, e.g. when running from a
//! checkout or an unpacked sdist. Reads `[metadata]` from `setup.cfg`:
//!
//! ```text
//! [metadata]
//! name = nova
//! version = 2013.1
//! author = OpenStack
//! summary = Cloud computing fabric controller
//! ```
//!
//! An sdist's top-level `PKG-INFO` supplies the version when `setup.cfg`
//! does not.

use std::path::PathBuf;

#[cfg(test)]
use mockall::automock;
use tracing::debug;

use crate::config::{PKG_INFO, SETUP_CFG};
use crate::metadata::error::MetadataError;
use crate::parser::{IniDocument, IniParser, Parser, PkgInfo, PkgInfoParser};

const METADATA_SECTION: &str = "metadata";

/// Vendor and product defaults from build metadata
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorDefaults {
    pub vendor: Option<String>,
    pub product: Option<String>,
}

/// Source of version and vendor strings for packages that are not installed
#[cfg_attr(test, automock)]
pub trait BuildMetadata: Send + Sync {
    /// Version of `package`, or `None` if the source tree does not record one
    fn version(&self, package: &str) -> Result<Option<String>, MetadataError>;

    /// Author and summary of the project
    fn vendor_defaults(&self) -> Result<VendorDefaults, MetadataError>;
}

/// Build metadata read from a project root directory
#[derive(Debug, Clone)]
pub struct SetupCfg {
    root: PathBuf,
}

impl SetupCfg {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project rooted at the working directory
    pub fn in_current_dir() -> Self {
        Self::new(".")
    }

    fn read_optional(&self, name: &str) -> Result<Option<(PathBuf, String)>, MetadataError> {
        let path = self.root.join(name);
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some((path, content))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No {} in {:?}", name, self.root);
                Ok(None)
            }
            Err(source) => Err(MetadataError::Io { path, source }),
        }
    }

    fn setup_cfg(&self) -> Result<Option<IniDocument>, MetadataError> {
        let Some((path, content)) = self.read_optional(SETUP_CFG)? else {
            return Ok(None);
        };
        IniParser::new()
            .parse(&content)
            .map(Some)
            .map_err(|source| MetadataError::Parse { path, source })
    }

    fn pkg_info(&self) -> Result<Option<PkgInfo>, MetadataError> {
        let Some((path, content)) = self.read_optional(PKG_INFO)? else {
            return Ok(None);
        };
        PkgInfoParser::new()
            .parse(&content)
            .map(Some)
            .map_err(|source| MetadataError::Parse { path, source })
    }
}

impl BuildMetadata for SetupCfg {
    fn version(&self, package: &str) -> Result<Option<String>, MetadataError> {
        if let Some(cfg) = self.setup_cfg()?
            && let Some(version) = cfg.get(METADATA_SECTION, "version")
            && !version.is_empty()
        {
            return Ok(Some(version.to_string()));
        }

        let Some(info) = self.pkg_info()? else {
            return Ok(None);
        };
        let same_package = info
            .get("Name")
            .is_some_and(|name| name.eq_ignore_ascii_case(package));
        if !same_package {
            debug!("{} in {:?} is not for {}", PKG_INFO, self.root, package);
            return Ok(None);
        }
        Ok(info.get("Version").map(str::to_string))
    }

    fn vendor_defaults(&self) -> Result<VendorDefaults, MetadataError> {
        let Some(cfg) = self.setup_cfg()? else {
            return Ok(VendorDefaults::default());
        };
        Ok(VendorDefaults {
            vendor: cfg.get(METADATA_SECTION, "author").map(str::to_string),
            product: cfg
                .get(METADATA_SECTION, "summary")
                .or_else(|| cfg.get(METADATA_SECTION, "description"))
                .map(str::to_string),
        })
    }
}
