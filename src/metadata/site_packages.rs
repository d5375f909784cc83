//! Installed distribution lookup over site-packages style directories
//!
//! Each metadata root is scanned for:
//! - `{name}-{version}.dist-info/` (metadata file `METADATA`)
//! - `{name}-{version}[-pyX.Y].egg-info/` (metadata file `PKG-INFO`)
//! - `{name}.egg-info` as a plain file holding the `PKG-INFO` content
//!
//! Names are compared after PEP 503 normalization, so `python_novaclient`,
//! `Python.NovaClient` and `python-novaclient` all match.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use pep508_rs::{Requirement, VerbatimUrl};
use tracing::{debug, warn};

use crate::config::{PKG_INFO, metadata_search_path};
use crate::metadata::error::MetadataError;
use crate::metadata::provider::{DistributionIndex, Provider};
use crate::parser::{Parser, PkgInfoParser};

const DIST_INFO_SUFFIX: &str = ".dist-info";
const EGG_INFO_SUFFIX: &str = ".egg-info";
const DIST_INFO_METADATA: &str = "METADATA";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    DistInfo,
    EggInfoDir,
    EggInfoFile,
}

/// A distribution found in a metadata root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledDistribution {
    name: String,
    version: String,
    path: PathBuf,
    layout: Layout,
}

impl InstalledDistribution {
    /// Build a distribution from a `.dist-info` / `.egg-info` entry.
    ///
    /// Returns `Ok(None)` for entries that are not distribution metadata.
    pub fn from_metadata_path(path: &Path) -> Result<Option<Self>, MetadataError> {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Ok(None);
        };

        let (stem, layout) = if let Some(stem) = file_name.strip_suffix(DIST_INFO_SUFFIX) {
            (stem, Layout::DistInfo)
        } else if let Some(stem) = file_name.strip_suffix(EGG_INFO_SUFFIX) {
            if path.is_dir() {
                (stem, Layout::EggInfoDir)
            } else {
                (stem, Layout::EggInfoFile)
            }
        } else {
            return Ok(None);
        };

        let Some(name) = distribution_name(path) else {
            return Ok(None);
        };

        let mut dist = Self {
            name: name.to_string(),
            version: stem.split('-').nth(1).unwrap_or_default().to_string(),
            path: path.to_path_buf(),
            layout,
        };

        if dist.version.is_empty() {
            let content = dist.get_metadata(PKG_INFO)?;
            let info = PkgInfoParser::new()
                .parse(&content)
                .map_err(|source| MetadataError::Parse {
                    path: dist.metadata_path(PKG_INFO),
                    source,
                })?;
            dist.version = info
                .get("Version")
                .filter(|v| !v.is_empty())
                .ok_or_else(|| MetadataError::MissingVersion(dist.metadata_path(PKG_INFO)))?
                .to_string();
        }

        Ok(Some(dist))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn metadata_path(&self, name: &str) -> PathBuf {
        match self.layout {
            Layout::DistInfo if name == PKG_INFO => self.path.join(DIST_INFO_METADATA),
            Layout::EggInfoFile if name == PKG_INFO => self.path.clone(),
            _ => self.path.join(name),
        }
    }
}

impl Provider for InstalledDistribution {
    fn version(&self) -> String {
        self.version.clone()
    }

    fn get_metadata(&self, name: &str) -> Result<String, MetadataError> {
        let path = self.metadata_path(name);
        std::fs::read_to_string(&path).map_err(|source| MetadataError::Io { path, source })
    }
}

/// Distribution index over a list of metadata roots, searched in order
#[derive(Debug, Clone, Default)]
pub struct SitePackagesIndex {
    roots: Vec<PathBuf>,
}

impl SitePackagesIndex {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Index over `$VERSION_INFO_METADATA_PATH`
    pub fn from_env() -> Self {
        Self::new(metadata_search_path())
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn find_in_root(
        &self,
        root: &Path,
        wanted: &str,
    ) -> Result<Option<InstalledDistribution>, MetadataError> {
        let entries = match std::fs::read_dir(root) {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Skipping metadata root {:?}: {}", root, e);
                return Ok(None);
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| {
                entry
                    .inspect_err(|e| warn!("Failed to read entry in {:?}: {}", root, e))
                    .ok()
            })
            .map(|entry| entry.path())
            .collect();
        paths.sort();

        let candidates: Vec<PathBuf> = paths
            .into_iter()
            .filter(|path| {
                distribution_name(path).is_some_and(|name| normalize_name(name) == wanted)
            })
            .collect();

        // Versions are not compared; the first entry in byte order wins
        let Some(chosen) = candidates.first() else {
            return Ok(None);
        };
        if candidates.len() > 1 {
            warn!(
                "Multiple metadata entries for {} in {:?}: {:?}; using {:?}",
                wanted, root, candidates, chosen
            );
        }
        InstalledDistribution::from_metadata_path(chosen)
    }
}

impl DistributionIndex for SitePackagesIndex {
    fn get_provider(&self, package: &str) -> Result<Option<Arc<dyn Provider>>, MetadataError> {
        let requirement = Requirement::<VerbatimUrl>::from_str(package).map_err(|e| {
            MetadataError::InvalidRequirement {
                package: package.to_string(),
                message: e.to_string(),
            }
        })?;
        let wanted = requirement.name.to_string();

        for root in &self.roots {
            if let Some(dist) = self.find_in_root(root, &wanted)? {
                debug!(
                    "Found distribution {} {} at {:?}",
                    wanted,
                    dist.version,
                    dist.path()
                );
                return Ok(Some(Arc::new(dist)));
            }
        }

        debug!("Distribution {} not found in {:?}", wanted, self.roots);
        Ok(None)
    }
}

/// Distribution name encoded in a metadata entry's file name
fn distribution_name(path: &Path) -> Option<&str> {
    let file_name = path.file_name()?.to_str()?;
    let stem = file_name
        .strip_suffix(DIST_INFO_SUFFIX)
        .or_else(|| file_name.strip_suffix(EGG_INFO_SUFFIX))?;
    stem.split('-').next().filter(|name| !name.is_empty())
}

/// PEP 503 name normalization: lowercase, runs of `-_.` become a single `-`
fn normalize_name(name: &str) -> String {
    let mut normalized = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !in_separator {
                normalized.push('-');
            }
            in_separator = true;
        } else {
            normalized.push(c.to_ascii_lowercase());
            in_separator = false;
        }
    }
    normalized
}
