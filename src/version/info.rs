//! Per-package version and vendor string resolution

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::{
    MergePolicy, PKG_INFO, PYTHON_PREFIX, ParseErrorPolicy, RELEASE_CONFIG_NAME, ResolverOptions,
};
use crate::locator::ConfigFileLocator;
use crate::metadata::{
    BuildMetadata, DistributionIndex, Provider, SetupCfg, SitePackagesIndex, VendorDefaults,
};
use crate::parser::{IniDocument, IniParser, Parser, PkgInfoParser};
use crate::version::error::VersionError;
use crate::version::memo::Memo;
use crate::version::release::short_version;

/// Vendor, product and suffix of a package after overrides are applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VendorStrings {
    pub vendor: Option<String>,
    pub product: Option<String>,
    pub suffix: Option<String>,
}

/// Version information for one package.
///
/// Every fact is resolved on first access and cached for the lifetime of
/// the instance, even if the underlying files change afterwards. The
/// instance is not `Sync`; share it across threads behind a lock.
pub struct VersionInfo {
    package: String,
    index: Arc<dyn DistributionIndex>,
    build: Option<Arc<dyn BuildMetadata>>,
    locator: ConfigFileLocator,
    options: ResolverOptions,
    provider: Memo<Option<Arc<dyn Provider>>>,
    release: Memo<String>,
    version: Memo<String>,
    vendor_strings: Memo<VendorStrings>,
    cached_version: Memo<String>,
}

impl VersionInfo {
    /// Version information for `package` (e.g. `nova` or `python-novaclient`).
    ///
    /// Installed metadata is looked up in `$VERSION_INFO_METADATA_PATH`,
    /// falling back to `setup.cfg` in the working directory.
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            index: Arc::new(SitePackagesIndex::from_env()),
            build: Some(Arc::new(SetupCfg::in_current_dir())),
            locator: ConfigFileLocator::new(),
            options: ResolverOptions::default(),
            provider: Memo::new("provider"),
            release: Memo::new("release"),
            version: Memo::new("version"),
            vendor_strings: Memo::new("vendor strings"),
            cached_version: Memo::new("cached version string"),
        }
    }

    pub fn with_index(mut self, index: Arc<dyn DistributionIndex>) -> Self {
        self.index = index;
        self
    }

    /// Build-time fallback; `None` makes a missing installation a hard error
    pub fn with_build_metadata(mut self, build: Option<Arc<dyn BuildMetadata>>) -> Self {
        self.build = build;
        self
    }

    pub fn with_locator(mut self, locator: ConfigFileLocator) -> Self {
        self.locator = locator;
        self
    }

    pub fn with_options(mut self, options: ResolverOptions) -> Self {
        self.options = options;
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Section name used in release override files
    pub fn project_name(&self) -> &str {
        self.package
            .strip_prefix(PYTHON_PREFIX)
            .unwrap_or(&self.package)
    }

    /// Full version including VCS suffixes, e.g. `0.5.21.28.gae25b56`
    pub fn release(&self) -> Result<String, VersionError> {
        self.release.get_or_try_init(|| {
            if let Some(provider) = self.provider()? {
                return Ok(provider.version());
            }

            // Most likely running from a source tree that was never installed
            info!(
                "No installed metadata for {}, using build metadata",
                self.package
            );
            let version = match &self.build {
                Some(build) => build.version(&self.package)?,
                None => None,
            };
            version.ok_or_else(|| {
                error!(
                    "Unable to find installed or build metadata for {}",
                    self.package
                );
                VersionError::MetadataUnavailable {
                    package: self.package.clone(),
                }
            })
        })
    }

    /// Short version without alpha/beta/VCS segments, e.g. `0.5.21.28`
    pub fn version(&self) -> Result<String, VersionError> {
        self.version
            .get_or_try_init(|| Ok(short_version(&self.release()?)))
    }

    pub fn vendor(&self) -> Result<Option<String>, VersionError> {
        Ok(self.vendor_strings()?.vendor)
    }

    pub fn product(&self) -> Result<Option<String>, VersionError> {
        Ok(self.vendor_strings()?.product)
    }

    /// Packaging-specific suffix; only ever set by a release override file
    pub fn suffix(&self) -> Result<Option<String>, VersionError> {
        Ok(self.vendor_strings()?.suffix)
    }

    /// Vendor, product and suffix, loaded together on first access
    pub fn vendor_strings(&self) -> Result<VendorStrings, VersionError> {
        self.vendor_strings
            .get_or_try_init(|| self.load_vendor_strings())
    }

    /// `prefix` followed by the short version.
    ///
    /// The string is built on the first call and returned unchanged
    /// afterwards, so later calls ignore their `prefix`.
    pub fn cached_version_string(&self, prefix: &str) -> Result<String, VersionError> {
        self.cached_version
            .get_or_try_init(|| Ok(format!("{}{}", prefix, self.version()?)))
    }

    /// Alias of [`VersionInfo::release`]
    pub fn version_string_with_vcs(&self) -> Result<String, VersionError> {
        self.release()
    }

    /// Alias of [`VersionInfo::version`]
    pub fn canonical_version_string(&self) -> Result<String, VersionError> {
        self.version()
    }

    /// Alias of [`VersionInfo::suffix`]
    pub fn package_string(&self) -> Result<Option<String>, VersionError> {
        self.suffix()
    }

    /// `VersionInfo(package:version)`
    pub fn describe(&self) -> Result<String, VersionError> {
        Ok(format!("VersionInfo({}:{})", self.package, self.version()?))
    }

    fn provider(&self) -> Result<Option<Arc<dyn Provider>>, VersionError> {
        self.provider
            .get_or_try_init(|| Ok(self.index.get_provider(&self.package)?))
    }

    /// Load defaults from package metadata, then apply release override files.
    fn load_vendor_strings(&self) -> Result<VendorStrings, VersionError> {
        let defaults = match self.provider()? {
            Some(provider) => self.load_from_pkg_info(provider.as_ref())?,
            None => match &self.build {
                Some(build) => build.vendor_defaults()?,
                None => VendorDefaults::default(),
            },
        };
        let mut strings = VendorStrings {
            vendor: defaults.vendor,
            product: defaults.product,
            suffix: None,
        };

        let cfg_files = self.locator.find_config_files(
            Some(RELEASE_CONFIG_NAME),
            None,
            &self.options.override_extension,
        );
        if cfg_files.is_empty() {
            return Ok(strings);
        }

        let cfg = self.read_override_files(&cfg_files)?;
        self.apply_overrides(&cfg, &mut strings);

        Ok(strings)
    }

    fn load_from_pkg_info(&self, provider: &dyn Provider) -> Result<VendorDefaults, VersionError> {
        let content = provider.get_metadata(PKG_INFO)?;
        // Header parsing never fails; malformed content just yields no headers
        let info = PkgInfoParser::new().parse(&content).unwrap_or_default();
        Ok(VendorDefaults {
            vendor: info.get("Author").map(str::to_string),
            product: info.get("Summary").map(str::to_string),
        })
    }

    /// Read and layer the override files, later files winning.
    ///
    /// Each file is handled on its own: under `ParseErrorPolicy::Ignore` an
    /// unreadable or malformed file is skipped and the rest still apply.
    fn read_override_files(&self, paths: &[PathBuf]) -> Result<IniDocument, VersionError> {
        let parser = IniParser::new();
        let mut merged = IniDocument::default();

        for path in paths {
            match self.read_override_file(&parser, path) {
                Ok(cfg) => merged.merge(cfg),
                Err(e) if self.options.parse_error_policy == ParseErrorPolicy::Ignore => {
                    warn!("Ignoring release override file: {}", e);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(merged)
    }

    fn read_override_file(
        &self,
        parser: &IniParser,
        path: &Path,
    ) -> Result<IniDocument, VersionError> {
        debug!("Reading release override file {:?}", path);
        let content = self
            .locator
            .file_system()
            .read_to_string(path)
            .map_err(|source| VersionError::UnreadableOverride {
                path: path.to_path_buf(),
                source,
            })?;
        parser
            .parse(&content)
            .map_err(|source| VersionError::MalformedOverride {
                path: path.to_path_buf(),
                source,
            })
    }

    fn apply_overrides(&self, cfg: &IniDocument, strings: &mut VendorStrings) {
        let section = self.project_name();
        if !cfg.has_section(section) {
            debug!("No [{}] section in release override files", section);
        }

        let policy = self.options.merge_policy;
        apply_override(policy, cfg.get(section, "vendor"), &mut strings.vendor);
        apply_override(policy, cfg.get(section, "product"), &mut strings.product);
        apply_override(policy, cfg.get(section, "package"), &mut strings.suffix);
    }
}

fn apply_override(policy: MergePolicy, value: Option<&str>, field: &mut Option<String>) {
    match (policy, value) {
        (_, Some(value)) => *field = Some(value.to_string()),
        (MergePolicy::OverwriteAlways, None) => *field = None,
        (MergePolicy::OverwriteIfPresent, None) => {}
    }
}
