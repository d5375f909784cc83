use serde::Deserialize;
use std::ffi::OsString;
use std::path::PathBuf;

// =============================================================================
// Lookup constants
// =============================================================================

/// Extension appended to config file basenames when none is given
pub const DEFAULT_CONFIG_EXTENSION: &str = ".conf";

/// Project name used to locate release override files (`release.conf`)
pub const RELEASE_CONFIG_NAME: &str = "release";

/// Prefix stripped from package names to form the override section name
pub const PYTHON_PREFIX: &str = "python-";

/// System-wide configuration root
pub const ETC_DIR: &str = "/etc";

/// Environment variable listing directories that hold installed package metadata
pub const METADATA_PATH_ENV: &str = "VERSION_INFO_METADATA_PATH";

/// Metadata file requested from a provider for vendor strings
pub const PKG_INFO: &str = "PKG-INFO";

/// Build description file read when no installed metadata exists
pub const SETUP_CFG: &str = "setup.cfg";

/// How values from a release override file replace earlier values
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MergePolicy {
    /// A missing section or key keeps the metadata-derived value
    #[default]
    OverwriteIfPresent,
    /// Every field is replaced; a missing key clears it
    OverwriteAlways,
}

/// What to do with a release override file that cannot be read or parsed
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ParseErrorPolicy {
    /// Log and keep the defaults
    #[default]
    Ignore,
    /// Surface the failure to the caller
    Propagate,
}

/// Resolution options for a `VersionInfo`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct ResolverOptions {
    pub merge_policy: MergePolicy,
    pub parse_error_policy: ParseErrorPolicy,
    /// Extension of the release override file (`release.conf` by default)
    pub override_extension: String,
}

impl Default for ResolverOptions {
    fn default() -> Self {
        Self {
            merge_policy: MergePolicy::default(),
            parse_error_policy: ParseErrorPolicy::default(),
            override_extension: DEFAULT_CONFIG_EXTENSION.to_string(),
        }
    }
}

/// Returns the directories searched for installed package metadata,
/// taken from `$VERSION_INFO_METADATA_PATH`.
pub fn metadata_search_path() -> Vec<PathBuf> {
    metadata_search_path_with_env(std::env::var_os(METADATA_PATH_ENV))
}

fn metadata_search_path_with_env(value: Option<OsString>) -> Vec<PathBuf> {
    value
        .map(|paths| {
            std::env::split_paths(&paths)
                .filter(|p| !p.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Base filename of the invoking program, from argv[0].
pub fn program_name() -> Option<String> {
    program_name_with_arg0(std::env::args_os().next())
}

fn program_name_with_arg0(arg0: Option<OsString>) -> Option<String> {
    let arg0 = PathBuf::from(arg0?);
    let name = arg0.file_name()?.to_string_lossy().into_owned();
    (!name.is_empty()).then_some(name)
}
