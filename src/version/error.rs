use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::metadata::MetadataError;
use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum VersionError {
    #[error("Unable to find installed or build metadata for package '{package}'")]
    MetadataUnavailable { package: String },

    #[error("Malformed release override file {path:?}: {source}")]
    MalformedOverride {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to read release override file {path:?}: {source}")]
    UnreadableOverride {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("Re-entrant resolution of {0}")]
    ReentrantResolution(&'static str),
}
