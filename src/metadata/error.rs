use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::parser::ParseError;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Invalid package name '{package}': {message}")]
    InvalidRequirement { package: String, message: String },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("No version recorded in {0:?}")]
    MissingVersion(PathBuf),
}
