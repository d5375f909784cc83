//! Filesystem access used by config file discovery

use std::io;
use std::path::Path;

#[cfg(test)]
use mockall::automock;

/// Trait for the filesystem operations the locator and the override loader need
#[cfg_attr(test, automock)]
pub trait FileSystem: Send + Sync {
    /// Returns true if `path` exists
    fn exists(&self, path: &Path) -> bool;

    /// Reads the whole file at `path` as UTF-8
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}
