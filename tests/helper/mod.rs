//! Filesystem fixtures for integration tests
//!
//! Lays out a fake home directory, `/etc`, metadata root and source tree
//! inside one temporary directory.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use version_info::metadata::{SetupCfg, SitePackagesIndex};
use version_info::{ConfigFileLocator, VersionInfo};

/// Program name the fixtures pretend to run as
pub const PROGRAM: &str = "foo";

pub struct Fixture {
    temp_dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let fixture = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        for dir in [
            fixture.home(),
            fixture.etc(),
            fixture.site(),
            fixture.project(),
        ] {
            std::fs::create_dir_all(dir).unwrap();
        }
        fixture
    }

    pub fn home(&self) -> PathBuf {
        self.temp_dir.path().join("home")
    }

    pub fn etc(&self) -> PathBuf {
        self.temp_dir.path().join("etc")
    }

    pub fn site(&self) -> PathBuf {
        self.temp_dir.path().join("site-packages")
    }

    pub fn project(&self) -> PathBuf {
        self.temp_dir.path().join("project")
    }

    /// Write `content` to `base/relative`, creating parent directories
    pub fn write(&self, base: &Path, relative: &str, content: &str) -> PathBuf {
        let path = base.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Install `{name}-{version}.dist-info` with the given METADATA
    pub fn install(&self, name: &str, version: &str, metadata: &str) -> PathBuf {
        self.write(
            &self.site(),
            &format!("{name}-{version}.dist-info/METADATA"),
            metadata,
        )
    }

    pub fn locator(&self) -> ConfigFileLocator {
        ConfigFileLocator::new()
            .with_home(self.home())
            .with_etc_dir(self.etc())
            .with_program_name(PROGRAM)
    }

    pub fn version_info(&self, package: &str) -> VersionInfo {
        VersionInfo::new(package)
            .with_index(Arc::new(SitePackagesIndex::new(vec![self.site()])))
            .with_build_metadata(Some(Arc::new(SetupCfg::new(self.project()))))
            .with_locator(self.locator())
    }
}
