//! Config file discovery
//!
//! Config files are looked up by basename in a fixed list of directories.
//! Earlier directories take precedence:
//!
//! ```text
//! ~/.${project}/
//! ~/
//! /etc/${project}/
//! /etc/
//! ```
//!
//! Without a project only `~/` and `/etc/` are searched.

pub mod fs;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::config::{ETC_DIR, program_name};
use crate::locator::fs::{FileSystem, OsFileSystem};

/// Finds config files for a project/program pair.
///
/// The home directory, the system config root, the program name and the
/// filesystem are all injectable. Anything not set explicitly is taken from
/// the process environment at call time.
#[derive(Clone)]
pub struct ConfigFileLocator {
    home: Home,
    etc_dir: PathBuf,
    program_name: Option<String>,
    fs: Arc<dyn FileSystem>,
}

#[derive(Debug, Clone)]
enum Home {
    /// Resolved from the environment on every call
    Detect,
    Dir(PathBuf),
    /// Behave as if the user has no home directory
    Missing,
}

impl Default for ConfigFileLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigFileLocator {
    pub fn new() -> Self {
        Self {
            home: Home::Detect,
            etc_dir: PathBuf::from(ETC_DIR),
            program_name: None,
            fs: Arc::new(OsFileSystem),
        }
    }

    /// Use `home` instead of the current user's home directory
    pub fn with_home(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Home::Dir(home.into());
        self
    }

    /// Search as if no home directory can be resolved
    pub fn without_home(mut self) -> Self {
        self.home = Home::Missing;
        self
    }

    /// Use `etc_dir` instead of `/etc`
    pub fn with_etc_dir(mut self, etc_dir: impl Into<PathBuf>) -> Self {
        self.etc_dir = etc_dir.into();
        self
    }

    /// Use `name` instead of the base filename of argv[0]
    pub fn with_program_name(mut self, name: impl Into<String>) -> Self {
        self.program_name = Some(name.into());
        self
    }

    pub fn with_file_system(mut self, fs: Arc<dyn FileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn file_system(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }

    /// The home directory as an absolute path, resolved on every call.
    pub fn home_dir(&self) -> Option<PathBuf> {
        let home = match &self.home {
            Home::Detect => dirs::home_dir(),
            Home::Dir(home) => Some(home.clone()),
            Home::Missing => None,
        };
        home.map(|home| absolute(&home))
    }

    /// The program name used for `${prog}.conf`.
    pub fn program_name(&self) -> Option<String> {
        self.program_name
            .clone()
            .filter(|name| !name.is_empty())
            .or_else(program_name)
    }

    /// Directories where config files may be located, highest precedence first.
    ///
    /// Home-relative entries are left out when no home directory can be
    /// resolved.
    pub fn directories_for(&self, project: Option<&str>) -> Vec<PathBuf> {
        let home = self.home_dir();
        let project = project.filter(|p| !p.is_empty());

        let mut dirs = Vec::with_capacity(4);
        if let (Some(home), Some(project)) = (&home, project) {
            dirs.push(home.join(format!(".{project}")));
        }
        if let Some(home) = home {
            dirs.push(home);
        }
        if let Some(project) = project {
            dirs.push(self.etc_dir.join(project));
        }
        dirs.push(self.etc_dir.clone());
        dirs
    }

    /// Returns the first `{dir}/{basename}{extension}` that exists.
    pub fn search_directories(
        &self,
        dirs: &[PathBuf],
        basename: &str,
        extension: &str,
    ) -> Option<PathBuf> {
        let filename = format!("{basename}{extension}");
        dirs.iter()
            .map(|dir| dir.join(&filename))
            .find(|path| self.fs.exists(path))
    }

    /// Returns at most one `${project}${extension}` and one
    /// `${prog}${extension}`, each from the topmost directory it exists in.
    ///
    /// The two names are searched independently, so the project file may
    /// come from a lower-precedence directory than the program file. The
    /// project file, when found, is always listed first.
    pub fn find_config_files(
        &self,
        project: Option<&str>,
        program_name: Option<&str>,
        extension: &str,
    ) -> Vec<PathBuf> {
        let program = match program_name {
            Some(name) => Some(name.to_string()),
            None => self.program_name(),
        };
        let project = project.filter(|p| !p.is_empty());

        let dirs = self.directories_for(project);
        debug!("Searching config directories {:?}", dirs);

        let mut config_files = Vec::with_capacity(2);
        if let Some(project) = project
            && let Some(path) = self.search_directories(&dirs, project, extension)
        {
            config_files.push(path);
        }
        if let Some(program) = program.filter(|p| !p.is_empty())
            && let Some(path) = self.search_directories(&dirs, &program, extension)
        {
            config_files.push(path);
        }

        debug!("Found config files {:?}", config_files);
        config_files
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
