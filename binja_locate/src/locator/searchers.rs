//! The three discovery strategies run by [`Locator`].

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};

use super::{Locator, non_empty_var};
use crate::{LocateError, LocateResult};

/// A single discovery strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Searcher {
    /// The install directory environment variable.
    Env,
    /// The `lastrun` file inside the user directory.
    LastRun,
    /// Well-known install locations for the platform.
    CommonPaths,
}

impl Searcher {
    /// Order in which [`Locator::find`] consults the searchers.
    pub const ORDER: [Self; 3] = [Self::Env, Self::LastRun, Self::CommonPaths];
}

impl fmt::Display for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Env => "env",
            Self::LastRun => "lastrun",
            Self::CommonPaths => "common-paths",
        };
        f.write_str(name)
    }
}

impl Locator {
    pub(super) fn search(&self, searcher: Searcher) -> Option<PathBuf> {
        let candidate = match searcher {
            Searcher::Env => self.from_env(),
            Searcher::LastRun => self.from_lastrun(),
            Searcher::CommonPaths => self.from_common_paths(),
        };
        if let Some(path) = &candidate {
            tracing::debug!(%searcher, candidate = %path.display(), "searcher produced candidate");
        }
        candidate
    }

    /// Derives the API directory from the install directory environment
    /// variable, if it is set and non-empty.
    #[must_use]
    pub fn from_env(&self) -> Option<PathBuf> {
        non_empty_var(&self.install_dir_env).map(|root| self.derive_api_dir(Path::new(&root)))
    }

    /// Derives the API directory from the executable recorded in `lastrun`.
    ///
    /// A missing or unreadable file, or one that is blank after trimming,
    /// yields `None`.
    #[must_use]
    pub fn from_lastrun(&self) -> Option<PathBuf> {
        match self.read_lastrun() {
            Ok(content) => content.and_then(|text| self.api_dir_from_lastrun(&text)),
            Err(err) => {
                tracing::debug!(error = %err, "ignoring unreadable lastrun file");
                None
            }
        }
    }

    /// Returns the first well-known install location containing the package.
    #[must_use]
    pub fn from_common_paths(&self) -> Option<PathBuf> {
        self.common_paths
            .iter()
            .find(|candidate| self.is_valid(candidate))
            .cloned()
    }

    /// Path of the `lastrun` file for the current environment.
    #[must_use]
    pub fn lastrun_path(&self) -> PathBuf {
        self.resolve_user_directory().join(&self.lastrun_file_name)
    }

    /// Reads the `lastrun` file, treating a missing file or directory as
    /// absent rather than as an error.
    ///
    /// The path is canonicalised first so a symlinked `lastrun` is read from
    /// wherever it points.
    pub(super) fn read_lastrun(&self) -> LocateResult<Option<String>> {
        let lastrun = self.lastrun_path();
        let read = canonicalise(&lastrun).and_then(|real| {
            let (dir, name) = open_parent_dir_and_name(&real)?;
            dir.read_to_string(name)
        });
        match read {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(LocateError::LastRun {
                path: lastrun,
                source,
            }),
        }
    }

    pub(super) fn api_dir_from_lastrun(&self, content: &str) -> Option<PathBuf> {
        let executable = Path::new(content.trim());
        if executable.as_os_str().is_empty() {
            return None;
        }
        let install_root = executable.parent().unwrap_or(executable);
        Some(self.derive_api_dir(install_root))
    }
}

fn canonicalise(path: &Path) -> io::Result<PathBuf> {
    #[cfg(windows)]
    {
        dunce::canonicalize(path)
    }
    #[cfg(not(windows))]
    {
        std::fs::canonicalize(path)
    }
}

/// Opens the parent of a canonical `path` through `cap-std` and returns it
/// with the file name.
fn open_parent_dir_and_name(path: &Path) -> io::Result<(Dir, PathBuf)> {
    let parent = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let name = path
        .file_name()
        .ok_or_else(|| io::Error::other("cannot determine file name for lastrun path"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
    Ok((dir, PathBuf::from(name)))
}
