//! The Python module search path the startup hook extends.
//!
//! [`ModuleSearchPath`] models the directories a Python interpreter searches
//! beyond its own `site-packages`: it is seeded from `PYTHONPATH` and can be
//! exported to child processes. All mutation goes through
//! [`SearchPath::append`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use parking_lot::Mutex;

use crate::{LocateResult, PACKAGE_MARKER, PYTHONPATH_ENV};

static PROCESS_SEARCH_PATH: LazyLock<Mutex<ModuleSearchPath>> =
    LazyLock::new(|| Mutex::new(ModuleSearchPath::from_env()));

/// An ordered list of directories that packages are resolved against.
pub trait SearchPath {
    /// Returns `true` when `package` can be resolved from some entry.
    fn resolves(&self, package: &str) -> bool;

    /// Appends `dir` to the end of the search path.
    ///
    /// Entries are not deduplicated.
    fn append(&mut self, dir: PathBuf);
}

/// Concrete search path mirroring `PYTHONPATH` semantics.
///
/// # Examples
///
/// ```rust
/// use binja_locate::{ModuleSearchPath, SearchPath};
///
/// let mut path = ModuleSearchPath::from_entries(["/usr/lib/extra"]);
/// path.append("/opt/binaryninja/python".into());
/// assert_eq!(path.entries().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSearchPath {
    entries: Vec<PathBuf>,
}

impl ModuleSearchPath {
    /// Builds a search path from `PYTHONPATH`, skipping empty entries.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var_os(PYTHONPATH_ENV)
            .map(|value| Self::from_entries(std::env::split_paths(&value)))
            .unwrap_or_default()
    }

    /// Builds a search path from explicit entries, skipping empty ones.
    #[must_use]
    pub fn from_entries<I, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let entries = entries
            .into_iter()
            .map(Into::into)
            .filter(|entry: &PathBuf| !entry.as_os_str().is_empty())
            .collect();
        Self { entries }
    }

    /// Entries in search order.
    #[must_use]
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Joins the entries into a `PYTHONPATH` value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LocateError::JoinPaths`] when an entry contains the
    /// platform's path separator.
    pub fn to_env_value(&self) -> LocateResult<OsString> {
        Ok(std::env::join_paths(&self.entries)?)
    }

    /// Sets `PYTHONPATH` on `command` so the child sees these entries.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`Self::to_env_value`]; `command`
    /// is left untouched in that case.
    pub fn apply_to(&self, command: &mut Command) -> LocateResult<()> {
        let value = self.to_env_value()?;
        command.env(PYTHONPATH_ENV, value);
        Ok(())
    }
}

impl SearchPath for ModuleSearchPath {
    fn resolves(&self, package: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| provides_package(entry, package))
    }

    fn append(&mut self, dir: PathBuf) {
        self.entries.push(dir);
    }
}

/// Whether `dir` holds `package` as a regular package or a single module.
fn provides_package(dir: &Path, package: &str) -> bool {
    dir.join(package).join(PACKAGE_MARKER).is_file()
        || dir.join(format!("{package}.py")).is_file()
}

/// Runs `f` with exclusive access to the process-wide search path.
pub(crate) fn with_process_search_path<R>(f: impl FnOnce(&mut ModuleSearchPath) -> R) -> R {
    let mut guard = PROCESS_SEARCH_PATH.lock();
    f(&mut *guard)
}

/// Snapshot of the process-wide search path.
///
/// The first access seeds it from `PYTHONPATH`.
#[must_use]
pub fn process_search_path() -> ModuleSearchPath {
    PROCESS_SEARCH_PATH.lock().clone()
}

/// Exports the process-wide search path to `command`.
///
/// # Errors
///
/// See [`ModuleSearchPath::apply_to`].
pub fn apply_process_search_path(command: &mut Command) -> LocateResult<()> {
    process_search_path().apply_to(command)
}
