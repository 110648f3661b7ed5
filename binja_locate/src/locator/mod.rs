//! Discovery of the Binary Ninja Python API directory.
//!
//! A [`Locator`] runs three searchers in a fixed order: the install
//! directory environment variable, the `lastrun` file, and the platform's
//! well-known install paths. The first searcher that yields a candidate
//! decides the outcome; if that candidate fails validation the search stops
//! rather than falling through to later searchers.

use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;

use crate::platform::Platform;

mod builder;
mod report;
mod searchers;

pub use builder::LocatorBuilder;
pub use report::{ProbeEntry, ProbeReport};
pub use searchers::Searcher;

/// Whether [`Locator::find_with`] checks the package marker of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Only return candidates containing `<package>/__init__.py`.
    #[default]
    Required,
    /// Return the first candidate as-is.
    Skip,
}

/// Locates the directory containing the Binary Ninja Python package.
///
/// # Examples
///
/// ```rust
/// use binja_locate::{Locator, Platform};
///
/// let locator = Locator::builder()
///     .platform(Platform::Linux)
///     .home_dir("/home/ada")
///     .build();
/// assert_eq!(
///     locator.derive_api_dir("/opt/binaryninja".as_ref()),
///     std::path::PathBuf::from("/opt/binaryninja/python"),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Locator {
    platform: Platform,
    home: Option<PathBuf>,
    user_directory_env: String,
    install_dir_env: String,
    app_data_env: String,
    lastrun_file_name: String,
    package_name: String,
    common_paths: Vec<PathBuf>,
}

impl Default for Locator {
    fn default() -> Self {
        Self::new()
    }
}

impl Locator {
    /// Creates a locator for the host platform with default settings.
    #[must_use]
    pub fn new() -> Self {
        LocatorBuilder::new().build()
    }

    /// Creates a builder initialised with the default settings.
    #[must_use]
    pub fn builder() -> LocatorBuilder {
        LocatorBuilder::new()
    }

    /// Platform whose layout this locator assumes.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Name of the package whose marker validates a candidate.
    #[must_use]
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Returns the Binary Ninja user configuration directory.
    ///
    /// A non-empty user directory override is returned verbatim. Otherwise
    /// the platform default applies. No filesystem access takes place.
    #[must_use]
    pub fn resolve_user_directory(&self) -> PathBuf {
        if let Some(dir) = non_empty_var(&self.user_directory_env) {
            return PathBuf::from(dir);
        }
        let app_data = match self.platform {
            Platform::Windows => non_empty_var(&self.app_data_env).map(PathBuf::from),
            Platform::MacOs | Platform::Linux | Platform::Other => None,
        };
        self.platform
            .default_user_directory(self.home.as_deref(), app_data.as_deref())
    }

    /// Appends the platform-specific API suffix to an install root.
    ///
    /// On macOS an application bundle resolves to
    /// `Contents/Resources/python` inside the bundle; this also applies when
    /// `install_root` is the bundle's `Contents/MacOS` directory. Everywhere
    /// else the API lives in `python` directly beneath the root.
    #[must_use]
    pub fn derive_api_dir(&self, install_root: &Path) -> PathBuf {
        derive_api_dir(self.platform, install_root)
    }

    /// Returns `true` when `candidate` contains the package marker file.
    #[must_use]
    pub fn is_valid(&self, candidate: &Path) -> bool {
        self.marker_path(candidate).is_file()
    }

    fn marker_path(&self, candidate: &Path) -> PathBuf {
        candidate
            .join(&self.package_name)
            .join(crate::PACKAGE_MARKER)
    }

    /// Finds the API directory, requiring the package marker to exist.
    #[must_use]
    pub fn find(&self) -> Option<PathBuf> {
        self.find_with(Validation::Required)
    }

    /// Finds the API directory using the given validation policy.
    ///
    /// Searchers run in [`Searcher::ORDER`]. The first searcher that yields a
    /// candidate decides the result: with [`Validation::Required`] an invalid
    /// candidate ends the search with `None`.
    #[must_use]
    pub fn find_with(&self, validation: Validation) -> Option<PathBuf> {
        let (searcher, candidate) = Searcher::ORDER
            .into_iter()
            .find_map(|searcher| self.search(searcher).map(|path| (searcher, path)))?;
        match validation {
            Validation::Skip => Some(candidate),
            Validation::Required if self.is_valid(&candidate) => Some(candidate),
            Validation::Required => {
                tracing::debug!(
                    %searcher,
                    candidate = %candidate.display(),
                    "candidate lacks package marker; stopping search"
                );
                None
            }
        }
    }

    /// Finds the API directory as a UTF-8 path.
    ///
    /// Returns `None` when nothing is found or the path is not valid UTF-8.
    #[must_use]
    pub fn find_utf8(&self) -> Option<Utf8PathBuf> {
        self.find()
            .and_then(|path| Utf8PathBuf::from_path_buf(path).ok())
    }

    /// Runs every searcher and records what each one produced.
    ///
    /// Unlike [`Self::find`], probing does not stop at the first candidate and
    /// keeps the I/O errors that discovery otherwise suppresses.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use binja_locate::{Locator, Platform};
    ///
    /// let locator = Locator::builder()
    ///     .platform(Platform::Other)
    ///     .home_dir("/nonexistent")
    ///     .build();
    /// let report = locator.probe();
    /// assert_eq!(report.entries().len(), 3);
    /// ```
    pub fn probe(&self) -> ProbeReport {
        let entries = Searcher::ORDER
            .into_iter()
            .map(|searcher| self.probe_one(searcher))
            .collect();
        ProbeReport::new(entries)
    }

    fn probe_one(&self, searcher: Searcher) -> ProbeEntry {
        let (candidate, error) = match searcher {
            Searcher::LastRun => match self.read_lastrun() {
                Ok(content) => (content.and_then(|text| self.api_dir_from_lastrun(&text)), None),
                Err(err) => (None, Some(err)),
            },
            Searcher::Env | Searcher::CommonPaths => (self.search(searcher), None),
        };
        let valid = candidate
            .as_deref()
            .is_some_and(|path| self.is_valid(path));
        ProbeEntry {
            searcher,
            candidate,
            valid,
            error,
        }
    }
}

/// Appends the API suffix for `platform` to `install_root`.
///
/// Pure path arithmetic; see [`Locator::derive_api_dir`].
#[must_use]
pub fn derive_api_dir(platform: Platform, install_root: &Path) -> PathBuf {
    let bundle = match platform {
        Platform::MacOs => enclosing_bundle(install_root),
        Platform::Windows | Platform::Linux | Platform::Other => None,
    };
    bundle.map_or_else(
        || install_root.join("python"),
        |app| app.join("Contents").join("Resources").join("python"),
    )
}

fn is_bundle(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "app")
}

fn enclosing_bundle(root: &Path) -> Option<&Path> {
    if is_bundle(root) {
        return Some(root);
    }
    if !root.ends_with("Contents/MacOS") {
        return None;
    }
    root.parent()
        .and_then(Path::parent)
        .filter(|bundle| is_bundle(bundle))
}

fn non_empty_var(key: &str) -> Option<std::ffi::OsString> {
    std::env::var_os(key).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests;
