//! Locates the Binary Ninja Python API on disk.
//!
//! The [`Locator`] consults, in order, the `BN_INSTALL_DIR` environment
//! variable, the `lastrun` file in the Binary Ninja user directory, and a
//! short list of well-known install locations. The [`hook`] module wires the
//! result into a process-wide module search path so a child `python` process
//! can import `binaryninja`.
//!
//! ```rust,no_run
//! use binja_locate::Locator;
//!
//! if let Some(dir) = Locator::new().find() {
//!     println!("binaryninja lives in {}", dir.display());
//! }
//! ```

mod error;
pub mod hook;
pub mod locator;
pub mod platform;
pub mod search_path;

pub use error::{LocateError, LocateResult};
pub use hook::{HookOutcome, ensure_on, ensure_on_path};
pub use locator::{Locator, LocatorBuilder, ProbeEntry, ProbeReport, Searcher, Validation};
pub use platform::Platform;
pub use search_path::{ModuleSearchPath, SearchPath};

/// Environment variable overriding the Binary Ninja user directory.
pub const USER_DIRECTORY_ENV: &str = "BN_USER_DIRECTORY";

/// Environment variable naming a Binary Ninja installation root.
pub const INSTALL_DIR_ENV: &str = "BN_INSTALL_DIR";

/// Windows environment variable holding the roaming application data folder.
pub const APP_DATA_ENV: &str = "APPDATA";

/// Name of the file Binary Ninja writes with the path of its last executable.
pub const LASTRUN_FILE_NAME: &str = "lastrun";

/// Name of the Python package shipped with Binary Ninja.
pub const PACKAGE_NAME: &str = "binaryninja";

/// File whose presence marks a directory as a Python package.
pub const PACKAGE_MARKER: &str = "__init__.py";

/// Environment variable read by Python for extra module search directories.
pub const PYTHONPATH_ENV: &str = "PYTHONPATH";

/// Locates the API directory using the default [`Locator`].
///
/// Equivalent to `Locator::new().find()`.
#[must_use]
pub fn find() -> Option<std::path::PathBuf> {
    Locator::new().find()
}
