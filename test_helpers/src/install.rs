//! Fake Binary Ninja installations laid out in temporary directories.
//!
//! ```
//! use binja_locate_test_helpers::install::FakeInstall;
//!
//! let install = FakeInstall::new().expect("create fake install");
//! let root = install.install_root("binaryninja").expect("lay out install");
//! assert!(root.join("python/binaryninja/__init__.py").is_file());
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use camino::Utf8PathBuf;
use tempfile::TempDir;

/// Package shipped inside the API directory.
pub const PACKAGE: &str = "binaryninja";

/// Temporary directory holding install roots and user directories.
#[derive(Debug)]
pub struct FakeInstall {
    temp: TempDir,
}

impl FakeInstall {
    /// Creates an empty temporary tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> Result<Self> {
        let temp = TempDir::new().context("create fake install directory")?;
        Ok(Self { temp })
    }

    /// Root of the temporary tree.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Root of the temporary tree as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error when the temporary directory is not valid UTF-8.
    pub fn utf8_path(&self) -> Result<Utf8PathBuf> {
        Utf8PathBuf::from_path_buf(self.path().to_path_buf())
            .map_err(|path| anyhow!("temporary path is not UTF-8: {}", path.display()))
    }

    /// Creates `<name>/python/binaryninja/__init__.py` and returns `<name>`.
    ///
    /// # Errors
    ///
    /// Returns an error if any directory or file cannot be written.
    pub fn install_root(&self, name: &str) -> Result<PathBuf> {
        let root = self.path().join(name);
        write_package(&root.join("python"))?;
        Ok(root)
    }

    /// Creates an empty install root with no API directory beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn empty_root(&self, name: &str) -> Result<PathBuf> {
        let root = self.path().join(name);
        fs::create_dir_all(&root).with_context(|| format!("create {}", root.display()))?;
        Ok(root)
    }

    /// Creates a user directory named `name` holding a `lastrun` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn user_dir_with_lastrun(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let dir = self.path().join(name);
        write_lastrun(&dir, contents)?;
        Ok(dir)
    }
}

/// Creates `<api_dir>/binaryninja/__init__.py`, returning the marker path.
///
/// # Errors
///
/// Returns an error if any directory or file cannot be written.
pub fn write_package(api_dir: &Path) -> Result<PathBuf> {
    let package = api_dir.join(PACKAGE);
    fs::create_dir_all(&package).with_context(|| format!("create {}", package.display()))?;
    let marker = package.join("__init__.py");
    fs::write(&marker, "").with_context(|| format!("write {}", marker.display()))?;
    Ok(marker)
}

/// Writes `contents` to `<user_dir>/lastrun`, creating `user_dir` as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_lastrun(user_dir: &Path, contents: &str) -> Result<PathBuf> {
    fs::create_dir_all(user_dir).with_context(|| format!("create {}", user_dir.display()))?;
    let lastrun = user_dir.join("lastrun");
    fs::write(&lastrun, contents).with_context(|| format!("write {}", lastrun.display()))?;
    Ok(lastrun)
}
