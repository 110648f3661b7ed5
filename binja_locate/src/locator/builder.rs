//! Builder for [`Locator`].
//!
//! The builder lets callers pin the platform, home directory, environment
//! variable names and well-known install paths before producing a
//! [`Locator`]. Every setting has a default, so building never fails.

use std::path::PathBuf;

use super::Locator;
use crate::platform::Platform;

/// Builder for [`Locator`].
///
/// # Examples
///
/// ```rust
/// use binja_locate::{Locator, Platform};
///
/// let locator = Locator::builder()
///     .platform(Platform::Linux)
///     .home_dir("/home/ada")
///     .user_directory_env("MY_BN_USER_DIR")
///     .clear_common_paths()
///     .build();
/// assert_eq!(locator.platform(), Platform::Linux);
/// ```
#[derive(Debug, Clone)]
pub struct LocatorBuilder {
    platform: Platform,
    home: Option<PathBuf>,
    user_directory_env: String,
    install_dir_env: String,
    app_data_env: String,
    lastrun_file_name: String,
    package_name: String,
    common_paths: Option<Vec<PathBuf>>,
}

impl Default for LocatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LocatorBuilder {
    /// Creates a builder for the host platform.
    ///
    /// The home directory defaults to [`dirs::home_dir`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            platform: Platform::current(),
            home: dirs::home_dir(),
            user_directory_env: String::from(crate::USER_DIRECTORY_ENV),
            install_dir_env: String::from(crate::INSTALL_DIR_ENV),
            app_data_env: String::from(crate::APP_DATA_ENV),
            lastrun_file_name: String::from(crate::LASTRUN_FILE_NAME),
            package_name: String::from(crate::PACKAGE_NAME),
            common_paths: None,
        }
    }

    /// Selects the platform whose install layout is assumed.
    #[must_use]
    pub const fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Overrides the home directory used for platform defaults.
    #[must_use]
    pub fn home_dir(mut self, home: impl Into<PathBuf>) -> Self {
        self.home = Some(home.into());
        self
    }

    /// Sets the environment variable overriding the user directory.
    #[must_use]
    pub fn user_directory_env(mut self, name: impl Into<String>) -> Self {
        self.user_directory_env = name.into();
        self
    }

    /// Sets the environment variable naming an install root.
    #[must_use]
    pub fn install_dir_env(mut self, name: impl Into<String>) -> Self {
        self.install_dir_env = name.into();
        self
    }

    /// Sets the environment variable consulted for the Windows application
    /// data folder.
    #[must_use]
    pub fn app_data_env(mut self, name: impl Into<String>) -> Self {
        self.app_data_env = name.into();
        self
    }

    /// Overrides the name of the `lastrun` file inside the user directory.
    #[must_use]
    pub fn lastrun_file_name(mut self, name: impl Into<String>) -> Self {
        self.lastrun_file_name = name.into();
        self
    }

    /// Overrides the package whose `__init__.py` validates a candidate.
    #[must_use]
    pub fn package_name(mut self, name: impl Into<String>) -> Self {
        self.package_name = name.into();
        self
    }

    /// Replaces the well-known install paths searched last.
    #[must_use]
    pub fn common_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.common_paths = Some(paths.into_iter().map(Into::into).collect());
        self
    }

    /// Removes all well-known install paths.
    #[must_use]
    pub fn clear_common_paths(mut self) -> Self {
        self.common_paths = Some(Vec::new());
        self
    }

    /// Finalises the builder and returns a [`Locator`].
    #[must_use]
    pub fn build(self) -> Locator {
        let common_paths = self
            .common_paths
            .unwrap_or_else(|| self.platform.common_api_dirs(self.home.as_deref()));
        Locator {
            platform: self.platform,
            home: self.home,
            user_directory_env: self.user_directory_env,
            install_dir_env: self.install_dir_env,
            app_data_env: self.app_data_env,
            lastrun_file_name: self.lastrun_file_name,
            package_name: self.package_name,
            common_paths,
        }
    }
}
