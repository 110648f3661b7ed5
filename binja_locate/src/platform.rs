//! Platform families that change where Binary Ninja installs itself.
//!
//! Discovery logic takes a [`Platform`] value rather than branching on
//! `cfg!` directly, so every branch can be exercised on any host.

use std::fmt;
use std::path::{Path, PathBuf};

/// Operating system family relevant to Binary Ninja's install layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    /// macOS, where Binary Ninja ships as an application bundle.
    MacOs,
    /// Windows.
    Windows,
    /// Linux.
    Linux,
    /// Any other Unix-like system. No well-known install paths exist.
    Other,
}

impl Platform {
    /// Returns the platform the crate was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    /// Default Binary Ninja user directory for this platform.
    ///
    /// `home` is the user's home directory and `app_data` the Windows
    /// `APPDATA` folder; either may be absent, in which case the result is
    /// relative.
    #[must_use]
    pub fn default_user_directory(self, home: Option<&Path>, app_data: Option<&Path>) -> PathBuf {
        let home_base = || home.map(Path::to_path_buf).unwrap_or_default();
        match self {
            Self::MacOs => home_base()
                .join("Library")
                .join("Application Support")
                .join("Binary Ninja"),
            Self::Windows => app_data
                .map(Path::to_path_buf)
                .unwrap_or_default()
                .join("Binary Ninja"),
            Self::Linux | Self::Other => home_base().join(".binaryninja"),
        }
    }

    /// Well-known API directories for this platform, in search order.
    #[must_use]
    pub fn common_api_dirs(self, home: Option<&Path>) -> Vec<PathBuf> {
        match self {
            Self::Linux => {
                let mut dirs = vec![PathBuf::from("/opt/binaryninja/python")];
                if let Some(home_dir) = home {
                    dirs.push(home_dir.join("binaryninja").join("python"));
                }
                dirs
            }
            Self::MacOs => vec![PathBuf::from(
                "/Applications/Binary Ninja.app/Contents/Resources/python",
            )],
            Self::Windows => vec![PathBuf::from("C:/Program Files/Vector35/BinaryNinja/python")],
            Self::Other => Vec::new(),
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MacOs => "macos",
            Self::Windows => "windows",
            Self::Linux => "linux",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::macos(
        Platform::MacOs,
        "/Users/ada/Library/Application Support/Binary Ninja"
    )]
    #[case::linux(Platform::Linux, "/Users/ada/.binaryninja")]
    #[case::other(Platform::Other, "/Users/ada/.binaryninja")]
    fn home_relative_defaults(#[case] platform: Platform, #[case] expected: &str) {
        let home = Path::new("/Users/ada");
        assert_eq!(
            platform.default_user_directory(Some(home), None),
            PathBuf::from(expected)
        );
    }

    #[test]
    fn windows_default_uses_app_data() {
        let app_data = Path::new("C:/Users/ada/AppData/Roaming");
        assert_eq!(
            Platform::Windows.default_user_directory(None, Some(app_data)),
            app_data.join("Binary Ninja")
        );
    }

    #[test]
    fn windows_default_without_app_data_is_relative() {
        assert_eq!(
            Platform::Windows.default_user_directory(Some(Path::new("/home/ada")), None),
            PathBuf::from("Binary Ninja")
        );
    }

    #[test]
    fn linux_lists_opt_before_home() {
        let dirs = Platform::Linux.common_api_dirs(Some(Path::new("/home/ada")));
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/opt/binaryninja/python"),
                PathBuf::from("/home/ada/binaryninja/python"),
            ]
        );
    }

    #[rstest]
    #[case(Platform::MacOs, 1)]
    #[case(Platform::Windows, 1)]
    #[case(Platform::Other, 0)]
    fn common_dir_counts(#[case] platform: Platform, #[case] count: usize) {
        assert_eq!(platform.common_api_dirs(None).len(), count);
    }

    #[test]
    fn current_matches_compile_target() {
        let platform = Platform::current();
        if cfg!(target_os = "linux") {
            assert_eq!(platform, Platform::Linux);
        }
        assert_eq!(Platform::default(), platform);
    }
}
