//! Each searcher in isolation.

use std::path::PathBuf;

use anyhow::{Result, ensure};
use rstest::rstest;
use test_helpers::env::{self as test_env, EnvScope};
use test_helpers::install::{self as fake, FakeInstall};

use super::fixtures::{env_guards, fake_install, linux_locator};
use crate::{Locator, Platform};

#[rstest]
fn from_env_derives_api_dir(env_guards: EnvScope) -> Result<()> {
    let _guards = env_guards;
    let _install = test_env::set_var("BN_INSTALL_DIR", "/opt/bn");
    let candidate = linux_locator("/home/ada".as_ref()).from_env();
    ensure!(candidate == Some(PathBuf::from("/opt/bn/python")), "got {candidate:?}");
    Ok(())
}

#[rstest]
fn from_env_uses_bundle_layout_on_macos(env_guards: EnvScope) -> Result<()> {
    let _guards = env_guards;
    let _install = test_env::set_var("BN_INSTALL_DIR", "/Applications/Binary Ninja.app");
    let locator = Locator::builder()
        .platform(Platform::MacOs)
        .home_dir("/Users/ada")
        .build();
    ensure!(
        locator.from_env()
            == Some(PathBuf::from(
                "/Applications/Binary Ninja.app/Contents/Resources/python"
            ))
    );
    Ok(())
}

#[rstest]
#[case::unset(None)]
#[case::empty(Some(""))]
fn from_env_is_absent_without_value(
    env_guards: EnvScope,
    #[case] value: Option<&str>,
) -> Result<()> {
    let _guards = env_guards;
    let _install = value.map(|v| test_env::set_var("BN_INSTALL_DIR", v));
    ensure!(linux_locator("/home/ada".as_ref()).from_env().is_none());
    Ok(())
}

#[rstest]
fn from_lastrun_uses_executable_parent(
    env_guards: EnvScope,
    fake_install: Result<FakeInstall>,
) -> Result<()> {
    let _guards = env_guards;
    let install = fake_install?;
    let user_dir = install.user_dir_with_lastrun("user", "/opt/app/binaryninja")?;
    let _user = test_env::set_var("BN_USER_DIRECTORY", &user_dir);
    let candidate = linux_locator(install.path()).from_lastrun();
    ensure!(candidate == Some(PathBuf::from("/opt/app/python")), "got {candidate:?}");
    Ok(())
}

#[rstest]
#[case::trailing_newline("/opt/app/binaryninja\n")]
#[case::surrounding_whitespace("  \t/opt/app/binaryninja \r\n")]
fn from_lastrun_trims_content(
    env_guards: EnvScope,
    fake_install: Result<FakeInstall>,
    #[case] contents: &str,
) -> Result<()> {
    let _guards = env_guards;
    let install = fake_install?;
    let user_dir = install.user_dir_with_lastrun("user", contents)?;
    let _user = test_env::set_var("BN_USER_DIRECTORY", &user_dir);
    let candidate = linux_locator(install.path()).from_lastrun();
    ensure!(candidate == Some(PathBuf::from("/opt/app/python")), "got {candidate:?}");
    Ok(())
}

#[rstest]
fn from_lastrun_reads_default_user_directory(
    env_guards: EnvScope,
    fake_install: Result<FakeInstall>,
) -> Result<()> {
    let _guards = env_guards;
    let install = fake_install?;
    fake::write_lastrun(&install.path().join(".binaryninja"), "/opt/app/binaryninja")?;
    let candidate = linux_locator(install.path()).from_lastrun();
    ensure!(candidate == Some(PathBuf::from("/opt/app/python")), "got {candidate:?}");
    Ok(())
}

#[rstest]
fn from_lastrun_inside_macos_bundle(
    env_guards: EnvScope,
    fake_install: Result<FakeInstall>,
) -> Result<()> {
    let _guards = env_guards;
    let install = fake_install?;
    let user_dir = install.user_dir_with_lastrun(
        "user",
        "/Applications/Binary Ninja.app/Contents/MacOS/binaryninja\n",
    )?;
    let _user = test_env::set_var("BN_USER_DIRECTORY", &user_dir);
    let locator = Locator::builder()
        .platform(Platform::MacOs)
        .home_dir(install.path())
        .clear_common_paths()
        .build();
    ensure!(
        locator.from_lastrun()
            == Some(PathBuf::from(
                "/Applications/Binary Ninja.app/Contents/Resources/python"
            ))
    );
    Ok(())
}

#[rstest]
fn from_lastrun_is_absent_without_file(
    env_guards: EnvScope,
    fake_install: Result<FakeInstall>,
) -> Result<()> {
    let _guards = env_guards;
    let install = fake_install?;
    ensure!(linux_locator(install.path()).from_lastrun().is_none());
    Ok(())
}

#[rstest]
#[case::empty("")]
#[case::whitespace(" \n\t\n")]
fn from_lastrun_ignores_blank_file(
    env_guards: EnvScope,
    fake_install: Result<FakeInstall>,
    #[case] contents: &str,
) -> Result<()> {
    let _guards = env_guards;
    let install = fake_install?;
    let user_dir = install.user_dir_with_lastrun("user", contents)?;
    let _user = test_env::set_var("BN_USER_DIRECTORY", &user_dir);
    ensure!(linux_locator(install.path()).from_lastrun().is_none());
    Ok(())
}

#[rstest]
fn from_lastrun_swallows_read_errors(
    env_guards: EnvScope,
    fake_install: Result<FakeInstall>,
) -> Result<()> {
    let _guards = env_guards;
    let install = fake_install?;
    // A directory in place of the file cannot be read as text.
    let user_dir = install.empty_root("user")?;
    std::fs::create_dir(user_dir.join("lastrun"))?;
    let _user = test_env::set_var("BN_USER_DIRECTORY", &user_dir);
    ensure!(linux_locator(install.path()).from_lastrun().is_none());
    Ok(())
}

#[cfg(unix)]
#[rstest]
fn from_lastrun_follows_symlink_outside_user_dir(
    env_guards: EnvScope,
    fake_install: Result<FakeInstall>,
) -> Result<()> {
    let _guards = env_guards;
    let install = fake_install?;
    let real_dir = install.user_dir_with_lastrun("real", "/opt/app/binaryninja")?;
    let user_dir = install.empty_root("user")?;
    std::os::unix::fs::symlink(real_dir.join("lastrun"), user_dir.join("lastrun"))?;
    let _user = test_env::set_var("BN_USER_DIRECTORY", &user_dir);

    let locator = linux_locator(install.path());
    let candidate = locator.from_lastrun();
    ensure!(candidate == Some(PathBuf::from("/opt/app/python")), "got {candidate:?}");
    let errors: Vec<_> = locator.probe().errors().map(ToString::to_string).collect();
    ensure!(errors.is_empty(), "unexpected errors {errors:?}");
    Ok(())
}

#[cfg(unix)]
#[rstest]
fn from_lastrun_treats_dangling_symlink_as_absent(
    env_guards: EnvScope,
    fake_install: Result<FakeInstall>,
) -> Result<()> {
    let _guards = env_guards;
    let install = fake_install?;
    let user_dir = install.empty_root("user")?;
    std::os::unix::fs::symlink(install.path().join("gone"), user_dir.join("lastrun"))?;
    let _user = test_env::set_var("BN_USER_DIRECTORY", &user_dir);

    let locator = linux_locator(install.path());
    ensure!(locator.from_lastrun().is_none());
    ensure!(locator.probe().errors().next().is_none());
    Ok(())
}

#[rstest]
fn from_common_paths_returns_first_valid(fake_install: Result<FakeInstall>) -> Result<()> {
    let install = fake_install?;
    let missing = install.path().join("missing/python");
    let first = install.install_root("first")?.join("python");
    let second = install.install_root("second")?.join("python");
    let locator = Locator::builder()
        .platform(Platform::Linux)
        .common_paths([missing, first.clone(), second])
        .build();
    ensure!(locator.from_common_paths() == Some(first));
    Ok(())
}

#[rstest]
fn from_common_paths_requires_marker(fake_install: Result<FakeInstall>) -> Result<()> {
    let install = fake_install?;
    let root = install.empty_root("bare")?;
    let locator = Locator::builder()
        .platform(Platform::Linux)
        .common_paths([root.join("python")])
        .build();
    ensure!(locator.from_common_paths().is_none());
    Ok(())
}

#[test]
fn other_platforms_have_no_common_paths() {
    let locator = Locator::builder()
        .platform(Platform::Other)
        .home_dir("/home/ada")
        .build();
    assert!(locator.from_common_paths().is_none());
}
