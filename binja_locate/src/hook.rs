//! Startup hook putting the Binary Ninja API on the module search path.
//!
//! [`ensure_on_path`] is total: it never panics, never reports an error, and
//! never logs or writes output. A missing or broken installation simply
//! leaves the search path unchanged.

use std::path::PathBuf;

use tracing::subscriber::NoSubscriber;

use crate::locator::Locator;
use crate::search_path::{SearchPath, with_process_search_path};

/// What a startup hook invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// The package already resolved; nothing was appended.
    AlreadyResolvable,
    /// The located API directory was appended.
    Appended(PathBuf),
    /// No valid API directory was found; nothing was appended.
    NotFound,
}

/// Appends the located API directory to `search_path` unless the package
/// already resolves there.
///
/// Validation is always required, so a successful append makes the package
/// resolvable and a repeated call becomes a no-op. The lookup runs with
/// tracing silenced, so no subscriber sees events from the hook.
pub fn ensure_on<S>(locator: &Locator, search_path: &mut S) -> HookOutcome
where
    S: SearchPath + ?Sized,
{
    tracing::subscriber::with_default(NoSubscriber::default(), || {
        if search_path.resolves(locator.package_name()) {
            return HookOutcome::AlreadyResolvable;
        }
        match locator.find() {
            Some(dir) => {
                search_path.append(dir.clone());
                HookOutcome::Appended(dir)
            }
            None => HookOutcome::NotFound,
        }
    })
}

/// Runs [`ensure_on`] against the process-wide search path with the default
/// [`Locator`].
///
/// ```rust,no_run
/// use binja_locate::{hook, search_path};
///
/// # fn main() -> binja_locate::LocateResult<()> {
/// hook::ensure_on_path();
/// let mut python = std::process::Command::new("python3");
/// search_path::apply_process_search_path(&mut python)?;
/// # Ok(())
/// # }
/// ```
pub fn ensure_on_path() -> HookOutcome {
    let locator = Locator::new();
    with_process_search_path(|search_path| ensure_on(&locator, search_path))
}
