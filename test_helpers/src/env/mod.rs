//! Guards for mutating process environment variables in tests.
//!
//! Every mutation takes a process-wide re-entrant lock and hands back an
//! [`EnvVarGuard`] that puts the previous value back (or removes the
//! variable) when dropped. [`EnvScope`] keeps the lock for a whole test so
//! discovery code never observes another test's overrides.
//!
//! ```
//! use binja_locate_test_helpers::env;
//!
//! let _scope = env::locator_scope();
//! let _install = env::set_var("BN_INSTALL_DIR", "/opt/binaryninja");
//! assert_eq!(std::env::var("BN_INSTALL_DIR").as_deref(), Ok("/opt/binaryninja"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Variables read by the locator and the startup hook.
pub const LOCATOR_VARS: [&str; 4] = ["BN_USER_DIRECTORY", "BN_INSTALL_DIR", "APPDATA", "PYTHONPATH"];

/// Writes `value` under `key`.
///
/// # Safety
///
/// The caller must hold `ENV_MUTEX`.
unsafe fn write_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Removes `key`.
///
/// # Safety
///
/// The caller must hold `ENV_MUTEX`.
unsafe fn erase_var(key: &str) {
    unsafe { env::remove_var(key) };
}

fn guarded<F>(key: String, mutate: F, _lock: &ReentrantMutexGuard<'static, ()>) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let original = env::var_os(&key);
    mutate(&key);
    EnvVarGuard { key, original }
}

/// Restores an environment variable to its prior state on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held.
            Some(value) => unsafe { write_var(&self.key, &value) },
            // SAFETY: `ENV_MUTEX` is held.
            None => unsafe { erase_var(&self.key) },
        }
    }
}

/// Holds the environment lock; mutations made through it reuse the lock.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Sets `key` while the lock is held.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        // SAFETY: `self.guard` holds `ENV_MUTEX`.
        guarded(key.into(), |k| unsafe { write_var(k, value.as_ref()) }, &self.guard)
    }

    /// Removes `key` while the lock is held.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        // SAFETY: `self.guard` holds `ENV_MUTEX`.
        guarded(key.into(), |k| unsafe { erase_var(k) }, &self.guard)
    }
}

/// Keeps the environment lock and a set of guards alive together.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    guards: Vec<EnvVarGuard>,
    _lock: EnvVarLock,
}

impl EnvScope {
    /// Takes the lock, then lets `builder` register guards under it.
    pub fn new_with<F>(builder: F) -> Self
    where
        F: FnOnce(&EnvVarLock) -> Vec<EnvVarGuard>,
    {
        let lock = lock();
        let guards = builder(&lock);
        Self {
            guards,
            _lock: lock,
        }
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        drop(std::mem::take(&mut self.guards));
    }
}

/// Sets `key` to `value` until the returned guard drops.
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Removes `key` until the returned guard drops.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    lock().remove_var(key)
}

/// Acquires the environment lock for the lifetime of the returned value.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        guard: ENV_MUTEX.lock(),
    }
}

/// Clears every variable in [`LOCATOR_VARS`] and holds the lock until the
/// scope drops.
pub fn locator_scope() -> EnvScope {
    EnvScope::new_with(|lock| LOCATOR_VARS.iter().map(|key| lock.remove_var(*key)).collect())
}

#[cfg(test)]
mod tests;
