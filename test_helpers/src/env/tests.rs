//! Unit tests for environment guards.

use super::*;

fn value_of(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[test]
fn set_var_restores_original() {
    let key = "BINJA_TEST_HELPERS_SET";
    let _base = set_var(key, "orig");
    {
        let _guard = set_var(key, "temp");
        assert_eq!(value_of(key).as_deref(), Some("temp"));
    }
    assert_eq!(value_of(key).as_deref(), Some("orig"));
}

#[test]
fn remove_var_restores_value() {
    let key = "BINJA_TEST_HELPERS_REMOVE";
    let _base = set_var(key, "present");
    {
        let _guard = remove_var(key);
        assert_eq!(value_of(key), None);
    }
    assert_eq!(value_of(key).as_deref(), Some("present"));
}

#[test]
fn set_var_unsets_when_absent() {
    let key = "BINJA_TEST_HELPERS_UNSET";
    let _absent = remove_var(key);
    {
        let _guard = set_var(key, "tmp");
        assert_eq!(value_of(key).as_deref(), Some("tmp"));
    }
    assert_eq!(value_of(key), None);
}

#[test]
fn stacking_restores_in_lifo() {
    let key = "BINJA_TEST_HELPERS_STACKING";
    let _absent = remove_var(key);
    let first = set_var(key, "v1");
    let second = set_var(key, "v2");
    assert_eq!(value_of(key).as_deref(), Some("v2"));
    drop(second);
    assert_eq!(value_of(key).as_deref(), Some("v1"));
    drop(first);
    assert_eq!(value_of(key), None);
}

#[test]
fn locator_scope_clears_and_restores() {
    let _outer = set_var("BN_INSTALL_DIR", "/opt/outer");
    {
        let _scope = locator_scope();
        for key in LOCATOR_VARS {
            assert_eq!(value_of(key), None, "{key} should be cleared");
        }
        let _inner = set_var("BN_INSTALL_DIR", "/opt/inner");
        assert_eq!(value_of("BN_INSTALL_DIR").as_deref(), Some("/opt/inner"));
    }
    assert_eq!(value_of("BN_INSTALL_DIR").as_deref(), Some("/opt/outer"));
}
