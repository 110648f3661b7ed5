//! Test helpers shared across the workspace.
//!
//! [`env`] serialises environment mutation behind RAII guards and
//! [`install`] lays out fake Binary Ninja installations on disk.

pub mod env;
pub mod install;
