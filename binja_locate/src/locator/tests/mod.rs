//! Unit tests for the locator.
//!
//! Covers user directory resolution per platform, API directory derivation,
//! each searcher in isolation, the stop-on-first-candidate policy of `find`,
//! and the probe report.

mod searchers;
