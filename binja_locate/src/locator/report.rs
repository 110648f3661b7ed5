//! Diagnostic report produced by [`Locator::probe`](super::Locator::probe).

use std::path::{Path, PathBuf};

use super::{Searcher, Validation};
use crate::LocateError;

/// What a single searcher produced during a probe.
#[derive(Debug)]
#[non_exhaustive]
pub struct ProbeEntry {
    /// The searcher that ran.
    pub searcher: Searcher,
    /// Candidate directory, if the searcher produced one.
    pub candidate: Option<PathBuf>,
    /// Whether the candidate contains the package marker.
    pub valid: bool,
    /// I/O failure the searcher would otherwise have suppressed.
    pub error: Option<LocateError>,
}

/// Per-searcher results in search order.
///
/// [`Self::selected`] applies the same stop-on-first-candidate policy as
/// [`Locator::find_with`](super::Locator::find_with).
#[derive(Debug)]
#[must_use]
pub struct ProbeReport {
    entries: Vec<ProbeEntry>,
}

impl ProbeReport {
    pub(super) const fn new(entries: Vec<ProbeEntry>) -> Self {
        Self { entries }
    }

    /// Entries in [`Searcher::ORDER`].
    #[must_use]
    pub fn entries(&self) -> &[ProbeEntry] {
        &self.entries
    }

    /// Entry recorded for `searcher`.
    #[must_use]
    pub fn entry(&self, searcher: Searcher) -> Option<&ProbeEntry> {
        self.entries.iter().find(|entry| entry.searcher == searcher)
    }

    /// The candidate `find_with(validation)` would return.
    #[must_use]
    pub fn selected(&self, validation: Validation) -> Option<&Path> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.candidate.is_some())?;
        match validation {
            Validation::Required if !entry.valid => None,
            Validation::Required | Validation::Skip => entry.candidate.as_deref(),
        }
    }

    /// Errors suppressed during discovery.
    pub fn errors(&self) -> impl Iterator<Item = &LocateError> {
        self.entries.iter().filter_map(|entry| entry.error.as_ref())
    }
}
