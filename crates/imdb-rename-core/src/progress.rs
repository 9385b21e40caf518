use crate::candidate::Candidate;
use crate::engine::RenameState;

/// Trait for reporting resolution progress.
///
/// The CLI implements it with a spinner and a candidate table. All methods
/// have default no-op implementations.
pub trait ResolutionReporter {
    fn on_search_start(&self, _query: &str) {}
    fn on_search_complete(&self, _hits: usize, _duration_secs: f64) {}
    fn on_search_failed(&self) {}
    /// Candidates left after parsing, de-duplication and key filtering.
    fn on_candidates(&self, _candidates: &[Candidate]) {}
    fn on_state_change(&self, _from: RenameState, _to: RenameState) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ResolutionReporter for SilentReporter {}
