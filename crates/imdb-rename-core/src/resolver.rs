use crate::candidate::Candidate;
use crate::error::Error;
use std::fmt;
use tracing::{debug, info};

/// A filter on IMDb keys, always stored in its `tt`-prefixed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPrefix(String);

impl KeyPrefix {
    /// Normalize user input: `1375666`, `t1375666` and `tt1375666` all become
    /// `tt1375666`. Blank input is no filter at all.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut prefix = raw.trim().to_ascii_lowercase();
        if prefix.is_empty() {
            return None;
        }
        while !prefix.starts_with("tt") {
            prefix.insert(0, 't');
        }
        Some(Self(prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        candidate.key.starts_with(&self.0)
    }
}

impl fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Narrow the candidates with `key_prefix`, returning only the candidates that
/// survive. Callers present them before calling [`resolve`].
pub fn filter_candidates(candidates: Vec<Candidate>, key_prefix: Option<&KeyPrefix>) -> Vec<Candidate> {
    match key_prefix {
        Some(prefix) => {
            let before = candidates.len();
            let kept: Vec<_> = candidates.into_iter().filter(|c| prefix.matches(c)).collect();
            debug!("Key prefix {} kept {} of {} results", prefix, kept.len(), before);
            kept
        }
        None => candidates,
    }
}

/// Pick the single surviving candidate. Several survivors are never resolved
/// by picking one; the caller must narrow the search and try again.
pub fn resolve(candidates: Vec<Candidate>, search_title: &str) -> Result<Candidate, Error> {
    let mut candidates = candidates;
    match candidates.len() {
        0 => Err(Error::NoResultsFound {
            search_title: search_title.to_string(),
        }),
        1 => {
            let candidate = candidates.remove(0);
            info!("Resolved {:?} to {} {}", search_title, candidate.key, candidate.title_and_year());
            Ok(candidate)
        }
        _ => Err(Error::AmbiguousResult {
            search_title: search_title.to_string(),
            candidates,
        }),
    }
}
