use crate::candidate::Candidate;
use std::collections::HashSet;
use tracing::debug;

/// Keep the first candidate for each `(key, title)` pair, in encounter order.
pub fn dedupe_candidates(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut result = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        let (key, title) = candidate.identity();
        if seen.insert((key.to_string(), title.to_string())) {
            result.push(candidate);
        } else {
            debug!("Dropping duplicate result {} {:?}", candidate.key, candidate.title);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_collapse_to_first_seen() {
        let candidates = vec![
            Candidate::new("tt1375666", "Inception", "2010", "a", "first"),
            Candidate::new("tt0113277", "Heat", "1995", "b", ""),
            Candidate::new("tt1375666", "Inception", "2010", "c", "second"),
        ];
        let result = dedupe_candidates(candidates);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].key, "tt1375666");
        assert_eq!(result[0].overview, "first");
        assert_eq!(result[1].key, "tt0113277");
    }

    #[test]
    fn test_same_key_different_title_kept() {
        let candidates = vec![
            Candidate::new("tt0266697", "Kill Bill: Vol. 1", "2003", "", ""),
            Candidate::new("tt0266697", "Kill Bill: Volume 1", "2003", "", ""),
        ];
        assert_eq!(dedupe_candidates(candidates).len(), 2);
    }
}
