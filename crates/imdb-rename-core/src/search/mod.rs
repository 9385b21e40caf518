mod duckduckgo;

pub use duckduckgo::DuckDuckGoSearch;

use crate::error::Error;

/// One raw web search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub href: String,
    pub body: String,
}

/// A text search returning at most `max_results` hits in ranked order.
///
/// Any `Fn(&str, usize) -> Result<Vec<SearchHit>, Error>` is a provider, so a
/// plain function can be handed to the engine.
pub trait SearchProvider {
    fn text(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, Error>;
}

impl<F> SearchProvider for F
where
    F: Fn(&str, usize) -> Result<Vec<SearchHit>, Error>,
{
    fn text(&self, query: &str, max_results: usize) -> Result<Vec<SearchHit>, Error> {
        self(query, max_results)
    }
}
