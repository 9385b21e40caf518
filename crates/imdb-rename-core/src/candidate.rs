use once_cell::sync::OnceCell;

/// A film parsed out of one search hit.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// IMDb identifier, always `tt` followed by digits.
    pub key: String,
    pub title: String,
    pub year: String,
    pub url: String,
    pub overview: String,
    title_and_year: OnceCell<String>,
}

impl Candidate {
    pub fn new(
        key: impl Into<String>,
        title: impl Into<String>,
        year: impl Into<String>,
        url: impl Into<String>,
        overview: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            year: year.into(),
            url: url.into(),
            overview: overview.into(),
            title_and_year: OnceCell::new(),
        }
    }

    /// `"{title} ({year})"`, built on first use.
    pub fn title_and_year(&self) -> &str {
        self.title_and_year
            .get_or_init(|| format!("{} ({})", self.title, self.year))
    }

    /// Identity used for de-duplication.
    pub fn identity(&self) -> (&str, &str) {
        (&self.key, &self.title)
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
            && self.title == other.title
            && self.year == other.year
            && self.url == other.url
            && self.overview == other.overview
    }
}

impl Eq for Candidate {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_year() {
        let candidate = Candidate::new(
            "tt1375666",
            "Inception",
            "2010",
            "https://www.imdb.com/title/tt1375666",
            "",
        );
        assert_eq!(candidate.title_and_year(), "Inception (2010)");
        // Second call returns the cached value.
        assert!(std::ptr::eq(
            candidate.title_and_year(),
            candidate.title_and_year()
        ));
    }

    #[test]
    fn test_equality_ignores_cache_state() {
        let a = Candidate::new("tt1", "A", "2000", "u", "o");
        let b = a.clone();
        let _ = a.title_and_year();
        assert_eq!(a, b);
    }
}
