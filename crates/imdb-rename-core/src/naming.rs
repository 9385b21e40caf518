use crate::candidate::Candidate;
use std::path::{Path, PathBuf};

const DEFAULT_EXTENSION: &str = "mkv";

/// Everything needed to move one file into its canonical location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub source_path: PathBuf,
    pub destination_path: PathBuf,
    pub canonical_title: String,
    pub edition: Option<String>,
}

impl RenamePlan {
    /// `<parent>/<canonical title>/<canonical title> {imdb-<key>}.<ext>`
    pub fn build(source_path: &Path, candidate: &Candidate, edition: Option<&str>) -> Self {
        let canonical_title = canonical_title(candidate, edition);
        let extension = source_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
        let file_name = canonical_file_name(&canonical_title, &candidate.key, &extension);

        let parent = source_path.parent().unwrap_or_else(|| Path::new(""));
        let destination_path = parent.join(&canonical_title).join(file_name);

        Self {
            source_path: source_path.to_path_buf(),
            destination_path,
            canonical_title,
            edition: edition.map(str::to_string),
        }
    }

    /// Destination relative to the directory the source lives in.
    pub fn relative_destination(&self) -> &Path {
        let parent = self.source_path.parent().unwrap_or_else(|| Path::new(""));
        self.destination_path
            .strip_prefix(parent)
            .unwrap_or(&self.destination_path)
    }

    pub fn destination_dir(&self) -> &Path {
        self.destination_path.parent().unwrap_or_else(|| Path::new(""))
    }
}

/// Edition labels that appear as `(<label>)` in `file_name`, in label order.
pub fn detect_editions<'a>(file_name: &str, labels: &'a [String]) -> Vec<&'a str> {
    labels
        .iter()
        .map(String::as_str)
        .filter(|label| file_name.contains(&format!("({})", label)))
        .collect()
}

/// `"{title} ({year})"` plus an optional `{edition-...}` tag, made safe for use
/// as a path segment.
pub fn canonical_title(candidate: &Candidate, edition: Option<&str>) -> String {
    let title = match edition {
        Some(edition) => format!("{} {{edition-{}}}", candidate.title_and_year(), edition),
        None => candidate.title_and_year().to_string(),
    };
    sanitize(&title)
}

pub fn sanitize(title: &str) -> String {
    title.replace(": ", " - ").replace('?', "")
}

pub fn canonical_file_name(canonical_title: &str, key: &str, extension: &str) -> String {
    format!("{} {{imdb-{}}}.{}", canonical_title, key, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inception() -> Candidate {
        Candidate::new(
            "tt1375666",
            "Inception",
            "2010",
            "https://www.imdb.com/title/tt1375666",
            "",
        )
    }

    fn labels() -> Vec<String> {
        crate::config::NamingConfig::default().edition_labels
    }

    #[test]
    fn test_plan_without_edition() {
        let plan = RenamePlan::build(Path::new("/rips/Inception_t00.mkv"), &inception(), None);
        assert_eq!(plan.canonical_title, "Inception (2010)");
        assert_eq!(
            plan.destination_path,
            PathBuf::from("/rips/Inception (2010)/Inception (2010) {imdb-tt1375666}.mkv")
        );
        assert_eq!(
            plan.relative_destination(),
            Path::new("Inception (2010)/Inception (2010) {imdb-tt1375666}.mkv")
        );
        assert_eq!(plan.destination_dir(), Path::new("/rips/Inception (2010)"));
    }

    #[test]
    fn test_plan_with_edition() {
        let plan = RenamePlan::build(Path::new("Inception_t00.mkv"), &inception(), Some("Extended"));
        assert_eq!(plan.canonical_title, "Inception (2010) {edition-Extended}");
        assert_eq!(
            plan.destination_path,
            PathBuf::from(
                "Inception (2010) {edition-Extended}/Inception (2010) {edition-Extended} {imdb-tt1375666}.mkv"
            )
        );
        assert_eq!(plan.edition.as_deref(), Some("Extended"));
    }

    #[test]
    fn test_sanitize_colons_and_question_marks() {
        let candidate = Candidate::new("tt0108551", "What's Love Got to Do with It?", "1993", "", "");
        assert_eq!(canonical_title(&candidate, None), "What's Love Got to Do with It (1993)");

        let candidate = Candidate::new("tt0266697", "Kill Bill: Vol. 1", "2003", "", "");
        assert_eq!(canonical_title(&candidate, None), "Kill Bill - Vol. 1 (2003)");
    }

    #[test]
    fn test_colon_without_space_is_kept() {
        assert_eq!(sanitize("2:22"), "2:22");
    }

    #[test]
    fn test_detect_editions() {
        let labels = labels();
        assert_eq!(
            detect_editions("Aliens (Director's Cut)_t01.mkv", &labels),
            vec!["Director's Cut"]
        );
        assert_eq!(
            detect_editions("Dune (Extended) (Theatrical).mkv", &labels),
            vec!["Extended", "Theatrical"]
        );
        assert!(detect_editions("Extended Family.mkv", &labels).is_empty());
    }

    #[test]
    fn test_source_extension_is_kept() {
        let plan = RenamePlan::build(Path::new("Inception.MP4"), &inception(), None);
        assert!(plan
            .destination_path
            .to_string_lossy()
            .ends_with("{imdb-tt1375666}.mp4"));
    }
}
