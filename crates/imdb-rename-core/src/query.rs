use crate::config::{FilenameMode, NamingConfig};
use crate::error::Error;
use crate::resolver::KeyPrefix;
use lazy_static::lazy_static;
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Title MakeMKV gives discs it could not name.
pub const PLACEHOLDER_TITLE: &str = "title";

lazy_static! {
    static ref IMDB_TAG: Regex = Regex::new(r"\{imdb-tt\d+\}").unwrap();
}

/// What the engine searches for, and how the results are narrowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub search_title: String,
    pub key_prefix: Option<KeyPrefix>,
    pub edition: Option<String>,
}

impl ResolutionRequest {
    pub fn new(search_title: &str) -> Result<Self, Error> {
        let search_title = search_title.trim();
        if search_title.is_empty() {
            return Err(Error::EmptySearchTitle);
        }
        if search_title.eq_ignore_ascii_case(PLACEHOLDER_TITLE) {
            return Err(Error::AmbiguousFilename {
                file_name: search_title.to_string(),
            });
        }
        Ok(Self {
            search_title: search_title.to_string(),
            key_prefix: None,
            edition: None,
        })
    }

    pub fn with_key_prefix(mut self, key_prefix: Option<KeyPrefix>) -> Self {
        self.key_prefix = key_prefix;
        self
    }

    pub fn with_edition(mut self, edition: Option<String>) -> Self {
        self.edition = edition
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());
        self
    }

    /// Search text, scoped to `site_filter` when one is given.
    pub fn query(&self, site_filter: Option<&str>) -> String {
        match site_filter.map(str::trim).filter(|s| !s.is_empty()) {
            Some(site) => format!("site:{} {}", site, self.search_title),
            None => self.search_title.clone(),
        }
    }
}

/// Build a request from a file, or from `explicit_title` when one is supplied.
pub fn request_for(
    path: &Path,
    explicit_title: Option<&str>,
    naming: &NamingConfig,
) -> Result<ResolutionRequest, Error> {
    match explicit_title {
        Some(title) => ResolutionRequest::new(title),
        None => {
            let title = extract_search_title(path, naming)?;
            ResolutionRequest::new(&title).map_err(|err| match err {
                Error::AmbiguousFilename { .. } => Error::AmbiguousFilename {
                    file_name: file_name_lossy(path),
                },
                other => other,
            })
        }
    }
}

/// Strip the extension and the optional `_t<digits>` tag from a file name.
pub fn extract_search_title(path: &Path, naming: &NamingConfig) -> Result<String, Error> {
    let invalid = || Error::InvalidFilenamePattern {
        file_name: file_name_lossy(path),
    };

    let file_name = path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;

    // Already renamed by us.
    if IMDB_TAG.is_match(file_name) {
        return Err(invalid());
    }

    let pattern = filename_pattern(&naming.extensions, naming.filename_mode)?;
    let captures = pattern.captures(file_name).ok_or_else(invalid)?;
    let title = captures["title"].trim();
    if title.is_empty() {
        return Err(invalid());
    }

    debug!("Extracted search title {:?} from {:?}", title, file_name);
    Ok(title.to_string())
}

fn filename_pattern(extensions: &[String], mode: FilenameMode) -> Result<Regex, Error> {
    let extensions = extensions
        .iter()
        .map(|e| regex::escape(e.trim_start_matches('.')))
        .collect::<Vec<_>>()
        .join("|");
    if extensions.is_empty() {
        return Err(Error::Other("No file extensions configured".to_string()));
    }
    let tag = match mode {
        FilenameMode::Lenient => r"(?:_t\d+)?",
        FilenameMode::Strict => r"_t\d+",
    };
    Regex::new(&format!(r"(?i)^(?P<title>.+?){}\.(?:{})$", tag, extensions))
        .map_err(|err| Error::Other(format!("Invalid file name pattern: {}", err)))
}

fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
