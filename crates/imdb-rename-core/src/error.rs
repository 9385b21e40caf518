use crate::candidate::Candidate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("\"{file_name}\" is not an expected file name")]
    InvalidFilenamePattern { file_name: String },

    #[error("The file name \"{file_name}\" is not specific enough")]
    AmbiguousFilename { file_name: String },

    #[error("Search title is empty")]
    EmptySearchTitle,

    #[error("Could not find any IMDb search results for the film \"{search_title}\"")]
    NoResultsFound { search_title: String },

    #[error("{} IMDb results match \"{search_title}\"", .candidates.len())]
    AmbiguousResult {
        search_title: String,
        candidates: Vec<Candidate>,
    },

    #[error("Search failed: {0}")]
    Transport(String),

    #[error("File {} not found", .0.display())]
    FileNotFound(PathBuf),

    #[error("Destination {} already exists", .0.display())]
    DestinationExists(PathBuf),

    #[error("Failed to {action} {}: {source}", .path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{0}")]
    Other(String),
}
