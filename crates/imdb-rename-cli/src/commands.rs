use clap::Parser;
use imdb_rename_core::config::DEFAULT_CONFIG_NAME;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "imdb-rename")]
#[command(about = "Rename a ripped film after its IMDb title", long_about = None)]
pub struct Cli {
    /// File to rename
    pub file: PathBuf,

    /// Edition of the file, e.g. "Extended"
    #[arg(short, long)]
    pub edition: Option<String>,

    /// Basic title of film to search for, if missing will get from file name
    #[arg(short, long = "search", visible_alias = "title")]
    pub search_title: Option<String>,

    /// Filter search results to this IMDb key prefix
    #[arg(short = 't', long, visible_short_alias = 'k')]
    pub imdb_key: Option<String>,

    /// Move the file (required when confirm mode is permissive)
    #[arg(short, long)]
    pub rename: bool,

    /// Configuration file name, extension optional
    #[arg(short, long, default_value = DEFAULT_CONFIG_NAME)]
    pub config: String,
}
