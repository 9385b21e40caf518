pub mod candidate;
pub mod config;
pub mod dedupe;
pub mod engine;
pub mod error;
pub mod fs;
pub mod naming;
pub mod parser;
pub mod progress;
pub mod prompt;
pub mod query;
pub mod resolver;
pub mod search;

pub use candidate::Candidate;
pub use config::AppConfig;
pub use engine::{RenameEngine, RenameOutcome, RenameRequest, RenameState};
pub use error::Error;
pub use fs::{FileSystem, LocalFileSystem};
pub use naming::RenamePlan;
pub use progress::{ResolutionReporter, SilentReporter};
pub use prompt::{Confirmation, Prompter};
pub use query::ResolutionRequest;
pub use resolver::KeyPrefix;
pub use search::{DuckDuckGoSearch, SearchHit, SearchProvider};
