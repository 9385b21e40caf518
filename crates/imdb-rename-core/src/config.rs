use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

pub const DEFAULT_CONFIG_NAME: &str = "Config";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub naming: NamingConfig,
    pub confirm: ConfirmMode,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Domain the query is scoped to with a `site:` filter. Empty disables it.
    pub site_filter: Option<String>,
    pub max_results: usize,
    pub timeout_secs: u64,
    pub endpoint: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            site_filter: Some("imdb.com".to_string()),
            max_results: 10,
            timeout_secs: 15,
            endpoint: "https://html.duckduckgo.com/html/".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub extensions: Vec<String>,
    pub filename_mode: FilenameMode,
    pub edition_labels: Vec<String>,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["mkv".to_string()],
            filename_mode: FilenameMode::default(),
            edition_labels: vec![
                "Extended".to_string(),
                "Theatrical".to_string(),
                "Director's Cut".to_string(),
            ],
        }
    }
}

/// How strictly the `_t<digits>` track tag is required in source file names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilenameMode {
    #[default]
    Lenient,
    Strict,
}

/// Strict always asks before renaming and defaults to "no". Permissive
/// defaults to "yes" but only moves files when the rename flag is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmMode {
    #[default]
    Strict,
    Permissive,
}

pub fn load_configuration(name: &str) -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name(name).required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}
