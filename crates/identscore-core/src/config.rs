use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::extractor::ExcludedIdentifiers;
use crate::types::Language;

/// Name of the configuration file looked up from the analyzed directory upward.
pub const CONFIG_FILE_NAME: &str = ".identscore.toml";

/// Top-level configuration from `.identscore.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub vocabulary: VocabularyConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Language used when none is given on the command line.
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default = "default_exclude_patterns")]
    pub exclude_patterns: Vec<String>,
}

fn default_exclude_patterns() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/target/**".to_string(),
        "**/.git/**".to_string(),
    ]
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            language: None,
            exclude_patterns: default_exclude_patterns(),
        }
    }
}

/// Dictionary source and allowlist extensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyConfig {
    #[serde(default = "default_dictionary")]
    pub dictionary: PathBuf,
    /// Tokens added to the built-in allowlist.
    #[serde(default)]
    pub allowlist: Vec<String>,
}

fn default_dictionary() -> PathBuf {
    PathBuf::from("words_alpha.txt")
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        Self {
            dictionary: default_dictionary(),
            allowlist: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default = "default_excluded_identifiers")]
    pub excluded_identifiers: Vec<String>,
}

fn default_excluded_identifiers() -> Vec<String> {
    vec!["i".to_string(), "j".to_string()]
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            excluded_identifiers: default_excluded_identifiers(),
        }
    }
}

impl ExtractionConfig {
    pub fn excluded(&self) -> ExcludedIdentifiers {
        ExcludedIdentifiers::new(self.excluded_identifiers.iter().cloned())
    }
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Detailed and summary CSV files
    Csv,
    /// One JSON document with the full run result
    Json,
    /// Colored summary on stdout
    Text,
}

impl std::str::FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            "text" => Ok(ReportFormat::Text),
            _ => Err(anyhow::anyhow!("unknown report format: {s}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_formats")]
    pub formats: Vec<ReportFormat>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_formats() -> Vec<ReportFormat> {
    vec![ReportFormat::Csv]
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: default_formats(),
        }
    }
}

impl Config {
    /// Load configuration from a `.identscore.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file '{}'", path.display()))?;
        let config: Config = toml::from_str(&content).with_context(|| {
            format!(
                "failed to parse '{}'. Run `identscore init` to create a valid config file",
                path.display()
            )
        })?;
        Ok(config)
    }

    /// Load from `.identscore.toml` in the given directory or any ancestor, or return defaults.
    pub fn load_or_default(dir: &Path) -> Self {
        let start = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
        let mut current = if start.is_file() {
            start.parent().map(Path::to_path_buf).unwrap_or(start)
        } else {
            start
        };
        loop {
            let config_path = current.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return match Self::load(&config_path) {
                    Ok(config) => {
                        tracing::debug!(path = %config_path.display(), "loaded config");
                        config
                    }
                    Err(e) => {
                        tracing::warn!(
                            "failed to load config from '{}': {e:#}. Using defaults.",
                            config_path.display()
                        );
                        Self::default()
                    }
                };
            }
            if !current.pop() {
                break;
            }
        }
        Self::default()
    }

    /// Generate default TOML content for `identscore init`.
    pub fn default_toml() -> String {
        r#"# identscore - Identifier Comprehensibility Configuration

[project]
# Language analyzed when --language is not given:
# "java", "csharp", "python", "javascript" or "cpp"
# language = "java"
exclude_patterns = ["**/node_modules/**", "**/target/**", "**/.git/**"]

[vocabulary]
# Newline-delimited word list, one word per line
dictionary = "words_alpha.txt"
# Extra short tokens that always count as readable
allowlist = []

[extraction]
# Names that are never scored (loop counters)
excluded_identifiers = ["i", "j"]

[report]
output_dir = "."
# Any of "csv", "json", "text"
formats = ["csv"]
"#
        .to_string()
    }
}
