//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use clauseclear_extractor::HybridConfig;
use clauseclear_rules::KnowledgeBase;
use clauseclear_store::DEFAULT_TOP_K;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Knowledge base file; the built-in one is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_base: Option<PathBuf>,

    /// SQLite file holding retrieval artifacts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_db: Option<PathBuf>,

    /// Default number of search results
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// LLM provider settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Hybrid analysis settings
    #[serde(default)]
    pub hybrid: HybridConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// LLM provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Ollama endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// Attempts per request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-request timeout (seconds)
    #[serde(default = "default_request_timeout")]
    pub timeout_secs: u64,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Directory holding the configuration and default index.
    pub fn home() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".clauseclear"))
    }

    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        Ok(Self::home()?.join("config.toml"))
    }

    /// Load configuration from the default path.
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.hybrid.validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Index database path, defaulting to `~/.clauseclear/index.db`.
    pub fn index_db_path(&self) -> Result<PathBuf> {
        match &self.index_db {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::home()?.join("index.db")),
        }
    }

    /// Load the configured knowledge base, or the built-in one.
    pub fn load_knowledge_base(&self, override_path: Option<&Path>) -> Result<KnowledgeBase> {
        let kb = match override_path.or(self.knowledge_base.as_deref()) {
            Some(path) => {
                info!("Loading knowledge base from {}", path.display());
                KnowledgeBase::load(path)?
            }
            None => KnowledgeBase::embedded()?,
        };
        Ok(kb)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knowledge_base: None,
            index_db: None,
            top_k: DEFAULT_TOP_K,
            llm: LlmSettings::default(),
            hybrid: HybridConfig::default(),
            settings: Settings::default(),
        }
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            max_retries: default_max_retries(),
            timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_endpoint() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_request_timeout() -> u64 {
    120
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.top_k, 5);
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert!(config.knowledge_base.is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "top_k = 3\n\n[llm]\nmodel = \"mistral\"\n\n[hybrid]\nbatch_size = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.llm.model, "mistral");
        assert_eq!(config.llm.endpoint, "http://localhost:11434");
        assert_eq!(config.hybrid.batch_size, 5);
        assert_eq!(config.hybrid.trivial_word_count, 15);
    }

    #[test]
    fn test_invalid_hybrid_settings_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[hybrid]\nbatch_size = 0\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            index_db: Some(dir.path().join("index.db")),
            top_k: 8,
            ..Config::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_embedded_knowledge_base_by_default() {
        let kb = Config::default().load_knowledge_base(None).unwrap();
        assert!(kb.rule("very_large_deposit").is_some());
    }
}
