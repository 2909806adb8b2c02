//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use docket_refiner::RefinerConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Completion provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Run settings
    #[serde(default)]
    pub run: RunConfig,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Which completion service to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// OpenAI-compatible chat completions
    #[default]
    OpenAi,
    /// Local Ollama instance
    Ollama,
}

/// Completion provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider kind
    pub kind: ProviderKind,

    /// API base URL; the provider default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f64,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Run settings: where to read and write, plus refiner options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory of input documents
    pub input_dir: PathBuf,

    /// Output file
    pub output: PathBuf,

    /// Refiner options
    #[serde(flatten)]
    pub refiner: RefinerConfig,
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
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".docket").join("config.toml"))
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Self::from_toml(&contents)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Check settings that the refiner cannot check itself.
    pub fn validate(&self) -> Result<()> {
        self.run.refiner.validate()?;

        if !(0.0..=2.0).contains(&self.provider.temperature) {
            return Err(CliError::Config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.provider.temperature
            )));
        }
        if self.provider.timeout_secs == 0 {
            return Err(CliError::Config("timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

impl ProviderConfig {
    /// Read the API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        match env::var(&self.api_key_env) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(CliError::Config(format!(
                "API key not found: set the {} environment variable",
                self.api_key_env
            ))),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::OpenAi,
            endpoint: None,
            model: docket_llm::openai::DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_secs: docket_llm::openai::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./data"),
            output: PathBuf::from("./refined_dataset_with_intents.json"),
            refiner: RefinerConfig::default(),
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

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_refiner::PromptKind;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.provider.kind, ProviderKind::OpenAi);
        assert_eq!(config.provider.model, "gpt-4o");
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
        assert_eq!(config.run.refiner.max_items, 100);
        assert!(config.settings.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_toml(
            r#"
            [provider]
            kind = "ollama"
            model = "llama3"

            [run]
            max_items = 5
            prompt = "evaluate"
            "#,
        )
        .unwrap();

        assert_eq!(config.provider.kind, ProviderKind::Ollama);
        assert_eq!(config.provider.model, "llama3");
        assert_eq!(config.provider.timeout_secs, 120);
        assert_eq!(config.run.refiner.max_items, 5);
        assert_eq!(config.run.refiner.prompt, PromptKind::Evaluate);
        assert_eq!(config.run.input_dir, PathBuf::from("./data"));
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.provider.endpoint = Some("http://localhost:8080/v1".to_string());
        config.run.refiner.template_path = Some(PathBuf::from("prompt.txt"));
        config.settings.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Config::from_toml("[provider\nkind = ");
        assert!(matches!(result, Err(CliError::Toml(_))));
    }

    #[test]
    fn test_unknown_provider_kind() {
        let result = Config::from_toml("[provider]\nkind = \"bard\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_api_key() {
        let provider = ProviderConfig {
            api_key_env: "DOCKET_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..ProviderConfig::default()
        };
        let result = provider.api_key();
        assert!(matches!(result, Err(CliError::Config(msg)) if msg.contains("DOCKET_TEST_KEY_THAT_IS_NEVER_SET")));
    }

    #[test]
    fn test_api_key_from_env() {
        env::set_var("DOCKET_TEST_KEY_PRESENT", "sk-test");
        let provider = ProviderConfig {
            api_key_env: "DOCKET_TEST_KEY_PRESENT".to_string(),
            ..ProviderConfig::default()
        };
        assert_eq!(provider.api_key().unwrap(), "sk-test");
    }

    #[test]
    fn test_validate_rejects_temperature() {
        let mut config = Config::default();
        config.provider.temperature = 3.5;
        assert!(matches!(config.validate(), Err(CliError::Config(_))));
    }
}
