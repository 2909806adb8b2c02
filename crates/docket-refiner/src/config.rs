//! Configuration for the refiner

use crate::error::RefinerError;
use crate::prompt::PromptTemplate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Built-in prompt selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptKind {
    /// Categorize question and answer intents
    #[default]
    Categorize,
    /// Judge whether the answer is appropriate
    Evaluate,
}

impl PromptKind {
    /// Get the prompt name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptKind::Categorize => "categorize",
            PromptKind::Evaluate => "evaluate",
        }
    }
}

/// Configuration for a refinement run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinerConfig {
    /// Maximum number of records per run
    pub max_items: usize,

    /// File extension of input documents (without the dot)
    pub input_extension: String,

    /// Built-in prompt to use when no template file is given
    pub prompt: PromptKind,

    /// Custom template file with `{question}` and `{answer}` placeholders
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,

    /// Indent the output file
    pub pretty_output: bool,
}

impl RefinerConfig {
    /// Extension without any leading dot
    pub fn extension(&self) -> &str {
        self.input_extension.trim_start_matches('.')
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), RefinerError> {
        if self.extension().trim().is_empty() {
            return Err(RefinerError::Configuration(
                "input_extension must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load the template this configuration selects
    pub fn load_template(&self) -> Result<PromptTemplate, RefinerError> {
        match &self.template_path {
            Some(path) => PromptTemplate::from_file(path),
            None => Ok(PromptTemplate::for_kind(self.prompt)),
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, RefinerError> {
        toml::from_str(toml_str)
            .map_err(|e| RefinerError::Configuration(format!("Failed to parse TOML: {}", e)))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, RefinerError> {
        toml::to_string_pretty(self)
            .map_err(|e| RefinerError::Configuration(format!("Failed to serialize to TOML: {}", e)))
    }
}

impl Default for RefinerConfig {
    fn default() -> Self {
        Self {
            max_items: 100,
            input_extension: "json".to_string(),
            prompt: PromptKind::Categorize,
            template_path: None,
            pretty_output: true,
        }
    }
}
