//! Configuration types for Nodex.
//!
//! Follows a builder pattern for complex configuration with validation.
//! Every struct deserializes with defaults so partial files and environment
//! overlays (loaded by the binary through the `config` crate) are accepted.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Storage key under which view snapshots are persisted
pub const VIEWS_NAMESPACE: &str = "nodex-graph-views";

/// Remote language-model provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Anthropic,
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anthropic => "anthropic",
            Self::OpenAi => "openai",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anthropic" => Ok(Self::Anthropic),
            "openai" => Ok(Self::OpenAi),
            other => Err(Error::assistant(format!("Unknown provider: {}", other))),
        }
    }
}

/// Assistant settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub provider: ProviderKind,
    pub api_key: Option<String>,
    /// Overrides the provider's default model
    pub model: Option<String>,
    pub max_tokens: u32,
    /// Framework (assistant mode) id
    pub framework: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Anthropic,
            api_key: None,
            model: None,
            max_tokens: 4096,
            framework: "default".to_string(),
        }
    }
}

impl AssistantConfig {
    /// An API key shorter than 11 characters is treated as unset
    pub fn is_configured(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| k.len() > 10)
    }
}

/// Global Nodex configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodexConfig {
    /// Path to the vault directory
    pub vault_path: Option<PathBuf>,
    /// Configuration profile name
    pub profile: String,
    pub log_level: String,

    /// Entry names skipped during traversal, on top of hidden (`.`) entries
    pub excluded_names: HashSet<String>,
    pub markdown_extension: String,
    pub summary_length: usize,

    /// View snapshot file; relative paths resolve against the vault root
    pub views_file: PathBuf,

    pub assistant: AssistantConfig,
}

impl Default for NodexConfig {
    fn default() -> Self {
        Self {
            vault_path: None,
            profile: "default".to_string(),
            log_level: "INFO".to_string(),
            excluded_names: ["node_modules"].iter().map(|s| s.to_string()).collect(),
            markdown_extension: ".md".to_string(),
            summary_length: 200,
            views_file: PathBuf::from(".nodex/views.json"),
            assistant: AssistantConfig::default(),
        }
    }
}

impl NodexConfig {
    /// Create new configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config with builder
    pub fn builder(vault_path: impl Into<PathBuf>) -> NodexConfigBuilder {
        NodexConfigBuilder::new(vault_path)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.vault_path {
            if !path.exists() {
                return Err(Error::config_error(format!(
                    "Vault path does not exist: {}",
                    path.display()
                )));
            }
            if !path.is_dir() {
                return Err(Error::config_error(format!(
                    "Vault path is not a directory: {}",
                    path.display()
                )));
            }
        }

        if !self.markdown_extension.starts_with('.') || self.markdown_extension.len() < 2 {
            return Err(Error::config_error(format!(
                "Markdown extension must look like '.md', got '{}'",
                self.markdown_extension
            )));
        }

        if self.summary_length == 0 {
            return Err(Error::config_error("Summary length must be positive"));
        }

        if self.assistant.max_tokens == 0 {
            return Err(Error::config_error("Assistant max_tokens must be positive"));
        }

        Ok(())
    }

    /// Vault root, or a config error when none is set
    pub fn vault_root(&self) -> Result<&Path> {
        self.vault_path
            .as_deref()
            .ok_or_else(|| Error::config_error("No vault path configured"))
    }

    /// Absolute location of the view snapshot file
    pub fn views_path(&self) -> Result<PathBuf> {
        if self.views_file.is_absolute() {
            return Ok(self.views_file.clone());
        }
        Ok(self.vault_root()?.join(&self.views_file))
    }

    /// Whether an entry name is skipped during traversal
    pub fn is_excluded(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded_names.contains(name)
    }
}

/// Builder for NodexConfig
pub struct NodexConfigBuilder {
    config: NodexConfig,
}

impl NodexConfigBuilder {
    /// Create a new builder
    pub fn new(vault_path: impl Into<PathBuf>) -> Self {
        Self {
            config: NodexConfig {
                vault_path: Some(vault_path.into()),
                ..NodexConfig::default()
            },
        }
    }

    /// Skip entries with this name during traversal
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.config.excluded_names.insert(name.into());
        self
    }

    pub fn summary_length(mut self, length: usize) -> Self {
        self.config.summary_length = length;
        self
    }

    /// Extension, with its leading dot, that marks a file as a note
    pub fn markdown_extension(mut self, extension: impl Into<String>) -> Self {
        self.config.markdown_extension = extension.into();
        self
    }

    pub fn views_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.views_file = path.into();
        self
    }

    pub fn assistant(mut self, assistant: AssistantConfig) -> Self {
        self.config.assistant = assistant;
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<NodexConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_builder() {
        let temp = TempDir::new().unwrap();
        let config = NodexConfig::builder(temp.path())
            .exclude("Archive")
            .summary_length(80)
            .build()
            .unwrap();

        assert_eq!(config.summary_length, 80);
        assert!(config.is_excluded("Archive"));
        assert!(config.is_excluded(".obsidian"));
        assert!(!config.is_excluded("Projects"));
        assert_eq!(
            config.views_path().unwrap(),
            temp.path().join(".nodex/views.json")
        );
    }

    #[test]
    fn test_missing_vault_path_is_rejected() {
        let result = NodexConfig::builder("/definitely/not/a/vault").build();
        assert!(matches!(result, Err(Error::ConfigError { .. })));
    }

    #[test]
    fn test_bad_extension_is_rejected() {
        let mut config = NodexConfig::new();
        config.markdown_extension = "md".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_parsing() {
        assert_eq!("openai".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAi);
        assert_eq!(" Anthropic ".parse::<ProviderKind>().unwrap(), ProviderKind::Anthropic);
        let err = "gemini".parse::<ProviderKind>().unwrap_err();
        assert!(err.to_string().contains("Unknown provider: gemini"));
    }

    #[test]
    fn test_assistant_configured_threshold() {
        let mut assistant = AssistantConfig::default();
        assert!(!assistant.is_configured());
        assistant.api_key = Some("short".to_string());
        assert!(!assistant.is_configured());
        assistant.api_key = Some("sk-0123456789abcdef".to_string());
        assert!(assistant.is_configured());
    }

    #[test]
    fn test_partial_config_deserializes_with_defaults() {
        let config: NodexConfig =
            serde_json::from_str(r#"{"summary_length": 120, "assistant": {"provider": "openai"}}"#)
                .unwrap();
        assert_eq!(config.summary_length, 120);
        assert_eq!(config.markdown_extension, ".md");
        assert_eq!(config.assistant.provider, ProviderKind::OpenAi);
        assert_eq!(config.assistant.max_tokens, 4096);
    }
}
