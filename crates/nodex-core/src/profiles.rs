//! Pre-configured profiles for different deployment scenarios
//!
//! - Development: Verbose logging, short summaries for quick inspection
//! - Production: Info logging, default settings
//! - Minimal: Errors only

use crate::config::NodexConfig;
use crate::error::{Error, Result};
use std::str::FromStr;

/// Profile selector for pre-configured runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigProfile {
    /// Development: debug logging
    Development,
    /// Production: info logging
    Production,
    /// Minimal: error logging only
    Minimal,
}

impl ConfigProfile {
    /// Create a NodexConfig from this profile
    pub fn create_config(self) -> NodexConfig {
        let mut config = NodexConfig::new();
        config.profile = self.name().to_string();

        match self {
            Self::Development => {
                config.log_level = "DEBUG".to_string();
            }
            Self::Production => {
                config.log_level = "INFO".to_string();
            }
            Self::Minimal => {
                config.log_level = "ERROR".to_string();
                config.summary_length = 120;
            }
        }

        config
    }

    /// `log` level filter matching this profile
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Self::Development => log::LevelFilter::Debug,
            Self::Production => log::LevelFilter::Info,
            Self::Minimal => log::LevelFilter::Error,
        }
    }

    /// Get profile name
    pub fn name(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Minimal => "minimal",
        }
    }

    /// Get profile description
    pub fn description(self) -> &'static str {
        match self {
            Self::Development => "Verbose logging",
            Self::Production => "Informational logging with default settings",
            Self::Minimal => "Errors only, shorter summaries",
        }
    }
}

impl std::fmt::Display for ConfigProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ConfigProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "minimal" => Ok(Self::Minimal),
            other => Err(Error::config_error(format!("Unknown profile: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_profile() {
        let config = ConfigProfile::Development.create_config();
        assert_eq!(config.log_level, "DEBUG");
        assert_eq!(config.profile, "development");
    }

    #[test]
    fn test_production_profile() {
        let config = ConfigProfile::Production.create_config();
        assert_eq!(config.log_level, "INFO");
        assert_eq!(config.summary_length, 200);
    }

    #[test]
    fn test_minimal_profile() {
        let config = ConfigProfile::Minimal.create_config();
        assert_eq!(config.log_level, "ERROR");
        assert_eq!(ConfigProfile::Minimal.level_filter(), log::LevelFilter::Error);
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("dev".parse::<ConfigProfile>().unwrap(), ConfigProfile::Development);
        assert_eq!(
            "production".parse::<ConfigProfile>().unwrap(),
            ConfigProfile::Production
        );
        assert!("staging".parse::<ConfigProfile>().is_err());
    }

    #[test]
    fn test_profile_descriptions() {
        assert!(!ConfigProfile::Development.description().is_empty());
        assert!(!ConfigProfile::Production.description().is_empty());
    }
}
