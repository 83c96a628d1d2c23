//! Layered configuration loading.
//!
//! Sources, lowest precedence first:
//! 1. Profile preset (or defaults)
//! 2. Configuration file (`--config`, else `./nodex.yaml` / `./nodex.toml` if present)
//! 3. `NODEX__*` environment variables, `__` separating nested keys
//!    (`NODEX__ASSISTANT__API_KEY`)
//! 4. Command-line overrides

use config::{Config, ConfigError, Environment, File};
use nodex_core::{ConfigProfile, Error, NodexConfig, Result};
use std::path::Path;

/// Default configuration file stem, looked up in the working directory
pub const CONFIG_FILE_STEM: &str = "nodex";

/// Environment variable prefix
pub const ENV_PREFIX: &str = "NODEX";

fn config_error(e: ConfigError) -> Error {
    Error::config_error(e.to_string())
}

/// Load and validate configuration
pub fn load_config(
    file: Option<&Path>,
    vault: Option<&Path>,
    profile: Option<ConfigProfile>,
) -> Result<NodexConfig> {
    let base = profile.map(ConfigProfile::create_config).unwrap_or_default();

    let mut builder = Config::builder().add_source(Config::try_from(&base).map_err(config_error)?);

    builder = match file {
        Some(path) => {
            if !path.exists() {
                return Err(Error::file_not_found(path));
            }
            log::debug!("Loading configuration from {}", path.display());
            builder.add_source(File::from(path).required(true))
        }
        None => builder.add_source(File::with_name(CONFIG_FILE_STEM).required(false)),
    };

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("excluded_names"),
    );

    if let Some(path) = vault {
        builder = builder
            .set_override("vault_path", path.to_string_lossy().into_owned())
            .map_err(config_error)?;
    }
    if let Some(profile) = profile {
        builder = builder
            .set_override("profile", profile.name())
            .map_err(config_error)?;
    }

    let config: NodexConfig = builder
        .build()
        .map_err(config_error)?
        .try_deserialize()
        .map_err(config_error)?;

    config.validate()?;
    Ok(config)
}

/// `log` level from the configured `log_level`, defaulting to `Info`
pub fn level_filter(config: &NodexConfig) -> log::LevelFilter {
    config.log_level.parse().unwrap_or(log::LevelFilter::Info)
}
