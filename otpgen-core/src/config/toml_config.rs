//! TOML configuration file I/O
//!
//! Handles loading and saving default token parameters to/from TOML files
//! in the user's configuration directory.

use crate::config::OtpgenConfig;
use crate::error::{ConfigError, OtpgenError};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default configuration file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Get the default configuration directory
///
/// Returns ~/.config/otpgen, or the OTPGEN_CONFIG_DIR environment
/// variable if set (used by tests and scripted invocations).
pub fn get_config_dir() -> Result<PathBuf, OtpgenError> {
    if let Ok(config_dir) = std::env::var("OTPGEN_CONFIG_DIR") {
        return Ok(PathBuf::from(config_dir));
    }

    let home = std::env::var("HOME").map_err(|_| {
        OtpgenError::Config(ConfigError::IoError {
            message: "HOME environment variable not set".to_string(),
        })
    })?;

    Ok(PathBuf::from(home).join(".config").join("otpgen"))
}

/// Get the default configuration file path
pub fn get_config_path() -> Result<PathBuf, OtpgenError> {
    let config_dir = get_config_dir()?;
    Ok(config_dir.join(CONFIG_FILE_NAME))
}

/// Load defaults from the standard path
///
/// A missing file is not an error; built-in defaults apply. A present but
/// unreadable or invalid file is.
pub fn load_config_or_default() -> Result<OtpgenConfig, OtpgenError> {
    let config_path = get_config_path()?;
    if !config_path.exists() {
        debug!(
            "no configuration file at {}, using built-in defaults",
            config_path.display()
        );
        return Ok(OtpgenConfig::default());
    }
    load_config_from_path(&config_path)
}

/// Load configuration from a specific TOML file
pub fn load_config_from_path<P: AsRef<Path>>(path: P) -> Result<OtpgenConfig, OtpgenError> {
    let contents = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => OtpgenError::Config(ConfigError::LoadFailed {
            path: path.as_ref().to_string_lossy().to_string(),
        }),
        _ => OtpgenError::Config(ConfigError::IoError {
            message: format!("Failed to read config file: {}", e),
        }),
    })?;

    let config: OtpgenConfig = toml::from_str(&contents).map_err(|e| {
        OtpgenError::Config(ConfigError::IoError {
            message: format!("Failed to parse TOML: {}", e),
        })
    })?;

    // Validate the loaded configuration
    config.validate().map_err(|e| {
        warn!("configuration file rejected: {}", e);
        OtpgenError::Config(ConfigError::ValidationError { message: e })
    })?;

    debug!("loaded configuration from {}", path.as_ref().display());
    Ok(config)
}

/// Save configuration to the default TOML file
pub fn save_config(config: &OtpgenConfig) -> Result<(), OtpgenError> {
    let config_path = get_config_path()?;
    save_config_to_path(config, &config_path)
}

/// Save configuration to a specific TOML file
pub fn save_config_to_path<P: AsRef<Path>>(
    config: &OtpgenConfig,
    path: P,
) -> Result<(), OtpgenError> {
    // Validate configuration before saving
    config
        .validate()
        .map_err(|e| OtpgenError::Config(ConfigError::ValidationError { message: e }))?;

    // Ensure config directory exists
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            OtpgenError::Config(ConfigError::IoError {
                message: format!("Failed to create config directory: {}", e),
            })
        })?;
    }

    let contents = toml::to_string_pretty(config)?;

    std::fs::write(&path, contents).map_err(|e| {
        OtpgenError::Config(ConfigError::IoError {
            message: format!("Failed to write config file: {}", e),
        })
    })?;

    Ok(())
}
