//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use inkleaf::{
    InkleafError,
    config::{AppConfig, CanvasConfig},
};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<ConfigError> for InkleafError {
    fn from(err: ConfigError) -> Self {
        InkleafError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (inkleaf/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed or fails validation
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, InkleafError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path:% = path.display(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("inkleaf/config.toml");
    if local_config.exists() {
        info!(path:% = local_config.display(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "inkleaf", "inkleaf") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path:% = system_config.display(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path:% = system_config.display(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Replaces the configured surface size with any size given on the
/// command line.
///
/// # Errors
///
/// Returns a validation error if the resulting size is not positive.
pub fn with_surface_size(
    config: AppConfig,
    width: Option<f32>,
    height: Option<f32>,
) -> Result<AppConfig, InkleafError> {
    if width.is_none() && height.is_none() {
        return Ok(config);
    }

    let current = config.canvas();
    let canvas = CanvasConfig::new(
        width.unwrap_or(current.width()),
        height.unwrap_or(current.height()),
    )
    .with_discard_degenerate_shapes(current.discard_degenerate_shapes());
    let config = AppConfig::new(canvas, config.tools().clone(), config.style().clone());
    validate(&config)?;
    Ok(config)
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
/// - The surface size is not positive or the background color is invalid
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, InkleafError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let canvas = config.canvas();
    if !(canvas.width() > 0.0 && canvas.height() > 0.0) {
        return Err(ConfigError::Validation(format!(
            "canvas size must be positive, got {}x{}",
            canvas.width(),
            canvas.height()
        )));
    }
    config
        .style()
        .background_color()
        .map_err(ConfigError::Validation)?;
    Ok(())
}
