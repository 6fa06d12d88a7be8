//! Viewer configuration
//!
//! Settings are compiled-in defaults, optionally overridden by environment
//! variables at startup. Nothing is read from or written to disk.

use crate::input::DEFAULT_SCROLL_COOLDOWN;
use crate::view::is_valid_zoom_factor;
use log::LevelFilter;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Cooldown between accepted scroll events, in milliseconds
pub const ENV_SCROLL_COOLDOWN_MS: &str = "LUNA_PDF_SCROLL_COOLDOWN_MS";
/// Multiplier applied by "Zoom In"
pub const ENV_ZOOM_STEP_IN: &str = "LUNA_PDF_ZOOM_STEP_IN";
/// Multiplier applied by "Zoom Out"
pub const ENV_ZOOM_STEP_OUT: &str = "LUNA_PDF_ZOOM_STEP_OUT";
/// Log level (`off`, `error`, `warn`, `info`, `debug`, `trace`)
pub const ENV_LOG: &str = "LUNA_PDF_LOG";

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {var}")]
    InvalidValue { var: String, value: String },
}

/// Settings for one run of the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Window title prefix
    pub app_name: String,
    /// Initial inner window size in points
    pub window_size: [f32; 2],
    /// Minimum inner window size in points
    pub min_window_size: [f32; 2],
    pub zoom_in_factor: f32,
    pub zoom_out_factor: f32,
    pub scroll_cooldown: Duration,
    pub log_level: LevelFilter,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            app_name: "Luna PDF".to_string(),
            window_size: [1000.0, 800.0],
            min_window_size: [800.0, 600.0],
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
            scroll_cooldown: DEFAULT_SCROLL_COOLDOWN,
            log_level: LevelFilter::Info,
        }
    }
}

impl ViewerConfig {
    /// Loads configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LUNA_PDF_SCROLL_COOLDOWN_MS`: scroll cooldown in ms (default: 100)
    /// - `LUNA_PDF_ZOOM_STEP_IN`: zoom-in multiplier (default: 1.2)
    /// - `LUNA_PDF_ZOOM_STEP_OUT`: zoom-out multiplier (default: 0.8)
    /// - `LUNA_PDF_LOG`: log level (default: info)
    ///
    /// # Errors
    /// Returns an error if any variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(ms) = parse_var::<u64>(ENV_SCROLL_COOLDOWN_MS)? {
            config.scroll_cooldown = Duration::from_millis(ms);
        }

        if let Some(factor) = parse_zoom_var(ENV_ZOOM_STEP_IN)? {
            config.zoom_in_factor = factor;
        }

        if let Some(factor) = parse_zoom_var(ENV_ZOOM_STEP_OUT)? {
            config.zoom_out_factor = factor;
        }

        if let Some(level) = parse_var::<LevelFilter>(ENV_LOG)? {
            config.log_level = level;
        }

        Ok(config)
    }
}

fn invalid(var: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        var: var.to_string(),
        value: value.to_string(),
    }
}

fn parse_var<T: FromStr>(var: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| invalid(var, &value)),
        Err(_) => Ok(None),
    }
}

fn parse_zoom_var(var: &str) -> Result<Option<f32>, ConfigError> {
    match parse_var::<f32>(var)? {
        Some(factor) if !is_valid_zoom_factor(factor) => Err(invalid(var, &factor.to_string())),
        other => Ok(other),
    }
}
