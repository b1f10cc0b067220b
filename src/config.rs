//! Configuration file handling.
//!
//! Settings come from an optional JSON file and are then overridden by
//! command-line arguments:
//!
//! ```json
//! {
//!   "canvas": { "width": 1600, "height": 1200 },
//!   "palette": { "introvert": "#ff9999", "extrovert": "#66b3ff" }
//! }
//! ```

use crate::charts::Palette;
use crate::cli::Args;
use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
    #[error("Canvas size must be positive, got {0}x{1}")]
    InvalidCanvas(u32, u32),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub canvas: CanvasConfig,

    #[serde(default)]
    pub palette: PaletteConfig,
}

/// Dashboard canvas size in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_width() -> u32 {
    1600
}

fn default_height() -> u32 {
    1200
}

/// Personality colors as `#rrggbb` strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    #[serde(default = "default_introvert")]
    pub introvert: String,

    #[serde(default = "default_extrovert")]
    pub extrovert: String,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            introvert: default_introvert(),
            extrovert: default_extrovert(),
        }
    }
}

fn default_introvert() -> String {
    "#ff9999".to_string()
}

fn default_extrovert() -> String {
    "#66b3ff".to_string()
}

/// Parse a `#rrggbb` (or `rrggbb`) hex color.
pub fn parse_hex_color(value: &str) -> Result<RGBColor, ConfigError> {
    let hex = value.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidColor(value.to_string()));
    }

    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map_err(|_| ConfigError::InvalidColor(value.to_string()))
    };
    Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Build the effective configuration: file (if any), then CLI overrides.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.merge_with_args(args);
        config.validate()?;
        Ok(config)
    }

    /// Merge command-line arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &Args) {
        if let Some(width) = args.width {
            self.canvas.width = width;
        }
        if let Some(height) = args.height {
            self.canvas.height = height;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(ConfigError::InvalidCanvas(
                self.canvas.width,
                self.canvas.height,
            ));
        }
        self.palette()?;
        Ok(())
    }

    pub fn palette(&self) -> Result<Palette, ConfigError> {
        Ok(Palette {
            introvert: parse_hex_color(&self.palette.introvert)?,
            extrovert: parse_hex_color(&self.palette.extrovert)?,
        })
    }
}
