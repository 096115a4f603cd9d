use log::{info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{NavError, Result};
use crate::grid::Grid;
use crate::heading::Heading;
use crate::vehicle::Vehicle;

/// File read by `Config::load`
pub const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub vehicle: VehicleConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct GridConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    /// Obstacle coordinates as `[x, y]` pairs
    #[serde(default)]
    pub obstacles: Vec<(i32, i32)>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct VehicleConfig {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
    #[serde(default = "default_heading")]
    pub heading: Heading,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// Default `env_logger` filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_width() -> i32 { 5 }
fn default_height() -> i32 { 5 }
fn default_heading() -> Heading { Heading::North }
fn default_log_level() -> String { "info".to_string() }

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            obstacles: Vec::new(),
        }
    }
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            heading: default_heading(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            vehicle: VehicleConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Parse a TOML document, failing on malformed input
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from `config.toml`, or use defaults if file doesn't exist
    pub fn load() -> Self {
        Self::load_from(CONFIG_PATH)
    }

    /// Read and parse a config file without falling back
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load configuration from a file, falling back to defaults when it is missing or invalid
    pub fn load_from<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        Self::or_default(Self::read_from(path), path)
    }

    /// Resolve the result of `read_from`, logging why defaults are used when it failed.
    ///
    /// Split from `load_from` so a binary can pick its log level from the file before
    /// these messages are emitted.
    pub fn or_default(loaded: Result<Self>, path: &Path) -> Self {
        match loaded {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(NavError::Io(_)) => {
                info!("No {} found, using default configuration", path.display());
                Config::default()
            }
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                warn!("Using default configuration");
                Config::default()
            }
        }
    }

    /// Grid described by the `[grid]` section
    pub fn build_grid(&self) -> Grid {
        Grid::with_obstacles(self.grid.width, self.grid.height, &self.grid.obstacles)
    }

    /// Vehicle described by the `[vehicle]` section
    pub fn build_vehicle(&self) -> Vehicle {
        Vehicle::new(self.vehicle.x, self.vehicle.y, self.vehicle.heading)
    }
}
