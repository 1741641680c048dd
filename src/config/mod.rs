//! Simulator configuration
//!
//! Constants and route for one guidance simulator. Configs are plain serde
//! structs, loadable from TOML, and always validated before a simulator
//! accepts them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::GuidanceResult;
use crate::route::{default_route, Destination, NavigationStep};

pub mod validation;

pub use validation::ConfigValidation;

/// Default config file name inside the platform config directory
pub const CONFIG_FILE_NAME: &str = "guidance.toml";

/// Simulation constants and the ordered route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    /// Distance to the spot when guidance starts, in meters
    pub initial_distance: u32,
    /// Period of the guidance tick
    pub tick_interval_ms: u64,
    /// Distance covered per tick, in meters
    pub step_size_meters: u32,
    /// Delay spent in calibration before guidance becomes active
    pub calibration_delay_ms: u64,
    /// Ordered route; activation distances strictly decrease
    pub steps: Vec<NavigationStep>,
    /// Reserved spot shown to the user
    pub destination: Option<Destination>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            initial_distance: 88,
            tick_interval_ms: 200,
            step_size_meters: 2,
            calibration_delay_ms: 2000,
            steps: default_route(),
            destination: Some(Destination::default()),
        }
    }
}

impl SimulatorConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn calibration_delay(&self) -> Duration {
        Duration::from_millis(self.calibration_delay_ms)
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> GuidanceResult<Self> {
        let config: SimulatorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> GuidanceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded simulator config from {:?}", path);
        Ok(config)
    }

    /// Load a TOML file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &Path) -> GuidanceResult<Self> {
        if !path.exists() {
            debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Platform config location, e.g. `~/.config/parking-guidance/guidance.toml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("parking-guidance")
            .join(CONFIG_FILE_NAME)
    }
}
