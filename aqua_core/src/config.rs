//! Configuration file support for AquaTrack.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/aquatrack/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub voice: VoiceConfig,

    #[serde(default)]
    pub chart: ChartConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_file_name")]
    pub file_name: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
        }
    }
}

/// Spoken announcements
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoiceConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Speech program invoked once per announcement
    #[serde(default = "default_program")]
    pub program: String,

    /// Words per minute
    #[serde(default = "default_rate")]
    pub rate: u32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            program: default_program(),
            rate: default_rate(),
        }
    }
}

/// Chart animation parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_frames")]
    pub frames: u32,

    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,

    /// Per-frame growth of every bar, in percent
    #[serde(default = "default_growth_percent")]
    pub growth_percent: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            frames: default_frames(),
            frame_interval_ms: default_frame_interval_ms(),
            growth_percent: default_growth_percent(),
        }
    }
}

/// Upper bound for `chart.frames`
pub const MAX_FRAMES: u32 = 10_000;

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        std::env::var_os("HOME")
            .map(|home| PathBuf::from(home).join(".local/share"))
            .unwrap_or_else(|| PathBuf::from("."))
    });
    base.join("aquatrack")
}

fn default_file_name() -> String {
    "water_usage_data.csv".into()
}

fn default_true() -> bool {
    true
}

fn default_program() -> String {
    "espeak-ng".into()
}

fn default_rate() -> u32 {
    150
}

fn default_frames() -> u32 {
    50
}

fn default_frame_interval_ms() -> u64 {
    300
}

fn default_growth_percent() -> f64 {
    1.0
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|| PathBuf::from("."))
        });
        base.join("aquatrack").join("config.toml")
    }

    /// Full path of the persisted usage table
    pub fn data_file(&self) -> PathBuf {
        self.data.data_dir.join(&self.data.file_name)
    }

    fn validate(&self) -> Result<()> {
        if self.data.file_name.trim().is_empty() {
            return Err(Error::Config("data.file_name must not be empty".into()));
        }
        if self.chart.frames > MAX_FRAMES {
            return Err(Error::Config(format!(
                "chart.frames must be at most {}",
                MAX_FRAMES
            )));
        }
        if self.chart.growth_percent < 0.0 {
            return Err(Error::Config(
                "chart.growth_percent must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
