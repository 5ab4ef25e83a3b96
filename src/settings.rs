//! Runtime settings
//!
//! Loaded from a JSON file; every field is optional and falls back to its
//! default. Gameplay constants live in `consts` and are not configurable.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::sim::Playfield;

/// Smallest playfield side that keeps the spawn lane and the player clamp
/// ranges non-empty
pub const MIN_PLAYFIELD_SIDE: f32 = 220.0;

/// Why settings could not be loaded
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "failed to read settings: {}", e),
            SettingsError::Parse(e) => write!(f, "malformed settings JSON: {}", e),
            SettingsError::Invalid(msg) => write!(f, "invalid settings: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(e) => Some(e),
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Tuning for the built-in autopilot used by headless runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotSettings {
    /// Seconds for one full left-right sweep
    pub sweep_period: f32,
    /// Hold focus when an enemy bullet is this close (pixels)
    pub focus_radius: f32,
    /// Frames to wait on Title/GameOver before pressing confirm
    pub confirm_delay_frames: u32,
}

impl Default for AutopilotSettings {
    fn default() -> Self {
        Self {
            sweep_period: 4.0,
            focus_radius: 60.0,
            confirm_delay_frames: 30,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playfield: Playfield,
    /// Run seed; `None` picks one at startup
    pub seed: Option<u64>,
    /// Frame rate the headless runner simulates
    pub target_fps: u32,
    /// Longest frame the session will simulate in one step (seconds)
    pub max_frame_dt: f32,
    pub autopilot: AutopilotSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playfield: Playfield::default(),
            seed: None,
            target_fps: 60,
            max_frame_dt: 0.1,
            autopilot: AutopilotSettings::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let Playfield { width, height } = self.playfield;
        if !(width >= MIN_PLAYFIELD_SIDE && height >= MIN_PLAYFIELD_SIDE) {
            return Err(SettingsError::Invalid(format!(
                "playfield {}x{} is smaller than {}x{}",
                width, height, MIN_PLAYFIELD_SIDE, MIN_PLAYFIELD_SIDE
            )));
        }
        if self.target_fps == 0 {
            return Err(SettingsError::Invalid("target_fps must be positive".into()));
        }
        if !(self.max_frame_dt > 0.0) {
            return Err(SettingsError::Invalid(
                "max_frame_dt must be positive".into(),
            ));
        }
        if !(self.autopilot.sweep_period > 0.0) {
            return Err(SettingsError::Invalid(
                "autopilot.sweep_period must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Fixed frame length for the configured frame rate
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.target_fps as f32
    }
}
