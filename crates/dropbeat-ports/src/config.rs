use crate::types::*;
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyPresets {
    pub easy: Difficulty,
    pub medium: Difficulty,
    pub hard: Difficulty,
}

impl DifficultyPresets {
    pub fn get(&self, name: DifficultyName) -> Difficulty {
        match name {
            DifficultyName::Easy => self.easy,
            DifficultyName::Medium => self.medium,
            DifficultyName::Hard => self.hard,
        }
    }
}

impl Default for DifficultyPresets {
    fn default() -> Self {
        Self {
            easy: Difficulty::EASY,
            medium: Difficulty::MEDIUM,
            hard: Difficulty::HARD,
        }
    }
}

/// Missing fields take their value from `GameConfig::default()`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub spawn_interval_ms: u64,
    pub frame_interval_ms: u64,
    pub sweep_threshold: f32,
    pub hit_window_low: f32,
    pub hit_window_high: f32,
    pub hit_fill: f32,
    pub miss_drain: f32,
    pub celebration_interval_ms: u64,
    /// Lets `pause` open the menu while no game is running.
    pub allow_idle_pause: bool,
    pub default_difficulty: DifficultyName,
    pub seed: Option<u64>,
    pub presets: DifficultyPresets,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            spawn_interval_ms: 1000,
            frame_interval_ms: 16,
            sweep_threshold: 300.0,
            hit_window_low: 240.0,
            hit_window_high: 280.0,
            hit_fill: 5.0,
            miss_drain: 5.0,
            celebration_interval_ms: 300,
            allow_idle_pause: false,
            default_difficulty: DifficultyName::Easy,
            seed: None,
            presets: DifficultyPresets::default(),
        }
    }
}

impl GameConfig {
    pub fn difficulty(&self, name: DifficultyName) -> Difficulty {
        self.presets.get(name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spawn_interval_ms == 0 {
            return Err(ConfigError::Invalid("spawn_interval_ms must be > 0".to_string()));
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid("frame_interval_ms must be > 0".to_string()));
        }
        if self.celebration_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "celebration_interval_ms must be > 0".to_string(),
            ));
        }
        if !(self.hit_window_low <= self.hit_window_high) {
            return Err(ConfigError::Invalid(format!(
                "hit window [{}, {}] is inverted",
                self.hit_window_low, self.hit_window_high
            )));
        }
        if !(self.sweep_threshold > 0.0) {
            return Err(ConfigError::Invalid("sweep_threshold must be > 0".to_string()));
        }
        if !(self.hit_fill >= 0.0) || !(self.miss_drain >= 0.0) {
            return Err(ConfigError::Invalid(
                "hit_fill and miss_drain must be non-negative".to_string(),
            ));
        }
        for name in DifficultyName::ALL {
            let preset = self.presets.get(name);
            if !preset.is_valid() {
                return Err(ConfigError::Invalid(format!(
                    "preset {name}: spawn_count must be >= 1 and fall_speed > 0"
                )));
            }
        }
        Ok(())
    }
}

pub trait ConfigPort: Send + Sync {
    fn load_config(&self) -> Result<GameConfig, ConfigError>;
}
