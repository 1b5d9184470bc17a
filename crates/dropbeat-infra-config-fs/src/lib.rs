use dropbeat_ports::config::{ConfigError, ConfigPort, GameConfig};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only JSON config. A missing file means defaults; nothing is written back.
pub struct FsConfig {
    path: PathBuf,
}

impl FsConfig {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs_next::config_dir()
            .ok_or_else(|| ConfigError::Io("config dir not found".to_string()))?;
        Ok(base.join("Dropbeat").join("config.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_json(path: &Path) -> Result<GameConfig, ConfigError> {
        let data = fs::read(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        serde_json::from_slice(&data).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl Default for FsConfig {
    fn default() -> Self {
        let path = Self::default_path().unwrap_or_else(|err| {
            warn!("{err}, falling back to ./config.json");
            PathBuf::from("config.json")
        });
        Self { path }
    }
}

impl ConfigPort for FsConfig {
    fn load_config(&self) -> Result<GameConfig, ConfigError> {
        if !self.path.exists() {
            debug!("no config at {}, using defaults", self.path.display());
            return Ok(GameConfig::default());
        }
        let config = Self::read_json(&self.path)?;
        config.validate()?;
        Ok(config)
    }
}
