use crate::game_logic::errors::{TrailError, TrailResult};
use crate::resources::WalkerConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub mod range_types;

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().and_then(|mut path| {
        path.push("trailwalker");
        fs::create_dir_all(&path).ok()?;
        path.push("config.toml");
        Some(path)
    })
}

/// Load the user config, falling back to defaults when it is missing or unreadable
pub fn load_config() -> WalkerConfig {
    let Some(config_path) = get_config_path() else {
        return WalkerConfig::default();
    };

    match load_config_from(&config_path) {
        Ok(config) => config,
        Err(TrailError::ConfigFileNotFound { .. }) => WalkerConfig::default(),
        Err(e) => {
            warn!("Ignoring config at {}: {e}", config_path.display());
            WalkerConfig::default()
        }
    }
}

pub fn load_config_from(path: &Path) -> TrailResult<WalkerConfig> {
    if !path.exists() {
        return Err(TrailError::ConfigFileNotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path)?;
    let mut config = toml::from_str::<WalkerConfig>(&contents)?;
    config.settings = config.settings.clamped();
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

pub fn save_config(config: &WalkerConfig) -> TrailResult<()> {
    let config_path = get_config_path().ok_or(TrailError::ConfigDirNotFound)?;
    save_config_to(config, &config_path)
}

pub fn save_config_to(config: &WalkerConfig, path: &Path) -> TrailResult<()> {
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}
