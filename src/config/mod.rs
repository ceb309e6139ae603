use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::audio::{AudioConfig, DEFAULT_VOLUME};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub(crate) enum ConfigPathError {
    #[error("neither XDG_CONFIG_HOME nor HOME is set")]
    MissingHomeDirectory,
}

const APP_DIR: &str = "desk-showcase";
const APP_CONFIG_FILE: &str = "config.json";
const DEFAULT_DESKS_FILE: &str = "desks.json";
const DEFAULT_ASSET_ROOT: &str = ".";
const DEFAULT_SOUND_DIR: &str = "assets/sounds";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct AppConfig {
    #[serde(default)]
    pub(crate) desks_path: Option<PathBuf>,
    #[serde(default)]
    pub(crate) asset_root: Option<PathBuf>,
    #[serde(default)]
    pub(crate) sounds: BTreeMap<String, String>,
    #[serde(default)]
    pub(crate) default_volume: Option<f32>,
    #[serde(default)]
    pub(crate) muted: bool,
    #[serde(default)]
    pub(crate) effects_enabled: Option<bool>,
}

impl AppConfig {
    pub(crate) fn desks_path(&self) -> PathBuf {
        self.desks_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DESKS_FILE))
    }

    pub(crate) fn asset_root(&self) -> PathBuf {
        self.asset_root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_ROOT))
    }

    pub(crate) fn effects_enabled(&self) -> bool {
        self.effects_enabled.unwrap_or(true)
    }

    /// Configured sounds, or every default cue when the file names none.
    pub(crate) fn audio(&self) -> AudioConfig {
        let mut audio = if self.sounds.is_empty() {
            AudioConfig::with_default_sounds(DEFAULT_SOUND_DIR)
        } else {
            AudioConfig {
                sounds: self.sounds.clone(),
                default_volume: DEFAULT_VOLUME,
            }
        };
        if let Some(volume) = self.default_volume {
            audio.default_volume = volume;
        }
        audio
    }
}

pub(crate) fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(path) => path,
        Err(err) => {
            tracing::warn!(%err, "no config directory; using defaults");
            return AppConfig::default();
        }
    };
    if !path.exists() {
        return AppConfig::default();
    }
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    }
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}
