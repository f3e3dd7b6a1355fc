//! Player preferences that outlive a session. Today that is only the volume.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use crate::games::lock;

/// Volume percentage, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Volume(u8);

impl Volume {
    pub const MAX: u8 = 100;

    pub fn new(percent: u16) -> Result<Self, SettingsError> {
        if percent > u16::from(Self::MAX) {
            return Err(SettingsError::VolumeOutOfRange(percent));
        }
        Ok(Self(percent as u8))
    }

    pub fn percent(self) -> u8 {
        self.0
    }

    pub fn is_muted(self) -> bool {
        self.0 == 0
    }
}

impl Default for Volume {
    fn default() -> Self {
        Self(50)
    }
}

impl TryFrom<u16> for Volume {
    type Error = SettingsError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Volume> for u16 {
    fn from(value: Volume) -> Self {
        u16::from(value.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub volume: Volume,
}

/// Load/save boundary for [`Settings`].
pub trait SettingsStore: Send + Sync {
    fn load(&self) -> Result<Settings, SettingsError>;
    fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
}

/// Settings kept as a small JSON document on disk, e.g. `{"volume": 50}`.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no settings file, using defaults");
                return Ok(Settings::default());
            }
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let body = serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, body).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), volume = settings.volume.percent(), "settings saved");
        Ok(())
    }
}

/// Settings held in memory only; used by tests and the demo.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    settings: Mutex<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Mutex::new(settings),
        }
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        Ok(*lock(&self.settings))
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        *lock(&self.settings) = *settings;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("volume must be between 0 and 100 (got {0})")]
    VolumeOutOfRange(u16),
    #[error("settings payload rejected: {0}")]
    InvalidPayload(String),
    #[error("unable to access settings at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("settings at {} are not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Body of `PUT /api/v1/settings`. The handler range-checks the volume.
#[derive(Debug, Deserialize)]
struct SettingsUpdate {
    volume: u16,
}

/// `GET`/`PUT /api/v1/settings`.
pub fn settings_router(store: Arc<dyn SettingsStore>) -> Router {
    Router::new()
        .route("/api/v1/settings", get(show_handler).put(update_handler))
        .with_state(store)
}

async fn show_handler(
    State(store): State<Arc<dyn SettingsStore>>,
) -> Result<Json<Settings>, AppError> {
    Ok(Json(store.load()?))
}

async fn update_handler(
    State(store): State<Arc<dyn SettingsStore>>,
    payload: Result<Json<SettingsUpdate>, JsonRejection>,
) -> Result<Json<Settings>, AppError> {
    let Json(update) =
        payload.map_err(|rejection| SettingsError::InvalidPayload(rejection.body_text()))?;
    let settings = Settings {
        volume: Volume::new(update.volume)?,
    };
    store.save(&settings)?;
    Ok(Json(settings))
}
