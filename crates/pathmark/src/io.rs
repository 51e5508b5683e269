//! JSON configuration helpers.

use crate::scene::{Scene, SceneError};
use pathmark_core::FrameMapping;
use pathmark_robot::RobotParams;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Tracker configuration: frame mapping plus per-robot parameters.
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub frame: FrameMapping,
    #[serde(default)]
    pub robot: RobotParams,
}

impl SceneConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Build an empty scene from this config.
    pub fn build_scene(&self) -> Result<Scene, SceneError> {
        Scene::new(self.frame, self.robot)
    }
}
