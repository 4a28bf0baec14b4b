//! Remembered selections between runs.
//!
//! A small JSON key-value file, by default
//! `<config dir>/askyourstack/preferences.json`.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

pub const CHECKED_DOCS_KEY: &str = "checkedDocs";
pub const PERSONALITY_KEY: &str = "personality";

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to write preferences: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode preferences: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
    values: Map<String, Value>,
}

impl Preferences {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("askyourstack").join("preferences.json"))
    }

    /// Load from `path`. A missing or corrupt file yields empty preferences.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<Map<String, Value>>(&raw) {
                Ok(values) => values,
                Err(e) => {
                    tracing::warn!("Ignoring corrupt preferences at {}: {}", path.display(), e);
                    Map::new()
                }
            },
            Err(_) => Map::new(),
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn checked_docs(&self) -> Vec<String> {
        self.values
            .get(CHECKED_DOCS_KEY)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default()
    }

    pub fn set_checked_docs(&mut self, docs: &[String]) {
        self.values
            .insert(CHECKED_DOCS_KEY.to_string(), Value::from(docs.to_vec()));
    }

    pub fn personality(&self) -> Option<String> {
        self.values
            .get(PERSONALITY_KEY)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    pub fn set_personality(&mut self, personality: &str) {
        self.values
            .insert(PERSONALITY_KEY.to_string(), Value::from(personality));
    }

    pub fn save(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&self.values)?)?;
        Ok(())
    }
}
