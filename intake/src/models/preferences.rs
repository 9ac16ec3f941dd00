// Per-user preferences (selected UI language)
// Stored as a flat JSON object so other keys written by later versions survive a save.

use crate::i18n::Language;
use anyhow::Result;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

pub const LANGUAGE_KEY: &str = "intake.language";

#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Map<String, Value> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(s) => s,
            Err(_) => return Map::new(),
        };
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            _ => {
                warn!(
                    "[PHASE: preferences] [STEP: load] Ignoring unreadable preferences file {:?}",
                    self.path
                );
                Map::new()
            }
        }
    }

    /// Last selected language, if one was stored and is still supported.
    pub fn load_language(&self) -> Option<Language> {
        let map = self.read_map();
        let lang = map
            .get(LANGUAGE_KEY)
            .and_then(Value::as_str)
            .and_then(Language::parse);
        debug!(
            "[PHASE: preferences] [STEP: load] Stored language: {:?}",
            lang.map(Language::code)
        );
        lang
    }

    pub fn save_language(&self, lang: Language) -> Result<()> {
        let mut map = self.read_map();
        map.insert(LANGUAGE_KEY.to_string(), Value::from(lang.code()));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let body = serde_json::to_string_pretty(&Value::Object(map))?;
        std::fs::write(&self.path, body)?;
        debug!(
            "[PHASE: preferences] [STEP: save] Stored language {}",
            lang.code()
        );
        Ok(())
    }
}
