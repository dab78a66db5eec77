use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{BridgeError, Result};

use super::dto::InstalledLocale;

/// Read-only lookup into the host's record of installed translations.
pub trait InstalledLocales {
    fn get(&self, subject_id: &str, language: &str) -> Option<InstalledLocale>;
}

#[derive(Debug, Default)]
pub struct InMemoryInstalledLocales {
    records: HashMap<(String, String), InstalledLocale>,
}

impl InMemoryInstalledLocales {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, record: InstalledLocale) {
        let key = (record.subject_id.clone(), record.language.clone());
        self.records.insert(key, record);
    }

    /// Loads records from a TOML manifest:
    ///
    /// ```toml
    /// [[installed]]
    /// subject_id = "storefront_gateway"
    /// language = "de_DE"
    /// revision = "2024-03-01 10:00+0000"
    /// ```
    pub fn from_manifest(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BridgeError::config_error(format!("Failed to read installed manifest: {}", e))
        })?;

        let manifest: InstalledManifest = toml::from_str(&content).map_err(|e| {
            BridgeError::config_error(format!("Failed to parse installed manifest: {}", e))
        })?;

        let mut store = Self::new();
        for record in manifest.installed {
            store.insert(record);
        }
        Ok(store)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl InstalledLocales for InMemoryInstalledLocales {
    fn get(&self, subject_id: &str, language: &str) -> Option<InstalledLocale> {
        self.records
            .get(&(subject_id.to_string(), language.to_string()))
            .cloned()
    }
}

#[derive(Debug, Deserialize)]
struct InstalledManifest {
    #[serde(default)]
    installed: Vec<InstalledLocale>,
}
