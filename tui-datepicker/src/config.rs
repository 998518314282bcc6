use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::locale::{LocaleRegistry, LocaleTable};
use crate::size::{SizeProfile, SizeSpec, SizeTable};

/// Extra locale tables and size overrides, usually read from a JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tables merged over the built-in `en` and `hi`
    #[serde(default)]
    pub locales: HashMap<String, LocaleTable>,
    /// Keyed by profile name: compact, medium or cozy
    #[serde(default)]
    pub sizes: HashMap<String, SizeSpec>,
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(PathBuf::from(path), e))?;
        serde_json::from_str(&content)
            .map_err(|e| ConfigError::ParseError(PathBuf::from(path), e))
    }

    pub fn locale_registry(&self) -> LocaleRegistry {
        let mut registry = LocaleRegistry::builtin();
        for (key, table) in &self.locales {
            registry.register(key.clone(), table.clone());
        }
        registry
    }

    pub fn size_table(&self) -> Result<SizeTable, ConfigError> {
        let mut table = SizeTable::default();
        for (name, spec) in &self.sizes {
            let profile: SizeProfile = name.parse()?;
            table.set(profile, *spec);
        }
        Ok(table)
    }
}
