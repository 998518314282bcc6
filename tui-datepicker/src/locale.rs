use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_LOCALE: &str = "en";

/// UI labels shown around the picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Labels {
    pub today: String,
    pub selected: String,
    pub year: String,
    pub month: String,
}

/// Translated strings for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleTable {
    pub month_names: [String; 12],
    /// Abbreviations used by the month selector and day-cell overlays
    pub month_short: [String; 12],
    pub weekday_short: [String; 7],
    pub weekday_full: [String; 7],
    pub labels: Labels,
}

impl LocaleTable {
    /// Full month name for a 0-based month index.
    pub fn month_name(&self, month: u32) -> &str {
        &self.month_names[(month % 12) as usize]
    }

    pub fn month_short_name(&self, month: u32) -> &str {
        &self.month_short[(month % 12) as usize]
    }

    /// Weekday name, 0 = Sunday.
    pub fn weekday_name(&self, weekday: u32, full: bool) -> &str {
        let idx = (weekday % 7) as usize;
        if full {
            &self.weekday_full[idx]
        } else {
            &self.weekday_short[idx]
        }
    }

    pub fn english() -> Self {
        Self {
            month_names: strings([
                "January", "February", "March", "April", "May", "June", "July",
                "August", "September", "October", "November", "December",
            ]),
            month_short: strings([
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct",
                "Nov", "Dec",
            ]),
            weekday_short: strings(["S", "M", "T", "W", "T", "F", "S"]),
            weekday_full: strings([
                "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday",
                "Saturday",
            ]),
            labels: Labels {
                today: "Today".to_string(),
                selected: "Selected".to_string(),
                year: "Year".to_string(),
                month: "Month".to_string(),
            },
        }
    }

    pub fn hindi() -> Self {
        Self {
            month_names: strings([
                "जनवरी", "फ़रवरी", "मार्च", "अप्रैल", "मई", "जून", "जुलाई", "अगस्त",
                "सितंबर", "अक्टूबर", "नवंबर", "दिसंबर",
            ]),
            month_short: strings([
                "जन", "फ़र", "मार्च", "अप्रै", "मई", "जून", "जुला", "अग", "सितं", "अक्टू",
                "नवं", "दिसं",
            ]),
            weekday_short: strings(["र", "सो", "मं", "बु", "गु", "शु", "श"]),
            weekday_full: strings([
                "रविवार", "सोमवार", "मंगलवार", "बुधवार", "गुरुवार", "शुक्रवार", "शनिवार",
            ]),
            labels: Labels {
                today: "आज".to_string(),
                selected: "चयनित".to_string(),
                year: "वर्ष".to_string(),
                month: "महीना".to_string(),
            },
        }
    }
}

fn strings<const N: usize>(items: [&str; N]) -> [String; N] {
    items.map(str::to_string)
}

/// Locale tables keyed by locale identifier.
///
/// Lookups for keys that were never registered fail; no table is synthesized
/// from a neighbouring language.
#[derive(Debug, Clone)]
pub struct LocaleRegistry {
    tables: HashMap<String, LocaleTable>,
}

impl LocaleRegistry {
    /// An empty registry. Most callers want [`LocaleRegistry::builtin`].
    pub fn empty() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    /// Registry holding the built-in `en` and `hi` tables.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("en", LocaleTable::english());
        registry.register("hi", LocaleTable::hindi());
        registry
    }

    /// Adds or replaces the table for `key`.
    pub fn register(&mut self, key: impl Into<String>, table: LocaleTable) {
        self.tables.insert(key.into(), table);
    }

    pub fn get(&self, key: &str) -> Result<&LocaleTable, ConfigError> {
        self.tables
            .get(key)
            .ok_or_else(|| ConfigError::UnknownLocale(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.tables.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for LocaleRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}
