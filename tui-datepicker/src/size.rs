use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Display density. Only affects formatting, never selection or navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeProfile {
    Compact,
    #[default]
    Medium,
    Cozy,
}

impl SizeProfile {
    pub const ALL: [SizeProfile; 3] = [SizeProfile::Compact, SizeProfile::Medium, SizeProfile::Cozy];

    pub fn as_str(self) -> &'static str {
        match self {
            SizeProfile::Compact => "compact",
            SizeProfile::Medium => "medium",
            SizeProfile::Cozy => "cozy",
        }
    }

    /// The next profile, wrapping from cozy back to compact.
    pub fn next(self) -> Self {
        match self {
            SizeProfile::Compact => SizeProfile::Medium,
            SizeProfile::Medium => SizeProfile::Cozy,
            SizeProfile::Cozy => SizeProfile::Compact,
        }
    }

    pub fn default_spec(self) -> SizeSpec {
        match self {
            SizeProfile::Compact => SizeSpec {
                show_month_overlay: false,
                full_weekday_names: false,
                cell_width: 4,
                cell_height: 1,
            },
            SizeProfile::Medium => SizeSpec {
                show_month_overlay: true,
                full_weekday_names: false,
                cell_width: 6,
                cell_height: 2,
            },
            SizeProfile::Cozy => SizeSpec {
                show_month_overlay: true,
                full_weekday_names: true,
                cell_width: 11,
                cell_height: 4,
            },
        }
    }
}

impl fmt::Display for SizeProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizeProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(SizeProfile::Compact),
            "medium" => Ok(SizeProfile::Medium),
            "cozy" => Ok(SizeProfile::Cozy),
            _ => Err(ConfigError::UnknownSize(s.to_string())),
        }
    }
}

/// What a size profile turns on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeSpec {
    /// Compute the month abbreviation overlay for qualifying day cells
    pub show_month_overlay: bool,
    pub full_weekday_names: bool,
    pub cell_width: u16,
    pub cell_height: u16,
}

/// Per-profile specs, starting from the built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeTable {
    specs: HashMap<SizeProfile, SizeSpec>,
}

impl SizeTable {
    pub fn spec(&self, profile: SizeProfile) -> SizeSpec {
        self.specs
            .get(&profile)
            .copied()
            .unwrap_or_else(|| profile.default_spec())
    }

    pub fn set(&mut self, profile: SizeProfile, spec: SizeSpec) {
        self.specs.insert(profile, spec);
    }
}

impl Default for SizeTable {
    fn default() -> Self {
        Self {
            specs: SizeProfile::ALL
                .iter()
                .map(|p| (*p, p.default_spec()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_profile() {
        assert_eq!("compact".parse::<SizeProfile>().unwrap(), SizeProfile::Compact);
        assert_eq!(" Cozy ".parse::<SizeProfile>().unwrap(), SizeProfile::Cozy);
        assert!(matches!(
            "huge".parse::<SizeProfile>(),
            Err(ConfigError::UnknownSize(s)) if s == "huge"
        ));
    }

    #[test]
    fn test_only_compact_hides_overlay() {
        let table = SizeTable::default();
        assert!(!table.spec(SizeProfile::Compact).show_month_overlay);
        assert!(table.spec(SizeProfile::Medium).show_month_overlay);
        assert!(table.spec(SizeProfile::Cozy).full_weekday_names);
    }

    #[test]
    fn test_override_spec() {
        let mut table = SizeTable::default();
        let mut spec = SizeProfile::Compact.default_spec();
        spec.show_month_overlay = true;
        table.set(SizeProfile::Compact, spec);
        assert!(table.spec(SizeProfile::Compact).show_month_overlay);
    }

    #[test]
    fn test_next_cycles() {
        let mut profile = SizeProfile::Compact;
        for _ in 0..3 {
            profile = profile.next();
        }
        assert_eq!(profile, SizeProfile::Compact);
    }
}
