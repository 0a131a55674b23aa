//! Almanac configuration.
//!
//! Every section and field has a default, so an empty file (or no file)
//! yields the stock almanac:
//!
//! ```toml
//! [new_moon]
//! threshold_percent = 1.0
//! max_search_days = 40
//!
//! [calendar]
//! overflow_policy = "fail"
//! cache_anchors = true
//!
//! [festivals]
//! horizon_days = 30
//!
//! [[festivals.entries]]
//! month = "Samonios"
//! day = 12
//! name = "Imbolc"
//! description = "Festival of Lights"
//! ```
//!
//! Listing any `[[festivals.entries]]` replaces the built-in table.

pub mod error;

use std::fs;
use std::path::Path;

use celtic_astro::{DEFAULT_MAX_SEARCH_DAYS, DEFAULT_NEW_MOON_THRESHOLD_PERCENT, NewMoonConfig};
use celtic_calendar::{Festival, FestivalTable, OverflowPolicy};
use serde::{Deserialize, Serialize};

pub use error::ConfigError;

/// Default look-ahead for the "next festival" line of a day report.
pub const DEFAULT_FESTIVAL_HORIZON_DAYS: u32 = 30;

/// New-moon search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NewMoonSection {
    /// Illumination (percent) below which a day counts as a new moon.
    pub threshold_percent: f64,
    /// Days scanned from January 1 before giving up.
    pub max_search_days: u32,
}

impl Default for NewMoonSection {
    fn default() -> Self {
        Self {
            threshold_percent: DEFAULT_NEW_MOON_THRESHOLD_PERCENT,
            max_search_days: DEFAULT_MAX_SEARCH_DAYS,
        }
    }
}

/// Date conversion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarSection {
    pub overflow_policy: OverflowPolicy,
    /// Memoize the anchor of each Gregorian year.
    pub cache_anchors: bool,
}

impl Default for CalendarSection {
    fn default() -> Self {
        Self {
            overflow_policy: OverflowPolicy::default(),
            cache_anchors: true,
        }
    }
}

/// Festival table and display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FestivalSection {
    /// Upcoming festivals further away than this are not reported.
    pub horizon_days: u32,
    /// Replacement table; `None` keeps the built-in festivals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<Festival>>,
}

impl Default for FestivalSection {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_FESTIVAL_HORIZON_DAYS,
            entries: None,
        }
    }
}

/// Top-level almanac configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AlmanacConfig {
    pub new_moon: NewMoonSection,
    pub calendar: CalendarSection,
    pub festivals: FestivalSection,
}

impl AlmanacConfig {
    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded almanac configuration");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.new_moon_config()?;
        self.festival_table()?;
        if self.festivals.horizon_days == 0 {
            return Err(ConfigError::Invalid(
                "festivals.horizon_days must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Search settings for the new-moon locator.
    pub fn new_moon_config(&self) -> Result<NewMoonConfig, ConfigError> {
        let section = &self.new_moon;
        let config = NewMoonConfig::new(section.threshold_percent, section.max_search_days);
        config
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("new_moon: {e}")))?;
        Ok(config)
    }

    /// The configured festival table, or the built-in one.
    pub fn festival_table(&self) -> Result<FestivalTable, ConfigError> {
        match &self.festivals.entries {
            None => Ok(FestivalTable::default()),
            Some(entries) => FestivalTable::new(entries.clone())
                .map_err(|e| ConfigError::Invalid(format!("festivals: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celtic_calendar::CelticMonth;

    #[test]
    fn empty_text_is_default() {
        let config = AlmanacConfig::from_toml_str("").unwrap();
        assert_eq!(config, AlmanacConfig::default());
        assert_eq!(config.new_moon.max_search_days, 40);
        assert_eq!(config.calendar.overflow_policy, OverflowPolicy::Fail);
        assert!(config.calendar.cache_anchors);
        assert_eq!(config.festivals.horizon_days, 30);
        assert_eq!(config.festival_table().unwrap(), FestivalTable::default());
    }

    #[test]
    fn partial_sections() {
        let config = AlmanacConfig::from_toml_str(
            r#"
            [calendar]
            overflow_policy = "first_month"

            [new_moon]
            threshold_percent = 2.5
            "#,
        )
        .unwrap();
        assert_eq!(config.calendar.overflow_policy, OverflowPolicy::FirstMonth);
        assert!(config.calendar.cache_anchors);
        assert_eq!(config.new_moon.threshold_percent, 2.5);
        assert_eq!(config.new_moon.max_search_days, 40);
    }

    #[test]
    fn custom_festivals_replace_builtin() {
        let config = AlmanacConfig::from_toml_str(
            r#"
            [[festivals.entries]]
            month = "Equos"
            day = 1
            name = "Horse Fair"
            "#,
        )
        .unwrap();
        let table = config.festival_table().unwrap();
        assert_eq!(table.entries().len(), 1);
        assert_eq!(table.entries()[0].month, CelticMonth::Equos);
        assert_eq!(table.entries()[0].description, "");
    }

    #[test]
    fn rejects_unknown_policy() {
        let err = AlmanacConfig::from_toml_str("[calendar]\noverflow_policy = \"wrap\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_unknown_field() {
        let err = AlmanacConfig::from_toml_str("[new_moon]\nthreshold = 3.0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_bad_threshold() {
        for text in ["[new_moon]\nthreshold_percent = 0.0", "[new_moon]\nthreshold_percent = 101.0"] {
            assert!(matches!(
                AlmanacConfig::from_toml_str(text),
                Err(ConfigError::Invalid(_))
            ));
        }
    }

    #[test]
    fn rejects_search_cap_out_of_range() {
        for days in [0, 401] {
            let text = format!("[new_moon]\nmax_search_days = {days}");
            assert!(matches!(
                AlmanacConfig::from_toml_str(&text),
                Err(ConfigError::Invalid(_))
            ));
        }
    }

    #[test]
    fn rejects_duplicate_festival_days() {
        let text = r#"
            [[festivals.entries]]
            month = "Riuros"
            day = 4
            name = "A"

            [[festivals.entries]]
            month = "Riuros"
            day = 4
            name = "B"
        "#;
        let err = AlmanacConfig::from_toml_str(text).unwrap_err();
        assert!(err.to_string().contains("festivals"));
    }

    #[test]
    fn rejects_zero_horizon() {
        assert!(AlmanacConfig::from_toml_str("[festivals]\nhorizon_days = 0").is_err());
    }

    #[test]
    fn serializes_back_to_toml() {
        let config = AlmanacConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(AlmanacConfig::from_toml_str(&text).unwrap(), config);
    }
}
