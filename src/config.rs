use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ground_station::GroundStation;

/// One day of one-second ticks
pub const DEFAULT_GIVE_UP_TICKS: u64 = 86_400;

/// How a pass scan advances and when it stops. Whichever of `max_passes`,
/// `end` and `give_up_ticks` is set and reached first ends the scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// degrees
    pub min_elevation: f64,
    pub step_seconds: i64,
    pub max_passes: Option<usize>,
    /// Last tick evaluated, inclusive
    pub end: Option<DateTime<Utc>>,
    /// Consecutive ticks without a completed pass before giving up
    pub give_up_ticks: Option<u64>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            min_elevation: 0.,
            step_seconds: 1,
            max_passes: Some(1),
            end: None,
            give_up_ticks: Some(DEFAULT_GIVE_UP_TICKS),
        }
    }
}

impl ScanConfig {
    pub fn from_toml_str(text: &str) -> Result<ScanConfig> {
        let config: ScanConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.step_seconds < 1 {
            return Err(Error::Config(format!(
                "step_seconds must be at least 1, got {}",
                self.step_seconds
            )));
        }
        if !(-90. ..=90.).contains(&self.min_elevation) {
            return Err(Error::Config(format!(
                "min_elevation must be within [-90, 90], got {}",
                self.min_elevation
            )));
        }
        if self.max_passes == Some(0) {
            return Err(Error::Config("max_passes must be at least 1".to_string()));
        }
        if self.give_up_ticks == Some(0) {
            return Err(Error::Config("give_up_ticks must be at least 1".to_string()));
        }
        if self.max_passes.is_none() && self.end.is_none() && self.give_up_ticks.is_none() {
            return Err(Error::Config(
                "no termination condition: set max_passes, end or give_up_ticks".to_string(),
            ));
        }
        Ok(())
    }
}

/// A complete scan setup: where to look from and how to scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub observer: GroundStation,
    #[serde(default)]
    pub scan: ScanConfig,
}

impl Config {
    pub fn from_toml_str(text: &str) -> Result<Config> {
        let config: Config = toml::from_str(text)?;
        config.observer.location()?;
        config.scan.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_defaults_are_valid() {
        let config = ScanConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.step_seconds, 1);
        assert_eq!(config.max_passes, Some(1));
    }

    #[test]
    fn test_parse_full_config() {
        let config = Config::from_toml_str(
            r#"
            [observer]
            name = "Delft"
            longitude = 4.3876
            latitude = 51.9861
            altitude = 0.0744

            [scan]
            min_elevation = 10.0
            max_passes = 5
            end = "2025-03-22T00:00:00Z"
            "#,
        )
        .unwrap();
        assert_eq!(config.observer.name, "Delft");
        assert_eq!(config.scan.min_elevation, 10.);
        assert_eq!(config.scan.max_passes, Some(5));
        assert_eq!(
            config.scan.end,
            Some(Utc.with_ymd_and_hms(2025, 3, 22, 0, 0, 0).unwrap())
        );
        // unspecified fields keep their defaults
        assert_eq!(config.scan.give_up_ticks, Some(DEFAULT_GIVE_UP_TICKS));
    }

    #[test]
    fn test_scan_section_optional() {
        let config = Config::from_toml_str(
            r#"
            [observer]
            name = "Null Island"
            longitude = 0.0
            latitude = 0.0
            "#,
        )
        .unwrap();
        assert_eq!(config.scan, ScanConfig::default());
        assert_eq!(config.observer.altitude, 0.);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            ScanConfig::from_toml_str("step_seconds = 0"),
            Err(Error::Config(_))
        ));
        assert!(ScanConfig::from_toml_str("min_elevation = 95.0").is_err());
        assert!(ScanConfig::from_toml_str("max_passes = 0").is_err());
        assert!(matches!(
            ScanConfig::from_toml_str("step_seconds = \"fast\""),
            Err(Error::Toml(_))
        ));
        assert!(
            Config::from_toml_str("[observer]\nname = \"x\"\nlongitude = 200.0\nlatitude = 0.0")
                .is_err()
        );
    }

    #[test]
    fn test_rejects_unbounded_scan() {
        let config = ScanConfig {
            max_passes: None,
            end: None,
            give_up_ticks: None,
            ..ScanConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }
}
