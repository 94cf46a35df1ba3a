use crate::error::{CalcError, Result};
use crate::fuel::TestCycle;
use crate::vehicle::models::{Category, Powertrain};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Config {
    // Fallbacks for selections the user never made
    #[serde(default)]
    pub defaults: Defaults,

    // Accepted input ranges
    #[serde(default)]
    pub limits: Limits,

    #[serde(default)]
    pub share: ShareConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_category")]
    pub category: Category,

    #[serde(default = "default_powertrain")]
    pub powertrain: Powertrain,

    // Cycle preselected in the measurement step
    #[serde(default)]
    pub unit: TestCycle,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            category: default_category(),
            powertrain: default_powertrain(),
            unit: TestCycle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Limits {
    #[serde(default = "default_weight_min")]
    pub weight_min: f64,

    #[serde(default = "default_weight_max")]
    pub weight_max: f64,

    // Lower bound is always exclusive zero
    #[serde(default = "default_measurement_max")]
    pub measurement_max: f64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            weight_min: default_weight_min(),
            weight_max: default_weight_max(),
            measurement_max: default_measurement_max(),
        }
    }
}

impl Limits {
    pub fn accepts_weight(&self, weight: f64) -> bool {
        weight >= self.weight_min && weight <= self.weight_max
    }

    pub fn accepts_measurement(&self, value: f64) -> bool {
        value > 0.0 && value <= self.measurement_max
    }

    pub fn check_weight(&self, weight: f64) -> Result<()> {
        if self.accepts_weight(weight) {
            Ok(())
        } else {
            Err(CalcError::WeightOutOfRange {
                weight,
                min: self.weight_min,
                max: self.weight_max,
            })
        }
    }

    /// Every surface that accepts a typed figure goes through this check
    pub fn check_measurement(&self, value: f64) -> Result<()> {
        if self.accepts_measurement(value) {
            Ok(())
        } else {
            Err(CalcError::MeasurementOutOfRange {
                value,
                max: self.measurement_max,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ShareConfig {
    #[serde(default = "default_share_title")]
    pub title: String,

    // Appended to share text with a leading '#'
    #[serde(default = "default_hashtags")]
    pub hashtags: Vec<String>,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            title: default_share_title(),
            hashtags: default_hashtags(),
        }
    }
}

fn default_category() -> Category {
    Category::Sedan
}

fn default_powertrain() -> Powertrain {
    Powertrain::Gasoline
}

fn default_weight_min() -> f64 {
    500.0
}

fn default_weight_max() -> f64 {
    5000.0
}

fn default_measurement_max() -> f64 {
    100.0
}

fn default_share_title() -> String {
    "2030年度燃費基準結果".to_string()
}

fn default_hashtags() -> Vec<String> {
    vec!["EcoCalcPro".to_string(), "2030燃費基準".to_string()]
}

impl Config {
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::load_from_str(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn load_from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_has_builtin_defaults() {
        let config = Config::empty();
        assert_eq!(config.defaults.category, Category::Sedan);
        assert_eq!(config.defaults.powertrain, Powertrain::Gasoline);
        assert_eq!(config.defaults.unit, TestCycle::Wltc);
        assert_eq!(config.limits.weight_min, 500.0);
        assert_eq!(config.limits.weight_max, 5000.0);
        assert_eq!(config.limits.measurement_max, 100.0);
    }

    #[test]
    fn test_empty_string_parses_to_defaults() {
        assert_eq!(Config::load_from_str("").unwrap(), Config::empty());
    }

    #[test]
    fn test_partial_config() {
        let config = Config::load_from_str(
            r#"
[defaults]
powertrain = "hev"
unit = "jc08"

[limits]
weight_max = 3500.0

[share]
hashtags = ["MyCar"]
"#,
        )
        .unwrap();

        assert_eq!(config.defaults.category, Category::Sedan);
        assert_eq!(config.defaults.powertrain, Powertrain::Hev);
        assert_eq!(config.defaults.unit, TestCycle::Jc08);
        assert_eq!(config.limits.weight_min, 500.0);
        assert_eq!(config.limits.weight_max, 3500.0);
        assert_eq!(config.share.hashtags, vec!["MyCar".to_string()]);
        assert_eq!(config.share.title, "2030年度燃費基準結果");
    }

    #[test]
    fn test_unknown_tag_is_config_error() {
        let err = Config::load_from_str("[defaults]\ncategory = \"truck\"\n").unwrap_err();
        assert!(matches!(err, CalcError::Config(_)));
    }

    #[test]
    fn test_limits() {
        let limits = Limits::default();
        assert!(limits.accepts_weight(500.0));
        assert!(limits.accepts_weight(5000.0));
        assert!(!limits.accepts_weight(499.9));
        assert!(!limits.accepts_weight(f64::NAN));
        assert!(limits.accepts_measurement(100.0));
        assert!(!limits.accepts_measurement(0.0));
        assert!(!limits.accepts_measurement(100.1));
    }

    #[test]
    fn test_limit_checks_report_configured_bounds() {
        let limits = Config::load_from_str("[limits]\nmeasurement_max = 40.0\n")
            .unwrap()
            .limits;

        assert!(limits.check_measurement(40.0).is_ok());
        assert!(matches!(
            limits.check_measurement(500.0),
            Err(CalcError::MeasurementOutOfRange { max, .. }) if max == 40.0
        ));
        assert!(limits.check_measurement(0.0).is_err());

        assert!(limits.check_weight(1200.0).is_ok());
        assert!(matches!(
            limits.check_weight(6000.0),
            Err(CalcError::WeightOutOfRange { min, max, .. }) if min == 500.0 && max == 5000.0
        ));
    }
}
