use super::models::{Category, Powertrain, VehicleProfile};
use super::validation::{ProfileField, ValidationResult};
use crate::config::Config;
use crate::error::{CalcError, Result};

/// Vehicle selections gathered one wizard step at a time.
///
/// Each setter returns a new builder; nothing is checked until `finalize`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProfileBuilder {
    category: Option<Category>,
    powertrain: Option<Powertrain>,
    weight: Option<f64>,
}

impl ProfileBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(self, category: Category) -> Self {
        Self {
            category: Some(category),
            ..self
        }
    }

    pub fn powertrain(self, powertrain: Powertrain) -> Self {
        Self {
            powertrain: Some(powertrain),
            ..self
        }
    }

    pub fn weight(self, weight: f64) -> Self {
        Self {
            weight: Some(weight),
            ..self
        }
    }

    pub fn selected_category(&self) -> Option<Category> {
        self.category
    }

    pub fn selected_powertrain(&self) -> Option<Powertrain> {
        self.powertrain
    }

    pub fn entered_weight(&self) -> Option<f64> {
        self.weight
    }

    /// Build the profile, filling a missing category or powertrain from
    /// `config.defaults`. Every applied default is reported once, as a
    /// warning in the returned `ValidationResult`; the log only gets `info!`.
    /// A missing or out-of-range weight fails with all issues collected.
    pub fn finalize(&self, config: &Config) -> Result<(VehicleProfile, ValidationResult)> {
        let mut validation = ValidationResult::new();

        let category = self.category.unwrap_or_else(|| {
            let fallback = config.defaults.category;
            log::info!("No category selected, falling back to {}", fallback);
            validation.note_default(
                ProfileField::Category,
                format!("No category selected, using default '{}'", fallback),
            );
            fallback
        });

        let powertrain = self.powertrain.unwrap_or_else(|| {
            let fallback = config.defaults.powertrain;
            log::info!("No powertrain selected, falling back to {}", fallback);
            validation.note_default(
                ProfileField::Powertrain,
                format!("No powertrain selected, using default '{}'", fallback),
            );
            fallback
        });

        let limits = &config.limits;
        match self.weight {
            None => validation.reject(
                ProfileField::Weight,
                "Vehicle weight is required".to_string(),
            ),
            Some(w) if !limits.accepts_weight(w) => validation.reject(
                ProfileField::Weight,
                format!(
                    "Weight {} kg is outside {}..={} kg",
                    w, limits.weight_min, limits.weight_max
                ),
            ),
            Some(_) => {}
        }

        match self.weight {
            Some(weight) if validation.is_valid() => Ok((
                VehicleProfile {
                    category,
                    powertrain,
                    weight,
                },
                validation,
            )),
            _ => Err(CalcError::Validation(validation)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    static RECORDS: Mutex<Vec<(log::Level, String)>> = Mutex::new(Vec::new());

    struct RecordingLogger;

    impl log::Log for RecordingLogger {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            if let Ok(mut records) = RECORDS.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: RecordingLogger = RecordingLogger;

    #[test]
    fn test_complete_builder_has_no_issues() {
        let (profile, validation) = ProfileBuilder::new()
            .category(Category::Compact)
            .powertrain(Powertrain::Hev)
            .weight(1100.0)
            .finalize(&Config::empty())
            .unwrap();

        assert_eq!(
            profile,
            VehicleProfile {
                category: Category::Compact,
                powertrain: Powertrain::Hev,
                weight: 1100.0,
            }
        );
        assert!(!validation.has_issues());
    }

    #[test]
    fn test_setters_do_not_mutate_previous_builder() {
        let first = ProfileBuilder::new().category(Category::Kei);
        let second = first.category(Category::Suv);
        assert_eq!(first.selected_category(), Some(Category::Kei));
        assert_eq!(second.selected_category(), Some(Category::Suv));
    }

    #[test]
    fn test_missing_selections_use_config_defaults() {
        let mut config = Config::empty();
        config.defaults.powertrain = Powertrain::Diesel;

        let (profile, validation) = ProfileBuilder::new()
            .weight(1500.0)
            .finalize(&config)
            .unwrap();

        assert_eq!(profile.category, Category::Sedan);
        assert_eq!(profile.powertrain, Powertrain::Diesel);
        assert!(validation.is_valid());
        assert_eq!(validation.warnings.len(), 2);
        assert_eq!(
            validation.defaulted_fields(),
            vec![ProfileField::Category, ProfileField::Powertrain]
        );
        assert!(validation.warnings[1].message.contains("diesel"));
    }

    #[test]
    fn test_missing_weight_fails() {
        let err = ProfileBuilder::new()
            .category(Category::Sedan)
            .finalize(&Config::empty())
            .unwrap_err();

        match err {
            CalcError::Validation(validation) => {
                assert_eq!(validation.errors.len(), 1);
                assert_eq!(validation.errors[0].field, ProfileField::Weight);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_weight_fails() {
        for weight in [499.0, 5000.5, f64::NAN] {
            let result = ProfileBuilder::new()
                .weight(weight)
                .finalize(&Config::empty());
            assert!(matches!(result, Err(CalcError::Validation(_))), "weight {}", weight);
        }
    }

    #[test]
    fn test_applied_defaults_stay_below_warn_level() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);

        let (_, validation) = ProfileBuilder::new()
            .weight(1300.0)
            .finalize(&Config::empty())
            .unwrap();
        assert_eq!(validation.warnings.len(), 2);

        let records = RECORDS.lock().unwrap();
        let fallbacks: Vec<_> = records
            .iter()
            .filter(|(_, message)| message.contains("falling back"))
            .collect();
        assert!(!fallbacks.is_empty());
        assert!(fallbacks.iter().all(|(level, _)| *level == log::Level::Info));
    }
}
