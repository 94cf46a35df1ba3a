use crate::vehicle::validation::ValidationResult;
use crate::wizard::state::Step;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CalcError>;

#[derive(Debug, Error)]
pub enum CalcError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Weight {weight} kg is outside the accepted range {min}..={max} kg")]
    WeightOutOfRange { weight: f64, min: f64, max: f64 },

    #[error("Measurement {value} km/L is outside the accepted range (0, {max}]")]
    MeasurementOutOfRange { value: f64, max: f64 },

    #[error("Unknown vehicle category: {0}")]
    UnknownCategory(String),

    #[error("Unknown powertrain: {0}")]
    UnknownPowertrain(String),

    #[error("Unknown test cycle: {0}")]
    UnknownTestCycle(String),

    #[error("Cannot {action} at step {step}")]
    InvalidTransition { step: Step, action: &'static str },

    #[error("Vehicle profile is incomplete:\n{0}")]
    Validation(ValidationResult),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
