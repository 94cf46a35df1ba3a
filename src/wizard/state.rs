use crate::config::Config;
use crate::error::{CalcError, Result};
use crate::fuel::{self, Measurement, RatingResult, TestCycle};
use crate::vehicle::builder::ProfileBuilder;
use crate::vehicle::models::{Category, Powertrain, VehicleProfile};
use crate::vehicle::validation::ValidationResult;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Intro,
    Category,
    Powertrain,
    Weight,
    Measurement,
    Result,
}

impl Step {
    pub fn index(&self) -> u8 {
        match self {
            Step::Intro => 0,
            Step::Category => 1,
            Step::Powertrain => 2,
            Step::Weight => 3,
            Step::Measurement => 4,
            Step::Result => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Step::Intro => "intro",
            Step::Category => "category",
            Step::Powertrain => "powertrain",
            Step::Weight => "weight",
            Step::Measurement => "measurement",
            Step::Result => "result",
        }
    }

    fn previous(&self) -> Option<Step> {
        match self {
            Step::Intro => None,
            Step::Category => Some(Step::Intro),
            Step::Powertrain => Some(Step::Category),
            Step::Weight => Some(Step::Powertrain),
            Step::Measurement => Some(Step::Weight),
            Step::Result => Some(Step::Measurement),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.name())
    }
}

/// Everything the user can do to move the wizard along
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Transition {
    Start,
    SelectCategory { category: Category },
    SelectPowertrain { powertrain: Powertrain },
    EnterWeight { weight: f64 },
    SelectUnit { unit: TestCycle },
    EnterMeasurement { value: f64 },
    Calculate,
    Back,
    Reset,
}

impl Transition {
    fn describe(&self) -> &'static str {
        match self {
            Transition::Start => "start",
            Transition::SelectCategory { .. } => "select a category",
            Transition::SelectPowertrain { .. } => "select a powertrain",
            Transition::EnterWeight { .. } => "enter a weight",
            Transition::SelectUnit { .. } => "select a test cycle",
            Transition::EnterMeasurement { .. } => "enter a measurement",
            Transition::Calculate => "calculate",
            Transition::Back => "go back",
            Transition::Reset => "reset",
        }
    }

    /// The only step this transition is accepted at, `None` if any step
    fn source(&self) -> Option<Step> {
        match self {
            Transition::Start => Some(Step::Intro),
            Transition::SelectCategory { .. } => Some(Step::Category),
            Transition::SelectPowertrain { .. } => Some(Step::Powertrain),
            Transition::EnterWeight { .. } => Some(Step::Weight),
            Transition::SelectUnit { .. }
            | Transition::EnterMeasurement { .. }
            | Transition::Calculate => Some(Step::Measurement),
            Transition::Back | Transition::Reset => None,
        }
    }
}

/// What the result step shows
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub profile: VehicleProfile,
    pub measurement: Measurement,
    pub result: RatingResult,
    pub validation: ValidationResult,
}

/// Wizard position plus the selections made so far.
///
/// `apply` never changes `self`; it returns the state after the transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Wizard {
    step: Step,
    profile: ProfileBuilder,
    unit: TestCycle,
    raw_value: Option<f64>,
    outcome: Option<Outcome>,
}

impl Wizard {
    pub fn new(config: &Config) -> Self {
        Self {
            step: Step::Intro,
            profile: ProfileBuilder::new(),
            unit: config.defaults.unit,
            raw_value: None,
            outcome: None,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn profile(&self) -> &ProfileBuilder {
        &self.profile
    }

    pub fn unit(&self) -> TestCycle {
        self.unit
    }

    pub fn raw_value(&self) -> Option<f64> {
        self.raw_value
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    /// WLTC equivalent of the typed figure, shown only for legacy cycles
    pub fn converted_preview(&self) -> Option<f64> {
        match self.raw_value {
            Some(value) if !self.unit.is_reference() => Some(fuel::convert(value, self.unit)),
            _ => None,
        }
    }

    pub fn apply(&self, transition: Transition, config: &Config) -> Result<Wizard> {
        if let Some(source) = transition.source() {
            if source != self.step {
                return Err(CalcError::InvalidTransition {
                    step: self.step,
                    action: transition.describe(),
                });
            }
        }

        let next = match transition {
            Transition::Start => self.moved_to(Step::Category),
            Transition::SelectCategory { category } => Wizard {
                profile: self.profile.category(category),
                ..self.moved_to(Step::Powertrain)
            },
            Transition::SelectPowertrain { powertrain } => Wizard {
                profile: self.profile.powertrain(powertrain),
                ..self.moved_to(Step::Weight)
            },
            Transition::EnterWeight { weight } => {
                config.limits.check_weight(weight)?;
                Wizard {
                    profile: self.profile.weight(weight),
                    ..self.moved_to(Step::Measurement)
                }
            }
            Transition::SelectUnit { unit } => Wizard {
                unit,
                ..self.clone()
            },
            Transition::EnterMeasurement { value } => {
                Measurement::new(value, self.unit)?;
                config.limits.check_measurement(value)?;
                Wizard {
                    raw_value: Some(value),
                    ..self.clone()
                }
            }
            Transition::Calculate => {
                let outcome = self.calculate(config)?;
                Wizard {
                    outcome: Some(outcome),
                    ..self.moved_to(Step::Result)
                }
            }
            Transition::Back => {
                let previous = self.step.previous().ok_or(CalcError::InvalidTransition {
                    step: self.step,
                    action: transition.describe(),
                })?;
                Wizard {
                    outcome: None,
                    ..self.moved_to(previous)
                }
            }
            Transition::Reset => Wizard::new(config),
        };

        log::debug!(
            "Wizard {:?}: step {} -> {}",
            transition,
            self.step,
            next.step
        );
        Ok(next)
    }

    fn moved_to(&self, step: Step) -> Wizard {
        Wizard {
            step,
            ..self.clone()
        }
    }

    fn calculate(&self, config: &Config) -> Result<Outcome> {
        let value = self.raw_value.ok_or_else(|| {
            CalcError::InvalidArgument("no fuel economy figure entered".to_string())
        })?;
        let measurement = Measurement::new(value, self.unit)?;
        let (profile, validation) = self.profile.finalize(config)?;
        let result = fuel::evaluate(&measurement, &profile);

        log::debug!(
            "Rated {:?} at {:.1}% of {:.1} km/L: {} stars ({})",
            profile,
            result.achievement_rate,
            result.target_value,
            result.stars,
            result.message_key
        );

        Ok(Outcome {
            profile,
            measurement,
            result,
            validation,
        })
    }
}
