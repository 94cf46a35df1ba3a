use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Test cycle a fuel economy figure was measured under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum TestCycle {
    /// Reference cycle every figure is normalized to
    #[default]
    #[serde(rename = "wltc")]
    Wltc,
    /// Intermediate legacy cycle
    #[serde(rename = "jc08")]
    Jc08,
    /// Oldest legacy cycle, converted through JC08
    #[serde(rename = "1015")]
    TenFifteen,
}

impl TestCycle {
    pub fn tag(&self) -> &'static str {
        match self {
            TestCycle::Wltc => "wltc",
            TestCycle::Jc08 => "jc08",
            TestCycle::TenFifteen => "1015",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TestCycle::Wltc => "WLTC",
            TestCycle::Jc08 => "JC08",
            TestCycle::TenFifteen => "10・15",
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, TestCycle::Wltc)
    }
}

impl fmt::Display for TestCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for TestCycle {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wltc" | "reference" => Ok(TestCycle::Wltc),
            "jc08" | "alt-cycle-a" => Ok(TestCycle::Jc08),
            "1015" | "10-15" | "10・15" | "alt-cycle-b" => Ok(TestCycle::TenFifteen),
            _ => Err(CalcError::UnknownTestCycle(s.to_string())),
        }
    }
}

/// A raw fuel economy figure in km/L, tagged with its test cycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    value: f64,
    unit: TestCycle,
}

impl Measurement {
    /// Rejects non-finite and non-positive values. Upper bounds are a
    /// presentation concern and are checked against the configured limits.
    pub fn new(value: f64, unit: TestCycle) -> Result<Self> {
        if !value.is_finite() || value <= 0.0 {
            return Err(CalcError::InvalidArgument(format!(
                "measurement must be a positive finite number, got {}",
                value
            )));
        }
        Ok(Self { value, unit })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> TestCycle {
        self.unit
    }

    /// Value expressed in reference-cycle units
    pub fn to_reference(&self) -> f64 {
        super::converter::convert(self.value, self.unit)
    }
}
