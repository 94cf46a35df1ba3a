use crate::error::{CalcError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Compact,
    Sedan,
    Suv,
    Minivan,
    Sports,
    Kei,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Compact,
        Category::Sedan,
        Category::Suv,
        Category::Minivan,
        Category::Sports,
        Category::Kei,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Category::Compact => "compact",
            Category::Sedan => "sedan",
            Category::Suv => "suv",
            Category::Minivan => "minivan",
            Category::Sports => "sports",
            Category::Kei => "kei",
        }
    }

    /// SUVs and minivans share the "big and heavy" messaging
    pub fn is_large(&self) -> bool {
        matches!(self, Category::Suv | Category::Minivan)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Category {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.tag() == needle)
            .ok_or_else(|| CalcError::UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Powertrain {
    Gasoline,
    /// Hybrid
    Hev,
    /// Plug-in hybrid
    Phev,
    Diesel,
    Lpg,
}

impl Powertrain {
    pub const ALL: [Powertrain; 5] = [
        Powertrain::Gasoline,
        Powertrain::Hev,
        Powertrain::Phev,
        Powertrain::Diesel,
        Powertrain::Lpg,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            Powertrain::Gasoline => "gasoline",
            Powertrain::Hev => "hev",
            Powertrain::Phev => "phev",
            Powertrain::Diesel => "diesel",
            Powertrain::Lpg => "lpg",
        }
    }

    pub fn is_electrified(&self) -> bool {
        matches!(self, Powertrain::Hev | Powertrain::Phev)
    }
}

impl fmt::Display for Powertrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl FromStr for Powertrain {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim().to_ascii_lowercase();
        match needle.as_str() {
            "hybrid" => return Ok(Powertrain::Hev),
            "plug-in-hybrid" => return Ok(Powertrain::Phev),
            _ => {}
        }
        Powertrain::ALL
            .into_iter()
            .find(|p| p.tag() == needle)
            .ok_or_else(|| CalcError::UnknownPowertrain(s.to_string()))
    }
}

/// A fully specified vehicle, only produced by `ProfileBuilder::finalize`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VehicleProfile {
    pub category: Category,
    pub powertrain: Powertrain,
    /// Curb weight in kg
    pub weight: f64,
}
