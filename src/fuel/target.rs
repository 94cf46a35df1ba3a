use crate::vehicle::models::Powertrain;

/// At or above this weight the target is the flat `HEAVY_BASE`
pub const HEAVY_WEIGHT_KG: f64 = 2759.0;
pub const HEAVY_BASE: f64 = 9.5;

pub const DIESEL_FACTOR: f64 = 1.1;
pub const LPG_FACTOR: f64 = 0.74;

/// Target WLTC km/L for a vehicle of `weight_kg` kilograms.
///
/// Below the heavy threshold the gasoline base follows a downward-opening
/// quadratic in weight that meets `HEAVY_BASE` at the threshold. Diesel and
/// LPG scale that base; hybrids and plug-ins are held to the gasoline target.
/// The result is rounded to the nearest tenth.
pub fn estimate(weight_kg: f64, powertrain: Powertrain) -> f64 {
    let base = if weight_kg >= HEAVY_WEIGHT_KG {
        HEAVY_BASE
    } else {
        -0.00000247 * weight_kg.powi(2) - 0.000852 * weight_kg + 30.65
    };

    let adjusted = match powertrain {
        Powertrain::Diesel => base * DIESEL_FACTOR,
        Powertrain::Lpg => base * LPG_FACTOR,
        Powertrain::Gasoline | Powertrain::Hev | Powertrain::Phev => base,
    };

    round_tenth(adjusted)
}

pub(crate) fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
