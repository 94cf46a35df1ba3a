use super::types::TestCycle;

/// 10・15 mode to JC08 mode empirical factor
pub const TEN_FIFTEEN_TO_JC08: f64 = 0.897;

/// JC08 mode to WLTC mode empirical factor
pub const JC08_TO_WLTC: f64 = 0.86;

/// Convert a km/L figure measured under `unit` into WLTC km/L.
///
/// Legacy figures are floored to one decimal place, so a converted value
/// never overstates the car. WLTC input passes through untouched, including
/// non-finite or negative values; filtering those is up to the caller.
pub fn convert(value: f64, unit: TestCycle) -> f64 {
    let jc08 = match unit {
        TestCycle::Wltc => return value,
        TestCycle::Jc08 => value,
        TestCycle::TenFifteen => value * TEN_FIFTEEN_TO_JC08,
    };

    floor_tenth(jc08 * JC08_TO_WLTC)
}

fn floor_tenth(value: f64) -> f64 {
    (value * 10.0).floor() / 10.0
}
