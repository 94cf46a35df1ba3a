use super::types::TestCycle;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex pattern to detect a typed fuel economy figure
    /// Matches: number (optional decimal) + optional km/L + optional cycle tag
    /// Examples: "25", "21.4 km/L", "12.0 jc08", "18km/l 10・15", "30 (WLTC)"
    /// Digits are ASCII only; full-width input is folded first.
    static ref MEASUREMENT_PATTERN: Regex = Regex::new(
        r"(?i)^([0-9]+(?:\.[0-9]+)?)\s*(?:km/l)?\s*\(?\s*(wltc|jc08|10[・\-]?15)?\s*\)?$"
    ).unwrap();
}

/// Fold full-width ASCII forms (as typed with a Japanese IME) to ASCII.
/// Other characters pass through.
fn fold_full_width(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            '！'..='～' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            '　' => ' ',
            _ => c,
        })
        .collect()
}

/// Check if a string looks like a fuel economy entry
pub fn looks_like_measurement(s: &str) -> bool {
    let folded = fold_full_width(s);
    if folded.is_empty() {
        return false;
    }

    MEASUREMENT_PATTERN.is_match(&folded)
}

/// Split a typed entry into its value and the cycle tag, if one was given
pub fn parse_measurement(s: &str) -> Option<(f64, Option<TestCycle>)> {
    let folded = fold_full_width(s);
    let caps = MEASUREMENT_PATTERN.captures(&folded)?;
    let value = caps.get(1)?.as_str().parse::<f64>().ok()?;
    let unit = caps.get(2).and_then(|m| m.as_str().parse::<TestCycle>().ok());
    Some((value, unit))
}
