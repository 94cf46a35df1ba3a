use super::target;
use super::types::Measurement;
use crate::vehicle::models::{Category, VehicleProfile};
use serde::{Serialize, Serializer};
use std::fmt;

/// Below this weight a car gets the light-vehicle message whatever its category
pub const LIGHT_WEIGHT_KG: f64 = 1000.0;

/// Rate (percent) to half-star count, highest bucket first. Lower bounds are inclusive.
const STAR_THRESHOLDS: [(f64, u8); 10] = [
    (100.0, 10),
    (95.0, 9),
    (90.0, 8),
    (85.0, 7),
    (80.0, 6),
    (75.0, 5),
    (70.0, 4),
    (65.0, 3),
    (60.0, 2),
    (55.0, 1),
];

/// Star rating in half-star steps, 0 to 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct StarRating(u8);

impl StarRating {
    pub const MAX: StarRating = StarRating(10);

    pub fn from_rate(rate: f64) -> Self {
        STAR_THRESHOLDS
            .iter()
            .find(|(threshold, _)| rate >= *threshold)
            .map(|&(_, halves)| StarRating(halves))
            .unwrap_or_default()
    }

    pub fn half_stars(&self) -> u8 {
        self.0
    }

    pub fn full_stars(&self) -> u8 {
        self.0 / 2
    }

    pub fn has_half(&self) -> bool {
        self.0 % 2 == 1
    }

    pub fn as_f64(&self) -> f64 {
        f64::from(self.0) / 2.0
    }
}

impl fmt::Display for StarRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_half() {
            write!(f, "{}.5", self.full_stars())
        } else {
            write!(f, "{}", self.full_stars())
        }
    }
}

impl Serialize for StarRating {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Coarse band of the achievement rate, shared by messages and colouring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateTier {
    /// 100% or more
    Exceeded,
    /// 80% up to 100%
    High,
    Low,
}

impl RateTier {
    pub fn from_rate(rate: f64) -> Self {
        if rate >= 100.0 {
            RateTier::Exceeded
        } else if rate >= 80.0 {
            RateTier::High
        } else {
            RateTier::Low
        }
    }

    pub fn tag(&self) -> &'static str {
        match self {
            RateTier::Exceeded => "exceeded",
            RateTier::High => "high",
            RateTier::Low => "low",
        }
    }

    fn is_at_least_high(&self) -> bool {
        !matches!(self, RateTier::Low)
    }
}

/// Which congratulatory message to show. Text lives in `present::messages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Target exceeded by a hybrid or plug-in; the text names the category
    ElectrifiedExceeded(Category),
    /// Target exceeded by a gasoline, diesel or LPG car
    CombustionExceeded,
    Sports(RateTier),
    Large(RateTier),
    LightAndNimble,
    GenericHigh,
    GenericBalanced,
}

impl MessageKey {
    /// Message chain, evaluated top-down; the first matching rule wins.
    ///
    /// The light-vehicle rule fires for any rate below 100%, so a kei car at
    /// 99% gets the same text as one at 40%.
    pub fn select(rate: f64, profile: &VehicleProfile) -> Self {
        let tier = RateTier::from_rate(rate);

        if tier == RateTier::Exceeded {
            if profile.powertrain.is_electrified() {
                MessageKey::ElectrifiedExceeded(profile.category)
            } else {
                MessageKey::CombustionExceeded
            }
        } else if profile.category == Category::Sports {
            MessageKey::Sports(tier)
        } else if profile.category.is_large() {
            MessageKey::Large(tier)
        } else if profile.category == Category::Kei || profile.weight < LIGHT_WEIGHT_KG {
            MessageKey::LightAndNimble
        } else if tier.is_at_least_high() {
            MessageKey::GenericHigh
        } else {
            MessageKey::GenericBalanced
        }
    }

    /// Dotted lookup key, e.g. `exceeded.electrified.suv` or `sports.low`
    pub fn key(&self) -> String {
        match self {
            MessageKey::ElectrifiedExceeded(category) => {
                format!("exceeded.electrified.{}", category.tag())
            }
            MessageKey::CombustionExceeded => "exceeded.combustion".to_string(),
            MessageKey::Sports(tier) => format!("sports.{}", tier.tag()),
            MessageKey::Large(tier) => format!("large.{}", tier.tag()),
            MessageKey::LightAndNimble => "light".to_string(),
            MessageKey::GenericHigh => "generic.high".to_string(),
            MessageKey::GenericBalanced => "generic.balanced".to_string(),
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for MessageKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating {
    pub stars: StarRating,
    pub message_key: MessageKey,
}

/// Stars and message for an achievement rate in percent.
///
/// Total over every `f64`: a `NaN` rate matches no threshold and yields zero
/// stars with the balanced-car message.
pub fn rate(achievement_rate: f64, profile: &VehicleProfile) -> Rating {
    Rating {
        stars: StarRating::from_rate(achievement_rate),
        message_key: MessageKey::select(achievement_rate, profile),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResult {
    /// Measurement in WLTC km/L
    pub converted_value: f64,
    pub target_value: f64,
    /// Percent of the target reached
    pub achievement_rate: f64,
    pub stars: StarRating,
    pub message_key: MessageKey,
}

impl RatingResult {
    pub fn tier(&self) -> RateTier {
        RateTier::from_rate(self.achievement_rate)
    }
}

/// Run a measurement through conversion, target estimation and rating
pub fn evaluate(measurement: &Measurement, profile: &VehicleProfile) -> RatingResult {
    let converted_value = measurement.to_reference();
    let target_value = target::estimate(profile.weight, profile.powertrain);
    let achievement_rate = converted_value / target_value * 100.0;
    let Rating {
        stars,
        message_key,
    } = rate(achievement_rate, profile);

    RatingResult {
        converted_value,
        target_value,
        achievement_rate,
        stars,
        message_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::types::TestCycle;
    use crate::vehicle::models::Powertrain;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn profile(category: Category, powertrain: Powertrain, weight: f64) -> VehicleProfile {
        VehicleProfile {
            category,
            powertrain,
            weight,
        }
    }

    #[test]
    fn test_star_buckets() {
        let cases = [
            (250.0, 5.0),
            (100.0, 5.0),
            (99.9, 4.5),
            (95.0, 4.5),
            (94.9999, 4.0),
            (90.0, 4.0),
            (85.0, 3.5),
            (80.0, 3.0),
            (75.0, 2.5),
            (70.0, 2.0),
            (65.0, 1.5),
            (60.0, 1.0),
            (55.0, 0.5),
            (54.99, 0.0),
            (0.0, 0.0),
        ];
        for (rate, stars) in cases {
            assert_eq!(StarRating::from_rate(rate).as_f64(), stars, "rate {}", rate);
        }
    }

    #[test]
    fn test_star_display() {
        assert_eq!(StarRating::from_rate(96.0).to_string(), "4.5");
        assert_eq!(StarRating::from_rate(100.0).to_string(), "5");
        assert_eq!(StarRating::from_rate(10.0).to_string(), "0");
        assert_eq!(StarRating::from_rate(f64::NAN), StarRating::default());
    }

    #[test]
    fn test_exceeded_beats_category_rules() {
        let sports_hybrid = profile(Category::Sports, Powertrain::Hev, 1300.0);
        assert_eq!(
            MessageKey::select(100.0, &sports_hybrid),
            MessageKey::ElectrifiedExceeded(Category::Sports)
        );

        let kei_gasoline = profile(Category::Kei, Powertrain::Gasoline, 850.0);
        assert_eq!(
            MessageKey::select(120.0, &kei_gasoline),
            MessageKey::CombustionExceeded
        );
    }

    #[test]
    fn test_category_rules() {
        let sports = profile(Category::Sports, Powertrain::Gasoline, 1400.0);
        assert_eq!(MessageKey::select(80.0, &sports), MessageKey::Sports(RateTier::High));
        assert_eq!(MessageKey::select(79.9, &sports), MessageKey::Sports(RateTier::Low));

        let minivan = profile(Category::Minivan, Powertrain::Phev, 1900.0);
        assert_eq!(MessageKey::select(85.0, &minivan), MessageKey::Large(RateTier::High));
        let suv = profile(Category::Suv, Powertrain::Diesel, 2100.0);
        assert_eq!(MessageKey::select(40.0, &suv), MessageKey::Large(RateTier::Low));
    }

    #[test]
    fn test_light_rule_ignores_rate() {
        let kei = profile(Category::Kei, Powertrain::Gasoline, 900.0);
        assert_eq!(MessageKey::select(50.0, &kei), MessageKey::LightAndNimble);
        assert_eq!(MessageKey::select(99.0, &kei), MessageKey::LightAndNimble);

        // weight alone is enough
        let light_compact = profile(Category::Compact, Powertrain::Gasoline, 999.0);
        assert_eq!(MessageKey::select(90.0, &light_compact), MessageKey::LightAndNimble);
    }

    #[test]
    fn test_generic_rules() {
        let sedan = profile(Category::Sedan, Powertrain::Gasoline, 1400.0);
        assert_eq!(MessageKey::select(80.0, &sedan), MessageKey::GenericHigh);
        assert_eq!(MessageKey::select(60.0, &sedan), MessageKey::GenericBalanced);
        assert_eq!(MessageKey::select(f64::NAN, &sedan), MessageKey::GenericBalanced);
    }

    #[test]
    fn test_message_keys_encode_context() {
        assert_eq!(
            MessageKey::ElectrifiedExceeded(Category::Suv).key(),
            "exceeded.electrified.suv"
        );
        assert_eq!(MessageKey::Sports(RateTier::Low).key(), "sports.low");
        assert_eq!(MessageKey::Large(RateTier::High).key(), "large.high");
        assert_eq!(MessageKey::LightAndNimble.to_string(), "light");
    }

    #[test]
    fn test_message_keys_hash_to_distinct_entries() {
        let tiers = [RateTier::Exceeded, RateTier::High, RateTier::Low];
        let mut keys: HashSet<MessageKey> = Category::ALL
            .iter()
            .map(|c| MessageKey::ElectrifiedExceeded(*c))
            .collect();
        keys.extend(tiers.iter().map(|t| MessageKey::Sports(*t)));
        keys.extend(tiers.iter().map(|t| MessageKey::Large(*t)));
        keys.extend([
            MessageKey::CombustionExceeded,
            MessageKey::LightAndNimble,
            MessageKey::GenericHigh,
            MessageKey::GenericBalanced,
            MessageKey::Sports(RateTier::Low),
        ]);
        assert_eq!(keys.len(), 16);

        let dotted: HashSet<String> = keys.iter().map(|k| k.key()).collect();
        assert_eq!(dotted.len(), keys.len());
    }

    #[test]
    fn test_evaluate_diesel_jc08() {
        let measurement = Measurement::new(12.0, TestCycle::Jc08).unwrap();
        let result = evaluate(
            &measurement,
            &profile(Category::Suv, Powertrain::Diesel, 2800.0),
        );
        assert_eq!(result.converted_value, 10.3);
        assert_eq!(result.target_value, 10.5);
        assert!((result.achievement_rate - 98.095).abs() < 0.01);
        assert_eq!(result.stars.as_f64(), 4.5);
        assert_eq!(result.tier(), RateTier::High);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let measurement = Measurement::new(25.0, TestCycle::Wltc).unwrap();
        let result = evaluate(
            &measurement,
            &profile(Category::Sedan, Powertrain::Gasoline, 1500.0),
        );
        let json = serde_json::to_value(result).unwrap();
        assert_eq!(json["targetValue"], 23.8);
        assert_eq!(json["stars"], 5.0);
        assert_eq!(json["messageKey"], "exceeded.combustion");
    }

    proptest! {
        #[test]
        fn prop_stars_non_decreasing(a in 0.0f64..300.0, b in 0.0f64..300.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(StarRating::from_rate(lo) <= StarRating::from_rate(hi));
        }

        #[test]
        fn prop_stars_in_half_steps(r in -50.0f64..500.0) {
            let stars = StarRating::from_rate(r);
            prop_assert!(stars <= StarRating::MAX);
            prop_assert_eq!(stars.as_f64() * 2.0, f64::from(stars.half_stars()));
        }
    }
}
