// Fuel economy arithmetic: test-cycle conversion, weight-based targets and
// star ratings. Everything here is pure; validation happens in the callers.

pub mod converter;
pub mod detector;
pub mod rating;
pub mod target;
pub mod types;

pub use converter::convert;
pub use detector::{looks_like_measurement, parse_measurement};
pub use rating::{evaluate, rate, MessageKey, RateTier, Rating, RatingResult, StarRating};
pub use target::estimate;
pub use types::{Measurement, TestCycle};
