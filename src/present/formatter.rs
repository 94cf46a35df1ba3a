use super::messages::{category_name, message_text, powertrain_name};
use crate::config::ShareConfig;
use crate::fuel::{Measurement, RateTier, RatingResult, StarRating};
use crate::vehicle::models::{Category, VehicleProfile};
use serde::Serialize;

const FULL_STAR: char = '★';
const HALF_STAR: char = '⯪';
const EMPTY_STAR: char = '☆';

pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// One decimal, the way every figure is shown to the user
pub fn format_figure(value: f64) -> String {
    format!("{:.1}", value)
}

/// Five glyphs, e.g. `★★★⯪☆` for 3.5 stars
pub fn render_stars(stars: StarRating) -> String {
    let full = usize::from(stars.full_stars());
    (0..5)
        .map(|i| {
            if i < full {
                FULL_STAR
            } else if i == full && stars.has_half() {
                HALF_STAR
            } else {
                EMPTY_STAR
            }
        })
        .collect()
}

/// Same five stars as inline-styled spans for the result sticker
pub fn render_stars_html(stars: StarRating) -> String {
    let full = usize::from(stars.full_stars());
    let mut html = String::new();
    for i in 0..5 {
        if i < full {
            html.push_str(r#"<span style="color:var(--star-gold);">★</span>"#);
        } else if i == full && stars.has_half() {
            html.push_str(concat!(
                r#"<span style="position:relative; display:inline-block;">"#,
                r#"<span style="position:absolute; left:0; width:50%; overflow:hidden; color:var(--star-gold);">★</span>"#,
                r#"<span style="color:var(--star-empty);">★</span>"#,
                "</span>"
            ));
        } else {
            html.push_str(r#"<span style="color:var(--star-empty);">★</span>"#);
        }
    }
    html
}

/// CSS colour for the achievement percentage
pub fn rate_color(tier: RateTier) -> &'static str {
    match tier {
        RateTier::Exceeded => "var(--success-color)",
        RateTier::High => "var(--star-gold)",
        RateTier::Low => "#ff3b30",
    }
}

/// Free text for a native share sheet or a compose-intent link
pub fn share_text(result: &RatingResult, category: Category, share: &ShareConfig) -> String {
    let hashtags = share
        .hashtags
        .iter()
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "私の愛車({})の2030年度燃費基準達成率は【{}%】！\n獲得した星は【{}個】でした！\n最新の燃費基準を皆も測ってみよう！ 🚗✨\n{}",
        category_name(category),
        format_figure(result.achievement_rate),
        result.stars,
        hashtags
    )
    .trim_end()
    .to_string()
}

/// Multi-line report for the terminal
pub fn format_summary(
    result: &RatingResult,
    profile: &VehicleProfile,
    measurement: &Measurement,
) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Vehicle: {} / {} / {} kg",
        category_name(profile.category),
        powertrain_name(profile.powertrain),
        profile.weight
    ));
    if measurement.unit().is_reference() {
        lines.push(format!(
            "Fuel economy: {} km/L (WLTC)",
            format_figure(result.converted_value)
        ));
    } else {
        lines.push(format!(
            "Fuel economy: {} km/L ({}) -> {} km/L (WLTC)",
            measurement.value(),
            measurement.unit(),
            format_figure(result.converted_value)
        ));
    }
    lines.push(format!("Target: {} km/L", format_figure(result.target_value)));
    lines.push(format!(
        "Achievement: {}%",
        format_figure(result.achievement_rate)
    ));
    lines.push(format!("Stars: {} ({})", render_stars(result.stars), result.stars));
    lines.push(String::new());
    lines.push(message_text(&result.message_key));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuel::{evaluate, TestCycle};
    use crate::vehicle::models::Powertrain;
    use pretty_assertions::assert_eq;

    fn sample() -> (RatingResult, VehicleProfile, Measurement) {
        let profile = VehicleProfile {
            category: Category::Suv,
            powertrain: Powertrain::Diesel,
            weight: 2800.0,
        };
        let measurement = Measurement::new(12.0, TestCycle::Jc08).unwrap();
        (evaluate(&measurement, &profile), profile, measurement)
    }

    #[test]
    fn test_render_stars() {
        assert_eq!(render_stars(StarRating::from_rate(100.0)), "★★★★★");
        assert_eq!(render_stars(StarRating::from_rate(86.0)), "★★★⯪☆");
        assert_eq!(render_stars(StarRating::from_rate(55.0)), "⯪☆☆☆☆");
        assert_eq!(render_stars(StarRating::from_rate(0.0)), "☆☆☆☆☆");
    }

    #[test]
    fn test_render_stars_html_counts() {
        let html = render_stars_html(StarRating::from_rate(96.0));
        assert_eq!(html.matches("var(--star-gold)").count(), 5);
        assert_eq!(html.matches("var(--star-empty)").count(), 1);
        assert_eq!(html.matches("width:50%").count(), 1);
    }

    #[test]
    fn test_rate_color() {
        assert_eq!(rate_color(RateTier::Exceeded), "var(--success-color)");
        assert_eq!(rate_color(RateTier::Low), "#ff3b30");
    }

    #[test]
    fn test_share_text() {
        let (result, profile, _) = sample();
        let text = share_text(&result, profile.category, &ShareConfig::default());
        assert_eq!(
            text,
            "私の愛車(SUV)の2030年度燃費基準達成率は【98.1%】！\n獲得した星は【4.5個】でした！\n最新の燃費基準を皆も測ってみよう！ 🚗✨\n#EcoCalcPro #2030燃費基準"
        );
    }

    #[test]
    fn test_share_text_without_hashtags() {
        let (result, profile, _) = sample();
        let share = ShareConfig {
            hashtags: vec![],
            ..ShareConfig::default()
        };
        assert!(share_text(&result, profile.category, &share).ends_with("🚗✨"));
    }

    #[test]
    fn test_summary_shows_conversion() {
        let (result, profile, measurement) = sample();
        let summary = format_summary(&result, &profile, &measurement);
        assert!(summary.contains("12 km/L (JC08) -> 10.3 km/L (WLTC)"));
        assert!(summary.contains("Target: 10.5 km/L"));
        assert!(summary.contains("Achievement: 98.1%"));
        assert!(summary.contains("★★★★⯪ (4.5)"));
        assert!(summary.ends_with("パワートレインの恩恵ですね！"));
    }
}
