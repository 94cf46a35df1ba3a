// WebAssembly bindings for the calculator page
use crate::config::Config;
use crate::fuel::{self, Measurement, TestCycle};
use crate::present;
use crate::vehicle::{Category, Powertrain, ProfileBuilder};
use crate::wizard::{Outcome, Transition, Wizard};
use wasm_bindgen::prelude::*;

fn load_config(config_content: Option<String>) -> Result<Config, JsValue> {
    match config_content {
        Some(content) => Config::load_from_str(&content)
            .map_err(|e| JsValue::from_str(&format!("Failed to load config: {}", e))),
        None => Ok(Config::empty()),
    }
}

fn parse_tag<T: std::str::FromStr>(tag: &str) -> Result<T, JsValue>
where
    T::Err: std::fmt::Display,
{
    tag.parse::<T>().map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Everything the result panel renders, as one JSON object
fn outcome_json(outcome: &Outcome, config: &Config) -> serde_json::Value {
    let result = &outcome.result;
    serde_json::json!({
        "profile": outcome.profile,
        "measurement": outcome.measurement,
        "result": result,
        "message": present::message_text(&result.message_key),
        "categoryName": present::category_name(outcome.profile.category),
        "starsHtml": present::render_stars_html(result.stars),
        "rateColor": present::rate_color(result.tier()),
        "shareText": present::share_text(result, outcome.profile.category, &config.share),
        "warnings": outcome
            .validation
            .warnings
            .iter()
            .map(|w| w.message.clone())
            .collect::<Vec<_>>(),
    })
}

#[wasm_bindgen]
pub struct EcoCalcWasm {
    config: Config,
}

#[wasm_bindgen]
impl EcoCalcWasm {
    /// config_content: optional TOML text
    #[wasm_bindgen(constructor)]
    pub fn new(config_content: Option<String>) -> Result<EcoCalcWasm, JsValue> {
        Ok(Self {
            config: load_config(config_content)?,
        })
    }

    /// Convert a figure to WLTC km/L; unit is "wltc", "jc08" or "1015"
    #[wasm_bindgen]
    pub fn convert(&self, value: f64, unit: &str) -> Result<f64, JsValue> {
        self.config
            .limits
            .check_measurement(value)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(fuel::convert(value, parse_tag::<TestCycle>(unit)?))
    }

    #[wasm_bindgen]
    pub fn estimate_target(&self, weight: f64, powertrain: &str) -> Result<f64, JsValue> {
        Ok(fuel::estimate(weight, parse_tag::<Powertrain>(powertrain)?))
    }

    /// Rate a vehicle in one call. Empty category or powertrain falls back to
    /// the configured defaults. Returns the result panel JSON.
    #[wasm_bindgen]
    pub fn evaluate(
        &self,
        category: Option<String>,
        powertrain: Option<String>,
        weight: f64,
        value: f64,
        unit: &str,
    ) -> Result<String, JsValue> {
        let mut builder = ProfileBuilder::new().weight(weight);
        if let Some(tag) = category.filter(|t| !t.is_empty()) {
            builder = builder.category(parse_tag::<Category>(&tag)?);
        }
        if let Some(tag) = powertrain.filter(|t| !t.is_empty()) {
            builder = builder.powertrain(parse_tag::<Powertrain>(&tag)?);
        }

        let (profile, validation) = builder
            .finalize(&self.config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        self.config
            .limits
            .check_measurement(value)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let measurement = Measurement::new(value, parse_tag::<TestCycle>(unit)?)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let outcome = Outcome {
            profile,
            measurement,
            result: fuel::evaluate(&measurement, &profile),
            validation,
        };

        serde_json::to_string(&outcome_json(&outcome, &self.config))
            .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
    }

    /// Returns {"value": number, "unit": tag|null} or null if the text is not a figure
    #[wasm_bindgen]
    pub fn parse_measurement(&self, text: &str) -> String {
        match fuel::parse_measurement(text) {
            Some((value, unit)) => serde_json::json!({ "value": value, "unit": unit }).to_string(),
            None => "null".to_string(),
        }
    }

    #[wasm_bindgen]
    pub fn category_name(&self, tag: &str) -> String {
        present::category_name_for_tag(tag).to_string()
    }

    #[wasm_bindgen]
    pub fn share_title(&self) -> String {
        self.config.share.title.clone()
    }

    /// Compose-intent link for browsers without a native share sheet
    #[wasm_bindgen]
    pub fn share_intent_url(&self, text: &str, page_url: &str) -> String {
        format!(
            "https://twitter.com/intent/tweet?text={}&url={}",
            String::from(js_sys::encode_uri_component(text)),
            String::from(js_sys::encode_uri_component(page_url))
        )
    }
}

/// Wizard state held on the Rust side; the page sends transitions as JSON
#[wasm_bindgen]
pub struct WizardWasm {
    config: Config,
    wizard: Wizard,
}

#[wasm_bindgen]
impl WizardWasm {
    #[wasm_bindgen(constructor)]
    pub fn new(config_content: Option<String>) -> Result<WizardWasm, JsValue> {
        let config = load_config(config_content)?;
        let wizard = Wizard::new(&config);
        Ok(Self { config, wizard })
    }

    /// transition_json: e.g. {"action":"selectCategory","category":"suv"}
    /// Returns the new state JSON. On error the state is unchanged.
    #[wasm_bindgen]
    pub fn apply(&mut self, transition_json: &str) -> Result<String, JsValue> {
        let transition: Transition = serde_json::from_str(transition_json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse transition: {}", e)))?;

        self.wizard = self
            .wizard
            .apply(transition, &self.config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(self.state())
    }

    #[wasm_bindgen]
    pub fn current_step(&self) -> u8 {
        self.wizard.step().index()
    }

    /// WLTC preview for a legacy-cycle entry, undefined otherwise
    #[wasm_bindgen]
    pub fn converted_preview(&self) -> Option<f64> {
        self.wizard.converted_preview()
    }

    #[wasm_bindgen]
    pub fn reset(&mut self) -> String {
        self.wizard = Wizard::new(&self.config);
        self.state()
    }

    #[wasm_bindgen]
    pub fn state(&self) -> String {
        let profile = self.wizard.profile();
        serde_json::json!({
            "step": self.wizard.step(),
            "stepIndex": self.wizard.step().index(),
            "category": profile.selected_category(),
            "powertrain": profile.selected_powertrain(),
            "weight": profile.entered_weight(),
            "unit": self.wizard.unit(),
            "value": self.wizard.raw_value(),
            "convertedPreview": self.wizard.converted_preview(),
            "outcome": self.wizard.outcome().map(|o| outcome_json(o, &self.config)),
        })
        .to_string()
    }
}
