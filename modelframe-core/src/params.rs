use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

pub const WIDTH_MIN: f64 = 1.0;
pub const WIDTH_MAX: f64 = 100.0;
pub const HEIGHT_MIN: f64 = 1.0;
pub const HEIGHT_MAX: f64 = 100.0;
pub const MIN_ZOOM_MIN: f64 = 10.0;
pub const MIN_ZOOM_MAX: f64 = 100.0;
pub const MAX_ZOOM_MIN: f64 = 100.0;
pub const MAX_ZOOM_MAX: f64 = 500.0;
pub const FIELD_OF_VIEW_MIN: f64 = 10.0;
pub const FIELD_OF_VIEW_MAX: f64 = 90.0;
pub const ROTATION_SPEED_MIN: f64 = 0.0;
pub const ROTATION_SPEED_MAX: f64 = 360.0;

pub const DEFAULT_WIDTH: f64 = 16.0;
pub const DEFAULT_HEIGHT: f64 = 9.0;
pub const DEFAULT_MIN_ZOOM: f64 = 25.0;
pub const DEFAULT_MAX_ZOOM: f64 = 200.0;
pub const DEFAULT_FIELD_OF_VIEW: f64 = 45.0;
pub const DEFAULT_ROTATION_SPEED: f64 = 30.0;
pub const DEFAULT_SHADOW_INTENSITY: f64 = 1.0;

/// Sanitised viewer configuration, built once per page load from the
/// query string and immutable afterwards.
///
/// Every bounded numeric field is guaranteed to lie within its declared
/// inclusive range; `shadow_intensity` is deliberately unclamped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewerParameters {
    /// Normalised absolute model URL. Required.
    pub model_url: String,
    /// Percent-decoded page/viewer title.
    pub title: Option<String>,
    pub description: Option<String>,
    pub width: f64,
    pub height: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub field_of_view: f64,
    pub rotation_speed: f64,
    pub auto_rotate: bool,
    pub ar_button: bool,
    pub environment_image: Option<String>,
    pub skybox_image: Option<String>,
    pub ar_button_label: Option<String>,
    pub ar_prompt: Option<String>,
    pub shadow_intensity: f64,
    pub alt_text: Option<String>,
    /// Parsed accessibility descriptor, absent when missing or malformed.
    pub a11y: Option<serde_json::Value>,
    pub usdz_url: Option<String>,
}

impl ViewerParameters {
    /// All-defaults parameters for the given model URL.
    pub fn with_model(model_url: impl Into<String>) -> Self {
        Self {
            model_url: model_url.into(),
            title: None,
            description: None,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            field_of_view: DEFAULT_FIELD_OF_VIEW,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            auto_rotate: true,
            ar_button: true,
            environment_image: None,
            skybox_image: None,
            ar_button_label: None,
            ar_prompt: None,
            shadow_intensity: DEFAULT_SHADOW_INTENSITY,
            alt_text: None,
            a11y: None,
            usdz_url: None,
        }
    }
}

/// Parse the longest leading float prefix of `raw`, the way the browser's
/// `parseFloat` does: optional leading whitespace and sign, decimal or
/// exponent forms, the literal `Infinity`. Trailing garbage is ignored
/// ("200x" parses as 200); no usable prefix yields `None`.
pub fn parse_float(raw: &str) -> Option<f64> {
    static FLOAT_PREFIX: OnceLock<Regex> = OnceLock::new();
    let re = FLOAT_PREFIX.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)").unwrap()
    });

    let trimmed = raw.trim_start();
    let matched = re.find(trimmed)?;
    matched.as_str().parse().ok()
}

/// Parse and clamp a numeric parameter.
///
/// A missing or unparseable value returns `fallback` unconditionally (the
/// fallback is trusted to be in range); a parsed value is clamped into
/// `[min, max]` inclusive.
pub fn sanitise_number(raw: Option<&str>, min: f64, max: f64, fallback: f64) -> f64 {
    match raw.and_then(parse_float) {
        Some(value) => value.clamp(min, max),
        None => fallback,
    }
}

/// Default-on flag convention: only the literal string "false" disables.
/// Absence, empty string, and every other spelling all mean enabled.
pub fn flag_enabled(raw: Option<&str>) -> bool {
    raw != Some("false")
}

/// Shadow intensity: prefix-parsed float, default 1, never clamped.
pub fn shadow_intensity(raw: Option<&str>) -> f64 {
    raw.and_then(parse_float).unwrap_or(DEFAULT_SHADOW_INTENSITY)
}
