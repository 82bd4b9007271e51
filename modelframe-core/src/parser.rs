use std::collections::HashMap;
use url::form_urlencoded;
use url::Url;

use crate::error::{EmbedError, EmbedResult};
use crate::params::*;

/// Decode `%XX` escapes, leaving malformed or truncated escapes verbatim.
///
/// This is the second decode applied to `title` and `a11y`, which the
/// builder double-encodes so they survive the query-string round trip.
/// Unlike the query-pair decode it never treats `+` as a space.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0usize;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hi = (bytes[i + 1] as char).to_digit(16);
            let lo = (bytes[i + 2] as char).to_digit(16);
            if let (Some(hi), Some(lo)) = (hi, lo) {
                out.push(((hi << 4) | lo) as u8);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Decode the query string into a key/value map. The first occurrence of
/// a repeated key wins, matching `URLSearchParams.get`.
fn first_value_pairs(query: &str) -> HashMap<String, String> {
    let mut pairs = HashMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        pairs
            .entry(key.into_owned())
            .or_insert_with(|| value.into_owned());
    }
    pairs
}

fn parse_a11y(raw: &str) -> Option<serde_json::Value> {
    // Malformed descriptors are silently discarded; the viewer proceeds
    // without accessibility metadata rather than failing the page.
    serde_json::from_str(&percent_decode(raw)).ok()
}

/// Build sanitised [`ViewerParameters`] from a viewer-page query string
/// (with or without the leading `?`).
///
/// `model` is required and must parse as an absolute URL; everything else
/// falls back to its documented default.
pub fn parse_viewer_query(query: &str) -> EmbedResult<ViewerParameters> {
    let query = query.strip_prefix('?').unwrap_or(query);
    let pairs = first_value_pairs(query);
    let get = |key: &str| pairs.get(key).map(String::as_str);

    let model = get("model").unwrap_or("");
    if model.is_empty() {
        return Err(EmbedError::MissingModelUrl);
    }
    let model_url = Url::parse(model)
        .map_err(|_| EmbedError::InvalidModelUrl {
            value: model.to_string(),
        })?
        .to_string();

    Ok(ViewerParameters {
        model_url,
        title: get("title").map(percent_decode),
        description: get("description").map(str::to_string),
        width: sanitise_number(get("width"), WIDTH_MIN, WIDTH_MAX, DEFAULT_WIDTH),
        height: sanitise_number(get("height"), HEIGHT_MIN, HEIGHT_MAX, DEFAULT_HEIGHT),
        min_zoom: sanitise_number(get("minZoom"), MIN_ZOOM_MIN, MIN_ZOOM_MAX, DEFAULT_MIN_ZOOM),
        max_zoom: sanitise_number(get("maxZoom"), MAX_ZOOM_MIN, MAX_ZOOM_MAX, DEFAULT_MAX_ZOOM),
        field_of_view: sanitise_number(
            get("fieldOfView"),
            FIELD_OF_VIEW_MIN,
            FIELD_OF_VIEW_MAX,
            DEFAULT_FIELD_OF_VIEW,
        ),
        rotation_speed: sanitise_number(
            get("rotationSpeed"),
            ROTATION_SPEED_MIN,
            ROTATION_SPEED_MAX,
            DEFAULT_ROTATION_SPEED,
        ),
        auto_rotate: flag_enabled(get("autoRotate")),
        ar_button: flag_enabled(get("arButton")),
        environment_image: get("environmentImage").map(str::to_string),
        skybox_image: get("skyboxImage").map(str::to_string),
        ar_button_label: get("arButtonLabel").map(str::to_string),
        ar_prompt: get("arPrompt").map(str::to_string),
        shadow_intensity: shadow_intensity(get("shadowIntensity")),
        alt_text: get("alt").map(str::to_string),
        a11y: get("a11y").and_then(parse_a11y),
        usdz_url: get("usdz").map(str::to_string),
    })
}
