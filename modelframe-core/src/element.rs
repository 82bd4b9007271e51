use crate::params::ViewerParameters;

/// Tag name of the external viewer custom element.
pub const VIEWER_TAG: &str = "model-viewer";

/// The `id` attribute given to the constructed element; the frame height
/// reporter looks the element up by this id.
pub const VIEWER_ID: &str = "model-viewer";

/// Id of the page element the viewer (or a loading/error state) lives in.
pub const CONTAINER_ID: &str = "model-container";

/// Pinned module script that registers the viewer custom element.
pub const VIEWER_SCRIPT_URL: &str =
    "https://unpkg.com/@google/model-viewer/dist/model-viewer.min.js";

/// Label used when neither alt text nor a title was supplied.
pub const GENERIC_LABEL: &str = "3D model viewer";

/// Text shown while the model is being fetched.
pub const LOADING_TEXT: &str = "Loading 3D Model...";

const AR_MODES: &str = "webxr scene-viewer quick-look";

/// The derived presentation surface for one page load: the ordered
/// attribute list plus everything that cannot be expressed as a flat
/// attribute (AR child elements, the a11y property, the page title, the
/// container's aspect padding).
///
/// Derivation is pure; the DOM layer applies the state verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerElementState {
    /// Attributes in application order. An empty value is a boolean
    /// attribute (`camera-controls`, `ar`, ...).
    pub attributes: Vec<(&'static str, String)>,
    /// Text for the `<button slot="ar-button">` child, when supplied.
    pub ar_button_label: Option<String>,
    /// Text for the `#ar-prompt` child, when supplied.
    pub ar_prompt: Option<String>,
    /// Structured accessibility descriptor, set as a property rather
    /// than an attribute.
    pub a11y: Option<serde_json::Value>,
    /// Document title, when a non-empty title parameter was given.
    pub page_title: Option<String>,
    /// `padding-bottom` percentage for the container, `(height/width)*100`.
    pub aspect_padding: String,
}

impl ViewerElementState {
    /// Derive the full presentation surface from sanitised parameters.
    pub fn derive(params: &ViewerParameters) -> Self {
        let title = non_empty(params.title.as_deref());
        let label = non_empty(params.alt_text.as_deref())
            .or(title)
            .unwrap_or(GENERIC_LABEL);

        let mut attributes: Vec<(&'static str, String)> = vec![
            ("id", VIEWER_ID.to_string()),
            ("camera-controls", String::new()),
        ];
        if params.auto_rotate {
            attributes.push(("auto-rotate", String::new()));
        }
        attributes.push(("min-camera-orbit", orbit_limit(params.min_zoom)));
        attributes.push(("max-camera-orbit", orbit_limit(params.max_zoom)));
        attributes.push(("field-of-view", degrees(params.field_of_view)));
        attributes.push(("rotation-per-second", degrees(params.rotation_speed)));
        attributes.push(("touch-action", "pan-y pinch-zoom".to_string()));
        attributes.push(("interaction-prompt", "auto".to_string()));
        attributes.push(("interaction-prompt-style", "basic".to_string()));
        attributes.push(("interaction-prompt-threshold", "0".to_string()));
        attributes.push(("camera-orbit", "0deg 75deg 105%".to_string()));
        attributes.push(("min-field-of-view", "10deg".to_string()));
        attributes.push(("max-field-of-view", "90deg".to_string()));
        attributes.push(("interpolation-decay", "200".to_string()));
        attributes.push(("alt", label.to_string()));
        attributes.push(("aria-label", title.unwrap_or(GENERIC_LABEL).to_string()));
        attributes.push(("src", params.model_url.clone()));
        if let Some(image) = non_empty(params.environment_image.as_deref()) {
            attributes.push(("environment-image", image.to_string()));
        }
        if let Some(image) = non_empty(params.skybox_image.as_deref()) {
            attributes.push(("skybox-image", image.to_string()));
        }
        attributes.push(("shadow-intensity", fmt_number(params.shadow_intensity)));
        if let Some(usdz) = non_empty(params.usdz_url.as_deref()) {
            attributes.push(("ios-src", usdz.to_string()));
        }
        if params.ar_button {
            attributes.push(("ar", String::new()));
            attributes.push(("ar-modes", AR_MODES.to_string()));
            attributes.push(("ar-scale", "fixed".to_string()));
            attributes.push(("ar-placement", "floor".to_string()));
        }

        let (ar_button_label, ar_prompt) = if params.ar_button {
            (
                non_empty(params.ar_button_label.as_deref()).map(str::to_string),
                non_empty(params.ar_prompt.as_deref()).map(str::to_string),
            )
        } else {
            (None, None)
        };

        let ratio = (params.height / params.width) * 100.0;

        ViewerElementState {
            attributes,
            ar_button_label,
            ar_prompt,
            a11y: params.a11y.clone(),
            page_title: title.map(str::to_string),
            aspect_padding: format!("{}%", fmt_number(ratio)),
        }
    }

    /// Look up a derived attribute value. Test/inspection helper.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr, _)| *attr == name)
            .map(|(_, value)| value.as_str())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn orbit_limit(zoom: f64) -> String {
    format!("auto auto {}%", fmt_number(zoom))
}

fn degrees(value: f64) -> String {
    format!("{}deg", fmt_number(value))
}

/// Format a float the way the browser stringifies numbers: no trailing
/// `.0` on whole values, `Infinity` spelled out.
fn fmt_number(value: f64) -> String {
    if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_params() -> ViewerParameters {
        ViewerParameters::with_model("https://ex.com/a.glb")
    }

    #[test]
    fn test_default_attribute_list() {
        let state = ViewerElementState::derive(&base_params());
        let expected: Vec<(&str, &str)> = vec![
            ("id", "model-viewer"),
            ("camera-controls", ""),
            ("auto-rotate", ""),
            ("min-camera-orbit", "auto auto 25%"),
            ("max-camera-orbit", "auto auto 200%"),
            ("field-of-view", "45deg"),
            ("rotation-per-second", "30deg"),
            ("touch-action", "pan-y pinch-zoom"),
            ("interaction-prompt", "auto"),
            ("interaction-prompt-style", "basic"),
            ("interaction-prompt-threshold", "0"),
            ("camera-orbit", "0deg 75deg 105%"),
            ("min-field-of-view", "10deg"),
            ("max-field-of-view", "90deg"),
            ("interpolation-decay", "200"),
            ("alt", "3D model viewer"),
            ("aria-label", "3D model viewer"),
            ("src", "https://ex.com/a.glb"),
            ("shadow-intensity", "1"),
            ("ar", ""),
            ("ar-modes", "webxr scene-viewer quick-look"),
            ("ar-scale", "fixed"),
            ("ar-placement", "floor"),
        ];
        let got: Vec<(&str, &str)> = state
            .attributes
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_default_aspect_padding_is_16_by_9() {
        let state = ViewerElementState::derive(&base_params());
        assert_eq!(state.aspect_padding, "56.25%");
    }

    #[test]
    fn test_aspect_padding_square() {
        let mut params = base_params();
        params.width = 50.0;
        params.height = 50.0;
        let state = ViewerElementState::derive(&params);
        assert_eq!(state.aspect_padding, "100%");
    }

    #[test]
    fn test_zoom_and_rotation_formatting() {
        let mut params = base_params();
        params.min_zoom = 12.5;
        params.max_zoom = 150.0;
        params.field_of_view = 60.0;
        params.rotation_speed = 0.0;
        let state = ViewerElementState::derive(&params);
        assert_eq!(state.attribute("min-camera-orbit"), Some("auto auto 12.5%"));
        assert_eq!(state.attribute("max-camera-orbit"), Some("auto auto 150%"));
        assert_eq!(state.attribute("field-of-view"), Some("60deg"));
        assert_eq!(state.attribute("rotation-per-second"), Some("0deg"));
    }

    #[test]
    fn test_auto_rotate_disabled_drops_attribute() {
        let mut params = base_params();
        params.auto_rotate = false;
        let state = ViewerElementState::derive(&params);
        assert_eq!(state.attribute("auto-rotate"), None);
        // The rest of the list is unaffected
        assert_eq!(state.attribute("camera-controls"), Some(""));
    }

    #[test]
    fn test_ar_disabled_drops_block_and_children() {
        let mut params = base_params();
        params.ar_button = false;
        params.ar_button_label = Some("View in AR".to_string());
        params.ar_prompt = Some("Move your phone".to_string());
        let state = ViewerElementState::derive(&params);
        assert_eq!(state.attribute("ar"), None);
        assert_eq!(state.attribute("ar-modes"), None);
        assert_eq!(state.attribute("ar-scale"), None);
        assert_eq!(state.attribute("ar-placement"), None);
        assert_eq!(state.ar_button_label, None);
        assert_eq!(state.ar_prompt, None);
    }

    #[test]
    fn test_ar_children_only_when_supplied() {
        let state = ViewerElementState::derive(&base_params());
        assert_eq!(state.ar_button_label, None);
        assert_eq!(state.ar_prompt, None);

        let mut params = base_params();
        params.ar_button_label = Some("View in AR".to_string());
        params.ar_prompt = Some("Point at the floor".to_string());
        let state = ViewerElementState::derive(&params);
        assert_eq!(state.ar_button_label.as_deref(), Some("View in AR"));
        assert_eq!(state.ar_prompt.as_deref(), Some("Point at the floor"));
    }

    #[test]
    fn test_alt_fallback_chain() {
        let mut params = base_params();
        params.alt_text = Some("A wooden chair".to_string());
        params.title = Some("Chair".to_string());
        let state = ViewerElementState::derive(&params);
        assert_eq!(state.attribute("alt"), Some("A wooden chair"));
        assert_eq!(state.attribute("aria-label"), Some("Chair"));

        let mut params = base_params();
        params.title = Some("Chair".to_string());
        let state = ViewerElementState::derive(&params);
        assert_eq!(state.attribute("alt"), Some("Chair"));
        assert_eq!(state.attribute("aria-label"), Some("Chair"));
    }

    #[test]
    fn test_empty_strings_fall_through_fallback_chain() {
        let mut params = base_params();
        params.alt_text = Some(String::new());
        params.title = Some(String::new());
        let state = ViewerElementState::derive(&params);
        assert_eq!(state.attribute("alt"), Some("3D model viewer"));
        assert_eq!(state.attribute("aria-label"), Some("3D model viewer"));
        assert_eq!(state.page_title, None);
    }

    #[test]
    fn test_optional_images_and_usdz() {
        let mut params = base_params();
        params.environment_image = Some("https://ex.com/env.hdr".to_string());
        params.skybox_image = Some(String::new());
        params.usdz_url = Some("https://ex.com/a.usdz".to_string());
        let state = ViewerElementState::derive(&params);
        assert_eq!(
            state.attribute("environment-image"),
            Some("https://ex.com/env.hdr")
        );
        assert_eq!(state.attribute("skybox-image"), None);
        assert_eq!(state.attribute("ios-src"), Some("https://ex.com/a.usdz"));
    }

    #[test]
    fn test_shadow_intensity_formatting() {
        let mut params = base_params();
        params.shadow_intensity = 0.5;
        let state = ViewerElementState::derive(&params);
        assert_eq!(state.attribute("shadow-intensity"), Some("0.5"));

        params.shadow_intensity = f64::INFINITY;
        let state = ViewerElementState::derive(&params);
        assert_eq!(state.attribute("shadow-intensity"), Some("Infinity"));
    }

    #[test]
    fn test_page_title_from_decoded_title() {
        let mut params = base_params();
        params.title = Some("My Model".to_string());
        let state = ViewerElementState::derive(&params);
        assert_eq!(state.page_title.as_deref(), Some("My Model"));
    }

    #[test]
    fn test_a11y_carried_as_property_value() {
        let mut params = base_params();
        params.a11y = Some(json!({ "front": "a chair seen from the front" }));
        let state = ViewerElementState::derive(&params);
        assert_eq!(
            state.a11y,
            Some(json!({ "front": "a chair seen from the front" }))
        );
        assert_eq!(state.attribute("a11y"), None);
    }
}
