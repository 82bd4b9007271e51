use url::Url;

use crate::error::{EmbedError, EmbedResult};

/// Raw builder-form values, one field per recognised query parameter.
///
/// Every field is the untouched string from its input (or absent); the
/// viewer-side sanitiser is the single place where clamping and
/// defaulting happen. Flag fields carry the literal `"false"` when the
/// corresponding checkbox is unticked and are absent otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedRequest {
    pub model: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub min_zoom: Option<String>,
    pub max_zoom: Option<String>,
    pub field_of_view: Option<String>,
    pub rotation_speed: Option<String>,
    pub auto_rotate: Option<String>,
    pub ar_button: Option<String>,
    pub environment_image: Option<String>,
    pub skybox_image: Option<String>,
    pub ar_button_label: Option<String>,
    pub ar_prompt: Option<String>,
    pub shadow_intensity: Option<String>,
    pub alt: Option<String>,
    pub a11y: Option<String>,
    pub usdz: Option<String>,
}

/// Compose the viewer page URL for a builder request.
///
/// Recognised non-empty fields are appended to `base` as query pairs in
/// the canonical parameter order. `title` and `a11y` get one explicit
/// percent-encode before the query serialiser's own pass, so they arrive
/// double-encoded and survive the viewer's second decode. A missing or
/// empty `model` refuses composition: the resulting URL would be dead on
/// arrival.
pub fn viewer_url(base: &Url, request: &EmbedRequest) -> EmbedResult<Url> {
    let model = non_empty(&request.model).ok_or(EmbedError::MissingModelUrl)?;

    let mut url = base.clone();
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("model", model);
        if let Some(title) = non_empty(&request.title) {
            pairs.append_pair("title", &percent_encode(title));
        }
        if let Some(value) = non_empty(&request.description) {
            pairs.append_pair("description", value);
        }
        if let Some(value) = non_empty(&request.width) {
            pairs.append_pair("width", value);
        }
        if let Some(value) = non_empty(&request.height) {
            pairs.append_pair("height", value);
        }
        if let Some(value) = non_empty(&request.min_zoom) {
            pairs.append_pair("minZoom", value);
        }
        if let Some(value) = non_empty(&request.max_zoom) {
            pairs.append_pair("maxZoom", value);
        }
        if let Some(value) = non_empty(&request.field_of_view) {
            pairs.append_pair("fieldOfView", value);
        }
        if let Some(value) = non_empty(&request.rotation_speed) {
            pairs.append_pair("rotationSpeed", value);
        }
        if let Some(value) = non_empty(&request.auto_rotate) {
            pairs.append_pair("autoRotate", value);
        }
        if let Some(value) = non_empty(&request.ar_button) {
            pairs.append_pair("arButton", value);
        }
        if let Some(value) = non_empty(&request.environment_image) {
            pairs.append_pair("environmentImage", value);
        }
        if let Some(value) = non_empty(&request.skybox_image) {
            pairs.append_pair("skyboxImage", value);
        }
        if let Some(value) = non_empty(&request.ar_button_label) {
            pairs.append_pair("arButtonLabel", value);
        }
        if let Some(value) = non_empty(&request.ar_prompt) {
            pairs.append_pair("arPrompt", value);
        }
        if let Some(value) = non_empty(&request.shadow_intensity) {
            pairs.append_pair("shadowIntensity", value);
        }
        if let Some(value) = non_empty(&request.alt) {
            pairs.append_pair("alt", value);
        }
        if let Some(a11y) = non_empty(&request.a11y) {
            pairs.append_pair("a11y", &percent_encode(a11y));
        }
        if let Some(value) = non_empty(&request.usdz) {
            pairs.append_pair("usdz", value);
        }
    }
    Ok(url)
}

/// Render the copyable `<iframe>` embed snippet for a composed viewer URL.
pub fn iframe_snippet(url: &Url) -> String {
    format!(
        "<iframe src=\"{}\" width=\"100%\" height=\"500\" frameborder=\"0\" \
         allow=\"autoplay; fullscreen; xr-spatial-tracking\" allowfullscreen></iframe>",
        escape_html(url.as_str())
    )
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Percent-encode the way `encodeURIComponent` does: everything except
/// ASCII alphanumerics and `- _ . ! ~ * ' ( )` becomes `%XX` per UTF-8
/// byte.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://lms.example.edu/tools/3d/viewer.html").unwrap()
    }

    fn minimal_request() -> EmbedRequest {
        EmbedRequest {
            model: Some("https://ex.com/a.glb".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_minimal_request_composes_model_only() {
        let url = viewer_url(&base(), &minimal_request()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://lms.example.edu/tools/3d/viewer.html?model=https%3A%2F%2Fex.com%2Fa.glb"
        );
    }

    #[test]
    fn test_missing_or_empty_model_refuses_composition() {
        let empty = EmbedRequest::default();
        assert_eq!(
            viewer_url(&base(), &empty),
            Err(EmbedError::MissingModelUrl)
        );

        let blank = EmbedRequest {
            model: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            viewer_url(&base(), &blank),
            Err(EmbedError::MissingModelUrl)
        );
    }

    #[test]
    fn test_fields_appear_in_canonical_order() {
        let request = EmbedRequest {
            model: Some("https://ex.com/a.glb".to_string()),
            usdz: Some("https://ex.com/a.usdz".to_string()),
            width: Some("16".to_string()),
            title: Some("Chair".to_string()),
            ..Default::default()
        };
        let url = viewer_url(&base(), &request).unwrap();
        let keys: Vec<String> = url
            .query_pairs()
            .map(|(key, _)| key.into_owned())
            .collect();
        assert_eq!(keys, vec!["model", "title", "width", "usdz"]);
    }

    #[test]
    fn test_empty_fields_are_skipped() {
        let request = EmbedRequest {
            model: Some("https://ex.com/a.glb".to_string()),
            description: Some(String::new()),
            alt: Some(String::new()),
            ..Default::default()
        };
        let url = viewer_url(&base(), &request).unwrap();
        assert!(!url.as_str().contains("description"));
        assert!(!url.as_str().contains("alt"));
    }

    #[test]
    fn test_title_is_double_encoded() {
        let request = EmbedRequest {
            model: Some("https://ex.com/a.glb".to_string()),
            title: Some("My Model".to_string()),
            ..Default::default()
        };
        let url = viewer_url(&base(), &request).unwrap();
        // First encode: "My%20Model"; the serialiser then encodes the '%'.
        assert!(url.as_str().contains("title=My%2520Model"));
    }

    #[test]
    fn test_a11y_is_double_encoded() {
        let request = EmbedRequest {
            model: Some("https://ex.com/a.glb".to_string()),
            a11y: Some("{\"alt\":\"chair\"}".to_string()),
            ..Default::default()
        };
        let url = viewer_url(&base(), &request).unwrap();
        assert!(url
            .as_str()
            .contains("a11y=%257B%2522alt%2522%253A%2522chair%2522%257D"));
    }

    #[test]
    fn test_base_query_is_replaced() {
        let base = Url::parse("https://lms.example.edu/viewer.html?stale=1").unwrap();
        let url = viewer_url(&base, &minimal_request()).unwrap();
        assert!(!url.as_str().contains("stale"));
        assert!(url.as_str().contains("model="));
    }

    #[test]
    fn test_percent_encode_matches_encode_uri_component() {
        assert_eq!(percent_encode("My Model"), "My%20Model");
        assert_eq!(percent_encode("{\"a\":1}"), "%7B%22a%22%3A1%7D");
        assert_eq!(percent_encode("a-b_c.d!e~f*g'h(i)j"), "a-b_c.d!e~f*g'h(i)j");
        assert_eq!(percent_encode("50%"), "50%25");
        // Multi-byte UTF-8 is escaped per byte
        assert_eq!(percent_encode("é"), "%C3%A9");
    }

    #[test]
    fn test_iframe_snippet_shape_and_escaping() {
        let url = viewer_url(&base(), &minimal_request()).unwrap();
        let snippet = iframe_snippet(&url);
        assert!(snippet.starts_with("<iframe src=\""));
        assert!(snippet.contains("width=\"100%\" height=\"500\""));
        assert!(snippet.contains("allow=\"autoplay; fullscreen; xr-spatial-tracking\""));
        assert!(snippet.ends_with("allowfullscreen></iframe>"));
        // Ampersands in the URL are escaped for the attribute context
        let request = EmbedRequest {
            model: Some("https://ex.com/a.glb".to_string()),
            width: Some("20".to_string()),
            ..Default::default()
        };
        let url = viewer_url(&base(), &request).unwrap();
        assert!(iframe_snippet(&url).contains("&amp;width=20"));
    }
}
