//! Builder page: URL validation feedback and embed-code generation.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use url::Url;
use web_sys::{Document, Element, Event, HtmlInputElement, Window};

use modelframe_core::{
    iframe_snippet, validate_url, viewer_url, EmbedRequest, EmbedResult, Validation,
};

use crate::{config, dom, resize};

const MODEL_INPUT_ID: &str = "modelUrl";
const USDZ_INPUT_ID: &str = "usdzUrl";
const GENERATE_BTN_ID: &str = "generateBtn";
const EMBED_CONTAINER_SELECTOR: &str = ".embed-code-container";
const AGGREGATE_ERROR: &str =
    "Please fix the URL validation errors before generating the embed code.";

/// Keeps the page's event listeners alive for its lifetime.
struct BuilderPage {
    listeners: RefCell<Vec<EventListener>>,
}

thread_local! {
    static BUILDER_PAGE: RefCell<Option<Rc<BuilderPage>>> = RefCell::new(None);
}

/// Boot the builder page.
pub fn start() {
    let window = dom::window();
    let document = dom::document();
    if let Err(err) = run(&window, &document) {
        log::error!("builder bootstrap failed: {err}");
    }
}

fn run(window: &Window, document: &Document) -> EmbedResult<()> {
    let model_input = dom::require_input(document, MODEL_INPUT_ID)?;
    let usdz_input = dom::require_input(document, USDZ_INPUT_ID)?;
    let generate = dom::require_element(document, GENERATE_BTN_ID)?;

    let page = Rc::new(BuilderPage {
        listeners: RefCell::new(Vec::new()),
    });

    // Feedback on blur only, not per keystroke.
    for (input, kind) in [(model_input, "model"), (usdz_input, "USDZ")] {
        let doc = document.clone();
        let target = input.clone();
        let listener = EventListener::new(&input, "blur", move |_event: &Event| {
            let validation = validate_url(&target.value(), kind, &config::allowlist());
            apply_feedback(&doc, &target, &validation);
        });
        page.listeners.borrow_mut().push(listener);
    }

    let doc = document.clone();
    let listener = EventListener::new(&generate, "click", move |_event: &Event| {
        generate_embed(&doc);
    });
    page.listeners.borrow_mut().push(listener);

    page.listeners
        .borrow_mut()
        .extend(resize::install(window, document));
    BUILDER_PAGE.with(|slot| {
        *slot.borrow_mut() = Some(page);
    });
    Ok(())
}

/// Paint a validation outcome onto an input, Bootstrap-style.
///
/// Idempotent: any existing feedback sibling and state classes are
/// removed before the new state is applied, so repeated calls never
/// stack indicators. An empty field stays neutral.
pub fn apply_feedback(document: &Document, input: &HtmlInputElement, validation: &Validation) {
    let Some(parent) = input.parent_element() else {
        return;
    };
    if let Ok(Some(feedback)) = parent.query_selector(".invalid-feedback") {
        feedback.remove();
    }
    let classes = input.class_list();
    let _ = classes.remove_2("is-valid", "is-invalid");

    if input.value().is_empty() {
        return;
    }
    match validation {
        Validation::Valid => {
            let _ = classes.add_1("is-valid");
        }
        Validation::Invalid { message } => {
            let _ = classes.add_1("is-invalid");
            let _ = parent.append_child(&dom::text_div(document, "invalid-feedback", message));
        }
    }
}

/// Re-validate both URL fields, painting feedback on each. True when
/// every field passes.
pub fn validate_all_urls(document: &Document) -> bool {
    let allowlist = config::allowlist();
    let mut all_valid = true;
    for (id, kind) in [(MODEL_INPUT_ID, "model"), (USDZ_INPUT_ID, "USDZ")] {
        let Some(input) = dom::optional_input(document, id) else {
            continue;
        };
        let validation = validate_url(&input.value(), kind, &allowlist);
        all_valid &= validation.is_valid();
        apply_feedback(document, &input, &validation);
    }
    all_valid
}

fn generate_embed(document: &Document) {
    let Ok(Some(output)) = document.query_selector(EMBED_CONTAINER_SELECTOR) else {
        log::error!("embed code container not found");
        return;
    };
    remove_banner(document);

    if !validate_all_urls(document) {
        prepend_banner(document, &output, AGGREGATE_ERROR);
        return;
    }

    let Some(base) = viewer_base(document) else {
        return;
    };
    match viewer_url(&base, &read_request(document)) {
        Ok(url) => render_embed_output(document, &output, &url),
        Err(err) => prepend_banner(document, &output, &err.to_string()),
    }
}

/// The viewer page lives next to the builder page.
fn viewer_base(document: &Document) -> Option<Url> {
    let href = document.url().unwrap_or_default();
    match Url::parse(&href).and_then(|url| url.join("viewer.html")) {
        Ok(base) => Some(base),
        Err(err) => {
            log::error!("builder page URL '{href}' cannot anchor the viewer link: {err}");
            None
        }
    }
}

/// Read the form into a raw request. Empty fields are absent; an
/// unticked checkbox becomes the literal `"false"` and a ticked one is
/// absent (flags default on).
fn read_request(document: &Document) -> EmbedRequest {
    EmbedRequest {
        model: field(document, MODEL_INPUT_ID),
        title: field(document, "title"),
        description: field(document, "description"),
        width: field(document, "width"),
        height: field(document, "height"),
        min_zoom: field(document, "minZoom"),
        max_zoom: field(document, "maxZoom"),
        field_of_view: field(document, "fieldOfView"),
        rotation_speed: field(document, "rotationSpeed"),
        auto_rotate: flag(document, "autoRotate"),
        ar_button: flag(document, "arButton"),
        environment_image: field(document, "environmentImage"),
        skybox_image: field(document, "skyboxImage"),
        ar_button_label: field(document, "arButtonLabel"),
        ar_prompt: field(document, "arPrompt"),
        shadow_intensity: field(document, "shadowIntensity"),
        alt: field(document, "alt"),
        a11y: field(document, "a11y"),
        usdz: field(document, USDZ_INPUT_ID),
    }
}

fn field(document: &Document, id: &str) -> Option<String> {
    dom::optional_input(document, id)
        .map(|input| input.value())
        .filter(|value| !value.is_empty())
}

fn flag(document: &Document, id: &str) -> Option<String> {
    let input = dom::optional_input(document, id)?;
    if input.checked() {
        None
    } else {
        Some("false".to_string())
    }
}

fn remove_banner(document: &Document) {
    if let Ok(Some(existing)) = document.query_selector(".error-message") {
        existing.remove();
    }
}

fn prepend_banner(document: &Document, output: &Element, text: &str) {
    let banner = dom::text_div(document, "error-message", text);
    let _ = output.insert_before(&banner, output.first_child().as_ref());
}

/// Put the copyable snippet into the output container, replacing any
/// previous one.
fn render_embed_output(document: &Document, output: &Element, url: &Url) {
    let code = match output.query_selector("code.embed-code") {
        Ok(Some(code)) => code,
        _ => {
            let code = document.create_element("code").expect("create code");
            code.set_class_name("embed-code");
            let _ = output.append_child(&code);
            code
        }
    };
    code.set_text_content(Some(&iframe_snippet(url)));
}
