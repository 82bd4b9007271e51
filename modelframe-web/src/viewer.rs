//! Viewer page bootstrap: query string in, configured viewer element
//! (or a terminal error state) in the page.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::Promise;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, Element, ErrorEvent, Event, HtmlElement, HtmlScriptElement, Window};

use modelframe_core::element::{CONTAINER_ID, LOADING_TEXT, VIEWER_SCRIPT_URL, VIEWER_TAG};
use modelframe_core::{parse_viewer_query, EmbedError, EmbedResult, ViewerElementState};

use crate::{dom, resize};

/// Keeps the page's event listeners alive for its lifetime.
struct ViewerPage {
    listeners: RefCell<Vec<EventListener>>,
}

thread_local! {
    static VIEWER_PAGE: RefCell<Option<Rc<ViewerPage>>> = RefCell::new(None);
}

/// Boot the viewer page. A fatal error is rendered into the model
/// container; there is no caller to hand it back to.
pub fn start() {
    spawn_local(async {
        let window = dom::window();
        let document = dom::document();
        let page = Rc::new(ViewerPage {
            listeners: RefCell::new(Vec::new()),
        });
        if let Err(err) = run(&window, &document, &page).await {
            log::error!("viewer bootstrap failed: {err}");
            if let Ok(container) = dom::require_element(&document, CONTAINER_ID) {
                render_fatal(&document, &container, &err);
            }
        }
        // The reporter runs regardless of outcome: a fatal-error page
        // still reports its height to the embedding frame.
        page.listeners
            .borrow_mut()
            .extend(resize::install(&window, &document));
        VIEWER_PAGE.with(|slot| {
            *slot.borrow_mut() = Some(page);
        });
    });
}

async fn run(window: &Window, document: &Document, page: &ViewerPage) -> EmbedResult<()> {
    let query = window.location().search().unwrap_or_default();
    let params = parse_viewer_query(&query)?;
    let state = ViewerElementState::derive(&params);

    let container = dom::require_element(document, CONTAINER_ID)?;
    render_loading(document, &container);

    if !viewer_defined(window) {
        load_viewer_script(document).await?;
    }

    if let Some(title) = &state.page_title {
        document.set_title(title);
    }

    let viewer = build_viewer_element(document, &state);
    // Wired before attach so a synchronous load failure is not missed.
    let error_document = document.clone();
    let error_container = container.clone();
    let error_listener = EventListener::new(&viewer, "error", move |event: &Event| {
        let reason = event
            .dyn_ref::<ErrorEvent>()
            .map(|event| event.message())
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| "unknown error".to_string());
        let err = EmbedError::ModelLoad { reason };
        log::error!("{err}");
        render_fatal(&error_document, &error_container, &err);
    });
    page.listeners.borrow_mut().push(error_listener);

    dom::clear_children(&container);
    let _ = container.append_child(&viewer);
    apply_aspect_padding(&container, &state.aspect_padding);
    apply_a11y_property(&viewer, &state);
    Ok(())
}

/// Whether the viewer custom element is already registered.
fn viewer_defined(window: &Window) -> bool {
    !window.custom_elements().get(VIEWER_TAG).is_undefined()
}

/// Fetch the pinned module script that registers the viewer element.
/// One attempt, awaited; failure is fatal for the page.
async fn load_viewer_script(document: &Document) -> EmbedResult<()> {
    let promise = Promise::new(&mut |resolve, reject| {
        let script = document
            .create_element("script")
            .ok()
            .and_then(|element| element.dyn_into::<HtmlScriptElement>().ok());
        let Some(script) = script else {
            let _ = reject.call0(&JsValue::NULL);
            return;
        };
        script.set_type("module");
        script.set_src(VIEWER_SCRIPT_URL);
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
        match document.head() {
            Some(head) => {
                let _ = head.append_child(&script);
            }
            None => {
                let _ = reject.call0(&JsValue::NULL);
            }
        }
    });
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|_| EmbedError::ScriptLoad)
}

/// Build the viewer element from its derived state: the ordered
/// attribute list plus the conditional AR children.
pub fn build_viewer_element(document: &Document, state: &ViewerElementState) -> Element {
    let viewer = document.create_element(VIEWER_TAG).expect("create viewer");
    for (name, value) in &state.attributes {
        let _ = viewer.set_attribute(name, value);
    }
    if let Some(label) = &state.ar_button_label {
        let button = document.create_element("button").expect("create button");
        let _ = button.set_attribute("slot", "ar-button");
        button.set_text_content(Some(label));
        let _ = viewer.append_child(&button);
    }
    if let Some(prompt) = &state.ar_prompt {
        let prompt_div = document.create_element("div").expect("create prompt");
        let _ = prompt_div.set_attribute("id", "ar-prompt");
        let span = document.create_element("span").expect("create span");
        // Prompt text is untrusted query input; never render it as markup.
        span.set_text_content(Some(prompt));
        let _ = prompt_div.append_child(&span);
        let _ = viewer.append_child(&prompt_div);
    }
    viewer
}

/// Show the loading indicator as the container's only content.
pub fn render_loading(document: &Document, container: &Element) {
    dom::clear_children(container);
    let _ = container.append_child(&dom::text_div(document, "loading", LOADING_TEXT));
}

/// Show a fatal error as the container's only content.
pub fn render_fatal(document: &Document, container: &Element, err: &EmbedError) {
    dom::clear_children(container);
    let _ = container.append_child(&dom::text_div(document, "error", &err.to_string()));
}

fn apply_aspect_padding(container: &Element, padding: &str) {
    if let Some(container) = container.dyn_ref::<HtmlElement>() {
        let _ = container.style().set_property("padding-bottom", padding);
    }
}

/// Attach the accessibility descriptor as a structured property, not an
/// attribute.
fn apply_a11y_property(viewer: &Element, state: &ViewerElementState) {
    let Some(a11y) = &state.a11y else {
        return;
    };
    let Ok(json) = serde_json::to_string(a11y) else {
        return;
    };
    let Ok(value) = js_sys::JSON::parse(&json) else {
        return;
    };
    let _ = js_sys::Reflect::set(viewer, &JsValue::from_str("a11y"), &value);
}
