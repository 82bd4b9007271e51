//! Shared DOM lookups and element construction.

use modelframe_core::{EmbedError, EmbedResult};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, Window};

/// The page window. Pages only boot inside a browsing context, so
/// absence is unrecoverable.
pub fn window() -> Window {
    web_sys::window().expect("window available")
}

pub fn document() -> Document {
    window().document().expect("document available")
}

/// Look up an element the page cannot function without.
pub fn require_element(document: &Document, id: &str) -> EmbedResult<Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| EmbedError::MissingElement { id: id.to_string() })
}

/// Look up a required `<input>` by id.
pub fn require_input(document: &Document, id: &str) -> EmbedResult<HtmlInputElement> {
    require_element(document, id)?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| EmbedError::MissingElement { id: id.to_string() })
}

/// Look up an `<input>` a page may legitimately not carry.
pub fn optional_input(document: &Document, id: &str) -> Option<HtmlInputElement> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
}

/// Build a `<div>` with a class and text content.
pub fn text_div(document: &Document, class: &str, text: &str) -> Element {
    let div = document.create_element("div").expect("create div");
    div.set_class_name(class);
    div.set_text_content(Some(text));
    div
}

pub fn clear_children(element: &Element) {
    element.set_inner_html("");
}
