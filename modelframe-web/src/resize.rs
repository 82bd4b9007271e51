//! Cross-frame height reporting for the hosting LMS page.

use gloo::events::EventListener;
use modelframe_core::element::VIEWER_ID;
use modelframe_core::FrameResizeMessage;
use web_sys::{Document, Event, Window};

/// Post the current body scroll height to the parent frame.
///
/// Fire-and-forget: a failure to serialise or dispatch is logged and
/// dropped, never surfaced on the page.
pub fn post_height(window: &Window, document: &Document) {
    let Some(body) = document.body() else {
        return;
    };
    let message = FrameResizeMessage::new(body.scroll_height());
    let json = match serde_json::to_string(&message) {
        Ok(json) => json,
        Err(err) => {
            log::error!("resize message failed to serialise: {err}");
            return;
        }
    };
    let Ok(payload) = js_sys::JSON::parse(&json) else {
        return;
    };
    // The hosting frame's origin is not known at build time.
    if let Ok(Some(parent)) = window.parent() {
        if parent.post_message(&payload, "*").is_err() {
            log::warn!("resize message was not delivered");
        }
    }
}

/// Wire the reporter: one immediate post, then one per window `resize`
/// and, when a viewer element is on the page, per viewer `load`.
///
/// The returned listeners must be kept alive by the caller.
pub fn install(window: &Window, document: &Document) -> Vec<EventListener> {
    post_height(window, document);

    let mut listeners = Vec::new();

    let win = window.clone();
    let doc = document.clone();
    listeners.push(EventListener::new(window, "resize", move |_event: &Event| {
        post_height(&win, &doc);
    }));

    if let Some(viewer) = document.get_element_by_id(VIEWER_ID) {
        let win = window.clone();
        let doc = document.clone();
        listeners.push(EventListener::new(&viewer, "load", move |_event: &Event| {
            post_height(&win, &doc);
        }));
    }

    listeners
}
