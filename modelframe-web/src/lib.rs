//! Browser pages for the 3D model viewer embed tool.
//!
//! The decision logic lives in `modelframe-core`; this crate binds it to
//! the DOM: the viewer page (query string to configured element), the
//! builder page (validation feedback and embed generation), and the
//! cross-frame height reporter shared by both.

pub mod builder;
pub mod config;
pub mod dom;
pub mod resize;
pub mod viewer;

use wasm_bindgen::prelude::*;

// Panic hook and logger must be in place before any page code runs.
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

/// Entry point for viewer.html.
#[wasm_bindgen]
pub fn start_viewer() {
    viewer::start();
}

/// Entry point for builder.html.
#[wasm_bindgen]
pub fn start_builder() {
    builder::start();
}
