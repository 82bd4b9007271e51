//! # modelframe-core
//!
//! Decision logic for the 3D model viewer embed tool: everything that can
//! be computed without touching a DOM.
//!
//! ## Features
//! - Query-string sanitisation with clamped numeric ranges and documented
//!   defaults
//! - URL validation against a configurable hostname allowlist
//! - Pure derivation of the viewer element's attribute/property surface
//! - Embed-URL composition and the `<iframe>` snippet for the builder
//! - The `lti.frameResize` cross-frame message contract
//!
//! The companion `modelframe-web` crate applies these results to the page;
//! the `modelframe-check` binary validates viewer URLs offline.
//!
//! ## Example — viewer page pipeline
//! ```
//! use modelframe_core::{parse_viewer_query, ViewerElementState};
//!
//! let params = parse_viewer_query("?model=https://ex.com/chair.glb&width=200")
//!     .expect("model URL present");
//! assert_eq!(params.width, 100.0); // clamped into [1, 100]
//!
//! let state = ViewerElementState::derive(&params);
//! assert_eq!(state.attribute("src"), Some("https://ex.com/chair.glb"));
//! ```
//!
//! ## Example — builder-side validation
//! ```
//! use modelframe_core::{validate_url, Allowlist};
//!
//! let allowlist = Allowlist::new(vec!["cdn.example.com".to_string()]);
//! let result = validate_url("https://elsewhere.com/a.glb", "model", &allowlist);
//! assert!(!result.is_valid());
//! ```

pub mod allowlist;
pub mod element;
pub mod embed;
pub mod error;
pub mod message;
pub mod params;
pub mod parser;
pub mod validator;

// --- Core types ---
pub use allowlist::Allowlist;
pub use element::ViewerElementState;
pub use embed::EmbedRequest;
pub use error::{EmbedError, EmbedResult};
pub use message::FrameResizeMessage;
pub use params::ViewerParameters;
pub use validator::Validation;

/// Build sanitised [`ViewerParameters`] from a viewer-page query string.
///
/// `model` is required; every other parameter falls back to its documented
/// default when missing or malformed.
pub fn parse_viewer_query(query: &str) -> EmbedResult<ViewerParameters> {
    parser::parse_viewer_query(query)
}

/// Validate a URL-valued form field against syntax and the allowlist.
pub fn validate_url(url: &str, kind: &str, allowlist: &Allowlist) -> Validation {
    validator::validate_url(url, kind, allowlist)
}

/// Compose the viewer URL for a builder request.
pub fn viewer_url(base: &url::Url, request: &EmbedRequest) -> EmbedResult<url::Url> {
    embed::viewer_url(base, request)
}

/// Render the copyable `<iframe>` snippet for a composed viewer URL.
pub fn iframe_snippet(url: &url::Url) -> String {
    embed::iframe_snippet(url)
}
