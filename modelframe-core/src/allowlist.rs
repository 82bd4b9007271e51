use serde::Deserialize;

use crate::error::{EmbedError, EmbedResult};

/// Hostname allowlist for model/asset URLs.
///
/// An empty list means every host is allowed; a populated list restricts
/// URL-valued fields to hosts that match a member exactly.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Allowlist {
    pub allowed_domains: Vec<String>,
}

impl Allowlist {
    pub fn new(allowed_domains: Vec<String>) -> Self {
        Self { allowed_domains }
    }

    /// The default configuration: no restriction.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    pub fn is_unrestricted(&self) -> bool {
        self.allowed_domains.is_empty()
    }

    /// Exact-match membership test. Always true when the list is empty.
    pub fn permits(&self, host: &str) -> bool {
        self.allowed_domains.is_empty() || self.allowed_domains.iter().any(|d| d == host)
    }

    /// Load from the JSON config shape `{ "allowedDomains": [...] }`.
    pub fn from_json(json: &str) -> EmbedResult<Self> {
        serde_json::from_str(json).map_err(|e| EmbedError::Config(e.to_string()))
    }
}
