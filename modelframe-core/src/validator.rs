use url::Url;

use crate::allowlist::Allowlist;

/// Outcome of a single field validation. The message is the user-facing
/// feedback copy rendered next to the field.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid,
    Invalid { message: String },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Validation::Valid => None,
            Validation::Invalid { message } => Some(message),
        }
    }
}

/// Validate a URL-valued form field against syntax and the allowlist.
///
/// Empty input is valid: URL fields are optional and an empty field must
/// never block submission. `kind` is the field label used in the feedback
/// message ("model", "USDZ").
pub fn validate_url(url: &str, kind: &str, allowlist: &Allowlist) -> Validation {
    if url.is_empty() {
        return Validation::Valid;
    }

    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => {
            return Validation::Invalid {
                message: format!("Invalid {} URL format", kind),
            }
        }
    };

    // URLs without a host component (mailto:, data:) have an empty
    // hostname, which only passes when the allowlist is empty.
    let host = parsed.host_str().unwrap_or("");
    if !allowlist.permits(host) {
        return Validation::Invalid {
            message: format!("{} URL not allowed. Please use a URL from the whitelist.", kind),
        };
    }

    Validation::Valid
}
