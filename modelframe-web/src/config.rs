use modelframe_core::Allowlist;

/// Hostnames model and asset URLs may come from. An empty list allows
/// any host.
const ALLOWED_DOMAINS: &[&str] = &[
    // "models.example.edu",
    // "cdn.example.edu",
];

/// The builder page's allowlist, from the compile-time domain list.
pub fn allowlist() -> Allowlist {
    Allowlist::new(ALLOWED_DOMAINS.iter().map(|d| d.to_string()).collect())
}
