//! Domain name normalization and input policy.

use anyhow::Result;

/// Shortest domain the shell accepts (e.g. "a.co").
pub const MIN_DOMAIN_LEN: usize = 4;

const WWW_PREFIX: &str = "www.";

/// Canonical key for a raw domain string: lowercase, first token only, no leading "www.".
///
/// Returns an empty string for empty or all-whitespace input; callers reject that separately.
pub fn normalize(raw: &str) -> String {
    let lowered = raw.to_lowercase();
    let mut token = lowered.split_whitespace().next().unwrap_or("");
    // Repeated so that normalize(normalize(x)) == normalize(x) holds for "www.www.x".
    while let Some(rest) = token.strip_prefix(WWW_PREFIX) {
        token = rest;
    }
    token.to_string()
}

/// The `www.` variant of a canonical domain.
pub fn www_variant(domain: &str) -> String {
    format!("{WWW_PREFIX}{domain}")
}

/// Validate raw user input before it reaches the store.
pub fn validate_input(raw: &str) -> Result<()> {
    if raw.chars().count() < MIN_DOMAIN_LEN {
        anyhow::bail!("the domain name is too small (e.g. facebook.com)");
    }
    if normalize(raw).is_empty() {
        anyhow::bail!("empty domain name");
    }
    Ok(())
}
