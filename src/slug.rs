//! Identifier-safe slug encoding.
//!
//! Job and asset identifiers are derived from free-form trend names and
//! variation types; `slugify` maps those onto a stable `[a-z0-9-]` token.

use once_cell::sync::Lazy;
use regex::Regex;

/// Runs of characters outside `[a-z0-9]` collapse to a single hyphen.
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// Maximum slug length. Long trend names are truncated, not rejected.
const MAX_LEN: usize = 80;

/// Converts free-form text into an identifier-safe token.
///
/// Lower-cases, replaces every run of non-alphanumeric characters with a
/// single hyphen, strips leading/trailing hyphens and truncates to 80
/// characters. Pure and deterministic; two distinct raw names may still
/// collide after slugification, which callers accept.
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();
    let slug = NON_ALNUM.replace_all(&lowered, "-");
    let slug = slug.trim_matches('-');
    if slug.len() > MAX_LEN {
        slug[..MAX_LEN].to_string()
    } else {
        slug.to_string()
    }
}
