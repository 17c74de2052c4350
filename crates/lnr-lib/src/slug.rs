//! Slug derivation for display names.

use once_cell::sync::Lazy;
use regex::Regex;

// Runs of anything that is not a Unicode letter or digit collapse to a
// single hyphen.
static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("valid regex"));

/// Derive a candidate alias from a display name: lowercase, replace runs
/// of non-alphanumeric characters with a single hyphen, trim leading and
/// trailing hyphens.
///
/// Returns an empty string when the name contains no alphanumerics at
/// all; callers treat that as unsluggable.
#[must_use]
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_ALNUM
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}
