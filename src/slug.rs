//! URL-safe token derivation.
//!
//! Every path segment the generator emits (page directories, canonical URLs,
//! sitemap locations) goes through [`slugify`], so the rules live in one
//! place:
//!
//! - ASCII letters are lowercased, ASCII digits are kept.
//! - Every run of other characters (spaces, `_`, punctuation, non-ASCII)
//!   collapses into a single `-`.
//! - Leading and trailing dashes are trimmed.
//!
//! ```text
//! skip_work        → skip-work
//! Late  For Work!  → late-for-work
//! __boss__         → boss
//! ```

/// Convert arbitrary text into a URL-safe token.
///
/// Returns an empty string when the input has no ASCII alphanumerics at all.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Join several tokens into one slug, in the given order.
///
/// Each part is slugified first; parts that slugify to nothing are dropped so
/// the result never contains doubled or dangling dashes.
pub fn join_slug(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| slugify(p))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Whether a string is already in slug form (idempotent under [`slugify`]).
pub fn is_slug(text: &str) -> bool {
    !text.is_empty() && slugify(text) == text
}
