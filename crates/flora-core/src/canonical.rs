//! Canonical key normalization.
//!
//! Every vocabulary comparison in flora goes through [`canonicalize`]: two
//! strings name the same term exactly when their canonical keys are equal.
//! Indices are keyed by canonical keys and incoming values are canonicalized
//! before lookup; raw strings are never compared directly.
//!
//! # Example
//!
//! ```
//! use flora_core::canonicalize;
//!
//! assert_eq!(canonicalize("Rosé"), "rose");
//! assert_eq!(canonicalize("Fruits & Vegetables"), "fruitsandvegetables");
//! assert_eq!(canonicalize("non-toxic"), canonicalize("Non Toxic"));
//! ```

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::defaults::{COMPOUND_SEPARATORS, LIST_DELIMITERS};

/// A string produced by [`canonicalize`]. Only `[a-z0-9]` characters.
pub type CanonicalKey = String;

/// Reduce a string to its canonical lookup key.
///
/// Steps: Unicode canonical decomposition (NFD), removal of combining marks,
/// `&` folded to `and`, removal of everything outside `[a-zA-Z0-9]`, ASCII
/// lowercase. The result is idempotent: `canonicalize(&canonicalize(x)) ==
/// canonicalize(x)`. Letters with no ASCII decomposition (`ß`, `ø`, CJK) are
/// dropped.
pub fn canonicalize(input: &str) -> CanonicalKey {
    let mut key = String::with_capacity(input.len());
    for c in input.nfd().filter(|c| !is_combining_mark(*c)) {
        if c == '&' {
            key.push_str("and");
        } else if c.is_ascii_alphanumeric() {
            key.push(c.to_ascii_lowercase());
        }
    }
    key
}

/// Canonicalize, returning `None` when nothing survives normalization.
pub fn canonicalize_non_empty(input: &str) -> Option<CanonicalKey> {
    let key = canonicalize(input);
    if key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// Split a delimited label string (`"edible, medicinal; aromatic"`) into
/// trimmed, non-empty tokens.
pub fn split_delimited(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(LIST_DELIMITERS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Split a compound name (`"blue-green"`, `"light / pale pink"`) into its
/// trimmed, non-empty parts.
pub fn split_compound(input: &str) -> impl Iterator<Item = &str> {
    input
        .split(|c: char| c.is_whitespace() || COMPOUND_SEPARATORS.contains(&c))
        .filter(|s| !s.is_empty())
}
