//! Display ordering of sequence names
//!
//! Sequence names are ordered case-insensitively, except that a name carrying
//! a pre-release token (`ballot`, `Vorabveröffentlichung`) is grouped with the
//! same name without the token and always placed after it. Reversing the
//! order flips the groups, never the final/pre-release pair inside a group.
//!
//! ```text
//! forward:  Core 1.0, Core 1.0 ballot, Core 2.0, Core 2.0 ballot
//! reverse:  Core 2.0, Core 2.0 ballot, Core 1.0, Core 1.0 ballot
//! ```

use std::cmp::Ordering;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

/// A pre-release token together with the separators right before it.
pub const PRERELEASE_TOKEN_PATTERN: &str = r"(?i)[\s\-_()/]*(?:ballot|vorabveröffentlichung)";

static PRERELEASE_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PRERELEASE_TOKEN_PATTERN).expect("valid regex"));

/// Whether a sequence name carries a pre-release token.
pub fn is_prerelease(name: &str) -> bool {
    PRERELEASE_TOKEN_RE.is_match(name)
}

/// The grouping key of a sequence name: pre-release tokens removed,
/// surrounding whitespace trimmed, lowercased.
pub fn base_key(name: &str) -> String {
    PRERELEASE_TOKEN_RE
        .replace_all(name, "")
        .trim()
        .to_lowercase()
}

fn directed(ordering: Ordering, reverse: bool) -> Ordering {
    if reverse {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Compare two sequence names for display.
pub fn compare_sequences(a: &str, b: &str, reverse: bool) -> Ordering {
    directed(base_key(a).cmp(&base_key(b)), reverse)
        .then_with(|| is_prerelease(a).cmp(&is_prerelease(b)))
        .then_with(|| directed(a.to_lowercase().cmp(&b.to_lowercase()), reverse))
        .then_with(|| a.cmp(b))
}

/// Reorder a sequence-keyed map for display.
pub fn sort_sequences<V>(sequences: &mut IndexMap<String, V>, reverse: bool) {
    sequences.sort_by(|a, _, b, _| compare_sequences(a, b, reverse));
}
