//! Envelope format detection
//!
//! A deliberately weak, prefix-only check used for advisory hinting (UI
//! state, CLI `inspect`). It does not validate hex digits or envelope
//! structure; [`crate::secretcrypt::decrypt`] performs the real validation
//! and remains the only gate that matters.

use crate::hexarmor::MARKER;

/// A detectable content pattern, for display purposes only.
///
/// Nothing in the pipeline consults this catalog; it exists so callers can
/// describe what the tool recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PiiPattern {
    pub name: &'static str,
    pub description: &'static str,
    pub enabled: bool,
}

/// The single pattern this crate recognizes.
pub const PII_PATTERNS: &[PiiPattern] = &[PiiPattern {
    name: "encrypted-message",
    description: "Passphrase-protected message envelope (\\x-prefixed hex, secretbox payload)",
    enabled: true,
}];

/// Returns true iff `text` starts with the `\x` marker immediately followed
/// by `c` (the first hex digit of the envelope's format tag).
pub fn matches_envelope_format(text: &str) -> bool {
    text.strip_prefix(MARKER)
        .is_some_and(|rest| rest.starts_with('c'))
}
