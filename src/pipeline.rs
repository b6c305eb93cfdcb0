//! The two-stage transformation pipeline
//!
//! Each call runs at most one crypto stage (decrypt or encrypt, never both)
//! followed by one digest stage, and always returns a well-formed
//! [`TransformationResult`]. Crypto failures do not propagate: they are
//! flattened into an inline marker string inside `transformed_text` and
//! recorded as a stage label, so a UI can display them without handling a
//! failure path. Callers that need structured errors should use
//! [`crate::secretcrypt`] directly.

use crate::digest;
use crate::secretcrypt;

/// Stage label: decryption succeeded.
pub const DECRYPTED_LABEL: &str = "decrypted-message";
/// Stage label: decryption failed; `transformed_text` carries the marker.
pub const DECRYPT_ERROR_LABEL: &str = "decryption-error";
/// Stage label: encryption succeeded.
pub const ENCRYPTED_LABEL: &str = "encrypted-message";
/// Stage label: encryption failed; `transformed_text` carries the marker.
pub const ENCRYPT_ERROR_LABEL: &str = "encryption-error";
/// Stage label: the digest stage ran over `transformed_text`.
pub const DIGEST_LABEL: &str = "sha256-digest";

/// Outcome of one pipeline invocation.
///
/// Created fresh per call; has no identity or lifecycle beyond the caller's
/// use of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformationResult {
    /// Verbatim input, never mutated.
    pub original_text: String,
    /// Decrypted plaintext, encrypted envelope, or an inline failure marker.
    pub transformed_text: String,
    /// Digest of `transformed_text`; present whenever any stage ran.
    pub hashed_text: Option<String>,
    /// Stage labels in pipeline order (crypto outcome, then digest).
    pub detected_pii_types: Vec<String>,
    /// Number of stages that executed. A failed crypto stage counts.
    pub transformation_count: usize,
}

impl TransformationResult {
    /// The identity result for empty or whitespace-only input: no stages
    /// run, no digest is computed.
    fn identity(text: &str) -> Self {
        Self {
            original_text: text.to_owned(),
            transformed_text: text.to_owned(),
            hashed_text: None,
            detected_pii_types: Vec::new(),
            transformation_count: 0,
        }
    }
}

/// Decrypt `text` with `passphrase`, then digest the outcome.
pub fn forward_transform(text: &str, passphrase: &str) -> TransformationResult {
    if text.trim().is_empty() {
        return TransformationResult::identity(text);
    }

    let (transformed, label) = match secretcrypt::decrypt(text, passphrase) {
        Ok(plaintext) => (plaintext, DECRYPTED_LABEL),
        Err(err) => {
            tracing::warn!(error = %err, "decryption failed; reporting inline");
            (format!("[decryption failed: {}]", err), DECRYPT_ERROR_LABEL)
        }
    };

    finish(text, transformed, label)
}

/// Encrypt `text` with `passphrase`, then digest the outcome.
pub fn backward_transform(text: &str, passphrase: &str) -> TransformationResult {
    if text.trim().is_empty() {
        return TransformationResult::identity(text);
    }

    let (transformed, label) = match secretcrypt::encrypt(text, passphrase) {
        Ok(envelope) => (envelope, ENCRYPTED_LABEL),
        Err(err) => {
            tracing::warn!(error = %err, "encryption failed; reporting inline");
            (format!("[encryption failed: {}]", err), ENCRYPT_ERROR_LABEL)
        }
    };

    finish(text, transformed, label)
}

/// Run the digest stage and assemble the result record.
fn finish(original: &str, transformed: String, crypto_label: &str) -> TransformationResult {
    let hashed = digest::hash(&transformed);

    TransformationResult {
        original_text: original.to_owned(),
        transformed_text: transformed,
        hashed_text: Some(hashed),
        detected_pii_types: vec![crypto_label.to_owned(), DIGEST_LABEL.to_owned()],
        transformation_count: 2,
    }
}
