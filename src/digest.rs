//! Content fingerprinting
//!
//! Digests are SHA-256 over the uppercase-normalized text, rendered as 64
//! lowercase hex characters. Normalizing first makes the fingerprint
//! case-insensitive with respect to its input, which keeps equal-but-for-case
//! values (email addresses, hex envelopes retyped by hand) comparable.

use sha2::{Digest, Sha256};

/// Compute the fingerprint of `text`.
///
/// Deterministic and total: every string digests successfully.
pub fn hash(text: &str) -> String {
    let normalized = text.to_uppercase();
    hex::encode(Sha256::digest(normalized.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        // SHA-256 of "ABC" (input is uppercased before hashing).
        assert_eq!(
            hash("abc"),
            "b5d4045c3f466fa91fe2cc6abe79232a1a57cdf104f7a26e716e0a1e2789df78"
        );
    }

    #[test]
    fn test_case_insensitive_input() {
        assert_eq!(hash("test@example.com"), hash("TEST@EXAMPLE.COM"));
        assert_eq!(hash("abc"), hash("ABC"));
        assert_eq!(hash("aBc"), hash("Abc"));
    }

    #[test]
    fn test_output_shape() {
        let digest = hash("hello world");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, digest.to_lowercase());
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(hash("same input"), hash("same input"));
    }

    #[test]
    fn test_distinct_inputs_distinct_digests() {
        assert_ne!(hash("one"), hash("two"));
    }

    #[test]
    fn test_empty_string() {
        // SHA-256 of the empty string.
        assert_eq!(
            hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
