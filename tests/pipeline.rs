//! End-to-end pipeline properties
//!
//! Exercises the public entry points the way a caller would, including the
//! laws that hold across both directions of the pipeline.

use hexbox::pipeline::{
    DECRYPT_ERROR_LABEL, DECRYPTED_LABEL, DIGEST_LABEL, ENCRYPTED_LABEL,
};
use hexbox::{backward_transform, forward_transform, matches_envelope_format};

#[test]
fn test_roundtrip_law() {
    for plaintext in ["hello", "a", "multi\nline\ntext", "pässwörd \u{1F512}"] {
        let encrypted = backward_transform(plaintext, "secret");
        let decrypted = forward_transform(&encrypted.transformed_text, "secret");
        assert_eq!(decrypted.transformed_text, plaintext);
    }
}

#[test]
fn test_count_is_zero_iff_blank() {
    assert_eq!(forward_transform("", "k").transformation_count, 0);
    assert_eq!(forward_transform("  \n ", "k").transformation_count, 0);
    assert_eq!(backward_transform("", "k").transformation_count, 0);

    assert_eq!(forward_transform("x", "k").transformation_count, 2);
    assert_eq!(backward_transform("x", "k").transformation_count, 2);
    // Failure still counts as an executed stage.
    assert_eq!(forward_transform("garbage", "").transformation_count, 2);
}

#[test]
fn test_empty_input_scenario() {
    let result = forward_transform("", "secret");

    assert_eq!(result.original_text, "");
    assert_eq!(result.transformed_text, "");
    assert_eq!(result.hashed_text, None);
    assert!(result.detected_pii_types.is_empty());
    assert_eq!(result.transformation_count, 0);
}

#[test]
fn test_encrypt_decrypt_scenario() {
    let encrypted = backward_transform("hello", "secret");
    assert!(matches_envelope_format(&encrypted.transformed_text));
    assert_eq!(
        encrypted.detected_pii_types,
        vec![ENCRYPTED_LABEL, DIGEST_LABEL]
    );

    let decrypted = forward_transform(&encrypted.transformed_text, "secret");
    assert_eq!(decrypted.transformed_text, "hello");
    assert_eq!(
        decrypted.detected_pii_types,
        vec![DECRYPTED_LABEL, DIGEST_LABEL]
    );

    let hashed = decrypted.hashed_text.expect("digest should be present");
    assert_eq!(hashed.len(), 64);
    assert!(hashed.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(hashed, hashed.to_lowercase());
}

#[test]
fn test_non_envelope_input_scenario() {
    let result = forward_transform("not-an-envelope", "secret");

    assert!(result.transformed_text.starts_with("[decryption failed:"));
    assert_eq!(
        result.detected_pii_types,
        vec![DECRYPT_ERROR_LABEL, DIGEST_LABEL]
    );
    assert_eq!(result.transformation_count, 2);

    let hashed = result.hashed_text.expect("digest should be present");
    assert_eq!(hashed.len(), 64);
}

#[test]
fn test_wrong_passphrase_never_yields_plaintext() {
    let encrypted = backward_transform("top secret content", "right");
    let result = forward_transform(&encrypted.transformed_text, "wrong");

    assert!(!result.transformed_text.contains("top secret content"));
    assert!(result.transformed_text.starts_with("[decryption failed:"));
    assert!(
        result
            .detected_pii_types
            .contains(&DECRYPT_ERROR_LABEL.to_owned())
    );
}

#[test]
fn test_envelopes_differ_but_digests_agree_after_decrypt() {
    // Encryption is randomized, so two envelopes differ; decrypting either
    // recovers the same plaintext and therefore the same fingerprint.
    let e1 = backward_transform("hello", "secret");
    let e2 = backward_transform("hello", "secret");
    assert_ne!(e1.transformed_text, e2.transformed_text);

    let d1 = forward_transform(&e1.transformed_text, "secret");
    let d2 = forward_transform(&e2.transformed_text, "secret");
    assert_eq!(d1.transformed_text, d2.transformed_text);
    assert_eq!(d1.hashed_text, d2.hashed_text);
}

#[test]
fn test_heuristic_is_prefix_only() {
    assert!(matches_envelope_format(r"\xcafe"));
    assert!(matches_envelope_format(r"\xc"));
    assert!(!matches_envelope_format(r"\xfe"));
    assert!(!matches_envelope_format("cafe"));

    // The heuristic accepting an input does not mean the pipeline will.
    let result = forward_transform(r"\xcafe", "secret");
    assert_eq!(result.detected_pii_types[0], DECRYPT_ERROR_LABEL);
}
