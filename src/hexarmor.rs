//! Hex armoring for binary envelope data
//!
//! Binary payloads travel as text: two lowercase hex digits per byte,
//! prefixed with a literal `\x` marker. The marker is mandatory on output
//! and optional on input.

use crate::error::{ErrorKind, HexboxError, Result};

/// Literal two-character marker prefixing armored payloads.
pub const MARKER: &str = r"\x";

/// Wrap bytes in hex armor, returning the armored string.
///
/// Format: `\x{lowercase hex}`
pub fn wrap(body: &[u8]) -> String {
    format!("{}{}", MARKER, hex::encode(body))
}

/// Unwrap an armored string, returning the original bytes.
///
/// A leading `\x` marker is stripped if present. An odd number of hex
/// digits is rejected outright rather than dropping the trailing digit;
/// partial bytes only ever come from truncated or hand-edited input.
pub fn unwrap(armored: &str) -> Result<Vec<u8>> {
    let digits = armored.strip_prefix(MARKER).unwrap_or(armored);

    if digits.len() % 2 != 0 {
        return Err(HexboxError::new(
            ErrorKind::ArmorOddLength,
            "odd number of hex digits; input likely truncated",
        ));
    }

    hex::decode(digits).map_err(|e| {
        HexboxError::with_source(
            ErrorKind::ArmorInvalid,
            format!("hex decoding failed: {}", e),
            e,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bytes() {
        let armored = wrap(b"");
        assert_eq!(armored, r"\x");
        assert_eq!(unwrap(&armored).unwrap(), b"");
    }

    #[test]
    fn test_simple_bytes() {
        let armored = wrap(&[0xc3, 0x00, 0xff]);
        assert_eq!(armored, r"\xc300ff");
        assert_eq!(unwrap(&armored).unwrap(), vec![0xc3, 0x00, 0xff]);
    }

    #[test]
    fn test_all_byte_values() {
        let bytes: Vec<u8> = (0..=255).collect();
        let armored = wrap(&bytes);

        assert!(armored.starts_with(MARKER));
        assert_eq!(armored.len(), MARKER.len() + 512);
        assert_eq!(unwrap(&armored).unwrap(), bytes);
    }

    #[test]
    fn test_output_is_lowercase() {
        let armored = wrap(&[0xab, 0xcd, 0xef]);
        assert_eq!(armored, r"\xabcdef");
    }

    #[test]
    fn test_unwrap_without_marker() {
        // The marker is optional on input.
        assert_eq!(unwrap("c3ff").unwrap(), vec![0xc3, 0xff]);
    }

    #[test]
    fn test_unwrap_uppercase_digits() {
        assert_eq!(unwrap(r"\xC3FF").unwrap(), vec![0xc3, 0xff]);
    }

    #[test]
    fn test_odd_length_rejected() {
        let err = unwrap(r"\xc3f").expect_err("expected odd length error");
        assert_eq!(err.kind(), ErrorKind::ArmorOddLength);
    }

    #[test]
    fn test_non_hex_digits_rejected() {
        let err = unwrap(r"\xzz").expect_err("expected invalid hex error");
        assert_eq!(err.kind(), ErrorKind::ArmorInvalid);
    }

    #[test]
    fn test_large_random_data() {
        let bytes = vec![0x42u8; 100_000];
        let armored = wrap(&bytes);
        assert_eq!(unwrap(&armored).unwrap(), bytes);
    }
}
