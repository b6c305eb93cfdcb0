use std::error::Error as StdError;

use thiserror::Error;

/// Condition tags for consumers that want to branch on failure kinds.
///
/// The transformation pipeline flattens all of these into display strings;
/// the tags exist so that callers of the fallible adapter layer (and tests)
/// can still tell the conditions apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A passphrase was required but absent or empty.
    MissingPassphrase,
    /// Input is not a hexbox envelope (missing marker or wrong format tag).
    UnsupportedFormat,
    /// The hex armor is malformed (non-hex digits).
    ArmorInvalid,
    /// The hex armor has an odd number of digits.
    ArmorOddLength,
    /// Input data ended before the expected component could be read.
    TruncatedInput,
    /// Length fields or binary layout of the envelope are invalid.
    BinaryFormat,
    /// Additional bytes were present after the sealed payload.
    TrailingData,
    /// Opening the sealed payload failed: wrong passphrase, corruption,
    /// or tampering.
    AuthenticationFailed,
    /// Low-level scrypt key derivation failed.
    ScryptFailure,
    /// NaCl secretbox (XSalsa20Poly1305) failed to seal data.
    SealFailure,
    /// Decrypted payload is not valid UTF-8 text.
    PlaintextEncoding,
    /// Passphrase could not be obtained from the configured reader.
    PassphraseUnavailable,
    /// Interaction with stdin/stdout or the filesystem failed.
    Io,
}

#[derive(Debug, Error)]
#[error("{msg}")]
pub struct HexboxError {
    kind: ErrorKind,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
    msg: String,
}

impl HexboxError {
    pub fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            source: None,
            msg: msg.into(),
        }
    }

    /// Creates an error that retains the originating source error.
    pub fn with_source(
        kind: ErrorKind,
        msg: impl Into<String>,
        source: impl StdError + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
            msg: msg.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The user-facing message carried by the error.
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Wraps the current error with a higher-level message while preserving
    /// the original as source.
    pub fn context(self, msg: impl Into<String>) -> Self {
        let kind = self.kind;
        Self {
            kind,
            source: Some(Box::new(self)),
            msg: msg.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, HexboxError>;
