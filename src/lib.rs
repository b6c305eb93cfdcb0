//! Hexbox - passphrase-based text encryption with hex-armored envelopes
//!
//! The core is a bidirectional pipeline: [`pipeline::backward_transform`]
//! encrypts plaintext into a `\x`-prefixed hex envelope and fingerprints it;
//! [`pipeline::forward_transform`] decrypts such an envelope and fingerprints
//! the recovered plaintext. Both always return a result record - crypto
//! failures are reported inline, never raised.

#![forbid(unsafe_code)]

pub mod detect;
pub mod digest;
pub mod error;
pub mod hexarmor;
pub mod passphrase;
pub mod pipeline;
pub mod secretcrypt;

pub use detect::{PII_PATTERNS, PiiPattern, matches_envelope_format};
pub use error::{ErrorKind, HexboxError, Result};
pub use pipeline::{TransformationResult, backward_transform, forward_transform};
