//! Passphrase-based encryption/decryption of text envelopes
//!
//! This module implements the envelope format:
//! - scrypt derives the key from the passphrase
//! - NaCl secretbox (XSalsa20Poly1305) provides authenticated encryption
//! - hex armor carries the result as text
//!
//! The binary layout inside the armor is:
//! - format tag: 1 byte, always `0xc3`
//! - salt: 8 bytes
//! - nonce: 24 bytes
//! - length: 8 bytes (big-endian signed int64)
//! - sealed box: variable length (includes 16-byte Poly1305 MAC)
//!
//! Decryption accepts exactly one leading tag byte, `0xc3`. Anything else is
//! rejected as an unsupported format before any key derivation happens. This
//! pins the decoder to the single suite this crate has ever produced; widening
//! it is a format revision, not a bugfix.

use crate::error::{ErrorKind, HexboxError, Result};
use crate::hexarmor;
use crypto_secretbox::aead::{Aead, KeyInit};
use crypto_secretbox::{Nonce, XSalsa20Poly1305};
use rand::RngCore;
use rand::rngs::OsRng;
use scrypt::{Params, scrypt};
use std::mem::size_of;

/// First payload byte of every envelope this crate understands.
pub const FORMAT_TAG: u8 = 0xc3;

/// Length of salt in bytes
pub const SALT_LEN: usize = 8;

/// Length of nonce in bytes
pub const NONCE_LEN: usize = 24;

/// Length of derived key in bytes
const KEY_LEN: usize = 32;

/// scrypt cost parameters: N=32768 (log2 = 15), r=8, p=1
const SCRYPT_LOG_N: u8 = 15;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Derive a 32-byte key from a passphrase and salt using scrypt
fn derive_key(passphrase: &str, salt: &[u8; SALT_LEN]) -> Result<[u8; KEY_LEN]> {
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, KEY_LEN).map_err(|e| {
        HexboxError::with_source(ErrorKind::ScryptFailure, "invalid scrypt parameters", e)
    })?;

    let mut key = [0u8; KEY_LEN];
    scrypt(passphrase.as_bytes(), salt, &params, &mut key).map_err(|e| {
        HexboxError::with_source(ErrorKind::ScryptFailure, "scrypt key derivation failed", e)
    })?;

    Ok(key)
}

/// Encrypt `plaintext` into an armored envelope using random salt and nonce.
///
/// Output is non-deterministic: repeated calls with identical inputs produce
/// different envelopes that all decrypt back to the same plaintext.
pub fn encrypt(plaintext: &str, passphrase: &str) -> Result<String> {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    encrypt_with_params(plaintext, passphrase, &salt, &nonce)
}

/// Encrypt `plaintext` using caller-provided salt and nonce.
///
/// This exists so tests can produce deterministic envelopes. Production
/// callers must use [`encrypt`], which sources salt and nonce from the OS RNG.
pub fn encrypt_with_params(
    plaintext: &str,
    passphrase: &str,
    salt: &[u8; SALT_LEN],
    nonce: &[u8; NONCE_LEN],
) -> Result<String> {
    if passphrase.is_empty() {
        return Err(HexboxError::new(
            ErrorKind::MissingPassphrase,
            "a passphrase is required to encrypt",
        ));
    }

    let key = derive_key(passphrase, salt)?;
    let cipher = XSalsa20Poly1305::new(&key.into());

    let nonce_obj = Nonce::from(*nonce);
    let sealed_box = cipher
        .encrypt(&nonce_obj, plaintext.as_bytes())
        .map_err(|_| HexboxError::new(ErrorKind::SealFailure, "secretbox sealing failed"))?;

    let sealed_box_len = sealed_box.len() as i64;
    let mut body =
        Vec::with_capacity(1 + SALT_LEN + NONCE_LEN + size_of::<i64>() + sealed_box.len());
    body.push(FORMAT_TAG);
    body.extend_from_slice(salt);
    body.extend_from_slice(nonce);
    body.extend_from_slice(&sealed_box_len.to_be_bytes()); // big-endian i64
    body.extend_from_slice(&sealed_box);

    Ok(hexarmor::wrap(&body))
}

/// Decrypt an armored envelope back into plaintext.
///
/// Fails with a kind-tagged error on a missing passphrase, a foreign format,
/// a malformed envelope, or a passphrase that does not authenticate. Never
/// returns partial plaintext.
pub fn decrypt(envelope: &str, passphrase: &str) -> Result<String> {
    if passphrase.is_empty() {
        return Err(HexboxError::new(
            ErrorKind::MissingPassphrase,
            "a passphrase is required to decrypt",
        ));
    }

    if !envelope.starts_with(hexarmor::MARKER) {
        return Err(HexboxError::new(
            ErrorKind::UnsupportedFormat,
            "input does not start with the \\x envelope marker",
        ));
    }

    let body = hexarmor::unwrap(envelope)?;

    match body.first() {
        Some(&FORMAT_TAG) => {}
        Some(&other) => {
            return Err(HexboxError::new(
                ErrorKind::UnsupportedFormat,
                format!("unsupported envelope tag 0x{:02x}", other),
            ));
        }
        None => {
            return Err(HexboxError::new(
                ErrorKind::TruncatedInput,
                "envelope is empty after unarmoring",
            ));
        }
    }

    let mut pos = 1;

    if body.len() < pos + SALT_LEN {
        return Err(HexboxError::new(
            ErrorKind::TruncatedInput,
            "input likely truncated while reading salt",
        ));
    }
    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&body[pos..pos + SALT_LEN]);
    pos += SALT_LEN;

    if body.len() < pos + NONCE_LEN {
        return Err(HexboxError::new(
            ErrorKind::TruncatedInput,
            "input likely truncated while reading nonce",
        ));
    }
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&body[pos..pos + NONCE_LEN]);
    pos += NONCE_LEN;

    if body.len() < pos + size_of::<i64>() {
        return Err(HexboxError::new(
            ErrorKind::TruncatedInput,
            "input likely truncated while reading sealed box length",
        ));
    }
    let mut length_bytes = [0u8; size_of::<i64>()];
    length_bytes.copy_from_slice(&body[pos..pos + size_of::<i64>()]);
    let sealed_box_len = i64::from_be_bytes(length_bytes);
    pos += size_of::<i64>();

    if sealed_box_len < 0 {
        return Err(HexboxError::new(
            ErrorKind::BinaryFormat,
            "negative sealed box length (when interpreted as a big-endian i64)",
        ));
    }

    // *Valid* input can fail this check on platforms with a small isize.
    if sealed_box_len > isize::MAX as i64 {
        return Err(HexboxError::new(
            ErrorKind::BinaryFormat,
            "sealed box length exceeds this system's max isize",
        ));
    }

    let sealed_box_len = sealed_box_len as usize;

    if body.len() < pos + sealed_box_len {
        return Err(HexboxError::new(
            ErrorKind::TruncatedInput,
            "truncated or corrupt input; claimed length greater than available input",
        ));
    }
    let sealed_box = &body[pos..pos + sealed_box_len];
    pos += sealed_box_len;

    if pos < body.len() {
        return Err(HexboxError::new(
            ErrorKind::TrailingData,
            "invalid input: unexpected data after sealed box",
        ));
    }

    let key = derive_key(passphrase, &salt)?;
    let cipher = XSalsa20Poly1305::new(&key.into());
    let nonce_obj = Nonce::from(nonce);
    let plaintext = cipher.decrypt(&nonce_obj, sealed_box).map_err(|_| {
        HexboxError::new(
            ErrorKind::AuthenticationFailed,
            "incorrect passphrase, or corrupt or tampered-with envelope",
        )
    })?;

    String::from_utf8(plaintext).map_err(|e| {
        HexboxError::with_source(
            ErrorKind::PlaintextEncoding,
            "decrypted payload is not valid UTF-8 text",
            e,
        )
    })
}
