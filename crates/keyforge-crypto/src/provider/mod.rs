//! Injected cryptographic provider interfaces.
//!
//! The engine composes primitives but never implements them: digests, MACs,
//! and AEAD ciphers arrive through these capability traits, supplied at
//! construction. [`RustCryptoProvider`] is the batteries-included
//! implementation backed by the RustCrypto crates; alternative providers
//! (hardware tokens, FIPS builds) implement the same traits.

mod rustcrypto;

pub use rustcrypto::RustCryptoProvider;

use keyforge_specs::{DigestSpec, DigestType, SymKeyType};

use crate::error::Result;

/// A primed one-shot digest computation.
pub trait DigestEngine {
    /// Absorb more input.
    fn update(&mut self, data: &[u8]);

    /// Finish and return the digest output.
    fn finalize(self: Box<Self>) -> Vec<u8>;

    /// Output size in bytes.
    fn output_len(&self) -> usize;
}

/// A primed one-shot MAC computation.
pub trait MacEngine {
    /// Absorb more input.
    fn update(&mut self, data: &[u8]);

    /// Finish and return the authentication tag.
    fn finalize(self: Box<Self>) -> Vec<u8>;

    /// Tag size in bytes.
    fn output_len(&self) -> usize;
}

/// A keyed AEAD cipher step.
///
/// One instance is one key; the keyset cipher stacks several of these.
pub trait AeadStep {
    /// Required nonce size in bytes.
    fn nonce_len(&self) -> usize;

    /// Authentication tag overhead in bytes.
    fn tag_len(&self) -> usize;

    /// Encrypt and authenticate `plaintext`.
    fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt and verify `ciphertext`.
    ///
    /// # Errors
    ///
    /// [`CryptoError::BadCredentials`](crate::CryptoError::BadCredentials)
    /// when the authentication tag does not verify — the caller-facing
    /// signal for a wrong key or tampered data.
    fn open(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// Digest and MAC capability supplied to the engine.
pub trait DigestProvider: Send + Sync {
    /// Whether any spec of this family is available.
    fn supports_digest_type(&self, digest_type: DigestType) -> bool;

    /// Whether this exact spec is available.
    fn supports_digest_spec(&self, spec: &DigestSpec) -> bool;

    /// Whether extendable-output digests are available at all.
    fn supports_xof(&self) -> bool;

    /// Whether this spec can key an HMAC (XOF specs cannot).
    fn supports_hmac(&self, spec: &DigestSpec) -> bool;

    /// Build a digest engine for the spec.
    fn digest(&self, spec: &DigestSpec) -> Result<Box<dyn DigestEngine>>;

    /// Build an HMAC engine for the spec, keyed with `key`.
    fn hmac(&self, spec: &DigestSpec, key: &[u8]) -> Result<Box<dyn MacEngine>>;
}

/// Symmetric AEAD capability supplied to the engine.
pub trait CipherProvider: Send + Sync {
    /// Whether the key family is available.
    fn supports_sym_key_type(&self, key_type: SymKeyType) -> bool;

    /// Build a keyed AEAD step for the family.
    fn aead(&self, key_type: SymKeyType, key: &[u8]) -> Result<Box<dyn AeadStep>>;
}
