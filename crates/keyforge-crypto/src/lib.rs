//! Keyforge Cryptographic Engine
//!
//! The symmetric foundation of the Keyforge suite: turn a master secret
//! into a validated parameter set, derive and regenerate keys
//! deterministically, and compose several independently-keyed cipher steps
//! into one authenticated encryption primitive.
//!
//! # Key Lifecycle
//!
//! ```text
//! Master secret (password-derived or random)
//!        │
//!        ▼ HKDF (two seeded digests, personalization mixed in)
//! Keyset master material
//!        │
//!        ▼ Labelled expansions
//! Step keys + keyed step schedule
//!        │
//!        ▼ init
//! KeySetCipher (N AEAD steps, encrypt order fixed, decrypt reversed)
//! ```
//!
//! # Security
//!
//! Algorithm Agility:
//! - Secret-derived keys draw their digests from the derivation seed, so a
//!   weakness in one digest family never compromises every derived key
//! - Keyset cascades draw their step algorithms from the master material,
//!   so no fixed pipeline exists to attack across all keysets
//!
//! Zeroization:
//! - Every buffer that holds secret bytes is overwritten with zero on
//!   every exit path: success, validation failure, or credential failure
//! - [`HkdfParams`] carries an explicit [`clear`](HkdfParams::clear)
//!   contract; drop guards backstop early returns
//! - Key material never appears in errors, logs, or `Debug` output
//!
//! Failure Semantics:
//! - [`CryptoError::BadCredentials`] means the supplied secret did not
//!   authenticate; callers re-prompt rather than abort
//! - Validation misuse and provider failures stay distinct so "bad
//!   password" is never confused with "internal error"
//!
//! # Providers
//!
//! Primitive ciphers and digests are injected via [`DigestProvider`] and
//! [`CipherProvider`]; the engine composes but never reimplements them.
//! [`RustCryptoProvider`] backs both traits for ordinary builds.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod agility;
pub mod digests;
pub mod error;
pub mod factory;
pub mod generator;
pub mod hkdf;
pub mod key;
pub mod keyset;
pub mod provider;
pub mod secret;

pub use agility::derive_digest_specs;
pub use digests::DigestFactory;
pub use error::{CryptoError, Result};
pub use factory::CryptoFactory;
pub use generator::KeyGenerator;
pub use hkdf::{HkdfEngine, HkdfMode, HkdfParams};
pub use key::SymKey;
pub use keyset::{KeySet, KeySetCipher};
pub use provider::{
    AeadStep, CipherProvider, DigestEngine, DigestProvider, MacEngine, RustCryptoProvider,
};
pub use secret::SecretBytes;
