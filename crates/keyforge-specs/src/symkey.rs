//! Key-family descriptors.
//!
//! A key family pins down what a raw key buffer *means*: its declared
//! bit-length and the algorithm-name octets mixed into derivation info. The
//! [`KeyType`] trait is the seam between the generic key machinery in
//! `keyforge-crypto` and the concrete families; keys translate losslessly
//! between families that declare the same length.

use serde::{Deserialize, Serialize};

use crate::{digest::DigestSpec, length::KeyLength};

/// Descriptor for a family of raw symmetric keys.
///
/// Implementations are small copyable values. The name octets feed key
/// derivation info and must be stable across releases.
pub trait KeyType: Clone + PartialEq + Eq + std::fmt::Debug {
    /// Declared key length for this family.
    fn key_length(&self) -> KeyLength;

    /// Stable algorithm name, also used as derivation-info octets.
    fn algorithm_name(&self) -> String;
}

/// Symmetric cipher-step key families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymKeyType {
    /// AES with a 128-bit key (AES-GCM steps)
    Aes128,
    /// AES with a 192-bit key (AES-GCM steps)
    Aes192,
    /// AES with a 256-bit key (AES-GCM steps)
    Aes256,
    /// ChaCha20 with the fixed 256-bit key (XChaCha20-Poly1305 steps)
    ChaCha20,
}

impl SymKeyType {
    /// Every symmetric family, in catalog order.
    pub const ALL: [SymKeyType; 4] = [Self::Aes128, Self::Aes192, Self::Aes256, Self::ChaCha20];
}

impl KeyType for SymKeyType {
    fn key_length(&self) -> KeyLength {
        match self {
            Self::Aes128 => KeyLength::Len128,
            Self::Aes192 => KeyLength::Len192,
            Self::Aes256 | Self::ChaCha20 => KeyLength::Len256,
        }
    }

    fn algorithm_name(&self) -> String {
        match self {
            Self::Aes128 => "AES-128".to_string(),
            Self::Aes192 => "AES-192".to_string(),
            Self::Aes256 => "AES-256".to_string(),
            Self::ChaCha20 => "CHACHA20".to_string(),
        }
    }
}

impl std::fmt::Display for SymKeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.algorithm_name())
    }
}

/// MAC key families, keyed by the digest they authenticate with.
///
/// The declared key length follows the digest output length, which is what
/// makes translation from a same-length cipher key lossless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MacKeyType {
    /// HMAC over the given digest
    Hmac(DigestSpec),
}

impl KeyType for MacKeyType {
    fn key_length(&self) -> KeyLength {
        match self {
            Self::Hmac(digest) => digest.length(),
        }
    }

    fn algorithm_name(&self) -> String {
        match self {
            Self::Hmac(digest) => format!("HMAC-{digest}"),
        }
    }
}

impl std::fmt::Display for MacKeyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.algorithm_name())
    }
}
