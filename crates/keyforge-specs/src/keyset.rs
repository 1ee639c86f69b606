//! KeySet cascade specification.
//!
//! A [`KeySetSpec`] sizes and configures a keyset cipher: the master key
//! bit-length plus the number of independently-keyed cascade steps.
//! Construction never fails; invalidity is captured as a boolean so that
//! callers decide whether to reject immediately or propagate the spec
//! through a validation pipeline.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::length::KeyLength;

/// Specification for a keyset cipher cascade.
///
/// Immutable once constructed. The `valid` flag is computed exactly once at
/// construction and never mutated; it is derived state and does not
/// participate in equality or hashing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "WireSpec", into = "WireSpec")]
pub struct KeySetSpec {
    key_length: KeyLength,
    cipher_steps: u8,
    valid: bool,
}

impl KeySetSpec {
    /// Minimum number of cascade cipher steps.
    pub const MIN_CIPHER_STEPS: u8 = 3;

    /// Maximum number of cascade cipher steps.
    pub const MAX_CIPHER_STEPS: u8 = 6;

    /// Default number of cascade cipher steps.
    pub const DEFAULT_CIPHER_STEPS: u8 = 4;

    /// Default master key length.
    pub const DEFAULT_KEY_LENGTH: KeyLength = KeyLength::Len256;

    /// Key lengths a keyset accepts for its master material.
    pub const SUPPORTED_LENGTHS: [KeyLength; 5] = KeyLength::ALL;

    /// Build a spec from a key length and cascade step count.
    ///
    /// Never fails; consult [`is_valid`](Self::is_valid).
    pub fn new(key_length: KeyLength, cipher_steps: u8) -> Self {
        let valid = Self::SUPPORTED_LENGTHS.contains(&key_length)
            && (Self::MIN_CIPHER_STEPS..=Self::MAX_CIPHER_STEPS).contains(&cipher_steps);
        Self { key_length, cipher_steps, valid }
    }

    /// Master key length.
    pub fn key_length(&self) -> KeyLength {
        self.key_length
    }

    /// Number of cascade cipher steps.
    pub fn cipher_steps(&self) -> u8 {
        self.cipher_steps
    }

    /// Whether the spec is usable for building a keyset cipher.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

impl Default for KeySetSpec {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY_LENGTH, Self::DEFAULT_CIPHER_STEPS)
    }
}

// Identity is (key_length, cipher_steps) only; validity is derived.
impl PartialEq for KeySetSpec {
    fn eq(&self, other: &Self) -> bool {
        self.key_length == other.key_length && self.cipher_steps == other.cipher_steps
    }
}

impl Eq for KeySetSpec {}

impl Hash for KeySetSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key_length.hash(state);
        self.cipher_steps.hash(state);
    }
}

impl std::fmt::Display for KeySetSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KeySet-{}x{}", self.key_length.bits(), self.cipher_steps)
    }
}

/// Persisted form: the identifying parameters only. Validity is recomputed
/// on the way back in.
#[derive(Serialize, Deserialize)]
struct WireSpec {
    key_length: KeyLength,
    cipher_steps: u8,
}

impl From<WireSpec> for KeySetSpec {
    fn from(wire: WireSpec) -> Self {
        Self::new(wire.key_length, wire.cipher_steps)
    }
}

impl From<KeySetSpec> for WireSpec {
    fn from(spec: KeySetSpec) -> Self {
        Self { key_length: spec.key_length, cipher_steps: spec.cipher_steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_spec_is_valid() {
        let spec = KeySetSpec::default();
        assert!(spec.is_valid());
        assert_eq!(spec.key_length(), KeyLength::Len256);
        assert_eq!(spec.cipher_steps(), 4);
    }

    #[test]
    fn all_step_counts_in_range_are_valid() {
        for steps in KeySetSpec::MIN_CIPHER_STEPS..=KeySetSpec::MAX_CIPHER_STEPS {
            let spec = KeySetSpec::new(KeyLength::Len256, steps);
            assert!(spec.is_valid(), "steps {steps} must be valid");
        }
    }

    #[test]
    fn step_counts_outside_range_are_invalid() {
        for steps in [0, 1, 2, 7, 8, u8::MAX] {
            let spec = KeySetSpec::new(KeyLength::Len256, steps);
            assert!(!spec.is_valid(), "steps {steps} must be invalid");
        }
    }

    #[test]
    fn every_registered_length_is_supported() {
        for length in KeyLength::ALL {
            assert!(KeySetSpec::new(length, 4).is_valid());
        }
    }

    #[test]
    fn validity_is_not_identity() {
        let valid = KeySetSpec::new(KeyLength::Len256, 4);
        let invalid = KeySetSpec::new(KeyLength::Len256, 9);
        assert_ne!(valid, invalid);

        // Equal parameters are equal regardless of how they were built
        assert_eq!(valid, KeySetSpec::new(KeyLength::Len256, 4));
    }

    #[test]
    fn hash_matches_equality() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(KeySetSpec::new(KeyLength::Len256, 4));
        assert!(set.contains(&KeySetSpec::new(KeyLength::Len256, 4)));
        assert!(!set.contains(&KeySetSpec::new(KeyLength::Len256, 5)));
    }

    #[test]
    fn serde_recomputes_validity() {
        let spec = KeySetSpec::new(KeyLength::Len512, 6);
        let encoded = serde_json::to_string(&spec).unwrap();
        let decoded: KeySetSpec = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, spec);
        assert!(decoded.is_valid());

        // An invalid spec survives the round trip as invalid
        let bad = KeySetSpec::new(KeyLength::Len128, 2);
        let encoded = serde_json::to_string(&bad).unwrap();
        let decoded: KeySetSpec = serde_json::from_str(&encoded).unwrap();
        assert!(!decoded.is_valid());
    }
}
