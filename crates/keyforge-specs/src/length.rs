//! Key bit-length registry.
//!
//! Enumerates the key lengths the engine supports and maps each to a stable
//! small integer id for compact persisted encoding. The ids are part of the
//! on-disk contract: existing variants must never be renumbered.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A key bit-length supported by the engine.
///
/// Serde encodes this as its stable id, not the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum KeyLength {
    /// 128-bit keys
    Len128,
    /// 192-bit keys
    Len192,
    /// 256-bit keys
    Len256,
    /// 512-bit keys
    Len512,
    /// 1024-bit keys
    Len1024,
}

/// An id that does not name any registered key length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown key length id: {0}")]
pub struct UnknownLengthId(pub u8);

impl KeyLength {
    /// Every supported length, in ascending order.
    pub const ALL: [KeyLength; 5] =
        [Self::Len128, Self::Len192, Self::Len256, Self::Len512, Self::Len1024];

    /// Length in bits.
    pub fn bits(self) -> u32 {
        match self {
            Self::Len128 => 128,
            Self::Len192 => 192,
            Self::Len256 => 256,
            Self::Len512 => 512,
            Self::Len1024 => 1024,
        }
    }

    /// Length in whole bytes.
    pub fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// Stable persisted id for this length.
    ///
    /// Ids start at 1 so that a zero byte in persisted data is never a
    /// valid length.
    pub fn id(self) -> u8 {
        match self {
            Self::Len128 => 1,
            Self::Len192 => 2,
            Self::Len256 => 3,
            Self::Len512 => 4,
            Self::Len1024 => 5,
        }
    }

    /// Look up a length by its persisted id.
    pub fn from_id(id: u8) -> Result<Self, UnknownLengthId> {
        match id {
            1 => Ok(Self::Len128),
            2 => Ok(Self::Len192),
            3 => Ok(Self::Len256),
            4 => Ok(Self::Len512),
            5 => Ok(Self::Len1024),
            other => Err(UnknownLengthId(other)),
        }
    }
}

impl From<KeyLength> for u8 {
    fn from(length: KeyLength) -> Self {
        length.id()
    }
}

impl TryFrom<u8> for KeyLength {
    type Error = UnknownLengthId;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id)
    }
}

impl std::fmt::Display for KeyLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip() {
        for length in KeyLength::ALL {
            assert_eq!(KeyLength::from_id(length.id()), Ok(length));
        }
    }

    #[test]
    fn ids_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for length in KeyLength::ALL {
            assert!(seen.insert(length.id()), "duplicate id for {length}");
        }
    }

    #[test]
    fn zero_id_is_rejected() {
        assert_eq!(KeyLength::from_id(0), Err(UnknownLengthId(0)));
    }

    #[test]
    fn unknown_ids_are_rejected() {
        for id in 6..=u8::MAX {
            assert_eq!(KeyLength::from_id(id), Err(UnknownLengthId(id)));
        }
    }

    #[test]
    fn bytes_matches_bits() {
        for length in KeyLength::ALL {
            assert_eq!(length.bytes() * 8, length.bits() as usize);
        }
    }

    #[test]
    fn serde_encodes_the_id() {
        let encoded = serde_json::to_string(&KeyLength::Len256).unwrap();
        assert_eq!(encoded, "3");

        let decoded: KeyLength = serde_json::from_str("5").unwrap();
        assert_eq!(decoded, KeyLength::Len1024);
    }

    #[test]
    fn serde_rejects_unknown_ids() {
        let result: Result<KeyLength, _> = serde_json::from_str("9");
        assert!(result.is_err());
    }
}
