//! Digest specifications.
//!
//! A [`DigestSpec`] pins down one concrete digest: the family, the output
//! length, an optional alternate internal-state width (for truncated
//! variants such as SHA-512/256), and whether the extendable-output mode is
//! requested. The spec only captures *what* was asked for; whether a
//! provider can actually deliver it is the digest factory's concern.

use serde::{Deserialize, Serialize};

use crate::length::KeyLength;

/// A digest algorithm family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DigestType {
    /// The SHA-2 family (SHA-256, SHA-512, SHA-512/256)
    Sha2,
    /// The SHA-3 family (SHA3-256, SHA3-512)
    Sha3,
    /// The SHAKE extendable-output family (SHAKE128, SHAKE256)
    Shake,
}

impl DigestType {
    /// Every digest family, in catalog order.
    pub const ALL: [DigestType; 3] = [Self::Sha2, Self::Sha3, Self::Shake];

    /// Output lengths this family declares support for.
    pub fn supported_lengths(self) -> &'static [KeyLength] {
        match self {
            Self::Sha2 | Self::Sha3 => &[KeyLength::Len256, KeyLength::Len512],
            Self::Shake => &[KeyLength::Len128, KeyLength::Len256],
        }
    }

    /// Default output length for this family.
    pub fn default_length(self) -> KeyLength {
        match self {
            Self::Sha2 | Self::Sha3 | Self::Shake => KeyLength::Len256,
        }
    }

    /// Whether this family has an extendable-output mode.
    pub fn is_xof_capable(self) -> bool {
        matches!(self, Self::Shake)
    }

    /// Alternate internal-state widths this family declares, if any.
    ///
    /// SHA-2 supports running the 512-bit compression function truncated to
    /// a shorter output (SHA-512/256). The other families have none.
    pub fn state_lengths(self) -> &'static [KeyLength] {
        match self {
            Self::Sha2 => &[KeyLength::Len512],
            Self::Sha3 | Self::Shake => &[],
        }
    }
}

/// An immutable digest specification.
///
/// Built via the named constructors. Identity is structural on all four
/// parameters; the fields never change after construction, so validity is a
/// fixed property of the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DigestSpec {
    digest_type: DigestType,
    state: Option<KeyLength>,
    length: KeyLength,
    xof: bool,
}

impl DigestSpec {
    /// A SHA-2 digest with the given output length.
    pub fn sha2(length: KeyLength) -> Self {
        Self::build(DigestType::Sha2, None, length, false)
    }

    /// A SHA-2 digest truncated from the 512-bit state (SHA-512/256).
    pub fn sha2_alternate(length: KeyLength) -> Self {
        Self::build(DigestType::Sha2, Some(KeyLength::Len512), length, false)
    }

    /// A SHA-3 digest with the given output length.
    pub fn sha3(length: KeyLength) -> Self {
        Self::build(DigestType::Sha3, None, length, false)
    }

    /// A SHAKE digest with a fixed output of the given length.
    pub fn shake(length: KeyLength) -> Self {
        Self::build(DigestType::Shake, None, length, false)
    }

    /// A SHAKE digest in extendable-output mode.
    pub fn shake_xof(length: KeyLength) -> Self {
        Self::build(DigestType::Shake, None, length, true)
    }

    /// Generic constructor used by the named ones and by enumeration.
    pub fn build(
        digest_type: DigestType,
        state: Option<KeyLength>,
        length: KeyLength,
        xof: bool,
    ) -> Self {
        Self { digest_type, state, length, xof }
    }

    fn check(digest_type: DigestType, state: Option<KeyLength>, length: KeyLength, xof: bool) -> bool {
        if !digest_type.supported_lengths().contains(&length) {
            return false;
        }
        if let Some(state) = state {
            // A truncated variant must use a declared state width and must
            // actually truncate.
            if !digest_type.state_lengths().contains(&state) || state <= length {
                return false;
            }
        }
        if xof && !digest_type.is_xof_capable() {
            return false;
        }
        true
    }

    /// The digest family.
    pub fn digest_type(&self) -> DigestType {
        self.digest_type
    }

    /// Alternate internal-state width, if this is a truncated variant.
    pub fn state(&self) -> Option<KeyLength> {
        self.state
    }

    /// Output length.
    pub fn length(&self) -> KeyLength {
        self.length
    }

    /// Output length in whole bytes.
    pub fn output_bytes(&self) -> usize {
        self.length.bytes()
    }

    /// Whether extendable-output mode was requested.
    pub fn is_xof(&self) -> bool {
        self.xof
    }

    /// Whether the parameter combination is internally consistent.
    pub fn is_valid(&self) -> bool {
        Self::check(self.digest_type, self.state, self.length, self.xof)
    }
}

impl std::fmt::Display for DigestSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.digest_type, self.state) {
            (DigestType::Sha2, Some(state)) => write!(f, "SHA-{}/{}", state.bits(), self.length.bits()),
            (DigestType::Sha2, None) => write!(f, "SHA-{}", self.length.bits()),
            (DigestType::Sha3, _) => write!(f, "SHA3-{}", self.length.bits()),
            (DigestType::Shake, _) => write!(f, "SHAKE{}", self.length.bits()),
        }
    }
}
