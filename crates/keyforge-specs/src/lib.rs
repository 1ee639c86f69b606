//! Keyforge Algorithm Specifications
//!
//! Immutable, validated descriptors for every algorithm family the Keyforge
//! engine composes: key bit-lengths, digest specifications, keyset cascade
//! parameters, symmetric key families, and the signature/agreement catalog.
//!
//! Every type in this crate is a pure value. None of them own secret
//! material, all of them are cheap to copy or clone, and all of them are
//! safe to share freely across threads.
//!
//! # Validity Model
//!
//! Construction never fails. A spec built from an unsupported parameter
//! combination carries `valid == false`, computed exactly once at
//! construction and never mutated. Callers decide whether to reject an
//! invalid spec immediately or propagate it through a validation pipeline
//! (the `keyforge-crypto` factories reject loudly).
//!
//! Equality and hashing are structural on the identifying parameters only;
//! the derived validity flag never participates in identity.
//!
//! # Persisted Encoding
//!
//! [`KeyLength`] maps to a stable small integer id so that specs can be
//! persisted compactly. Serde round-trips go through that id, never through
//! the variant name.

pub mod catalog;
pub mod digest;
pub mod keyset;
pub mod length;
pub mod symkey;

pub use catalog::{
    AgreementKind, AgreementSpec, EcCurve, EdwardsCurve, KdfType, KeyPairType, RsaModulus,
    SignatureSpec, SignatureType,
};
pub use digest::{DigestSpec, DigestType};
pub use keyset::KeySetSpec;
pub use length::{KeyLength, UnknownLengthId};
pub use symkey::{KeyType, MacKeyType, SymKeyType};
