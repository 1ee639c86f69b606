//! Signature and agreement spec catalog.
//!
//! Static factories producing validated immutable parameter records for
//! signature and key-agreement algorithm combinations, including composite
//! and post-quantum variants. These records are consumed by key-pair
//! machinery above this crate; there is no runtime algorithmic logic here
//! beyond constructing and validating tuples.

use serde::{Deserialize, Serialize};

use crate::digest::DigestSpec;

/// RSA modulus sizes the catalog admits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RsaModulus {
    /// 2048-bit modulus
    Mod2048,
    /// 3072-bit modulus
    Mod3072,
    /// 4096-bit modulus
    Mod4096,
}

/// Short-Weierstrass curves for EC signatures and agreements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EcCurve {
    /// NIST P-256
    P256,
    /// NIST P-384
    P384,
    /// NIST P-521
    P521,
}

/// Edwards curves for EdDSA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdwardsCurve {
    /// Curve25519 (Ed25519)
    Ed25519,
    /// Curve448 (Ed448)
    Ed448,
}

/// Key-pair algorithm families known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyPairType {
    /// RSA with the given modulus
    Rsa(RsaModulus),
    /// Classic DSA
    Dsa,
    /// EC-DSA over the given curve
    Ec(EcCurve),
    /// SM2 over its standard curve
    Sm2,
    /// EdDSA over the given Edwards curve
    EdDsa(EdwardsCurve),
    /// ML-DSA (FIPS 204 lattice signatures)
    MlDsa,
    /// SLH-DSA (FIPS 205 hash-based signatures)
    SlhDsa,
    /// FALCON lattice signatures
    Falcon,
    /// MAYO multivariate signatures
    Mayo,
    /// SNOVA multivariate signatures
    Snova,
    /// PICNIC zero-knowledge signatures
    Picnic,
    /// XMSS stateful hash-based signatures
    Xmss {
        /// Whether the pre-hashed variant is used
        prehash: bool,
    },
    /// LMS stateful hash-based signatures
    Lms,
    /// ML-KEM (FIPS 203 key encapsulation)
    MlKem,
    /// A composite of several component key pairs
    Composite,
}

/// How a signature binds to the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureType {
    /// The algorithm's native signing mode
    Native,
    /// Sign a digest of the message rather than the message itself
    PreHash,
    /// RSA-PSS padding
    Pss,
}

/// An immutable signature parameter record.
///
/// Built by the per-family factories; equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SignatureSpec {
    key_pair: KeyPairType,
    signature_type: SignatureType,
    digest: Option<DigestSpec>,
    components: Vec<SignatureSpec>,
}

impl SignatureSpec {
    fn simple(key_pair: KeyPairType, signature_type: SignatureType, digest: Option<DigestSpec>) -> Self {
        Self { key_pair, signature_type, digest, components: Vec::new() }
    }

    /// RSA-PSS with the given modulus and message digest.
    pub fn rsa(modulus: RsaModulus, digest: DigestSpec) -> Self {
        Self::simple(KeyPairType::Rsa(modulus), SignatureType::Pss, Some(digest))
    }

    /// Classic DSA with the given message digest.
    pub fn dsa(digest: DigestSpec) -> Self {
        Self::simple(KeyPairType::Dsa, SignatureType::Native, Some(digest))
    }

    /// EC-DSA over the given curve and message digest.
    pub fn ec(curve: EcCurve, digest: DigestSpec) -> Self {
        Self::simple(KeyPairType::Ec(curve), SignatureType::Native, Some(digest))
    }

    /// SM2 signatures with the given message digest.
    pub fn sm2(digest: DigestSpec) -> Self {
        Self::simple(KeyPairType::Sm2, SignatureType::Native, Some(digest))
    }

    /// Ed25519 in its native (pure) mode.
    pub fn ed25519() -> Self {
        Self::simple(KeyPairType::EdDsa(EdwardsCurve::Ed25519), SignatureType::Native, None)
    }

    /// Ed448 in its native (pure) mode.
    pub fn ed448() -> Self {
        Self::simple(KeyPairType::EdDsa(EdwardsCurve::Ed448), SignatureType::Native, None)
    }

    /// ML-DSA lattice signatures.
    pub fn mldsa() -> Self {
        Self::simple(KeyPairType::MlDsa, SignatureType::Native, None)
    }

    /// SLH-DSA hash-based signatures.
    pub fn slhdsa() -> Self {
        Self::simple(KeyPairType::SlhDsa, SignatureType::Native, None)
    }

    /// FALCON lattice signatures.
    pub fn falcon() -> Self {
        Self::simple(KeyPairType::Falcon, SignatureType::Native, None)
    }

    /// MAYO multivariate signatures.
    pub fn mayo() -> Self {
        Self::simple(KeyPairType::Mayo, SignatureType::Native, None)
    }

    /// SNOVA multivariate signatures.
    pub fn snova() -> Self {
        Self::simple(KeyPairType::Snova, SignatureType::Native, None)
    }

    /// PICNIC zero-knowledge signatures.
    pub fn picnic() -> Self {
        Self::simple(KeyPairType::Picnic, SignatureType::Native, None)
    }

    /// XMSS, optionally in its pre-hashed variant.
    pub fn xmss(prehash: bool) -> Self {
        let signature_type = if prehash { SignatureType::PreHash } else { SignatureType::Native };
        Self::simple(KeyPairType::Xmss { prehash }, signature_type, None)
    }

    /// LMS stateful hash-based signatures.
    pub fn lms() -> Self {
        Self::simple(KeyPairType::Lms, SignatureType::Native, None)
    }

    /// A composite of two or more component signature specs.
    ///
    /// Components must themselves be valid and non-composite.
    pub fn composite(components: Vec<SignatureSpec>) -> Self {
        Self {
            key_pair: KeyPairType::Composite,
            signature_type: SignatureType::Native,
            digest: None,
            components,
        }
    }

    /// The key-pair family this spec signs with.
    pub fn key_pair(&self) -> KeyPairType {
        self.key_pair
    }

    /// The signing mode.
    pub fn signature_type(&self) -> SignatureType {
        self.signature_type
    }

    /// The message digest, for families that take one.
    pub fn digest(&self) -> Option<&DigestSpec> {
        self.digest.as_ref()
    }

    /// Component specs of a composite; empty otherwise.
    pub fn components(&self) -> &[SignatureSpec] {
        &self.components
    }

    /// Whether the parameter combination is admissible.
    pub fn is_valid(&self) -> bool {
        match self.key_pair {
            // Digest-parameterized families need a valid, non-XOF digest
            KeyPairType::Rsa(_) | KeyPairType::Dsa | KeyPairType::Ec(_) | KeyPairType::Sm2 => {
                self.components.is_empty()
                    && self.digest.is_some_and(|d| d.is_valid() && !d.is_xof())
            },
            // Families with a fixed internal digest take none
            KeyPairType::EdDsa(_)
            | KeyPairType::MlDsa
            | KeyPairType::SlhDsa
            | KeyPairType::Falcon
            | KeyPairType::Mayo
            | KeyPairType::Snova
            | KeyPairType::Picnic
            | KeyPairType::Xmss { .. }
            | KeyPairType::Lms => self.components.is_empty() && self.digest.is_none(),
            // KEM key pairs cannot sign
            KeyPairType::MlKem => false,
            KeyPairType::Composite => {
                self.components.len() >= 2
                    && self
                        .components
                        .iter()
                        .all(|c| c.is_valid() && c.key_pair != KeyPairType::Composite)
            },
        }
    }
}

/// Flavour of key agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgreementKind {
    /// Key encapsulation (one-shot, receiver key only)
    Kem,
    /// Anonymous (ephemeral-only) Diffie-Hellman
    Anon,
    /// Basic static Diffie-Hellman
    Basic,
    /// Static agreement authenticated by a signature
    Signed,
    /// MQV authenticated agreement
    Mqv,
    /// NIST unified-model agreement
    Unified,
    /// SM2 key exchange
    Sm2,
}

/// Key-derivation function applied to the raw agreed secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KdfType {
    /// Use the raw agreed secret
    None,
    /// SHA-256 based KDF
    Sha256Kdf,
    /// SHA-512 based KDF
    Sha512Kdf,
}

/// An immutable agreement parameter record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AgreementSpec {
    key_pair: KeyPairType,
    kind: AgreementKind,
    kdf: KdfType,
    confirm: Option<bool>,
}

impl AgreementSpec {
    /// Anonymous EC Diffie-Hellman.
    pub fn ec_anon(curve: EcCurve, kdf: KdfType) -> Self {
        Self { key_pair: KeyPairType::Ec(curve), kind: AgreementKind::Anon, kdf, confirm: None }
    }

    /// Basic static EC Diffie-Hellman.
    pub fn ec_basic(curve: EcCurve, kdf: KdfType) -> Self {
        Self { key_pair: KeyPairType::Ec(curve), kind: AgreementKind::Basic, kdf, confirm: None }
    }

    /// Signed EC agreement.
    pub fn ec_signed(curve: EcCurve, kdf: KdfType) -> Self {
        Self { key_pair: KeyPairType::Ec(curve), kind: AgreementKind::Signed, kdf, confirm: None }
    }

    /// EC MQV, optionally with key confirmation.
    pub fn ec_mqv(curve: EcCurve, kdf: KdfType, confirm: bool) -> Self {
        Self {
            key_pair: KeyPairType::Ec(curve),
            kind: AgreementKind::Mqv,
            kdf,
            confirm: Some(confirm),
        }
    }

    /// EC unified model, optionally with key confirmation.
    pub fn ec_unified(curve: EcCurve, kdf: KdfType, confirm: bool) -> Self {
        Self {
            key_pair: KeyPairType::Ec(curve),
            kind: AgreementKind::Unified,
            kdf,
            confirm: Some(confirm),
        }
    }

    /// SM2 key exchange, optionally with key confirmation.
    pub fn sm2(kdf: KdfType, confirm: bool) -> Self {
        Self { key_pair: KeyPairType::Sm2, kind: AgreementKind::Sm2, kdf, confirm: Some(confirm) }
    }

    /// ML-KEM encapsulation.
    pub fn mlkem(kdf: KdfType) -> Self {
        Self { key_pair: KeyPairType::MlKem, kind: AgreementKind::Kem, kdf, confirm: None }
    }

    /// RSA key encapsulation.
    pub fn rsa_kem(modulus: RsaModulus, kdf: KdfType) -> Self {
        Self { key_pair: KeyPairType::Rsa(modulus), kind: AgreementKind::Kem, kdf, confirm: None }
    }

    /// The key-pair family agreed with.
    pub fn key_pair(&self) -> KeyPairType {
        self.key_pair
    }

    /// The agreement flavour.
    pub fn kind(&self) -> AgreementKind {
        self.kind
    }

    /// The KDF applied to the agreed secret.
    pub fn kdf(&self) -> KdfType {
        self.kdf
    }

    /// Key-confirmation flag for kinds that support it.
    pub fn confirm(&self) -> Option<bool> {
        self.confirm
    }

    /// Whether the parameter combination is admissible.
    pub fn is_valid(&self) -> bool {
        match self.kind {
            AgreementKind::Kem => {
                matches!(self.key_pair, KeyPairType::MlKem | KeyPairType::Rsa(_))
                    && self.confirm.is_none()
            },
            AgreementKind::Anon | AgreementKind::Basic | AgreementKind::Signed => {
                matches!(self.key_pair, KeyPairType::Ec(_)) && self.confirm.is_none()
            },
            AgreementKind::Mqv | AgreementKind::Unified => {
                matches!(self.key_pair, KeyPairType::Ec(_)) && self.confirm.is_some()
            },
            AgreementKind::Sm2 => {
                self.key_pair == KeyPairType::Sm2 && self.confirm.is_some()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::length::KeyLength;

    #[test]
    fn digest_families_require_a_digest() {
        assert!(SignatureSpec::rsa(RsaModulus::Mod2048, DigestSpec::sha2(KeyLength::Len256)).is_valid());
        assert!(SignatureSpec::ec(EcCurve::P256, DigestSpec::sha3(KeyLength::Len256)).is_valid());
        assert!(SignatureSpec::dsa(DigestSpec::sha2(KeyLength::Len256)).is_valid());
    }

    #[test]
    fn invalid_digest_invalidates_the_spec() {
        // SHA-2 does not declare a 128-bit output
        let spec = SignatureSpec::rsa(RsaModulus::Mod3072, DigestSpec::sha2(KeyLength::Len128));
        assert!(!spec.is_valid());

        // XOF digests cannot be message digests for signatures
        let spec = SignatureSpec::ec(EcCurve::P384, DigestSpec::shake_xof(KeyLength::Len256));
        assert!(!spec.is_valid());
    }

    #[test]
    fn post_quantum_families_are_digestless() {
        for spec in [
            SignatureSpec::ed25519(),
            SignatureSpec::ed448(),
            SignatureSpec::mldsa(),
            SignatureSpec::slhdsa(),
            SignatureSpec::falcon(),
            SignatureSpec::mayo(),
            SignatureSpec::snova(),
            SignatureSpec::picnic(),
            SignatureSpec::xmss(false),
            SignatureSpec::xmss(true),
            SignatureSpec::lms(),
        ] {
            assert!(spec.is_valid(), "{spec:?} must be valid");
            assert!(spec.digest().is_none());
        }
    }

    #[test]
    fn xmss_prehash_sets_the_signature_type() {
        assert_eq!(SignatureSpec::xmss(true).signature_type(), SignatureType::PreHash);
        assert_eq!(SignatureSpec::xmss(false).signature_type(), SignatureType::Native);
    }

    #[test]
    fn composite_requires_two_valid_components() {
        let good = SignatureSpec::composite(vec![
            SignatureSpec::mldsa(),
            SignatureSpec::ec(EcCurve::P256, DigestSpec::sha2(KeyLength::Len256)),
        ]);
        assert!(good.is_valid());

        assert!(!SignatureSpec::composite(vec![SignatureSpec::mldsa()]).is_valid());
        assert!(!SignatureSpec::composite(Vec::new()).is_valid());

        // No nesting
        let nested = SignatureSpec::composite(vec![good.clone(), SignatureSpec::falcon()]);
        assert!(!nested.is_valid());
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(SignatureSpec::mldsa(), SignatureSpec::mldsa());
        assert_eq!(
            SignatureSpec::ec(EcCurve::P256, DigestSpec::sha2(KeyLength::Len256)),
            SignatureSpec::ec(EcCurve::P256, DigestSpec::sha2(KeyLength::Len256)),
        );
        assert_ne!(
            SignatureSpec::ec(EcCurve::P256, DigestSpec::sha2(KeyLength::Len256)),
            SignatureSpec::ec(EcCurve::P384, DigestSpec::sha2(KeyLength::Len256)),
        );
    }

    #[test]
    fn agreement_confirmation_rules() {
        assert!(AgreementSpec::ec_anon(EcCurve::P256, KdfType::Sha256Kdf).is_valid());
        assert!(AgreementSpec::ec_mqv(EcCurve::P256, KdfType::Sha256Kdf, true).is_valid());
        assert!(AgreementSpec::ec_unified(EcCurve::P521, KdfType::Sha512Kdf, false).is_valid());
        assert!(AgreementSpec::sm2(KdfType::Sha256Kdf, true).is_valid());
        assert!(AgreementSpec::mlkem(KdfType::Sha256Kdf).is_valid());
        assert!(AgreementSpec::rsa_kem(RsaModulus::Mod4096, KdfType::None).is_valid());
    }

    #[test]
    fn agreement_specs_round_trip_serde() {
        let spec = AgreementSpec::ec_mqv(EcCurve::P384, KdfType::Sha512Kdf, true);
        let encoded = serde_json::to_string(&spec).unwrap();
        let decoded: AgreementSpec = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, spec);
    }
}
