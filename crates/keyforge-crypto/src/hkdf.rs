//! Generalized HKDF derivation engine.
//!
//! RFC-5869-style two-phase derivation, generalized two ways:
//!
//! - **Multiple inputs**: any number of initial keying materials, salts,
//!   and info fields, concatenated in registration order before hashing.
//!   This lets a process-wide personalization string compose with
//!   caller-supplied context deterministically.
//! - **Two digests**: the extract and expand phases each run over their own
//!   independently chosen digest, so a weakness in one digest family does
//!   not take both phases down. The engine is digest-agnostic; the two
//!   [`DigestSpec`]s are supplied at construction (by the key generator).
//!
//! # Parameter Lifecycle
//!
//! An [`HkdfParams`] is built per derivation, consumed once, and then
//! **must** be cleared via [`HkdfParams::clear`], which overwrites every
//! stored byte buffer with zero. Drop performs the same overwrite as a
//! backstop, but clearing explicitly is the contract: the engine itself
//! never retains parameter state across calls.

use keyforge_specs::DigestSpec;

use crate::{
    error::{CryptoError, Result},
    provider::DigestProvider,
    secret::SecretBytes,
};

/// Maximum number of expand rounds RFC 5869 admits.
const MAX_EXPAND_ROUNDS: usize = 255;

/// Which HKDF phases a derivation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HkdfMode {
    /// Extract a pseudorandom key from salts and IKMs; no stretching
    Extract,
    /// Stretch a caller-supplied PRK to the requested length
    Expand,
    /// Run both phases; the PRK stays internal
    ExtractThenExpand,
}

/// Parameters for one derivation.
///
/// Built via the named constructors, then enriched with chained
/// [`with_ikm`](Self::with_ikm) / [`with_salt`](Self::with_salt) /
/// [`with_info`](Self::with_info) calls. Each call copies and appends;
/// empty inputs are silently ignored.
#[derive(Debug)]
pub struct HkdfParams {
    mode: HkdfMode,
    prk: Option<SecretBytes>,
    length: usize,
    ikms: Vec<SecretBytes>,
    salts: Vec<SecretBytes>,
    infos: Vec<SecretBytes>,
}

impl HkdfParams {
    /// Produce a PRK only; the output length is the extract digest's.
    pub fn extract_only() -> Self {
        Self {
            mode: HkdfMode::Extract,
            prk: None,
            length: 0,
            ikms: Vec::new(),
            salts: Vec::new(),
            infos: Vec::new(),
        }
    }

    /// Stretch a caller-supplied PRK to `length` bytes.
    pub fn expand_only(prk: &[u8], length: usize) -> Result<Self> {
        if prk.is_empty() {
            return Err(CryptoError::data("expand requires a non-empty PRK"));
        }
        if length == 0 {
            return Err(CryptoError::data("expand requires a positive output length"));
        }
        Ok(Self {
            mode: HkdfMode::Expand,
            prk: Some(SecretBytes::from_slice(prk)),
            length,
            ikms: Vec::new(),
            salts: Vec::new(),
            infos: Vec::new(),
        })
    }

    /// Run extract then expand, producing `length` bytes.
    pub fn extract_then_expand(length: usize) -> Result<Self> {
        if length == 0 {
            return Err(CryptoError::data("expand requires a positive output length"));
        }
        Ok(Self {
            mode: HkdfMode::ExtractThenExpand,
            prk: None,
            length,
            ikms: Vec::new(),
            salts: Vec::new(),
            infos: Vec::new(),
        })
    }

    /// Append initial keying material. Empty input is ignored.
    pub fn with_ikm(mut self, ikm: &[u8]) -> Self {
        if !ikm.is_empty() {
            self.ikms.push(SecretBytes::from_slice(ikm));
        }
        self
    }

    /// Append salt material. Empty input is ignored.
    pub fn with_salt(mut self, salt: &[u8]) -> Self {
        if !salt.is_empty() {
            self.salts.push(SecretBytes::from_slice(salt));
        }
        self
    }

    /// Append an info field. Empty input is ignored.
    pub fn with_info(mut self, info: &[u8]) -> Self {
        if !info.is_empty() {
            self.infos.push(SecretBytes::from_slice(info));
        }
        self
    }

    /// Which phases this derivation runs.
    pub fn mode(&self) -> HkdfMode {
        self.mode
    }

    /// Requested output length (unused in extract-only mode).
    pub fn length(&self) -> usize {
        self.length
    }

    /// Registered keying materials, in registration order.
    pub fn ikms(&self) -> &[SecretBytes] {
        &self.ikms
    }

    /// Registered salts, in registration order.
    pub fn salts(&self) -> &[SecretBytes] {
        &self.salts
    }

    /// Registered info fields, in registration order.
    pub fn infos(&self) -> &[SecretBytes] {
        &self.infos
    }

    /// The caller-supplied PRK, in expand-only mode.
    pub fn prk(&self) -> Option<&SecretBytes> {
        self.prk.as_ref()
    }

    /// Overwrite every stored byte buffer with zero.
    ///
    /// This is the hard security contract for parameter objects, not an
    /// optimization: call it as soon as the derivation returns. After
    /// clearing, the params report no residual material.
    pub fn clear(&mut self) {
        if let Some(prk) = self.prk.as_mut() {
            prk.zero();
        }
        self.prk = None;
        for buffer in &mut self.ikms {
            buffer.zero();
        }
        self.ikms.clear();
        for buffer in &mut self.salts {
            buffer.zero();
        }
        self.salts.clear();
        for buffer in &mut self.infos {
            buffer.zero();
        }
        self.infos.clear();
    }
}

impl Drop for HkdfParams {
    fn drop(&mut self) {
        self.clear();
    }
}

/// The derivation engine: two digests plus a provider, no retained state.
pub struct HkdfEngine<'a> {
    extract_digest: DigestSpec,
    expand_digest: DigestSpec,
    provider: &'a dyn DigestProvider,
}

impl<'a> HkdfEngine<'a> {
    /// Build an engine over the given extract/expand digests.
    ///
    /// Fails with a data error for an invalid digest spec and a provider
    /// error when the provider cannot HMAC with one of them.
    pub fn new(
        extract_digest: DigestSpec,
        expand_digest: DigestSpec,
        provider: &'a dyn DigestProvider,
    ) -> Result<Self> {
        for spec in [&extract_digest, &expand_digest] {
            if !spec.is_valid() {
                return Err(CryptoError::data(format!("invalid digest spec: {spec}")));
            }
            if !provider.supports_hmac(spec) {
                return Err(CryptoError::provider(format!("no HMAC support for {spec}")));
            }
        }
        Ok(Self { extract_digest, expand_digest, provider })
    }

    /// The digest driving the extract phase.
    pub fn extract_digest(&self) -> &DigestSpec {
        &self.extract_digest
    }

    /// The digest driving the expand phase.
    pub fn expand_digest(&self) -> &DigestSpec {
        &self.expand_digest
    }

    /// Run the derivation the params describe.
    ///
    /// The caller owns the params and must [`clear`](HkdfParams::clear)
    /// them once the result is in hand.
    pub fn derive(&self, params: &HkdfParams) -> Result<SecretBytes> {
        match params.mode() {
            HkdfMode::Extract => self.extract(params),
            HkdfMode::Expand => {
                let prk = params
                    .prk()
                    .filter(|prk| !prk.is_empty())
                    .ok_or_else(|| CryptoError::data("expand requires a non-empty PRK"))?;
                self.expand(prk.as_slice(), params.infos(), params.length())
            },
            HkdfMode::ExtractThenExpand => {
                let mut prk = self.extract(params)?;
                let result = self.expand(prk.as_slice(), params.infos(), params.length());
                prk.zero();
                result
            },
        }
    }

    /// Extract phase: PRK = HMAC(concat(salts), concat(ikms)).
    ///
    /// An absent salt defaults to a zero block of the digest's width, per
    /// RFC 5869.
    fn extract(&self, params: &HkdfParams) -> Result<SecretBytes> {
        let salt = if params.salts().is_empty() {
            SecretBytes::new(vec![0u8; self.extract_digest.output_bytes()])
        } else {
            let mut salt = SecretBytes::empty();
            for entry in params.salts() {
                salt.extend_from_slice(entry.as_slice());
            }
            salt
        };

        let mut mac = self.provider.hmac(&self.extract_digest, salt.as_slice())?;
        for ikm in params.ikms() {
            mac.update(ikm.as_slice());
        }
        Ok(SecretBytes::new(mac.finalize()))
    }

    /// Expand phase: the RFC 5869 counter loop over the expand digest,
    /// with all registered info fields concatenated into each round.
    fn expand(&self, prk: &[u8], infos: &[SecretBytes], length: usize) -> Result<SecretBytes> {
        if length == 0 {
            return Err(CryptoError::data("expand requires a positive output length"));
        }
        let hash_len = self.expand_digest.output_bytes();
        let rounds = length.div_ceil(hash_len);
        if rounds > MAX_EXPAND_ROUNDS {
            return Err(CryptoError::data(format!(
                "requested {length} bytes exceeds the {} byte expand limit",
                MAX_EXPAND_ROUNDS * hash_len
            )));
        }

        let mut block = SecretBytes::empty();
        let mut stretched = SecretBytes::empty();
        for round in 1..=rounds {
            let mut mac = self.provider.hmac(&self.expand_digest, prk)?;
            mac.update(block.as_slice());
            for info in infos {
                mac.update(info.as_slice());
            }
            mac.update(&[round as u8]);
            block = SecretBytes::new(mac.finalize());
            stretched.extend_from_slice(block.as_slice());
        }

        // Copy out exactly the requested bytes; the working buffers zeroize
        // on drop.
        Ok(SecretBytes::from_slice(&stretched.as_slice()[..length]))
    }
}
