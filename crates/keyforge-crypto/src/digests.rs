//! Digest capability negotiation.
//!
//! Wraps the injected provider with validation and enumeration: which
//! digest specs are internally consistent, which of those the provider can
//! actually deliver, and loud checking for callers that must not proceed
//! with an unusable spec. Enumeration walks the full Cartesian space of
//! (family x state x length x xof); it serves capability negotiation and
//! tests, never a hot path.

use std::sync::Arc;

use keyforge_specs::{DigestSpec, DigestType};

use crate::{
    error::{CryptoError, Result},
    provider::{DigestEngine, DigestProvider},
};

/// Validating facade over a digest provider.
#[derive(Clone)]
pub struct DigestFactory {
    provider: Arc<dyn DigestProvider>,
}

impl DigestFactory {
    pub(crate) fn new(provider: Arc<dyn DigestProvider>) -> Self {
        Self { provider }
    }

    /// Whether the spec is valid and the provider can deliver it.
    ///
    /// XOF specs additionally require the provider to support
    /// extendable-output digests at all.
    pub fn supported_digest_spec(&self, spec: &DigestSpec) -> bool {
        spec.is_valid()
            && self.provider.supports_digest_spec(spec)
            && (!spec.is_xof() || self.provider.supports_xof())
    }

    /// Whether any spec of the family is supported.
    pub fn supported_digest_type(&self, digest_type: DigestType) -> bool {
        self.provider.supports_digest_type(digest_type)
            && Self::specs_for(digest_type).iter().any(|spec| self.supported_digest_spec(spec))
    }

    /// Check a spec, failing loudly.
    ///
    /// # Errors
    ///
    /// A data error for an internally inconsistent spec; a provider error
    /// for a consistent spec this provider cannot deliver.
    pub fn check_digest_spec(&self, spec: &DigestSpec) -> Result<()> {
        if !spec.is_valid() {
            return Err(CryptoError::data(format!("invalid digest spec: {spec}")));
        }
        if !self.supported_digest_spec(spec) {
            return Err(CryptoError::provider(format!("digest not supported: {spec}")));
        }
        Ok(())
    }

    /// Build a digest engine for a checked spec.
    pub fn digest(&self, spec: &DigestSpec) -> Result<Box<dyn DigestEngine>> {
        self.check_digest_spec(spec)?;
        self.provider.digest(spec)
    }

    /// Every internally consistent spec, supported or not.
    pub fn list_all_possible() -> Vec<DigestSpec> {
        let mut specs = Vec::new();
        for digest_type in DigestType::ALL {
            specs.extend(Self::specs_for(digest_type));
        }
        specs
    }

    /// Every spec this factory will actually serve.
    pub fn list_all_supported(&self) -> Vec<DigestSpec> {
        Self::list_all_possible()
            .into_iter()
            .filter(|spec| self.supported_digest_spec(spec))
            .collect()
    }

    /// Every family with at least one supported spec.
    pub fn list_all_supported_types(&self) -> Vec<DigestType> {
        DigestType::ALL
            .into_iter()
            .filter(|&digest_type| self.supported_digest_type(digest_type))
            .collect()
    }

    /// The Cartesian walk for one family, filtered to consistency.
    fn specs_for(digest_type: DigestType) -> Vec<DigestSpec> {
        let mut specs = Vec::new();
        for &length in digest_type.supported_lengths() {
            specs.push(DigestSpec::build(digest_type, None, length, false));
            for &state in digest_type.state_lengths() {
                let spec = DigestSpec::build(digest_type, Some(state), length, false);
                if spec.is_valid() {
                    specs.push(spec);
                }
            }
            if digest_type.is_xof_capable() {
                specs.push(DigestSpec::build(digest_type, None, length, true));
            }
        }
        specs
    }
}

#[cfg(test)]
mod tests {
    use keyforge_specs::KeyLength;

    use super::*;
    use crate::provider::RustCryptoProvider;

    fn factory() -> DigestFactory {
        DigestFactory::new(Arc::new(RustCryptoProvider))
    }

    #[test]
    fn listing_contains_the_standard_specs() {
        let possible = DigestFactory::list_all_possible();
        assert!(possible.contains(&DigestSpec::sha2(KeyLength::Len256)));
        assert!(possible.contains(&DigestSpec::sha2_alternate(KeyLength::Len256)));
        assert!(possible.contains(&DigestSpec::sha3(KeyLength::Len512)));
        assert!(possible.contains(&DigestSpec::shake_xof(KeyLength::Len256)));
    }

    #[test]
    fn listed_specs_are_all_valid() {
        for spec in DigestFactory::list_all_possible() {
            assert!(spec.is_valid(), "{spec}");
        }
    }

    #[test]
    fn every_supported_spec_passes_the_loud_check() {
        let factory = factory();
        let supported = factory.list_all_supported();
        assert!(!supported.is_empty());
        for spec in supported {
            factory.check_digest_spec(&spec).unwrap();
        }
    }

    #[test]
    fn supported_types_cover_all_families() {
        let types = factory().list_all_supported_types();
        assert_eq!(types, vec![DigestType::Sha2, DigestType::Sha3, DigestType::Shake]);
    }

    #[test]
    fn invalid_spec_fails_with_a_data_error() {
        let err = factory().check_digest_spec(&DigestSpec::sha2(KeyLength::Len128)).unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn checked_digest_runs() {
        let mut engine = factory().digest(&DigestSpec::sha3(KeyLength::Len256)).unwrap();
        engine.update(b"data");
        assert_eq!(engine.finalize().len(), 32);
    }
}
