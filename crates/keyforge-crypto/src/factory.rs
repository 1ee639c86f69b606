//! Engine assembly: providers plus personalization in one place.

use std::sync::Arc;

use keyforge_specs::{KeySetSpec, KeyType};
use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::{
    digests::DigestFactory,
    error::Result,
    generator::KeyGenerator,
    hkdf::{HkdfEngine, HkdfParams},
    keyset::KeySet,
    provider::{CipherProvider, DigestProvider, RustCryptoProvider},
    secret::SecretBytes,
};

/// Label mixed into keyset master-material derivation from a secret.
const KEYSET_SECRET_LABEL: &[u8] = b"keyset.master.v1";

/// Entry point wiring providers and personalization into the subsystems.
///
/// The personalization octets are a process-wide domain separator mixed
/// into every secret derivation; two deployments with different
/// personalization derive unrelated keys from identical secrets.
#[derive(Clone)]
pub struct CryptoFactory {
    digest_provider: Arc<dyn DigestProvider>,
    cipher_provider: Arc<dyn CipherProvider>,
    personalization: Vec<u8>,
}

impl CryptoFactory {
    /// Assemble a factory from injected providers.
    pub fn new(
        digest_provider: Arc<dyn DigestProvider>,
        cipher_provider: Arc<dyn CipherProvider>,
        personalization: &[u8],
    ) -> Self {
        debug!(personalization_len = personalization.len(), "crypto factory assembled");
        Self { digest_provider, cipher_provider, personalization: personalization.to_vec() }
    }

    /// Factory over the built-in RustCrypto provider.
    pub fn with_rustcrypto(personalization: &[u8]) -> Self {
        let provider = Arc::new(RustCryptoProvider::new());
        Self::new(provider.clone(), provider, personalization)
    }

    /// A key generator for the given family.
    pub fn key_generator<T: KeyType>(&self, key_type: T) -> KeyGenerator<T> {
        KeyGenerator::new(key_type, self.personalization.clone(), self.digest_provider.clone())
    }

    /// The digest capability facade.
    pub fn digest_factory(&self) -> DigestFactory {
        DigestFactory::new(self.digest_provider.clone())
    }

    /// A keyset over caller-supplied master material.
    pub fn keyset(&self, spec: KeySetSpec, master: SecretBytes) -> Result<KeySet> {
        KeySet::new(spec, master, self.digest_provider.clone(), self.cipher_provider.clone())
    }

    /// A keyset with fresh random master material.
    pub fn generate_keyset<R>(&self, spec: KeySetSpec, rng: &mut R) -> Result<KeySet>
    where
        R: RngCore + CryptoRng,
    {
        let mut master = vec![0u8; spec.key_length().bytes()];
        rng.fill_bytes(&mut master);
        self.keyset(spec, SecretBytes::new(master))
    }

    /// A keyset whose master material derives deterministically from a
    /// secret, personalization included.
    ///
    /// The same secret, spec, and seed sequence always rebuild the same
    /// keyset; that regenerability is what lets a password re-open
    /// previously encrypted data.
    pub fn derive_keyset_from_secret<R>(
        &self,
        spec: KeySetSpec,
        secret: &[u8],
        seeded: &mut R,
    ) -> Result<KeySet>
    where
        R: RngCore + CryptoRng,
    {
        let digests =
            crate::agility::derive_digest_specs(self.digest_provider.as_ref(), seeded, 2)?;
        let engine = HkdfEngine::new(digests[0], digests[1], self.digest_provider.as_ref())?;

        let mut params = HkdfParams::extract_then_expand(spec.key_length().bytes())?
            .with_ikm(secret)
            .with_salt(KEYSET_SECRET_LABEL)
            .with_info(&self.personalization);
        let master = engine.derive(&params);
        params.clear();

        self.keyset(spec, master?)
    }
}

#[cfg(test)]
mod tests {
    use keyforge_specs::{DigestSpec, KeyLength, MacKeyType, SymKeyType};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;

    fn factory() -> CryptoFactory {
        CryptoFactory::with_rustcrypto(b"keyforge-tests")
    }

    #[test]
    fn generated_keyset_roundtrips() {
        let factory = factory();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let keyset = factory.generate_keyset(KeySetSpec::default(), &mut rng).unwrap();

        let ciphertext = keyset.encrypt(&mut rng, b"factory built").unwrap();
        assert_eq!(keyset.decrypt(&ciphertext).unwrap(), b"factory built");
    }

    #[test]
    fn secret_derived_keysets_regenerate() {
        let factory = factory();
        let spec = KeySetSpec::default();

        let mut seed_a = ChaCha20Rng::seed_from_u64(21);
        let mut seed_b = ChaCha20Rng::seed_from_u64(21);
        let keyset_a =
            factory.derive_keyset_from_secret(spec, b"correct horse", &mut seed_a).unwrap();
        let keyset_b =
            factory.derive_keyset_from_secret(spec, b"correct horse", &mut seed_b).unwrap();

        // A ciphertext from one opens under the regenerated other
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let ciphertext = keyset_a.encrypt(&mut rng, b"shared state").unwrap();
        assert_eq!(keyset_b.decrypt(&ciphertext).unwrap(), b"shared state");
    }

    #[test]
    fn wrong_password_fails_to_open() {
        let factory = factory();
        let spec = KeySetSpec::default();

        let mut seed_a = ChaCha20Rng::seed_from_u64(5);
        let mut seed_b = ChaCha20Rng::seed_from_u64(5);
        let right = factory.derive_keyset_from_secret(spec, b"right password", &mut seed_a).unwrap();
        let wrong = factory.derive_keyset_from_secret(spec, b"wrong password", &mut seed_b).unwrap();

        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let ciphertext = right.encrypt(&mut rng, b"locked away").unwrap();
        let err = wrong.decrypt(&ciphertext).unwrap_err();
        assert!(err.is_bad_credentials());
    }

    #[test]
    fn invalid_spec_is_rejected() {
        let factory = factory();
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let err = factory
            .generate_keyset(KeySetSpec::new(KeyLength::Len256, 2), &mut rng)
            .unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn generators_share_the_factory_personalization() {
        let factory = factory();
        let sym = factory.key_generator(SymKeyType::ChaCha20);
        let mac = factory.key_generator(MacKeyType::Hmac(DigestSpec::sha2(KeyLength::Len256)));

        let mut rng = ChaCha20Rng::seed_from_u64(4);
        let key = sym.new_random(&mut rng).unwrap();
        let translated = mac.translate_key(&key).unwrap();
        assert_eq!(translated.key_bytes(), key.key_bytes());
    }
}
