//! Key generation: random, secret-derived, and translated keys.

use std::sync::Arc;

use keyforge_specs::KeyType;
use rand::{CryptoRng, RngCore};
use tracing::trace;
use zeroize::Zeroize;

use crate::{
    agility::derive_digest_specs,
    error::Result,
    hkdf::{HkdfEngine, HkdfParams},
    key::SymKey,
    provider::DigestProvider,
    secret::SecretBytes,
};

/// Seed bytes mixed into the derivation info alongside the algorithm name.
const INFO_SEED_BYTES: usize = 8;

/// Produces keys for one family descriptor.
///
/// Built by [`CryptoFactory::key_generator`](crate::CryptoFactory::key_generator),
/// which injects the process-wide personalization octets mixed into every
/// secret derivation.
pub struct KeyGenerator<T: KeyType> {
    key_type: T,
    personalization: Vec<u8>,
    provider: Arc<dyn DigestProvider>,
}

impl<T: KeyType> KeyGenerator<T> {
    pub(crate) fn new(
        key_type: T,
        personalization: Vec<u8>,
        provider: Arc<dyn DigestProvider>,
    ) -> Self {
        Self { key_type, personalization, provider }
    }

    /// The family this generator produces keys for.
    pub fn key_type(&self) -> &T {
        &self.key_type
    }

    /// Wrap raw bytes as a key of this family.
    pub fn build_key_from_bytes(&self, bytes: &[u8]) -> Result<SymKey<T>> {
        SymKey::new(self.key_type.clone(), SecretBytes::from_slice(bytes))
    }

    /// Generate a fresh key from secure randomness.
    pub fn new_random<R>(&self, rng: &mut R) -> Result<SymKey<T>>
    where
        R: RngCore + CryptoRng,
    {
        let mut bytes = vec![0u8; self.key_type.key_length().bytes()];
        rng.fill_bytes(&mut bytes);
        let key = SymKey::new(self.key_type.clone(), SecretBytes::new(bytes));
        trace!(family = %self.key_type.algorithm_name(), "generated random key");
        key
    }

    /// Derive a key deterministically from a shared secret.
    ///
    /// The seeded source drives both the algorithm-agile digest selection
    /// and the seed octets mixed into the derivation info, so the same
    /// secret and seed sequence always regenerate the same key while
    /// different seeds select different digest algorithms.
    ///
    /// Every intermediate buffer is zeroed on every exit path.
    pub fn generate_key_from_secret<R>(&self, secret: &[u8], seeded: &mut R) -> Result<SymKey<T>>
    where
        R: RngCore + CryptoRng,
    {
        let digests = derive_digest_specs(self.provider.as_ref(), seeded, 2)?;
        let engine = HkdfEngine::new(digests[0], digests[1], self.provider.as_ref())?;

        let mut seed = [0u8; INFO_SEED_BYTES];
        seeded.fill_bytes(&mut seed);

        // info = algorithm name || declared key length || seed octets
        let name = self.key_type.algorithm_name();
        let mut info = Vec::with_capacity(name.len() + 4 + INFO_SEED_BYTES);
        info.extend_from_slice(name.as_bytes());
        info.extend_from_slice(&self.key_type.key_length().bits().to_be_bytes());
        info.extend_from_slice(&seed);

        let result = HkdfParams::expand_only(secret, self.key_type.key_length().bytes())
            .map(|params| params.with_info(&info).with_info(&self.personalization))
            .and_then(|mut params| {
                let derived = engine.derive(&params);
                params.clear();
                derived
            });

        // Cleared whether or not the derivation succeeded
        info.zeroize();
        seed.zeroize();

        let key = SymKey::new(self.key_type.clone(), result?);
        trace!(
            family = %self.key_type.algorithm_name(),
            expand = %engine.expand_digest(),
            "derived key from secret"
        );
        key
    }

    /// Rewrap another family's key under this generator's family.
    ///
    /// Requires equal declared lengths; the raw bytes are preserved
    /// exactly (this generator takes a defensive copy).
    pub fn translate_key<U: KeyType>(&self, source: &SymKey<U>) -> Result<SymKey<T>> {
        let copied = SymKey::new(
            source.key_type().clone(),
            SecretBytes::from_slice(source.key_bytes()),
        )?;
        copied.convert(self.key_type.clone())
    }
}

#[cfg(test)]
mod tests {
    use keyforge_specs::{DigestSpec, KeyLength, MacKeyType, SymKeyType};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    use super::*;
    use crate::provider::RustCryptoProvider;

    fn generator<T: KeyType>(key_type: T) -> KeyGenerator<T> {
        KeyGenerator::new(key_type, b"keyforge-test".to_vec(), Arc::new(RustCryptoProvider))
    }

    #[test]
    fn random_keys_have_declared_length() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let key = generator(SymKeyType::Aes192).new_random(&mut rng).unwrap();
        assert_eq!(key.key_bytes().len(), 24);
    }

    #[test]
    fn secret_derivation_is_deterministic() {
        let generator = generator(SymKeyType::ChaCha20);
        let secret = b"a shared secret of reasonable entropy";

        let mut rng_a = ChaCha20Rng::seed_from_u64(99);
        let mut rng_b = ChaCha20Rng::seed_from_u64(99);
        let key_a = generator.generate_key_from_secret(secret, &mut rng_a).unwrap();
        let key_b = generator.generate_key_from_secret(secret, &mut rng_b).unwrap();

        assert_eq!(key_a.key_bytes(), key_b.key_bytes());
    }

    #[test]
    fn different_seeds_give_different_keys() {
        let generator = generator(SymKeyType::ChaCha20);
        let secret = b"a shared secret of reasonable entropy";

        let mut rng_a = ChaCha20Rng::seed_from_u64(1);
        let mut rng_b = ChaCha20Rng::seed_from_u64(2);
        let key_a = generator.generate_key_from_secret(secret, &mut rng_a).unwrap();
        let key_b = generator.generate_key_from_secret(secret, &mut rng_b).unwrap();

        assert_ne!(key_a.key_bytes(), key_b.key_bytes());
    }

    #[test]
    fn different_secrets_give_different_keys() {
        let generator = generator(SymKeyType::Aes256);

        let mut rng_a = ChaCha20Rng::seed_from_u64(5);
        let mut rng_b = ChaCha20Rng::seed_from_u64(5);
        let key_a = generator.generate_key_from_secret(b"secret one", &mut rng_a).unwrap();
        let key_b = generator.generate_key_from_secret(b"secret two", &mut rng_b).unwrap();

        assert_ne!(key_a.key_bytes(), key_b.key_bytes());
    }

    #[test]
    fn empty_secret_is_rejected() {
        let generator = generator(SymKeyType::Aes256);
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let err = generator.generate_key_from_secret(&[], &mut rng).unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn personalization_separates_domains() {
        let provider: Arc<RustCryptoProvider> = Arc::new(RustCryptoProvider);
        let gen_a =
            KeyGenerator::new(SymKeyType::Aes256, b"domain-a".to_vec(), provider.clone());
        let gen_b = KeyGenerator::new(SymKeyType::Aes256, b"domain-b".to_vec(), provider);

        let mut rng_a = ChaCha20Rng::seed_from_u64(3);
        let mut rng_b = ChaCha20Rng::seed_from_u64(3);
        let key_a = gen_a.generate_key_from_secret(b"shared", &mut rng_a).unwrap();
        let key_b = gen_b.generate_key_from_secret(b"shared", &mut rng_b).unwrap();

        assert_ne!(key_a.key_bytes(), key_b.key_bytes());
    }

    #[test]
    fn translate_preserves_bytes() {
        let sym = generator(SymKeyType::ChaCha20);
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let source = sym.new_random(&mut rng).unwrap();
        let original: Vec<u8> = source.key_bytes().to_vec();

        let mac = generator(MacKeyType::Hmac(DigestSpec::sha2(KeyLength::Len256)));
        let translated = mac.translate_key(&source).unwrap();

        assert_eq!(translated.key_bytes(), original.as_slice());
        // The source key is untouched
        assert_eq!(source.key_bytes(), original.as_slice());
    }

    #[test]
    fn translate_rejects_length_mismatch() {
        let sym = generator(SymKeyType::Aes128);
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let source = sym.new_random(&mut rng).unwrap();

        let wide = generator(MacKeyType::Hmac(DigestSpec::sha2(KeyLength::Len512)));
        let err = wide.translate_key(&source).unwrap_err();
        assert!(err.is_data());
        assert!(err.to_string().contains("incorrect length for"));
    }

    #[test]
    fn build_from_bytes_validates_length_only() {
        let generator = generator(SymKeyType::Aes128);
        assert!(generator.build_key_from_bytes(&[0u8; 16]).is_ok());
        assert!(generator.build_key_from_bytes(&[0u8; 17]).is_err());
    }
}
