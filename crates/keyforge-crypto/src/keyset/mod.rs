//! KeySet: composed multi-step authenticated encryption.
//!
//! A keyset owns master key material sized by its [`KeySetSpec`] and
//! composes N independently-keyed AEAD cipher steps (N = the spec's
//! cascade count) into one encrypt/decrypt pipeline.
//!
//! ```text
//! Master material
//!        │
//!        ▼ HKDF expansion (one labelled expansion per slot)
//! Step keys [0..N]  +  keyed step-algorithm schedule
//!        │
//!        ▼ init
//! KeySetCipher: step 0 → step 1 → ... → step N-1   (encrypt order)
//!               step N-1 → ... → step 0            (decrypt order)
//! ```
//!
//! # Security Properties
//!
//! - Algorithm agility: the step algorithms and their order are drawn from
//!   the master material itself, so no fixed single-cipher pipeline exists
//!   to attack across all keysets
//! - Independent step keys: each slot's key is a separate labelled
//!   expansion; compromising one step key does not reveal the others
//! - Tamper evidence: every step authenticates; any failed tag surfaces as
//!   the bad-credentials condition, never as garbage plaintext

mod cipher;
mod steps;

pub use cipher::KeySetCipher;

use std::sync::Arc;

use keyforge_specs::KeySetSpec;
use rand::{CryptoRng, RngCore};

use crate::{
    error::{CryptoError, Result},
    provider::{CipherProvider, DigestProvider},
    secret::SecretBytes,
};

/// Master key material plus the spec that sizes its cascade.
///
/// Built by [`CryptoFactory`](crate::CryptoFactory); the master buffer
/// zeroizes when the keyset drops.
pub struct KeySet {
    spec: KeySetSpec,
    master: SecretBytes,
    digest_provider: Arc<dyn DigestProvider>,
    cipher_provider: Arc<dyn CipherProvider>,
}

impl KeySet {
    pub(crate) fn new(
        spec: KeySetSpec,
        master: SecretBytes,
        digest_provider: Arc<dyn DigestProvider>,
        cipher_provider: Arc<dyn CipherProvider>,
    ) -> Result<Self> {
        if !spec.is_valid() {
            return Err(CryptoError::data(format!("invalid keyset spec: {spec}")));
        }
        if master.len() != spec.key_length().bytes() {
            return Err(CryptoError::data(format!(
                "incorrect length for keyset master material: {} bytes for {spec}",
                master.len()
            )));
        }
        Ok(Self { spec, master, digest_provider, cipher_provider })
    }

    /// The spec this keyset was built from.
    pub fn spec(&self) -> &KeySetSpec {
        &self.spec
    }

    /// A fresh, uninitialized cipher over this keyset.
    ///
    /// Each cipher instance is single-use and single-direction.
    pub fn cipher(&self) -> KeySetCipher<'_> {
        KeySetCipher::new(self)
    }

    /// Encrypt `plaintext` with a one-shot cipher instance.
    pub fn encrypt<R>(&self, rng: &mut R, plaintext: &[u8]) -> Result<Vec<u8>>
    where
        R: RngCore + CryptoRng,
    {
        let mut cipher = self.cipher();
        cipher.init_for_encrypt(rng)?;
        cipher.update(plaintext)?;
        cipher.finish()
    }

    /// Decrypt `ciphertext` with a one-shot cipher instance.
    ///
    /// # Errors
    ///
    /// [`CryptoError::BadCredentials`] when any step's integrity check
    /// fails — the wrong-key/tampered-data signal.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let mut cipher = self.cipher();
        cipher.init_for_decrypt()?;
        cipher.update(ciphertext)?;
        cipher.finish()
    }

    pub(crate) fn master(&self) -> &SecretBytes {
        &self.master
    }

    pub(crate) fn digest_provider(&self) -> &dyn DigestProvider {
        self.digest_provider.as_ref()
    }

    pub(crate) fn cipher_provider(&self) -> &dyn CipherProvider {
        self.cipher_provider.as_ref()
    }
}

impl std::fmt::Debug for KeySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySet").field("spec", &self.spec).finish_non_exhaustive()
    }
}
