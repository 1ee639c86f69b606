//! The keyset cipher state machine.
//!
//! A cipher instance is single-use and single-direction:
//!
//! ```text
//! Uninitialized ── init_for_encrypt ──▶ Encrypting ──┐
//!               ── init_for_decrypt ──▶ Decrypting ──┤ finish
//!                                                    ▼
//!                                                 Finished (terminal)
//! ```
//!
//! Re-initialization in any direction requires a fresh instance from
//! [`KeySet::cipher`]. Decryption applies the cascade steps in the reverse
//! of the encrypt order; cascades are not commutative.

use rand::{CryptoRng, RngCore};
use tracing::debug;

use crate::{
    error::{CryptoError, Result},
    keyset::{KeySet, steps::plan_steps},
    provider::AeadStep,
    secret::SecretBytes,
};

/// Lifecycle states of a cipher instance.
enum State {
    /// Built but not yet bound to a direction
    Uninitialized,
    /// Accepting plaintext
    Encrypting,
    /// Accepting ciphertext
    Decrypting,
    /// Terminal; the instance cannot be reused
    Finished,
}

/// A keyed cascade slot ready to run.
struct ReadyStep {
    aead: Box<dyn AeadStep>,
    /// Encrypt-direction nonce; decrypt reads nonces from the layer framing
    nonce: Vec<u8>,
}

/// One single-use encrypt or decrypt pass over a keyset.
///
/// Obtained from [`KeySet::cipher`]; see the module docs for the state
/// machine.
pub struct KeySetCipher<'a> {
    keyset: &'a KeySet,
    state: State,
    buffer: SecretBytes,
    steps: Vec<ReadyStep>,
}

impl<'a> KeySetCipher<'a> {
    pub(crate) fn new(keyset: &'a KeySet) -> Self {
        Self { keyset, state: State::Uninitialized, buffer: SecretBytes::empty(), steps: Vec::new() }
    }

    /// Bind this instance to the encrypt direction.
    ///
    /// Derives the cascade plan and draws one fresh nonce per step from
    /// the caller's secure randomness.
    pub fn init_for_encrypt<R>(&mut self, rng: &mut R) -> Result<()>
    where
        R: RngCore + CryptoRng,
    {
        self.require_uninitialized()?;
        let mut steps = self.build_steps()?;
        for step in &mut steps {
            step.nonce = vec![0u8; step.aead.nonce_len()];
            rng.fill_bytes(&mut step.nonce);
        }
        self.steps = steps;
        self.state = State::Encrypting;
        debug!(steps = self.steps.len(), spec = %self.keyset.spec(), "keyset cipher ready to encrypt");
        Ok(())
    }

    /// Bind this instance to the decrypt direction.
    ///
    /// Same derivation as encryption; the steps will be applied in reverse.
    pub fn init_for_decrypt(&mut self) -> Result<()> {
        self.require_uninitialized()?;
        // Nonces travel inside the ciphertext framing
        self.steps = self.build_steps()?;
        self.state = State::Decrypting;
        debug!(steps = self.steps.len(), spec = %self.keyset.spec(), "keyset cipher ready to decrypt");
        Ok(())
    }

    /// Feed more input to the bound direction.
    pub fn update(&mut self, data: &[u8]) -> Result<()> {
        match self.state {
            State::Encrypting | State::Decrypting => {
                self.buffer.extend_from_slice(data);
                Ok(())
            },
            State::Uninitialized => Err(CryptoError::data("keyset cipher used before initialisation")),
            State::Finished => Err(CryptoError::data("keyset cipher instance already finished")),
        }
    }

    /// Run the cascade over everything fed so far and finish the instance.
    ///
    /// Encrypting: each step seals the previous layer and prepends its
    /// nonce. Decrypting: steps run in reverse; a failed tag on any step
    /// surfaces as [`CryptoError::BadCredentials`].
    pub fn finish(&mut self) -> Result<Vec<u8>> {
        let state = std::mem::replace(&mut self.state, State::Finished);
        let data = std::mem::take(&mut self.buffer);
        match state {
            State::Encrypting => self.run_encrypt(data),
            State::Decrypting => self.run_decrypt(data),
            State::Uninitialized => Err(CryptoError::data("keyset cipher used before initialisation")),
            State::Finished => Err(CryptoError::data("keyset cipher instance already finished")),
        }
    }

    fn require_uninitialized(&self) -> Result<()> {
        match self.state {
            State::Uninitialized => Ok(()),
            State::Encrypting | State::Decrypting => {
                Err(CryptoError::data("keyset cipher already initialised"))
            },
            State::Finished => Err(CryptoError::data("keyset cipher instance already finished")),
        }
    }

    /// Derive the plan and key every slot's AEAD. Step keys are consumed
    /// here and zeroize as they go out of scope.
    fn build_steps(&self) -> Result<Vec<ReadyStep>> {
        let plan = plan_steps(self.keyset)?;
        let mut steps = Vec::with_capacity(plan.len());
        for planned in plan {
            let aead =
                self.keyset.cipher_provider().aead(planned.key_type, planned.key.as_slice())?;
            steps.push(ReadyStep { aead, nonce: Vec::new() });
        }
        Ok(steps)
    }

    fn run_encrypt(&self, mut data: SecretBytes) -> Result<Vec<u8>> {
        for step in &self.steps {
            let sealed = step.aead.seal(&step.nonce, data.as_slice())?;
            let mut layered = SecretBytes::empty();
            layered.extend_from_slice(&step.nonce);
            layered.extend_from_slice(&sealed);
            // The inner layer (plaintext at the innermost step) zeroizes here
            data = layered;
        }
        Ok(data.into_inner())
    }

    fn run_decrypt(&self, mut data: SecretBytes) -> Result<Vec<u8>> {
        for step in self.steps.iter().rev() {
            let nonce_len = step.aead.nonce_len();
            if data.len() < nonce_len + step.aead.tag_len() {
                // Too short to carry this layer at all: treat exactly like
                // a failed tag rather than leaking framing details
                return Err(CryptoError::BadCredentials);
            }
            let (nonce, body) = data.as_slice().split_at(nonce_len);
            let opened = step.aead.open(nonce, body)?;
            data = SecretBytes::new(opened);
        }
        Ok(data.into_inner())
    }
}
