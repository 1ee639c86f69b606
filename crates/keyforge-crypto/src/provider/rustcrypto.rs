//! Default provider backed by the RustCrypto crates.
//!
//! Digests come from `sha2`/`sha3`, MACs from `hmac`, AEAD steps from
//! `aes-gcm` and `chacha20poly1305`. Everything here is glue; the engine
//! above never names a primitive crate directly.

use aes_gcm::{
    Aes128Gcm, Aes256Gcm, AesGcm,
    aead::{Aead, KeyInit, Nonce, Tag},
    aes::Aes192,
};
use chacha20poly1305::XChaCha20Poly1305;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512, Sha512_256};
use sha3::{
    Sha3_256, Sha3_512, Shake128, Shake256,
    digest::{ExtendableOutput, Update, XofReader},
};

use keyforge_specs::{DigestSpec, DigestType, KeyLength, SymKeyType};

use super::{AeadStep, CipherProvider, DigestEngine, DigestProvider, MacEngine};
use crate::error::{CryptoError, Result};

/// AES-192-GCM is not aliased by `aes-gcm`; spell out the composition.
type Aes192Gcm = AesGcm<Aes192, <Aes128Gcm as aes_gcm::AeadCore>::NonceSize>;

/// Software provider implementing every spec the catalog declares.
///
/// Stateless and freely shareable; one instance per process is plenty.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustCryptoProvider;

impl RustCryptoProvider {
    /// Build the provider.
    pub fn new() -> Self {
        Self
    }
}

impl DigestProvider for RustCryptoProvider {
    fn supports_digest_type(&self, digest_type: DigestType) -> bool {
        matches!(digest_type, DigestType::Sha2 | DigestType::Sha3 | DigestType::Shake)
    }

    fn supports_digest_spec(&self, spec: &DigestSpec) -> bool {
        spec.is_valid() && self.supports_digest_type(spec.digest_type())
    }

    fn supports_xof(&self) -> bool {
        true
    }

    fn supports_hmac(&self, spec: &DigestSpec) -> bool {
        // HMAC needs a fixed-output block digest; the SHAKE family is out
        self.supports_digest_spec(spec) && !spec.is_xof() && spec.digest_type() != DigestType::Shake
    }

    fn digest(&self, spec: &DigestSpec) -> Result<Box<dyn DigestEngine>> {
        if !spec.is_valid() {
            return Err(CryptoError::data(format!("invalid digest spec: {spec}")));
        }
        match (spec.digest_type(), spec.state(), spec.length()) {
            (DigestType::Sha2, None, KeyLength::Len256) => Ok(Box::new(Fixed(Sha256::new()))),
            (DigestType::Sha2, None, KeyLength::Len512) => Ok(Box::new(Fixed(Sha512::new()))),
            (DigestType::Sha2, Some(KeyLength::Len512), KeyLength::Len256) => {
                Ok(Box::new(Fixed(Sha512_256::new())))
            },
            (DigestType::Sha3, None, KeyLength::Len256) => Ok(Box::new(Fixed(Sha3_256::new()))),
            (DigestType::Sha3, None, KeyLength::Len512) => Ok(Box::new(Fixed(Sha3_512::new()))),
            (DigestType::Shake, None, KeyLength::Len128) => {
                Ok(Box::new(ShakeEngine::V128(Shake128::default(), spec.output_bytes())))
            },
            (DigestType::Shake, None, KeyLength::Len256) => {
                Ok(Box::new(ShakeEngine::V256(Shake256::default(), spec.output_bytes())))
            },
            _ => Err(CryptoError::provider(format!("no digest implementation for {spec}"))),
        }
    }

    fn hmac(&self, spec: &DigestSpec, key: &[u8]) -> Result<Box<dyn MacEngine>> {
        if !self.supports_hmac(spec) {
            return Err(CryptoError::provider(format!("no HMAC implementation for {spec}")));
        }
        match (spec.digest_type(), spec.state(), spec.length()) {
            (DigestType::Sha2, None, KeyLength::Len256) => keyed::<Hmac<Sha256>>(key),
            (DigestType::Sha2, None, KeyLength::Len512) => keyed::<Hmac<Sha512>>(key),
            (DigestType::Sha2, Some(KeyLength::Len512), KeyLength::Len256) => {
                keyed::<Hmac<Sha512_256>>(key)
            },
            (DigestType::Sha3, None, KeyLength::Len256) => keyed::<Hmac<Sha3_256>>(key),
            (DigestType::Sha3, None, KeyLength::Len512) => keyed::<Hmac<Sha3_512>>(key),
            _ => Err(CryptoError::provider(format!("no HMAC implementation for {spec}"))),
        }
    }
}

impl CipherProvider for RustCryptoProvider {
    fn supports_sym_key_type(&self, key_type: SymKeyType) -> bool {
        matches!(
            key_type,
            SymKeyType::Aes128 | SymKeyType::Aes192 | SymKeyType::Aes256 | SymKeyType::ChaCha20
        )
    }

    fn aead(&self, key_type: SymKeyType, key: &[u8]) -> Result<Box<dyn AeadStep>> {
        match key_type {
            SymKeyType::Aes128 => keyed_aead::<Aes128Gcm>(key_type, key),
            SymKeyType::Aes192 => keyed_aead::<Aes192Gcm>(key_type, key),
            SymKeyType::Aes256 => keyed_aead::<Aes256Gcm>(key_type, key),
            SymKeyType::ChaCha20 => keyed_aead::<XChaCha20Poly1305>(key_type, key),
        }
    }
}

/// Fixed-output digest adapter.
struct Fixed<D: Digest>(D);

impl<D: Digest> DigestEngine for Fixed<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().to_vec()
    }

    fn output_len(&self) -> usize {
        <D as Digest>::output_size()
    }
}

/// SHAKE adapter reading a fixed number of bytes from the XOF.
enum ShakeEngine {
    /// SHAKE128 state plus requested output size
    V128(Shake128, usize),
    /// SHAKE256 state plus requested output size
    V256(Shake256, usize),
}

impl DigestEngine for ShakeEngine {
    fn update(&mut self, data: &[u8]) {
        match self {
            Self::V128(state, _) => state.update(data),
            Self::V256(state, _) => state.update(data),
        }
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        let (mut reader, len) = match *self {
            Self::V128(state, len) => {
                (Box::new(state.finalize_xof()) as Box<dyn XofReader>, len)
            },
            Self::V256(state, len) => {
                (Box::new(state.finalize_xof()) as Box<dyn XofReader>, len)
            },
        };
        let mut output = vec![0u8; len];
        reader.read(&mut output);
        output
    }

    fn output_len(&self) -> usize {
        match self {
            Self::V128(_, len) | Self::V256(_, len) => *len,
        }
    }
}

/// Adapter over any keyed RustCrypto MAC.
struct KeyedMac<M: Mac>(M);

fn keyed<M>(key: &[u8]) -> Result<Box<dyn MacEngine>>
where
    M: Mac + KeyInit + 'static,
{
    let mac = <M as Mac>::new_from_slice(key)
        .map_err(|err| CryptoError::provider_with_source("keying HMAC", err))?;
    Ok(Box::new(KeyedMac(mac)))
}

impl<M: Mac> MacEngine for KeyedMac<M> {
    fn update(&mut self, data: &[u8]) {
        Mac::update(&mut self.0, data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.0.finalize().into_bytes().to_vec()
    }

    fn output_len(&self) -> usize {
        <M as hmac::digest::OutputSizeUser>::output_size()
    }
}

/// AEAD adapter over any RustCrypto cipher.
struct KeyedAead<C: Aead> {
    cipher: C,
    key_type: SymKeyType,
}

fn keyed_aead<C>(key_type: SymKeyType, key: &[u8]) -> Result<Box<dyn AeadStep>>
where
    C: Aead + KeyInit + Send + Sync + 'static,
{
    let cipher = C::new_from_slice(key).map_err(|_| {
        CryptoError::data(format!(
            "incorrect length for {key_type} key: {} bytes",
            key.len()
        ))
    })?;
    Ok(Box::new(KeyedAead { cipher, key_type }))
}

impl<C: Aead> AeadStep for KeyedAead<C> {
    fn nonce_len(&self) -> usize {
        Nonce::<C>::default().len()
    }

    fn tag_len(&self) -> usize {
        Tag::<C>::default().len()
    }

    fn seal(&self, nonce: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        if nonce.len() != self.nonce_len() {
            return Err(CryptoError::data(format!(
                "incorrect nonce length for {}: {} bytes",
                self.key_type,
                nonce.len()
            )));
        }
        self.cipher
            .encrypt(Nonce::<C>::from_slice(nonce), plaintext)
            .map_err(|_| CryptoError::provider(format!("{} encryption failed", self.key_type)))
    }

    fn open(&self, nonce: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        if nonce.len() != self.nonce_len() {
            return Err(CryptoError::data(format!(
                "incorrect nonce length for {}: {} bytes",
                self.key_type,
                nonce.len()
            )));
        }
        // A failed tag is the wrong-key signal, not an infrastructure fault
        self.cipher
            .decrypt(Nonce::<C>::from_slice(nonce), ciphertext)
            .map_err(|_| CryptoError::BadCredentials)
    }
}
