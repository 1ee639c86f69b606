//! Owned keys tagged with their family descriptor.

use keyforge_specs::KeyType;

use crate::{
    error::{CryptoError, Result},
    secret::SecretBytes,
};

/// A raw key owned exclusively by its holder.
///
/// The byte buffer zeroizes when the key drops; `Debug` never prints it.
/// In-flight keys are not safe to share across threads — ownership moves,
/// it is never aliased.
#[derive(Debug)]
pub struct SymKey<T: KeyType> {
    key_type: T,
    bytes: SecretBytes,
}

impl<T: KeyType> SymKey<T> {
    /// Wrap raw bytes under a family descriptor.
    ///
    /// The only validation is the declared length; family-specific format
    /// constraints live with the families that have them.
    pub fn new(key_type: T, bytes: SecretBytes) -> Result<Self> {
        if bytes.len() != key_type.key_length().bytes() {
            return Err(CryptoError::data(format!(
                "incorrect length for {} key: {} bytes",
                key_type.algorithm_name(),
                bytes.len()
            )));
        }
        Ok(Self { key_type, bytes })
    }

    /// The family descriptor this key belongs to.
    pub fn key_type(&self) -> &T {
        &self.key_type
    }

    /// Borrow the raw key bytes.
    pub fn key_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// Rewrap this key under a different family without re-deriving.
    ///
    /// Lossless: the bytes move, unchanged, and only the semantic tag
    /// changes. Valid only when the new family declares the same length.
    pub fn convert<U: KeyType>(self, new_type: U) -> Result<SymKey<U>> {
        if new_type.key_length() != self.key_type.key_length() {
            return Err(CryptoError::data(format!(
                "incorrect length for {} key: have {} bits",
                new_type.algorithm_name(),
                self.key_type.key_length().bits()
            )));
        }
        // The buffer moves; the emptied remainder zeroizes as usual
        let mut source = self;
        let bytes = std::mem::take(&mut source.bytes);
        SymKey::new(new_type, bytes)
    }
}

#[cfg(test)]
mod tests {
    use keyforge_specs::{DigestSpec, KeyLength, MacKeyType, SymKeyType};

    use super::*;

    #[test]
    fn length_is_validated() {
        let err = SymKey::new(SymKeyType::Aes256, SecretBytes::from_slice(&[0u8; 16])).unwrap_err();
        assert!(err.is_data());

        let key = SymKey::new(SymKeyType::Aes256, SecretBytes::from_slice(&[0u8; 32]));
        assert!(key.is_ok());
    }

    #[test]
    fn convert_preserves_bytes() {
        let bytes: Vec<u8> = (0..32).collect();
        let key = SymKey::new(SymKeyType::ChaCha20, SecretBytes::new(bytes.clone())).unwrap();

        let mac_type = MacKeyType::Hmac(DigestSpec::sha2(KeyLength::Len256));
        let converted = key.convert(mac_type).unwrap();

        assert_eq!(converted.key_bytes(), bytes.as_slice());
        assert_eq!(converted.key_type(), &mac_type);
    }

    #[test]
    fn convert_rejects_length_mismatch() {
        let key = SymKey::new(SymKeyType::Aes256, SecretBytes::from_slice(&[7u8; 32])).unwrap();
        let err = key.convert(SymKeyType::Aes128).unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn debug_redacts_key_bytes() {
        let key = SymKey::new(SymKeyType::Aes128, SecretBytes::from_slice(&[0xAB; 16])).unwrap();
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("171"), "no raw byte values in {rendered}");
        assert!(rendered.contains("16 bytes"));
    }
}
