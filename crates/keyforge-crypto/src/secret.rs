//! Owned secret byte buffers with guaranteed zeroization.

use zeroize::Zeroize;

/// An exclusively-owned buffer of secret bytes.
///
/// The buffer is overwritten with zeroes on [`zero`](Self::zero) and again
/// on drop, so secret material never outlives its owner on any exit path.
/// `Debug` never prints the contents.
///
/// Not safe to share across threads while a derivation is in flight; each
/// operation must own its buffers exclusively for its duration.
#[derive(Clone, Default)]
pub struct SecretBytes(Vec<u8>);

impl SecretBytes {
    /// Take ownership of raw secret bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Copy secret bytes out of a borrowed slice.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }

    /// An empty buffer.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of bytes held.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the buffer holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the secret bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// Append bytes to the buffer (derivation internals only).
    pub(crate) fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.0.extend_from_slice(bytes);
    }

    /// Surrender the buffer for non-secret output (ciphertext, plaintext
    /// handed back to the caller). The emptied remainder still zeroizes.
    pub(crate) fn into_inner(mut self) -> Vec<u8> {
        std::mem::take(&mut self.0)
    }

    /// Overwrite every held byte with zero and release the storage.
    ///
    /// After this call the buffer reports empty. Drop performs the same
    /// overwrite, so calling this explicitly is about *when* the material
    /// disappears, not *whether*.
    pub fn zero(&mut self) {
        self.0.zeroize();
    }
}

impl From<Vec<u8>> for SecretBytes {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for SecretBytes {
    fn from(bytes: &[u8]) -> Self {
        Self::from_slice(bytes)
    }
}

impl AsRef<[u8]> for SecretBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Drop for SecretBytes {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for SecretBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecretBytes({} bytes)", self.0.len())
    }
}
