use crate::{Error, IV_LENGTH, Result, SYMMETRIC_KEY_LENGTH, TAG_LENGTH};
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce, aead::Aead};
use rand::prelude::*;
use zeroize::Zeroize;

/// A one-time AES-256-GCM data encryption key. Zeroized on drop.
///
/// A fresh key is generated for every envelope. Only its wrapped form ever
/// leaves the process.
#[derive(Clone)]
pub struct SymmetricKey {
    bytes: [u8; SYMMETRIC_KEY_LENGTH],
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SymmetricKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

impl SymmetricKey {
    /// Generate a random 256-bit key
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            bytes: rng.r#gen(),
        }
    }

    /// Reconstruct a key from its raw bytes.
    ///
    /// Fails unless exactly 32 bytes are given.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes = <[u8; SYMMETRIC_KEY_LENGTH]>::try_from(bytes).map_err(|_| {
            Error::CryptoOperation(format!(
                "symmetric key must be {} bytes, got {}",
                SYMMETRIC_KEY_LENGTH,
                bytes.len()
            ))
        })?;
        Ok(Self { bytes })
    }

    /// The raw key bytes
    pub fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_LENGTH] {
        &self.bytes
    }

    /// Encrypt `plaintext` under a freshly drawn random 96-bit IV.
    ///
    /// Returns the ciphertext (with the 16 byte GCM tag appended) and the IV.
    pub fn encrypt<B: AsRef<[u8]>>(&self, plaintext: B) -> Result<(Vec<u8>, [u8; IV_LENGTH])> {
        let mut rng = rand::thread_rng();
        let iv: [u8; IV_LENGTH] = rng.r#gen();
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.bytes));
        let ciphertext = cipher.encrypt(Nonce::from_slice(&iv), plaintext.as_ref())?;
        Ok((ciphertext, iv))
    }

    /// Decrypt and authenticate `ciphertext` produced by [`SymmetricKey::encrypt`]
    pub fn decrypt<B: AsRef<[u8]>>(&self, iv: &[u8; IV_LENGTH], ciphertext: B) -> Result<Vec<u8>> {
        let ct = ciphertext.as_ref();
        if ct.len() < TAG_LENGTH {
            return Err(Error::CryptoOperation(format!(
                "ciphertext too short: {} bytes (minimum {})",
                ct.len(),
                TAG_LENGTH
            )));
        }
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.bytes));
        let plaintext = cipher.decrypt(Nonce::from_slice(iv), ct)?;
        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_generation() {
        let k1 = SymmetricKey::generate();
        let k2 = SymmetricKey::generate();
        assert_ne!(k1.as_bytes(), k2.as_bytes(), "random keys must differ");
    }

    #[test]
    fn encrypt_decrypt() {
        let key = SymmetricKey::generate();
        let (ciphertext, iv) = key.encrypt(b"hello, encrypted world!").unwrap();
        assert_eq!(ciphertext.len(), 23 + TAG_LENGTH);
        assert_eq!(key.decrypt(&iv, &ciphertext).unwrap(), b"hello, encrypted world!");

        let (ciphertext, iv) = key.encrypt(b"").unwrap();
        assert_eq!(ciphertext.len(), TAG_LENGTH);
        assert_eq!(key.decrypt(&iv, &ciphertext).unwrap(), b"");
    }

    #[test]
    fn fresh_iv_per_call() {
        let key = SymmetricKey::generate();
        let (c1, iv1) = key.encrypt(b"same data").unwrap();
        let (c2, iv2) = key.encrypt(b"same data").unwrap();
        assert_ne!(iv1, iv2);
        assert_ne!(c1, c2);
    }

    #[test]
    fn wrong_key_or_iv() {
        let key = SymmetricKey::generate();
        let other = SymmetricKey::generate();
        let (ciphertext, mut iv) = key.encrypt(b"secret data").unwrap();
        assert!(other.decrypt(&iv, &ciphertext).is_err());
        iv[0] ^= 0x01;
        assert!(key.decrypt(&iv, &ciphertext).is_err());
    }

    #[test]
    fn tampered_or_truncated() {
        let key = SymmetricKey::generate();
        let (mut ciphertext, iv) = key.encrypt(b"secret data").unwrap();
        ciphertext[0] ^= 0xFF;
        assert!(key.decrypt(&iv, &ciphertext).is_err());
        assert!(matches!(
            key.decrypt(&iv, &ciphertext[..TAG_LENGTH - 1]),
            Err(Error::CryptoOperation(_))
        ));
    }

    #[test]
    fn from_slice_length() {
        let key = SymmetricKey::generate();
        let restored = SymmetricKey::from_slice(key.as_bytes()).unwrap();
        assert_eq!(key.as_bytes(), restored.as_bytes());
        assert!(SymmetricKey::from_slice(&[0u8; 16]).is_err());
        assert!(format!("{:?}", key).contains("REDACTED"));
    }
}
