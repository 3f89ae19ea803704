use crate::*;

/// A [`SymmetricKey`] encrypted under a recipient's encryption public key
/// with RSA-OAEP / SHA-256.
///
/// Only the holder of the matching [`SecretKey<Encryption>`] can recover the
/// key. The ciphertext is as long as the recipient's modulus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WrappedKey(Vec<u8>);

impl AsRef<[u8]> for WrappedKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for WrappedKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Display for WrappedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl WrappedKey {
    /// Wrap `key` for `recipient`
    pub fn new(key: &SymmetricKey, recipient: &PublicKey<Encryption>) -> Result<Self> {
        recipient.encrypt(key.as_bytes()).map(Self)
    }

    /// Recover the symmetric key with the recipient's secret key
    pub fn unwrap_key(&self, recipient: &SecretKey<Encryption>) -> Result<SymmetricKey> {
        let mut raw = recipient.decrypt(&self.0)?;
        let key = SymmetricKey::from_slice(&raw);
        zeroize::Zeroize::zeroize(&mut raw);
        key
    }

    /// The wrapped bytes
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.clone()
    }
}
