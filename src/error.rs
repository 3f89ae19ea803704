use thiserror::Error;

/// The error type for this crate.
#[derive(Clone, Debug, Error)]
pub enum Error {
    /// The RSA or AES provider rejected an operation
    #[error("crypto operation failed: {0}")]
    CryptoOperation(String),
    /// PEM text could not be decoded into key bytes
    #[error("malformed PEM: {0}")]
    MalformedPem(&'static str),
    /// Decoded key bytes are not a usable key for the requested role
    #[error("key import failed: {0}")]
    KeyImport(String),
    /// The wrapped key or the ciphertext could not be decrypted
    #[error("envelope could not be opened: {0}")]
    EnvelopeOpen(String),
    /// A package is not valid JSON or one of its fields is not valid Base64
    #[error("malformed package: {0}")]
    MalformedPackage(String),
    /// The caller asked for verified plaintext but the signature did not verify
    #[error("signature does not match the document and signer key")]
    SignatureInvalid,
}

impl From<rsa::Error> for Error {
    fn from(e: rsa::Error) -> Self {
        Error::CryptoOperation(format!("RSA: {e}"))
    }
}

impl From<rsa::signature::Error> for Error {
    fn from(e: rsa::signature::Error) -> Self {
        Error::CryptoOperation(format!("RSA signature: {e}"))
    }
}

impl From<aes_gcm::Error> for Error {
    fn from(_: aes_gcm::Error) -> Self {
        Error::CryptoOperation("AES-GCM".to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::MalformedPackage(e.to_string())
    }
}

/// A specialized `Result` type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
