//! Building and opening sign-then-encrypt envelopes.
//!
//! Building, in this order:
//!
//! 1. Sign the plaintext document with the sender's signing key.
//! 2. Generate a one-time AES-256-GCM key.
//! 3. Encrypt the document with that key under a fresh random IV.
//! 4. Wrap the AES key with the recipient's RSA-OAEP public key.
//! 5. Assemble the [`Package`], embedding the sender's signing public key PEM.
//!
//! Opening reverses this: unwrap the AES key, decrypt, then verify the
//! signature over the recovered plaintext. A failure to unwrap or decrypt is
//! an [`Error::EnvelopeOpen`] and yields no plaintext. A signature that does
//! not verify is *not* an error: the plaintext is still returned with
//! `signature_valid == false` and the caller decides what to do with it.
//! Callers that want to refuse unauthenticated content outright can use
//! [`VerificationResult::into_verified_plaintext`].
//!
//! The signer key embedded in a package is a claim made by whoever built the
//! package. [`open`] proves only that the document was signed by the holder of
//! *that* key. To tie a package to a known sender use [`open_pinned`] or
//! compare [`VerificationResult::signer_fingerprint`] against a trusted key.

use crate::*;

/// The outcome of opening a package
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationResult {
    /// The decrypted document
    pub plaintext: Vec<u8>,
    /// Whether the signature verified against the signer key
    pub signature_valid: bool,
    /// SHA-256 fingerprint of the signer key the signature was checked against
    pub signer_fingerprint: String,
    /// The original file name, if the sender supplied one
    pub file_name: Option<String>,
    /// The original MIME type, if the sender supplied one
    pub file_type: Option<String>,
}

impl VerificationResult {
    /// The file name, or `decrypted_document` if none was supplied
    pub fn file_name_or_default(&self) -> &str {
        self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME)
    }

    /// The MIME type, or `application/octet-stream` if none was supplied
    pub fn file_type_or_default(&self) -> &str {
        self.file_type.as_deref().unwrap_or(DEFAULT_FILE_TYPE)
    }

    /// Return the plaintext only if the signature verified
    pub fn into_verified_plaintext(self) -> Result<Vec<u8>> {
        if self.signature_valid {
            Ok(self.plaintext)
        } else {
            Err(Error::SignatureInvalid)
        }
    }
}

/// Sign `document` for the sender and encrypt it for the recipient.
///
/// `signer_public_key_pem` is the sender's signing public key as it should be
/// embedded in the package. A missing `file_type` is recorded as
/// `application/octet-stream`.
///
/// Any failing step aborts the whole build.
pub fn build<B: AsRef<[u8]>>(
    document: B,
    sender: &SecretKey<Signing>,
    recipient: &PublicKey<Encryption>,
    signer_public_key_pem: &str,
    metadata: Metadata,
) -> Result<Package> {
    let document = document.as_ref();

    let signature = sender.sign(document)?;
    let key = SymmetricKey::generate();
    let (ciphertext, iv) = key.encrypt(document)?;
    let wrapped_key = WrappedKey::new(&key, recipient)?;
    let recipient_fingerprint = recipient.fingerprint()?;

    tracing::debug!(
        document_len = document.len(),
        recipient = %recipient_fingerprint,
        "built envelope"
    );

    Ok(Package {
        iv,
        wrapped_key,
        ciphertext,
        signature,
        signer_public_key_pem: signer_public_key_pem.to_string(),
        metadata: Metadata {
            file_name: metadata.file_name,
            file_type: metadata
                .file_type
                .or_else(|| Some(DEFAULT_FILE_TYPE.to_string())),
        },
    })
}

/// Decrypt `package` with the receiver's encryption key and verify its
/// signature against the signer key embedded in the package.
///
/// Fails with [`Error::EnvelopeOpen`] if the key cannot be unwrapped or the
/// ciphertext does not authenticate, and with a PEM or key import error if the
/// embedded signer key is unusable. A bad signature is reported through
/// [`VerificationResult::signature_valid`].
///
/// Some corruption never reaches this function: text that is not a package,
/// invalid Base64 or an IV that is not 12 bytes long is rejected by
/// [`Package::from_json`] with [`Error::MalformedPackage`]. Corruption that
/// still parses, such as an altered or truncated ciphertext or wrapped key,
/// is an [`Error::EnvelopeOpen`] here.
pub fn open(package: &Package, receiver: &SecretKey<Encryption>) -> Result<VerificationResult> {
    let plaintext = decrypt_document(package, receiver)?;
    let signer = PublicKey::<Signing>::from_pem(&package.signer_public_key_pem)?;
    verify_document(package, plaintext, &signer)
}

/// Like [`open`], but verify against `trusted_signer` and ignore the signer
/// key embedded in the package.
pub fn open_pinned(
    package: &Package,
    receiver: &SecretKey<Encryption>,
    trusted_signer: &PublicKey<Signing>,
) -> Result<VerificationResult> {
    let plaintext = decrypt_document(package, receiver)?;
    verify_document(package, plaintext, trusted_signer)
}

fn decrypt_document(package: &Package, receiver: &SecretKey<Encryption>) -> Result<Vec<u8>> {
    let key = package.wrapped_key.unwrap_key(receiver).map_err(|e| {
        tracing::warn!(error = %e, "unable to unwrap envelope key");
        Error::EnvelopeOpen("the wrapped key does not decrypt with this private key".to_string())
    })?;
    key.decrypt(&package.iv, &package.ciphertext).map_err(|e| {
        tracing::warn!(error = %e, "unable to decrypt envelope");
        Error::EnvelopeOpen("the ciphertext, iv or wrapped key has been altered".to_string())
    })
}

fn verify_document(
    package: &Package,
    plaintext: Vec<u8>,
    signer: &PublicKey<Signing>,
) -> Result<VerificationResult> {
    let signature_valid = signer.verify(&plaintext, &package.signature);
    let signer_fingerprint = signer.fingerprint()?;
    if signature_valid {
        tracing::debug!(signer = %signer_fingerprint, "envelope signature verified");
    } else {
        tracing::warn!(signer = %signer_fingerprint, "envelope signature does not verify");
    }
    Ok(VerificationResult {
        plaintext,
        signature_valid,
        signer_fingerprint,
        file_name: package.metadata.file_name.clone(),
        file_type: package.metadata.file_type.clone(),
    })
}
