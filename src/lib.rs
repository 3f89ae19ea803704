//! A hybrid sign-then-encrypt envelope scheme
//!
//! An envelope carries a document that only one recipient can decrypt and
//! that the recipient can attribute to a sender. Every party owns two
//! independent RSA-2048 key pairs: a signing pair and an encryption pair.
//!
//! The scheme works as follows:
//!
//! 1. Sign the plaintext document with the sender's signing key
//!    (RSASSA-PKCS1-v1_5, SHA-256).
//! 2. Create a one-time AES-256-GCM data encryption key (DEK).
//! 3. Encrypt the document with the DEK under a random 96-bit IV.
//! 4. Wrap the DEK with the recipient's encryption public key (RSA-OAEP, SHA-256).
//! 5. The [`Package`] consists of the IV, the wrapped DEK, the ciphertext, the
//!    signature, the sender's signing public key as PEM and optional file metadata.
//!
//! The package can be opened using the recipient's encryption private key.
//!
//! 1. The private key unwraps the DEK.
//! 2. The DEK decrypts the document.
//! 3. The signature is verified against the signer key named in the package.
//!
//! Failing to unwrap or decrypt is an error. A signature that does not verify
//! is not: the plaintext is returned together with `signature_valid == false`.
//!
//! The role of a key is part of its type. A `SecretKey<Signing>` can sign but
//! not decrypt, a `PublicKey<Encryption>` can wrap keys but not verify
//! signatures, and so on.
//!
//! # Usage
//! ```
//! use hybrid_envelope::{EncryptionKeyPair, Metadata, SigningKeyPair, build, open};
//!
//! let alice = SigningKeyPair::generate().unwrap();
//! let bob = EncryptionKeyPair::generate().unwrap();
//! let alice_pem = alice.public().to_pem().unwrap();
//!
//! let package = build(
//!     b"HELLO",
//!     alice.secret(),
//!     bob.public(),
//!     &alice_pem,
//!     Metadata::new("hello.txt", "text/plain"),
//! )
//! .unwrap();
//!
//! // The package travels as JSON, usually in a `.enc` file
//! let json = package.to_json().unwrap();
//! let received = hybrid_envelope::Package::from_json(&json).unwrap();
//!
//! let result = open(&received, bob.secret()).unwrap();
//! assert_eq!(result.plaintext, b"HELLO");
//! assert!(result.signature_valid);
//!
//! // Anyone else's encryption key fails to open it
//! let carol = EncryptionKeyPair::generate().unwrap();
//! assert!(open(&received, carol.secret()).is_err());
//! ```
//!
//! Keys are exchanged as PEM. The wire default uses the generic
//! `PUBLIC KEY` / `PRIVATE KEY` labels, which carry no role, so the importer
//! decides which role to load a key under. Role-qualified labels
//! (`SIGNING PUBLIC KEY`, ...) are refused when imported under the other role.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused,
    clippy::mod_module_files
)]
#![deny(clippy::unwrap_used)]

mod envelope;
mod error;
mod identity;
mod keys;
mod package;
pub mod pem;
mod role;
mod symmetric;
mod util;
mod wrap;

use util::*;

/// The RSA modulus size of generated key pairs
pub const RSA_MODULUS_BITS: usize = 2048;
/// The RSA public exponent of generated key pairs
pub const RSA_PUBLIC_EXPONENT: u64 = 65537;
/// The smallest RSA modulus accepted on import
pub const MIN_RSA_MODULUS_BITS: usize = 2048;
/// The length of an AES-256 key
pub const SYMMETRIC_KEY_LENGTH: usize = 32;
/// The length of an AES-GCM IV
pub const IV_LENGTH: usize = 12;
/// The length of an AES-GCM authentication tag
pub const TAG_LENGTH: usize = 16;
/// Base64 characters per PEM line
pub const PEM_LINE_WIDTH: usize = 64;
/// The file name reported for a decrypted document that arrived without one
pub const DEFAULT_FILE_NAME: &str = "decrypted_document";
/// The MIME type recorded when the sender does not supply one
pub const DEFAULT_FILE_TYPE: &str = "application/octet-stream";
/// The base name of a stored package whose document has no name
pub const DEFAULT_PACKAGE_NAME: &str = "signed_document";
/// Conventional extensions for stored packages
pub const PACKAGE_EXTENSIONS: [&str; 2] = ["enc", "json"];

pub use envelope::{VerificationResult, build, open, open_pinned};
pub use error::{Error, Result};
pub use identity::{Identity, IdentityPems, PublicIdentity};
pub use keys::{EncryptionKeyPair, KeyPair, PublicKey, SecretKey, SigningKeyPair};
pub use package::{Metadata, Package};
pub use role::{Encryption, KeyRole, Role, Signing};
pub use symmetric::SymmetricKey;
pub use wrap::WrappedKey;
