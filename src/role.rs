use derive_more::Display;
use std::fmt::Debug;

/// The cryptographic role a key pair was generated for.
///
/// Every identity holds two independent RSA-2048 key pairs:
///
/// * `Signing`: RSASSA-PKCS1-v1_5 with SHA-256. Used to sign the plaintext
///   document and to verify the signature on the receiving side.
/// * `Encryption`: RSA-OAEP with SHA-256. Used to wrap the one-time
///   AES-256-GCM key of an envelope and to unwrap it again.
///
/// The two roles are never interchangeable. At compile time this is enforced
/// by the [`Signing`] and [`Encryption`] marker types on every key handle;
/// `Role` is the runtime tag of the same information, used for PEM labels
/// and diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum Role {
    #[display("Signing")]
    /// Sign and verify.
    Signing,
    #[display("Encryption")]
    /// Encrypt and decrypt.
    Encryption,
}

impl Role {
    /// Both roles
    pub const ALL: [Role; 2] = [Role::Signing, Role::Encryption];

    /// The label used for a role-qualified PEM block, i.e. `SIGNING` or `ENCRYPTION`
    pub const fn pem_prefix(&self) -> &'static str {
        match self {
            Role::Signing => "SIGNING",
            Role::Encryption => "ENCRYPTION",
        }
    }

    /// The role whose [`Role::pem_prefix`] is `prefix`
    pub fn from_pem_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.pem_prefix() == prefix)
    }
}

mod private {
    pub trait Sealed {}
}

/// Type-level key role carried by [`crate::PublicKey`], [`crate::SecretKey`]
/// and [`crate::KeyPair`].
///
/// This trait is sealed and only implemented for [`Signing`] and [`Encryption`].
pub trait KeyRole:
    private::Sealed + Copy + Clone + Debug + Default + PartialEq + Eq + Send + Sync + 'static
{
    /// The runtime tag for this role
    const ROLE: Role;
}

/// Marker for keys that sign and verify
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Signing;

/// Marker for keys that encrypt and decrypt
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Encryption;

impl private::Sealed for Signing {}
impl private::Sealed for Encryption {}

impl KeyRole for Signing {
    const ROLE: Role = Role::Signing;
}

impl KeyRole for Encryption {
    const ROLE: Role = Role::Encryption;
}
