use crate::*;
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{Error as DError, MapAccess, Visitor},
    ser::SerializeStruct,
};
use std::io::{Read, Write};

const FIELDS: &[&str] = &[
    "iv",
    "encryptedAES",
    "encryptedFile",
    "signature",
    "signerPublicKeyPem",
    "fileName",
    "fileType",
];

/// Optional information for restoring the original document after decryption
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    /// The original file name, e.g. `contract.pdf`
    pub file_name: Option<String>,
    /// The MIME type, e.g. `application/pdf`
    pub file_type: Option<String>,
}

impl Metadata {
    /// Metadata with both a file name and a MIME type
    pub fn new<N: Into<String>, T: Into<String>>(file_name: N, file_type: T) -> Self {
        Self {
            file_name: Some(file_name.into()),
            file_type: Some(file_type.into()),
        }
    }
}

/// The serialized unit of exchange between a sender and a recipient.
///
/// In human readable formats (JSON) every binary field is Base64 text:
///
/// ```json
/// {
///   "iv": "<base64, 12 bytes>",
///   "encryptedAES": "<base64, wrapped AES-256 key>",
///   "encryptedFile": "<base64, AES-256-GCM ciphertext>",
///   "signature": "<base64, signature over the plaintext>",
///   "signerPublicKeyPem": "-----BEGIN PUBLIC KEY-----...",
///   "fileName": "contract.pdf",
///   "fileType": "application/pdf"
/// }
/// ```
///
/// Binary formats carry the raw bytes. A package is immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Package {
    pub(crate) iv: [u8; IV_LENGTH],
    pub(crate) wrapped_key: WrappedKey,
    pub(crate) ciphertext: Vec<u8>,
    pub(crate) signature: Vec<u8>,
    pub(crate) signer_public_key_pem: String,
    pub(crate) metadata: Metadata,
}

impl std::fmt::Display for Package {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Package {{ iv: {}, wrapped_key: {}, ciphertext: {} bytes, signature: {}, file_name: {:?}, file_type: {:?} }}",
            hex::encode(self.iv),
            self.wrapped_key,
            self.ciphertext.len(),
            hex::encode(&self.signature),
            self.metadata.file_name,
            self.metadata.file_type,
        )
    }
}

impl Serialize for Package {
    fn serialize<S>(&self, s: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if s.is_human_readable() {
            let len = 5
                + usize::from(self.metadata.file_name.is_some())
                + usize::from(self.metadata.file_type.is_some());
            let mut state = s.serialize_struct("Package", len)?;
            state.serialize_field("iv", &base64_encode(self.iv))?;
            state.serialize_field("encryptedAES", &base64_encode(&self.wrapped_key))?;
            state.serialize_field("encryptedFile", &base64_encode(&self.ciphertext))?;
            state.serialize_field("signature", &base64_encode(&self.signature))?;
            state.serialize_field("signerPublicKeyPem", &self.signer_public_key_pem)?;
            if let Some(file_name) = &self.metadata.file_name {
                state.serialize_field("fileName", file_name)?;
            }
            if let Some(file_type) = &self.metadata.file_type {
                state.serialize_field("fileType", file_type)?;
            }
            state.end()
        } else {
            let mut state = s.serialize_struct("Package", 7)?;
            state.serialize_field("iv", &self.iv)?;
            state.serialize_field("wrapped_key", self.wrapped_key.as_ref())?;
            state.serialize_field("ciphertext", &self.ciphertext)?;
            state.serialize_field("signature", &self.signature)?;
            state.serialize_field("signer_public_key_pem", &self.signer_public_key_pem)?;
            state.serialize_field("file_name", &self.metadata.file_name)?;
            state.serialize_field("file_type", &self.metadata.file_type)?;
            state.end()
        }
    }
}

impl<'de> Deserialize<'de> for Package {
    fn deserialize<D>(d: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if d.is_human_readable() {
            struct PackageVisitor;

            impl<'de> Visitor<'de> for PackageVisitor {
                type Value = Package;

                fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                    write!(f, "a map representing a Package")
                }

                fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
                where
                    A: MapAccess<'de>,
                {
                    let mut iv: Option<String> = None;
                    let mut wrapped_key: Option<String> = None;
                    let mut ciphertext: Option<String> = None;
                    let mut signature: Option<String> = None;
                    let mut signer_public_key_pem: Option<String> = None;
                    let mut file_name: Option<Option<String>> = None;
                    let mut file_type: Option<Option<String>> = None;

                    fn set<'a, A: MapAccess<'a>, T: Deserialize<'a>>(
                        map: &mut A,
                        slot: &mut Option<T>,
                        name: &'static str,
                    ) -> std::result::Result<(), A::Error> {
                        if slot.is_some() {
                            return Err(DError::duplicate_field(name));
                        }
                        *slot = Some(map.next_value()?);
                        Ok(())
                    }

                    while let Some(key) = map.next_key::<String>()? {
                        match key.as_str() {
                            "iv" => set(&mut map, &mut iv, "iv")?,
                            "encryptedAES" => set(&mut map, &mut wrapped_key, "encryptedAES")?,
                            "encryptedFile" => set(&mut map, &mut ciphertext, "encryptedFile")?,
                            "signature" => set(&mut map, &mut signature, "signature")?,
                            "signerPublicKeyPem" => set(
                                &mut map,
                                &mut signer_public_key_pem,
                                "signerPublicKeyPem",
                            )?,
                            "fileName" => set(&mut map, &mut file_name, "fileName")?,
                            "fileType" => set(&mut map, &mut file_type, "fileType")?,
                            _ => {
                                let _: serde::de::IgnoredAny = map.next_value()?;
                            }
                        }
                    }

                    fn decode<E: DError>(
                        value: Option<String>,
                        name: &'static str,
                    ) -> std::result::Result<Vec<u8>, E> {
                        let value = value.ok_or_else(|| E::missing_field(name))?;
                        base64_decode(value.trim())
                            .ok_or_else(|| E::custom(format!("invalid base64 in {}", name)))
                    }

                    let iv_bytes = decode::<A::Error>(iv, "iv")?;
                    let iv = <[u8; IV_LENGTH]>::try_from(iv_bytes.as_slice()).map_err(|_| {
                        DError::custom(format!(
                            "iv must be {} bytes, got {}",
                            IV_LENGTH,
                            iv_bytes.len()
                        ))
                    })?;
                    let wrapped_key = decode::<A::Error>(wrapped_key, "encryptedAES")?;
                    let ciphertext = decode::<A::Error>(ciphertext, "encryptedFile")?;
                    let signature = decode::<A::Error>(signature, "signature")?;
                    let signer_public_key_pem = signer_public_key_pem
                        .ok_or_else(|| DError::missing_field("signerPublicKeyPem"))?;

                    Ok(Package {
                        iv,
                        wrapped_key: wrapped_key.into(),
                        ciphertext,
                        signature,
                        signer_public_key_pem,
                        metadata: Metadata {
                            file_name: file_name.flatten(),
                            file_type: file_type.flatten(),
                        },
                    })
                }
            }
            d.deserialize_struct("Package", FIELDS, PackageVisitor)
        } else {
            #[derive(Deserialize)]
            struct PackageHelper {
                iv: [u8; IV_LENGTH],
                wrapped_key: Vec<u8>,
                ciphertext: Vec<u8>,
                signature: Vec<u8>,
                signer_public_key_pem: String,
                file_name: Option<String>,
                file_type: Option<String>,
            }
            let helper = PackageHelper::deserialize(d)?;

            Ok(Package {
                iv: helper.iv,
                wrapped_key: helper.wrapped_key.into(),
                ciphertext: helper.ciphertext,
                signature: helper.signature,
                signer_public_key_pem: helper.signer_public_key_pem,
                metadata: Metadata {
                    file_name: helper.file_name,
                    file_type: helper.file_type,
                },
            })
        }
    }
}

impl Package {
    /// The 96-bit AES-GCM nonce
    pub fn iv(&self) -> &[u8; IV_LENGTH] {
        &self.iv
    }

    /// The symmetric key wrapped under the recipient's encryption key
    pub fn wrapped_key(&self) -> &WrappedKey {
        &self.wrapped_key
    }

    /// The encrypted document including the GCM tag
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// The sender's signature over the plaintext document
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// The sender's signing public key as claimed by the package.
    ///
    /// Nothing authenticates this claim. See [`crate::open_pinned`].
    pub fn signer_public_key_pem(&self) -> &str {
        &self.signer_public_key_pem
    }

    /// File name and MIME type of the original document
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// A file name for storing this package, `<fileName>.enc`
    pub fn suggested_file_name(&self) -> String {
        match &self.metadata.file_name {
            Some(name) if !name.is_empty() => format!("{}.{}", name, PACKAGE_EXTENSIONS[0]),
            _ => format!("{}.{}", DEFAULT_PACKAGE_NAME, PACKAGE_EXTENSIONS[0]),
        }
    }

    /// Pretty printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a package from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a package from JSON bytes, e.g. the contents of an `.enc` file
    pub fn from_slice(json: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(json)?)
    }

    /// Write pretty printed JSON to `writer`
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        Ok(serde_json::to_writer_pretty(writer, self)?)
    }

    /// Read JSON from `reader`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}
