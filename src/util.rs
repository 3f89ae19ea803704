use base64::{Engine, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};

pub fn base64_encode<B: AsRef<[u8]>>(data: B) -> String {
    STANDARD.encode(data)
}

pub fn base64_decode<B: AsRef<[u8]>>(data: B) -> Option<Vec<u8>> {
    STANDARD.decode(data).ok()
}

pub fn sha256<B: AsRef<[u8]>>(data: B) -> [u8; 32] {
    Sha256::digest(data.as_ref()).into()
}

/// Lowercase hex SHA-256 of a DER encoded key
pub fn fingerprint<B: AsRef<[u8]>>(der: B) -> String {
    hex::encode(sha256(der))
}
