//! Base64-with-armor text encoding for DER key material.
//!
//! Keys travel as standard PEM blocks:
//!
//! ```text
//! -----BEGIN PUBLIC KEY-----
//! <base64, 64 characters per line>
//! -----END PUBLIC KEY-----
//! ```
//!
//! Public keys are SubjectPublicKeyInfo DER, private keys are PKCS#8 DER.
//! The generic `PUBLIC KEY` / `PRIVATE KEY` labels are the wire default and
//! say nothing about the key's role. A role-qualified label such as
//! `SIGNING PUBLIC KEY` can be used instead, in which case the importer
//! refuses to load the block under the other role.

use crate::{Error, PEM_LINE_WIDTH, Result, Role, util::*};
use derive_more::Display;

/// Whether a PEM block holds public or private key material
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// SubjectPublicKeyInfo
    #[display("PUBLIC KEY")]
    Public,
    /// PKCS#8 PrivateKeyInfo
    #[display("PRIVATE KEY")]
    Private,
}

/// The label between `-----BEGIN ` and `-----`.
///
/// `role` is `None` for the generic labels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PemTag {
    /// Public or private
    pub kind: KeyKind,
    /// The role qualifier, if any
    pub role: Option<Role>,
}

impl std::fmt::Display for PemTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.role {
            Some(role) => write!(f, "{} {}", role.pem_prefix(), self.kind),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl PemTag {
    /// `PUBLIC KEY`
    pub const PUBLIC: Self = Self {
        kind: KeyKind::Public,
        role: None,
    };
    /// `PRIVATE KEY`
    pub const PRIVATE: Self = Self {
        kind: KeyKind::Private,
        role: None,
    };

    /// A role-qualified tag, e.g. `ENCRYPTION PRIVATE KEY`
    pub const fn with_role(kind: KeyKind, role: Role) -> Self {
        Self {
            kind,
            role: Some(role),
        }
    }

    /// Parse a label. Returns `None` for labels that are not key labels
    /// understood by this crate (e.g. `RSA PUBLIC KEY` or `CERTIFICATE`).
    pub fn parse(label: &str) -> Option<Self> {
        let (role, rest) = match label.split_once(' ') {
            Some((prefix, rest)) => match Role::from_pem_prefix(prefix) {
                Some(role) => (Some(role), rest),
                None => (None, label),
            },
            None => (None, label),
        };
        let kind = match rest {
            "PUBLIC KEY" => KeyKind::Public,
            "PRIVATE KEY" => KeyKind::Private,
            _ => return None,
        };
        Some(Self { kind, role })
    }
}

/// Encode `bytes` as a PEM block framed with `tag`.
///
/// The body is wrapped at 64 characters and the output has no trailing newline.
pub fn encode_pem<B: AsRef<[u8]>>(bytes: B, tag: PemTag) -> String {
    let encoded = base64_encode(bytes);
    let mut pem = String::with_capacity(encoded.len() + encoded.len() / PEM_LINE_WIDTH + 64);
    pem.push_str(&format!("-----BEGIN {}-----\n", tag));
    let chars = encoded.chars().collect::<Vec<_>>();
    for line in chars.chunks(PEM_LINE_WIDTH) {
        pem.extend(line.iter());
        pem.push('\n');
    }
    pem.push_str(&format!("-----END {}-----", tag));
    pem
}

/// Decode a PEM block into its DER bytes, ignoring the label.
///
/// Header and footer lines are stripped along with all whitespace.
/// Unarmored Base64 is accepted as well.
pub fn decode_pem(pem: &str) -> Result<Vec<u8>> {
    parse_pem(pem).map(|(_, bytes)| bytes)
}

/// Decode a PEM block into its label and DER bytes.
///
/// The label is `None` when the input has no `-----BEGIN` line. Text before
/// the `-----BEGIN` line, such as an OpenSSL `Bag Attributes` preamble, is
/// ignored.
pub fn parse_pem(pem: &str) -> Result<(Option<String>, Vec<u8>)> {
    let mut label: Option<String> = None;
    let mut ended = false;
    let mut body = String::with_capacity(pem.len());

    for line in pem.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(begin) = armor_label(line, "-----BEGIN ") {
            if label.is_some() {
                return Err(Error::MalformedPem("unexpected BEGIN line"));
            }
            body.clear();
            label = Some(begin.to_string());
        } else if let Some(end) = armor_label(line, "-----END ") {
            if label.as_deref() != Some(end) {
                return Err(Error::MalformedPem("END label does not match BEGIN label"));
            }
            ended = true;
        } else if ended {
            return Err(Error::MalformedPem("data after END line"));
        } else {
            body.extend(line.chars().filter(|c| !c.is_whitespace()));
        }
    }

    if label.is_some() && !ended {
        return Err(Error::MalformedPem("missing END line"));
    }
    if body.is_empty() {
        return Err(Error::MalformedPem("no key data"));
    }
    let bytes = base64_decode(&body).ok_or(Error::MalformedPem("invalid base64"))?;
    if bytes.is_empty() {
        return Err(Error::MalformedPem("no key data"));
    }
    Ok((label, bytes))
}

fn armor_label<'a>(line: &'a str, prefix: &str) -> Option<&'a str> {
    line.strip_prefix(prefix)?.strip_suffix("-----")
}
