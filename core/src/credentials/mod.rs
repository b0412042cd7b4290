//! TLS certificate and macaroon encoding
//!
//! Both credentials travel in the URI as unpadded URL-safe base64. The
//! certificate arrives PEM-armored and only its DER payload is encoded.

use std::path::{Path, PathBuf};

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL};
use rustls_pemfile::Item;

use crate::{Error, Result};

/// Access scope of the macaroon placed in the URI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TokenScope {
    #[default]
    Admin,
    ReadOnly,
    Invoice,
}

/// Locations of the three macaroons LND writes
#[derive(Debug, Clone)]
pub struct TokenPaths {
    pub admin: PathBuf,
    pub readonly: PathBuf,
    pub invoice: PathBuf,
}

impl TokenPaths {
    /// Pick the macaroon file for a scope
    pub fn select(&self, scope: TokenScope) -> &Path {
        match scope {
            TokenScope::Admin => &self.admin,
            TokenScope::ReadOnly => &self.readonly,
            TokenScope::Invoice => &self.invoice,
        }
    }
}

/// Read a certificate or macaroon file.
pub fn read_credential(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| Error::CredentialRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode a PEM certificate and encode its DER payload.
///
/// Only the first PEM section is considered. Anything other than a
/// `CERTIFICATE` section is rejected.
pub fn encode_certificate(pem: &[u8]) -> Result<String> {
    let (label, offset) = first_pem_label(pem).ok_or_else(|| {
        Error::Certificate("failed to decode PEM block containing certificate".to_string())
    })?;

    if label != b"CERTIFICATE" {
        return Err(Error::Certificate(format!(
            "PEM block is {}, expected CERTIFICATE",
            String::from_utf8_lossy(label)
        )));
    }

    let mut reader = &pem[offset..];

    match rustls_pemfile::read_one(&mut reader) {
        Ok(Some(Item::X509Certificate(der))) => Ok(BASE64URL.encode(der.as_ref())),
        Ok(_) => Err(Error::Certificate(
            "failed to decode PEM block containing certificate".to_string(),
        )),
        Err(e) => Err(Error::Certificate(format!("PEM parsing failed: {}", e))),
    }
}

/// Label and byte offset of the first `-----BEGIN <label>-----` line.
fn first_pem_label(pem: &[u8]) -> Option<(&[u8], usize)> {
    let mut offset = 0;

    for line in pem.split(|b| *b == b'\n') {
        let label = line
            .trim_ascii()
            .strip_prefix(b"-----BEGIN ")
            .and_then(|rest| rest.strip_suffix(b"-----"));

        if let Some(label) = label {
            return Some((label, offset));
        }
        offset += line.len() + 1;
    }

    None
}

/// Encode macaroon bytes for the URI.
pub fn encode_token(bytes: &[u8]) -> String {
    BASE64URL.encode(bytes)
}

#[cfg(test)]
pub(crate) fn pem_armor(label: &str, der: &[u8]) -> Vec<u8> {
    use base64::engine::general_purpose::STANDARD;

    let body = STANDARD.encode(der);
    let lines: Vec<&str> = body
        .as_bytes()
        .chunks(64)
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .collect();

    format!(
        "-----BEGIN {label}-----\n{}\n-----END {label}-----\n",
        lines.join("\n")
    )
    .into_bytes()
}
