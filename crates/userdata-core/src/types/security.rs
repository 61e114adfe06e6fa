use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::{Result, UserdataError};

/// Certificate authority and identity material, per trust domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Security {
    /// Material for the node's own OS-level services
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<DomainPki>,

    /// Independent material for the cluster control plane
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<DomainPki>,
}

/// CA and identity pairs for one trust domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainPki {
    /// Certificate authority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca: Option<PemEncodedPair>,

    /// Node identity signed by the CA
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity: Option<PemEncodedPair>,
}

/// A certificate and its private key, each a base64-encoded PEM blob.
///
/// Both values are kept exactly as they appear in the document. Use
/// [`decode_crt`](Self::decode_crt) and [`decode_key`](Self::decode_key)
/// to obtain the PEM bytes.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PemEncodedPair {
    /// Base64-encoded PEM certificate
    #[serde(default)]
    pub crt: String,

    /// Base64-encoded PEM private key
    #[serde(default)]
    pub key: String,
}

impl PemEncodedPair {
    /// Base64-decode the certificate
    pub fn decode_crt(&self) -> Result<Vec<u8>> {
        decode_blob("crt", &self.crt)
    }

    /// Base64-decode the private key
    pub fn decode_key(&self) -> Result<Vec<u8>> {
        decode_blob("key", &self.key)
    }

    /// Returns true if neither the certificate nor the key is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.crt.is_empty() && self.key.is_empty()
    }
}

// Private keys stay out of logs.
impl std::fmt::Debug for PemEncodedPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let key = if self.key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("PemEncodedPair")
            .field("crt", &self.crt)
            .field("key", &key)
            .finish()
    }
}

fn decode_blob(field: &'static str, value: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(value.trim())
        .map_err(|e| UserdataError::InvalidBase64 {
            field,
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_crt() {
        let pair = PemEncodedPair {
            // "-----BEGIN CERTIFICATE-----\n"
            crt: String::from("LS0tLS1CRUdJTiBDRVJUSUZJQ0FURS0tLS0tCg=="),
            key: String::new(),
        };
        let pem = pair.decode_crt().unwrap();
        assert_eq!(pem, b"-----BEGIN CERTIFICATE-----\n");
    }

    #[test]
    fn test_decode_key_rejects_garbage() {
        let pair = PemEncodedPair {
            crt: String::new(),
            key: String::from("not base64 at all!"),
        };
        let err = pair.decode_key().unwrap_err();
        assert!(matches!(err, UserdataError::InvalidBase64 { field: "key", .. }));
    }

    #[test]
    fn test_debug_redacts_key() {
        let pair = PemEncodedPair {
            crt: String::from("Y3J0"),
            key: String::from("c2VjcmV0"),
        };
        let rendered = format!("{pair:?}");
        assert!(rendered.contains("Y3J0"));
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("c2VjcmV0"));
    }

    #[test]
    fn test_empty_pair() {
        assert!(PemEncodedPair::default().is_empty());
    }
}
