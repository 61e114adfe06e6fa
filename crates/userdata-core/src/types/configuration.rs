use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use std::str::FromStr;

use super::{Install, Networking, Security, Services};
use crate::error::{Result, UserdataError};

/// The machine configuration document served to a booting node.
///
/// Every section is optional. Consumers read only the section they own
/// and treat an absent or empty section as "apply defaults".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Schema revision tag; empty for legacy documents
    #[serde(default, deserialize_with = "null_as_empty")]
    pub version: String,

    /// Certificate authority and identity material
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<Security>,

    /// Network settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networking: Option<Networking>,

    /// Service settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub services: Option<Services>,

    /// Disk installation intent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install: Option<Install>,
}

impl Configuration {
    /// Decode a document from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        crate::decode(bytes)
    }

    /// Decode a document stored on local disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        crate::decode(&bytes)
    }

    /// Serialize back to YAML
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(UserdataError::Encode)
    }
}

/// An explicit null (`version: ~`) reads the same as an absent key.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl FromStr for Configuration {
    type Err = UserdataError;

    fn from_str(s: &str) -> Result<Self> {
        crate::decode(s.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../testdata/userdata.yaml");

    #[test]
    fn test_load_from_disk() {
        let config = Configuration::load(FIXTURE_PATH).unwrap();
        assert_eq!(config.version, "");
        assert!(config.install.is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Configuration::load("/nonexistent/userdata.yaml").unwrap_err();
        assert!(matches!(err, UserdataError::Io(_)));
    }

    #[test]
    fn test_null_version_is_empty() {
        let config: Configuration = "version: ~\ninstall:\n  wipe: true\n".parse().unwrap();
        assert_eq!(config.version, "");

        let config: Configuration = "version: \"2\"\ninstall:\n  wipe: true\n".parse().unwrap();
        assert_eq!(config.version, "2");
    }

    #[test]
    fn test_default_has_no_sections() {
        let yaml = Configuration::default().to_yaml().unwrap();
        assert_eq!(yaml.lines().count(), 1);
        assert!(yaml.starts_with("version:"));
    }
}
