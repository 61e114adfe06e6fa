use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-service configuration, keyed by service name.
///
/// Well-known services are typed. Entries under any other name are kept
/// as raw YAML in [`Services::other`] so they survive re-serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Services {
    /// Init process settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub init: Option<InitService>,

    /// Cluster bootstrap settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeadm: Option<KubeadmService>,

    /// Trust daemon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trustd: Option<TrustdService>,

    /// API proxy daemon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxyd: Option<ImageService>,

    /// Block device daemon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockd: Option<ImageService>,

    /// OS management daemon
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub osd: Option<ImageService>,

    /// Services this layer does not know about
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_yaml::Value>,
}

impl Services {
    /// Names of every service present in the document, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let known = [
            ("init", self.init.is_some()),
            ("kubeadm", self.kubeadm.is_some()),
            ("trustd", self.trustd.is_some()),
            ("proxyd", self.proxyd.is_some()),
            ("blockd", self.blockd.is_some()),
            ("osd", self.osd.is_some()),
        ];

        let mut names: Vec<&str> = known
            .iter()
            .filter(|(_, present)| *present)
            .map(|(name, _)| *name)
            .chain(self.other.keys().map(String::as_str))
            .collect();
        names.sort_unstable();
        names
    }

    /// Image reference of a service, if it declares one
    #[must_use]
    pub fn image(&self, name: &str) -> Option<&str> {
        let image = match name {
            "trustd" => self.trustd.as_ref().map(|s| s.image.as_str()),
            "proxyd" => self.proxyd.as_ref().map(|s| s.image.as_str()),
            "blockd" => self.blockd.as_ref().map(|s| s.image.as_str()),
            "osd" => self.osd.as_ref().map(|s| s.image.as_str()),
            other => self
                .other
                .get(other)
                .and_then(|v| v.get("image"))
                .and_then(serde_yaml::Value::as_str),
        };
        image.filter(|image| !image.is_empty())
    }
}

/// Init process settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitService {
    /// Selected CNI plugin (e.g. `flannel`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cni: Option<String>,
}

/// Cluster bootstrap settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KubeadmService {
    /// Embedded multi-document kubeadm configuration, passed through as is
    #[serde(default)]
    pub configuration: String,
}

/// Trust daemon settings
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustdService {
    /// Container image reference
    #[serde(default)]
    pub image: String,

    /// Basic auth username
    #[serde(default)]
    pub username: String,

    /// Basic auth password
    #[serde(default)]
    pub password: String,

    /// Peer addresses; clients fall back through them in order
    #[serde(default)]
    pub endpoints: Vec<String>,
}

impl std::fmt::Debug for TrustdService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let password = if self.password.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("TrustdService")
            .field("image", &self.image)
            .field("username", &self.username)
            .field("password", &password)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

/// A service that only needs an image reference
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageService {
    /// Container image reference
    #[serde(default)]
    pub image: String,
}
