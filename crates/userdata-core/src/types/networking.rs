use serde::{Deserialize, Serialize};

/// Networking configuration, per domain. An empty section means "use
/// defaults".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Networking {
    /// Host interfaces of the node itself
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<NetworkConfig>,

    /// Cluster-plane networking
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<NetworkConfig>,
}

/// Network settings for one domain
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Explicitly configured interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub devices: Vec<Device>,

    /// DNS servers, in resolution order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nameservers: Vec<String>,
}

impl NetworkConfig {
    /// Returns true if nothing is configured and defaults apply
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.devices.is_empty() && self.nameservers.is_empty()
    }
}

/// A single network interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Interface name (e.g. `eth0`)
    #[serde(default)]
    pub interface: String,

    /// Static address in CIDR notation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,

    /// Acquire an address via DHCP
    #[serde(default)]
    pub dhcp: bool,

    /// Interface MTU
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,

    /// Static routes through this interface
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<Route>,
}

/// A static route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Destination network in CIDR notation
    #[serde(default)]
    pub network: String,

    /// Next hop
    #[serde(default)]
    pub gateway: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_missing_fields_are_zero() {
        let net: NetworkConfig = serde_yaml::from_str(
            "devices:\n- dhcp: true\n  routes:\n  - gateway: 10.0.0.1\n",
        )
        .unwrap();

        let device = &net.devices[0];
        assert_eq!(device.interface, "");
        assert!(device.dhcp);
        assert_eq!(device.routes[0].network, "");
        assert_eq!(device.routes[0].gateway, "10.0.0.1");
        assert!(!net.is_default());
    }

    #[test]
    fn test_empty_config_is_default() {
        let net: NetworkConfig = serde_yaml::from_str("nameservers: []\n").unwrap();
        assert!(net.is_default());
    }
}
