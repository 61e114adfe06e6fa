//! Output formatting for different formats.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use std::fmt::Write as _;
use userdata::{Configuration, DomainPki, NetworkConfig};

/// Available output formats.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Pretty,
    /// JSON document
    Json,
    /// YAML document
    Yaml,
}

/// Render a configuration in the requested format.
pub fn render(config: &Configuration, format: OutputFormat, color: bool) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(config)?),
        OutputFormat::Yaml => Ok(config.to_yaml()?),
        OutputFormat::Pretty => Ok(summary(config, color)),
    }
}

/// One line per section. Never prints key material.
pub fn summary(config: &Configuration, color: bool) -> String {
    let label = |name: &str| {
        let padded = format!("{name:<12}");
        if color {
            padded.bold().to_string()
        } else {
            padded
        }
    };

    let version = if config.version.is_empty() {
        "(legacy)"
    } else {
        config.version.as_str()
    };

    let security = config.security.as_ref().map_or_else(
        || String::from("(none)"),
        |s| {
            format!(
                "os: {}; kubernetes: {}",
                pki_summary(s.os.as_ref()),
                pki_summary(s.kubernetes.as_ref())
            )
        },
    );

    let networking = config.networking.as_ref().map_or_else(
        || String::from("(defaults)"),
        |n| {
            format!(
                "os: {}; kubernetes: {}",
                network_summary(n.os.as_ref()),
                network_summary(n.kubernetes.as_ref())
            )
        },
    );

    let services = config
        .services
        .as_ref()
        .map(|s| s.names().join(", "))
        .filter(|names| !names.is_empty())
        .unwrap_or_else(|| String::from("(none)"));

    let install = config.install.as_ref().map_or_else(
        || String::from("(none)"),
        |install| {
            let mut out = String::from(if install.wipe { "wipe" } else { "keep" });
            for (name, part) in install.partitions() {
                let _ = write!(out, "; {name} {} {} bytes", part.device, part.size);
            }
            out
        },
    );

    let mut out = String::new();
    let _ = writeln!(out, "{} {version}", label("version:"));
    let _ = writeln!(out, "{} {security}", label("security:"));
    let _ = writeln!(out, "{} {networking}", label("networking:"));
    let _ = writeln!(out, "{} {services}", label("services:"));
    let _ = write!(out, "{} {install}", label("install:"));
    out
}

fn pki_summary(pki: Option<&DomainPki>) -> String {
    let Some(pki) = pki else {
        return String::from("-");
    };

    let parts: Vec<&str> = [
        ("ca", pki.ca.as_ref()),
        ("identity", pki.identity.as_ref()),
    ]
    .into_iter()
    .filter(|(_, pair)| pair.is_some_and(|p| !p.is_empty()))
    .map(|(name, _)| name)
    .collect();

    if parts.is_empty() {
        String::from("-")
    } else {
        parts.join(", ")
    }
}

fn network_summary(net: Option<&NetworkConfig>) -> String {
    match net {
        None => String::from("-"),
        Some(n) if n.is_default() => String::from("defaults"),
        Some(n) => {
            let devices: Vec<&str> = n.devices.iter().map(|d| d.interface.as_str()).collect();
            format!("devices [{}]", devices.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = include_str!("../../../../testdata/userdata.yaml");

    #[test]
    fn test_summary_of_fixture() {
        let config: Configuration = FIXTURE.parse().unwrap();
        let text = summary(&config, false);

        assert!(text.contains("(legacy)"));
        assert!(text.contains("os: ca, identity; kubernetes: ca"));
        assert!(text.contains("os: defaults; kubernetes: defaults"));
        assert!(text.contains("blockd, init, kubeadm, osd, proxyd, trustd"));
        assert!(text.contains("wipe; boot /dev/sda 1024000000 bytes"));
        assert!(!text.contains("LS0tLS1"));
    }

    #[test]
    fn test_summary_of_empty_config() {
        let text = summary(&Configuration::default(), false);
        assert!(text.contains("services:    (none)"));
        assert!(text.contains("install:     (none)"));
    }

    #[test]
    fn test_json_render() {
        let config: Configuration = FIXTURE.parse().unwrap();
        let json = render(&config, OutputFormat::Json, false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["services"]["osd"]["image"], "docker.io/autonomy/osd:latest");
    }
}
