//! Reading the provisioning endpoint from the kernel command line.

use std::path::Path;

/// Kernel parameter that carries the provisioning endpoint
pub const ENDPOINT_PARAM: &str = "userdata.endpoint";

/// Location of the running kernel's command line
pub const PROC_CMDLINE: &str = "/proc/cmdline";

/// Value of `key=value` on a kernel command line. The last occurrence
/// wins, matching how the kernel treats repeated parameters.
pub fn param<'a>(cmdline: &'a str, key: &str) -> Option<&'a str> {
    cmdline
        .split_ascii_whitespace()
        .filter_map(|arg| arg.split_once('='))
        .filter(|(k, _)| *k == key)
        .map(|(_, v)| v.trim_matches('"'))
        .last()
        .filter(|v| !v.is_empty())
}

/// Endpoint from the kernel command line at `path`, if present.
pub fn endpoint_from(path: impl AsRef<Path>) -> Option<String> {
    let cmdline = std::fs::read_to_string(path).ok()?;
    param(&cmdline, ENDPOINT_PARAM).map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_param_found() {
        let cmdline = "console=ttyS0 userdata.endpoint=http://10.0.0.1/userdata quiet\n";
        assert_eq!(param(cmdline, ENDPOINT_PARAM), Some("http://10.0.0.1/userdata"));
    }

    #[test]
    fn test_last_occurrence_wins() {
        let cmdline = "userdata.endpoint=http://a/ userdata.endpoint=http://b/";
        assert_eq!(param(cmdline, ENDPOINT_PARAM), Some("http://b/"));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let cmdline = "userdata.endpoint=http://meta/userdata?node=7";
        assert_eq!(param(cmdline, ENDPOINT_PARAM), Some("http://meta/userdata?node=7"));
    }

    #[test]
    fn test_param_missing_or_empty() {
        assert_eq!(param("ro quiet", ENDPOINT_PARAM), None);
        assert_eq!(param("userdata.endpoint=", ENDPOINT_PARAM), None);
        assert_eq!(param("xuserdata.endpoint=http://a/", ENDPOINT_PARAM), None);
    }

    #[test]
    fn test_endpoint_from_missing_file() {
        assert_eq!(endpoint_from("/nonexistent/cmdline"), None);
    }
}
