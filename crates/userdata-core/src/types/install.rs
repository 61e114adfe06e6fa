use serde::{Deserialize, Serialize};

/// Disk provisioning intent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Install {
    /// Wipe the target disks before partitioning
    #[serde(default)]
    pub wipe: bool,

    /// Boot partition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boot: Option<Partition>,

    /// Root filesystem partition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<Partition>,

    /// Data partition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Partition>,
}

impl Install {
    /// Declared partitions as `(name, partition)` pairs in boot, root,
    /// data order
    pub fn partitions(&self) -> impl Iterator<Item = (&'static str, &Partition)> {
        [
            ("boot", self.boot.as_ref()),
            ("root", self.root.as_ref()),
            ("data", self.data.as_ref()),
        ]
        .into_iter()
        .filter_map(|(name, part)| part.map(|p| (name, p)))
    }
}

/// A partition to create on a block device
///
/// Missing fields decode to their zero value; the installer treats an
/// empty device or a zero size as "use the default".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Block device path (e.g. `/dev/sda`)
    #[serde(default)]
    pub device: String,

    /// Size in bytes
    #[serde(default)]
    pub size: u64,
}
