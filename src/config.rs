use crate::error::{InventoryError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Listing columns consumed by the device tree parser. `-e7` skips loop devices.
pub const LSBLK_COMMAND: &str = "lsblk -e7 -b -J -o name,path,fsavail,fssize,fstype,pttype,fsused,fsuse%,\
mountpoint,label,uuid,rm,hotplug,serial,state,group,type,alignment,wwn,hctl,tran,subsystems,rev,vendor,model";

pub const LVS_COMMAND: &str = "lvs --reportformat json --units b -o lv_name,vg_name,lv_size,devices";

/// `{device}` is replaced with the kernel device name.
pub const SERIAL_PIPELINE: &str =
    "udevadm info --query=property --name=/dev/{device} | grep SCSI_IDENT_SERIAL | awk -F'=' '{print $2}'";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub commands: CommandsConfig,

    #[serde(default)]
    pub devices: DevicesConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Command line for the block device listing (split on whitespace, no shell).
    pub lsblk: String,
    /// Command line for the logical volume report.
    pub lvs: String,
    /// Shell pipeline printing a device's serial; `{device}` is substituted.
    pub serial: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DevicesConfig {
    /// Device name patterns to hide, e.g. ["sr*", "zram0"]. A trailing `*` matches a prefix.
    #[serde(default)]
    pub exclude: Vec<String>,
}

// ── Defaults ─────────────────────────────────────────────────────────

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            lsblk:  LSBLK_COMMAND.to_string(),
            lvs:    LVS_COMMAND.to_string(),
            serial: SERIAL_PIPELINE.to_string(),
        }
    }
}

impl CommandsConfig {
    pub fn serial_pipeline(&self, device: &str) -> String {
        self.serial.replace("{device}", device)
    }
}

impl DevicesConfig {
    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|pat| {
            if let Some(p) = pat.strip_suffix('*') { name.starts_with(p) }
            else { pat == name }
        })
    }
}

// ── Load ──────────────────────────────────────────────────────────────

impl Config {
    /// Load an explicitly named file, or the default location if it exists.
    /// A missing default file means built-in defaults; nothing is written back.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => read_file(path),
            None => match Config::config_path().filter(|p| p.is_file()) {
                Some(path) => read_file(&path),
                None => {
                    debug!("no config file, using defaults");
                    Ok(Config::default())
                }
            },
        }
    }

    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lsdisk").join("lsdisk.toml"))
    }
}

fn read_file(path: &Path) -> Result<Config> {
    let err = |reason: String| InventoryError::Config { path: path.display().to_string(), reason };
    let text = fs::read_to_string(path).map_err(|e| err(e.to_string()))?;
    let cfg: Config = toml::from_str(&text).map_err(|e| err(e.to_string()))?;
    debug!("loaded config from {}", path.display());
    Ok(cfg)
}
