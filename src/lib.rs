//! Block device inventory built from `lsblk`, `lvs` and `udevadm`.
//!
//! [`collectors::lsblk::list_devices`] produces the device tree keyed by name,
//! [`collectors::lvm::lvs_report`] the logical volume report, and
//! [`util::report`] the disk and partition tables.

pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod runner;
pub mod util;

pub use error::{InventoryError, Result};
pub use models::device::Device;
pub use models::volume::{LogicalVolume, Report};
pub use runner::{CommandRunner, SystemRunner};
