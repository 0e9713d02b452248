use crate::collectors::udev;
use crate::config::CommandsConfig;
use crate::error::{InventoryError, Result};
use crate::models::device::{Device, RawListing};
use crate::runner::CommandRunner;
use log::{debug, warn};
use std::collections::HashMap;

/// Run lsblk, build the device tree and fill in serials from udev.
///
/// One listing call plus one serial query per top-level device. A failed
/// serial query keeps whatever serial lsblk reported.
pub fn list_devices(runner: &dyn CommandRunner, commands: &CommandsConfig) -> Result<HashMap<String, Device>> {
    let out = runner.run_line(&commands.lsblk)?;
    let disks = parse_listing(&out)?;
    debug!("lsblk reported {} top-level devices", disks.len());

    let mut devices = HashMap::with_capacity(disks.len());
    for mut dev in disks {
        match udev::lookup_serial(runner, commands, &dev.name) {
            Ok(serial) => dev.serial = serial,
            Err(e)     => warn!("serial lookup for {} failed: {}", dev.name, e),
        }
        devices.insert(dev.name.clone(), dev);
    }
    Ok(devices)
}

/// Parse `lsblk --json` output into top-level devices, in listing order.
pub fn parse_listing(out: &[u8]) -> Result<Vec<Device>> {
    let listing: RawListing = serde_json::from_slice(out).map_err(InventoryError::malformed("lsblk"))?;
    Ok(listing.blockdevices.into_iter().map(Device::from_raw).collect())
}
