use crate::config::DevicesConfig;
use crate::models::device::Device;
use crate::models::volume::Report;
use crate::util::human::{fmt_bytes, fmt_pct};
use crate::util::table;
use std::collections::HashMap;

pub const DISK_HEADERS: [&str; 12] = [
    "name", "hctl", "fstype", "fssize", "fsused", "fsavail", "fsuse%", "type", "mount", "pttype", "vendor", "model",
];

pub const PARTITION_HEADERS: [&str; 13] = [
    "disk", "partition", "label", "fstype", "fssize", "fsused", "fsavail", "fsuse%", "type", "mount", "pttype",
    "vendor", "model",
];

pub const VOLUME_HEADERS: [&str; 4] = ["lv", "vg", "size", "devices"];

/// A partition copied out of its disk, carrying the disk's name, vendor and model.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionRow {
    pub disk: String,
    pub part: Device,
}

/// Top-level devices sorted by name.
pub fn disks(devices: &HashMap<String, Device>) -> Vec<&Device> {
    let mut list: Vec<&Device> = devices.values().collect();
    list.sort_by(|a, b| a.name.cmp(&b.name));
    list
}

/// Every partition of every disk, sorted by partition name.
pub fn partitions(devices: &HashMap<String, Device>) -> Vec<PartitionRow> {
    let mut list: Vec<PartitionRow> = devices.values()
        .flat_map(|dev| dev.children.iter().map(move |child| {
            let mut part = child.clone();
            part.vendor = dev.vendor.clone();
            part.model  = dev.model.clone();
            PartitionRow { disk: dev.name.clone(), part }
        }))
        .collect();
    list.sort_by(|a, b| a.part.name.cmp(&b.part.name));
    list
}

pub fn disk_cells(dev: &Device) -> Vec<String> {
    vec![
        dev.name.clone(),
        dev.hctl.clone(),
        dev.fstype.clone(),
        fmt_bytes(dev.fssize),
        fmt_bytes(dev.fsused),
        fmt_bytes(dev.fsavail),
        fmt_pct(dev.fsusage),
        dev.dev_type.clone(),
        dev.mountpoint.clone(),
        dev.pttype.clone(),
        dev.vendor.trim().to_string(),
        dev.model.clone(),
    ]
}

impl PartitionRow {
    pub fn cells(&self) -> Vec<String> {
        let p = &self.part;
        vec![
            self.disk.clone(),
            p.name.clone(),
            p.label.clone(),
            p.fstype.clone(),
            fmt_bytes(p.fssize),
            fmt_bytes(p.fsused),
            fmt_bytes(p.fsavail),
            fmt_pct(p.fsusage),
            p.dev_type.clone(),
            p.mountpoint.clone(),
            p.pttype.clone(),
            p.vendor.trim().to_string(),
            p.model.clone(),
        ]
    }
}

pub fn disk_table(devices: &HashMap<String, Device>) -> String {
    let rows: Vec<Vec<String>> = disks(devices).into_iter().map(disk_cells).collect();
    table::render(&DISK_HEADERS, &rows)
}

pub fn partition_table(devices: &HashMap<String, Device>) -> String {
    let rows: Vec<Vec<String>> = partitions(devices).iter().map(PartitionRow::cells).collect();
    table::render(&PARTITION_HEADERS, &rows)
}

/// Logical volumes in report order.
pub fn volume_table(report: &Report) -> String {
    let rows: Vec<Vec<String>> = report.volumes()
        .map(|lv| vec![
            lv.lv_name.clone(),
            lv.vg_name.clone(),
            fmt_bytes(lv.size_bytes().max(0) as u64),
            lv.backing_devices().join(", "),
        ])
        .collect();
    table::render(&VOLUME_HEADERS, &rows)
}

/// Drop disks and partitions whose names match the configured exclusions.
pub fn exclude(devices: &mut HashMap<String, Device>, cfg: &DevicesConfig) {
    if cfg.exclude.is_empty() { return; }
    devices.retain(|name, _| !cfg.is_excluded(name));
    for dev in devices.values_mut() {
        dev.children.retain(|c| !cfg.is_excluded(&c.name));
    }
}
