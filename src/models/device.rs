use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Top-level envelope of `lsblk --json`.
#[derive(Debug, Deserialize)]
pub struct RawListing {
    pub blockdevices: Vec<RawDevice>,
}

/// One device exactly as lsblk emits it. Quantities stay text until
/// [`Device::from_raw`] converts them.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct RawDevice {
    pub name:       Option<String>,
    pub path:       Option<String>,
    #[serde(deserialize_with = "quantity_text")]
    pub fsavail:    Option<String>,
    #[serde(deserialize_with = "quantity_text")]
    pub fssize:     Option<String>,
    pub fstype:     Option<String>,
    pub pttype:     Option<String>,
    #[serde(deserialize_with = "quantity_text")]
    pub fsused:     Option<String>,
    // Read but never trusted; usage is recomputed from fsused/fssize.
    #[serde(rename = "fsuse%", deserialize_with = "quantity_text")]
    pub fsuse:      Option<String>,
    pub mountpoint: Option<String>,
    pub label:      Option<String>,
    pub uuid:       Option<String>,
    pub rm:         Option<bool>,
    pub hotplug:    Option<bool>,
    pub serial:     Option<String>,
    pub state:      Option<String>,
    pub group:      Option<String>,
    #[serde(rename = "type")]
    pub dev_type:   Option<String>,
    pub alignment:  Option<i64>,
    pub wwn:        Option<String>,
    pub hctl:       Option<String>,
    pub tran:       Option<String>,
    pub subsystems: Option<String>,
    pub rev:        Option<String>,
    pub vendor:     Option<String>,
    pub model:      Option<String>,
    pub children:   Vec<RawDevice>,
}

/// A block device or partition with numeric filesystem figures.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct Device {
    pub name:       String,
    pub path:       String,
    pub fsavail:    u64,
    pub fssize:     u64,
    pub fsused:     u64,
    /// Percent of the filesystem in use. Zero when `fssize` is zero.
    pub fsusage:    u32,
    pub fstype:     String,
    pub pttype:     String,
    pub mountpoint: String,
    pub label:      String,
    pub uuid:       String,
    pub rm:         bool,
    pub hotplug:    bool,
    pub serial:     String,
    pub state:      String,
    pub group:      String,
    #[serde(rename = "type")]
    pub dev_type:   String,
    pub alignment:  i64,
    pub wwn:        String,
    pub hctl:       String,
    pub tran:       String,
    pub subsystems: String,
    pub rev:        String,
    pub vendor:     String,
    pub model:      String,
    pub children:   Vec<Device>,
}

impl Device {
    /// Convert the wire shape into a device, recursing into children in order.
    pub fn from_raw(raw: RawDevice) -> Self {
        let fsavail = lenient_quantity(raw.fsavail.as_deref());
        let fssize  = lenient_quantity(raw.fssize.as_deref());
        let fsused  = lenient_quantity(raw.fsused.as_deref());

        Device {
            name:       raw.name.unwrap_or_default(),
            path:       raw.path.unwrap_or_default(),
            fsavail,
            fssize,
            fsused,
            fsusage:    usage_percent(fsused, fssize),
            fstype:     raw.fstype.unwrap_or_default(),
            pttype:     raw.pttype.unwrap_or_default(),
            mountpoint: raw.mountpoint.unwrap_or_default(),
            label:      raw.label.unwrap_or_default(),
            uuid:       raw.uuid.unwrap_or_default(),
            rm:         raw.rm.unwrap_or(false),
            hotplug:    raw.hotplug.unwrap_or(false),
            serial:     raw.serial.unwrap_or_default(),
            state:      raw.state.unwrap_or_default(),
            group:      raw.group.unwrap_or_default(),
            dev_type:   raw.dev_type.unwrap_or_default(),
            alignment:  raw.alignment.unwrap_or(0),
            wwn:        raw.wwn.unwrap_or_default(),
            hctl:       raw.hctl.unwrap_or_default(),
            tran:       raw.tran.unwrap_or_default(),
            subsystems: raw.subsystems.unwrap_or_default(),
            rev:        raw.rev.unwrap_or_default(),
            vendor:     raw.vendor.unwrap_or_default(),
            model:      raw.model.unwrap_or_default(),
            children:   raw.children.into_iter().map(Device::from_raw).collect(),
        }
    }
}

/// Parse an lsblk byte quantity. Missing or unparsable text counts as zero;
/// lsblk leaves these blank for unmounted filesystems.
pub fn lenient_quantity(text: Option<&str>) -> u64 {
    text.and_then(|t| t.trim().parse().ok()).unwrap_or(0)
}

/// `round(used * 100 / size)`, ties away from zero, not clamped at 100.
pub fn usage_percent(used: u64, size: u64) -> u32 {
    if size == 0 {
        return 0;
    }
    (used as f64 * 100.0 / size as f64).round() as u32
}

/// lsblk prints quantities as strings in older releases and as numbers in
/// newer ones; keep both as text.
fn quantity_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null      => None,
        Value::String(s) => Some(s),
        other            => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(used: &str, size: &str) -> RawDevice {
        RawDevice {
            name:   Some("sda1".into()),
            fsused: Some(used.into()),
            fssize: Some(size.into()),
            ..RawDevice::default()
        }
    }

    #[test]
    fn quantities_become_numbers() {
        let dev = Device::from_raw(RawDevice {
            fsavail: Some("750".into()),
            ..raw("250", "1000")
        });
        assert_eq!((dev.fsavail, dev.fsused, dev.fssize), (750, 250, 1000));
        assert_eq!(dev.fsusage, 25);
    }

    #[test]
    fn unparsable_quantities_are_zero() {
        assert_eq!(lenient_quantity(None), 0);
        assert_eq!(lenient_quantity(Some("")), 0);
        assert_eq!(lenient_quantity(Some("12G")), 0);
        assert_eq!(lenient_quantity(Some("-5")), 0);
        assert_eq!(lenient_quantity(Some(" 42 ")), 42);
    }

    #[test]
    fn halves_round_away_from_zero() {
        // 1/8 = 12.5%
        assert_eq!(usage_percent(1, 8), 13);
        // 3/8 = 37.5%
        assert_eq!(usage_percent(3, 8), 38);
        assert_eq!(usage_percent(1, 3), 33);
        assert_eq!(usage_percent(2, 3), 67);
    }

    #[test]
    fn overfull_filesystem_is_not_clamped() {
        let dev = Device::from_raw(raw("1500", "1000"));
        assert_eq!(dev.fsusage, 150);
    }

    #[test]
    fn tool_percentage_is_ignored() {
        let dev = Device::from_raw(RawDevice { fsuse: Some("99%".into()), ..raw("1", "3") });
        assert_eq!(dev.fsusage, 33);
    }

    #[test]
    fn nulls_and_numbers_deserialize() {
        let raw: RawDevice = serde_json::from_str(
            r#"{"name":"sdb","fsavail":null,"fssize":4096,"fsused":"1024","fsuse%":"25%",
                "rm":false,"alignment":0,"type":"disk","children":[{"name":"sdb1"}]}"#,
        ).unwrap();
        let dev = Device::from_raw(raw);
        assert_eq!(dev.fsavail, 0);
        assert_eq!(dev.fssize, 4096);
        assert_eq!(dev.fsusage, 25);
        assert_eq!(dev.dev_type, "disk");
        assert_eq!(dev.children.len(), 1);
        assert_eq!(dev.children[0].name, "sdb1");
    }

    #[test]
    fn grandchildren_are_converted() {
        let mut part = raw("10", "20");
        part.children.push(raw("1", "4"));
        let disk = Device::from_raw(RawDevice { children: vec![part], ..RawDevice::default() });
        assert_eq!(disk.children[0].fsusage, 50);
        assert_eq!(disk.children[0].children[0].fsusage, 25);
    }

    proptest! {
        #[test]
        fn usage_matches_rounded_ratio(size in 1u64..1u64 << 50, frac in 0.0f64..=1.0) {
            let used = (size as f64 * frac) as u64;
            let pct = usage_percent(used, size);
            prop_assert_eq!(pct, (used as f64 * 100.0 / size as f64).round() as u32);
            prop_assert!(pct <= 100);
        }

        #[test]
        fn zero_size_means_zero_usage(used in any::<u64>()) {
            let dev = Device::from_raw(raw(&used.to_string(), "0"));
            prop_assert_eq!(dev.fsusage, 0);
        }
    }
}
