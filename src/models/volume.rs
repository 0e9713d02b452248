use crate::error::InventoryError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

// ── LVM ──────────────────────────────────────────────────────────────

/// Top-level document printed by `lvs --reportformat json`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Report {
    pub report: Vec<ReportSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ReportSection {
    #[serde(default)]
    pub lv: Vec<LogicalVolume>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LogicalVolume {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lv_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub vg_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lv_size: Option<SizeBytes>,
    /// Backing extents, e.g. `/dev/sda2(0),/dev/sdb1(1280)`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub devices: String,
}

impl LogicalVolume {
    /// Device paths named in `devices`, extent offsets dropped.
    pub fn backing_devices(&self) -> Vec<&str> {
        self.devices
            .split(',')
            .map(|d| d.split('(').next().unwrap_or("").trim())
            .filter(|d| !d.is_empty())
            .collect()
    }

    pub fn size_bytes(&self) -> i64 {
        self.lv_size.map(|s| s.0).unwrap_or(0)
    }
}

impl Report {
    /// Every logical volume across all sections, in report order.
    pub fn volumes(&self) -> impl Iterator<Item = &LogicalVolume> {
        self.report.iter().flat_map(|s| s.lv.iter())
    }
}

/// Byte size from `lvs --units b`, which arrives as `"123456B"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SizeBytes(pub i64);

impl<'de> Deserialize<'de> for SizeBytes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Box::<RawValue>::deserialize(deserializer)?;
        decode_size(raw.get()).map(SizeBytes).map_err(serde::de::Error::custom)
    }
}

/// Decode the raw JSON token of an lvs size: drop the opening quote and the
/// trailing unit plus closing quote, then parse what is left.
pub fn decode_size(token: &str) -> Result<i64, InventoryError> {
    let invalid = || InventoryError::InvalidSize(token.to_string());
    if token.len() < 3 {
        return Err(invalid());
    }
    let digits = token.get(1..token.len() - 2).ok_or_else(invalid)?;
    digits.parse().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_token_is_trimmed_then_parsed() {
        assert_eq!(decode_size(r#""123456B""#).unwrap(), 123456);
        assert_eq!(decode_size(r#""0B""#).unwrap(), 0);
    }

    #[test]
    fn non_numeric_size_is_rejected() {
        assert!(matches!(decode_size(r#""12.5GB""#), Err(InventoryError::InvalidSize(_))));
        assert!(decode_size(r#""B""#).is_err());
        assert!(decode_size(r#""""#).is_err());
        assert!(decode_size("7").is_err());
    }

    #[test]
    fn size_deserializes_from_json_string() {
        let lv: LogicalVolume = serde_json::from_str(
            r#"{"lv_name":"root","vg_name":"vg0","lv_size":"10737418240B","devices":"/dev/sda2(0)"}"#,
        ).unwrap();
        assert_eq!(lv.lv_size, Some(SizeBytes(10_737_418_240)));
        assert_eq!(lv.size_bytes(), 10_737_418_240);
    }

    #[test]
    fn bad_size_fails_the_document() {
        let res = serde_json::from_str::<LogicalVolume>(r#"{"lv_size":"lotsB"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn null_size_is_absent() {
        let lv: LogicalVolume = serde_json::from_str(r#"{"lv_name":"thin","lv_size":null}"#).unwrap();
        assert_eq!(lv.lv_size, None);
        assert_eq!(lv.size_bytes(), 0);
    }

    #[test]
    fn backing_devices_drop_extents() {
        let lv = LogicalVolume {
            devices: "/dev/sda2(0),/dev/sdb1(1280)".into(),
            ..LogicalVolume::default()
        };
        assert_eq!(lv.backing_devices(), ["/dev/sda2", "/dev/sdb1"]);
        assert!(LogicalVolume::default().backing_devices().is_empty());
    }
}
