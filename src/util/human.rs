/// Format a raw byte count with SI units: "83 MB", "1.5 kB".
pub fn fmt_bytes(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];
    if bytes < 10 {
        return format!("{} B", bytes);
    }

    let mut exp = 0;
    let mut scaled = bytes;
    while scaled >= 1000 && exp < UNITS.len() - 1 {
        scaled /= 1000;
        exp += 1;
    }
    let val = (bytes as f64 / 1000f64.powi(exp as i32) * 10.0 + 0.5).floor() / 10.0;
    if val < 10.0 { format!("{:.1} {}", val, UNITS[exp]) }
    else          { format!("{:.0} {}", val, UNITS[exp]) }
}

/// Format a whole percentage: "39%"
pub fn fmt_pct(pct: u32) -> String {
    format!("{}%", pct)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes() {
        assert_eq!(fmt_bytes(0), "0 B");
        assert_eq!(fmt_bytes(9), "9 B");
        assert_eq!(fmt_bytes(999), "999 B");
        assert_eq!(fmt_bytes(1000), "1.0 kB");
        assert_eq!(fmt_bytes(1500), "1.5 kB");
        assert_eq!(fmt_bytes(82_854_982), "83 MB");
        assert_eq!(fmt_bytes(535_805_952), "536 MB");
        assert_eq!(fmt_bytes(105_089_261_568), "105 GB");
        assert_eq!(fmt_bytes(u64::MAX), "18 EB");
    }

    #[test]
    fn pct() {
        assert_eq!(fmt_pct(0), "0%");
        assert_eq!(fmt_pct(150), "150%");
    }
}
