//! Human readable byte counts for the `Display` impls of the format crates.

const UNITS: [&str; 7] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB"];

/// Render a byte count with the largest binary unit it reaches, e.g. `1536` as `2 KiB`.
pub fn human_size(bytes: u64) -> String {
    for (i, unit) in UNITS.iter().enumerate().rev() {
        let divisor = 1u64 << (10 * i);
        if bytes >= divisor {
            return format!("{:.0} {}", bytes as f64 / divisor as f64, unit);
        }
    }

    "0 B".to_string()
}

#[cfg(test)]
mod test {
    use super::human_size;

    #[test]
    fn human_sizes() {
        assert_eq!(human_size(0), "0 B");
        assert_eq!(human_size(1), "1 B");
        assert_eq!(human_size(1023), "1023 B");
        assert_eq!(human_size(1024), "1 KiB");
        assert_eq!(human_size(1536), "2 KiB");
        assert_eq!(human_size(3 * 1024 * 1024), "3 MiB");
    }
}
