/// Bytes per megabit
const BYTES_PER_MEGABIT: f64 = 125_000.0;

const SIZE_UNITS: &[(u64, &str)] = &[
    (1 << 50, "PB"),
    (1 << 40, "TB"),
    (1 << 30, "GB"),
    (1 << 20, "MB"),
    (1 << 10, "KB"),
];

/// Convert a transfer of `bytes` over `seconds` into Mbps
pub fn calculate_speed(bytes: u64, seconds: f64) -> f64 {
    (bytes as f64 / BYTES_PER_MEGABIT) / seconds
}

/// Format a byte count with binary units, truncated to a whole number
pub fn format_human_size(bytes: u64) -> String {
    for &(factor, suffix) in SIZE_UNITS {
        if bytes >= factor {
            return format!("{} {}", bytes / factor, suffix);
        }
    }

    match bytes {
        1 => "1 byte".to_string(),
        n => format!("{} bytes", n),
    }
}

/// Number of decimal digits needed to print every index up to `count`
pub fn index_width(count: usize) -> usize {
    count.max(1).to_string().len()
}
