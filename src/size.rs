const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Render a byte count in binary (1024) steps with two decimals, e.g. `"1.50 KB"`.
///
/// Anything still at or above 1024 after the GB step is reported in TB as-is,
/// so very large sizes show up as `"1024.00 TB"` and beyond.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{:.2} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.2} TB", size)
}
