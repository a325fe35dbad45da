use crate::constants::BYTES_PER_MB;

/// Size in megabytes rounded to two decimals, as reported in upload responses.
pub fn bytes_to_mb(bytes: usize) -> f64 {
    let mb = bytes as f64 / BYTES_PER_MB as f64;
    (mb * 100.0).round() / 100.0
}

/// Size in megabytes with one decimal, as shown in the size-limit message.
pub fn format_mb_one_decimal(bytes: usize) -> String {
    format!("{:.1}", bytes as f64 / BYTES_PER_MB as f64)
}
