// Display formatting for stat values.

/// Averages shown to three decimals without the leading zero (`.300`).
const AVERAGE_STATS: &[&str] = &[
    "AVG", "OBP", "SLG", "OPS", "ISO", "BA", "BAA", "OBPA", "SLGA", "OPSA", "BABIP", "BABIP_A",
    "W-L%",
];

const TWO_DECIMAL_STATS: &[&str] = &[
    "ERA", "WHIP", "FIP", "H/6", "HR/6", "BB/6", "K/6", "K/BB", "GB/FB", "GB/FB_A", "WAR", "RE24",
    "WPA", "Avg Diff",
];

const ONE_DECIMAL_STATS: &[&str] = &["H6", "HR6", "BB6", "SO6", "SO/BB"];

/// Format a stat value for display. Accepts either a display label or a raw
/// field key.
pub fn format_stat(label: &str, value: f64) -> String {
    if AVERAGE_STATS.contains(&label) {
        let fixed = format!("{value:.3}");
        return match fixed.strip_prefix('0') {
            Some(rest) => rest.to_string(),
            None => fixed,
        };
    }
    if TWO_DECIMAL_STATS.contains(&label) {
        return format!("{value:.2}");
    }
    if ONE_DECIMAL_STATS.contains(&label) {
        return format!("{value:.1}");
    }
    if label == "IP" {
        return format_innings(value);
    }
    if label.contains('%') {
        return format!("{:.1}", value * 100.0);
    }
    format!("{}", round_half_up(value))
}

/// Like [`format_stat`], with `-` for a missing value.
pub fn format_optional(label: &str, value: Option<f64>) -> String {
    match value {
        Some(v) => format_stat(label, v),
        None => "-".to_string(),
    }
}

/// Innings in baseball notation: whole innings plus outs (`12.2` is twelve
/// and two-thirds).
pub fn format_innings(ip: f64) -> String {
    let innings = ip.floor();
    let outs = round_half_up((ip - innings) * 3.0);
    if outs >= 3 {
        format!("{:.1}", innings + 1.0)
    } else {
        format!("{}.{}", innings as i64, outs)
    }
}

/// Nearest integer, halves rounded up.
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
