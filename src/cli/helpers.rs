//! Shared helper functions for CLI commands
//!
//! Number formatting used across tables, CSV output and chart labels.

/// Format a value for human-readable tables
///
/// Rounds to `precision` decimals and trims trailing zeros, so `2550.0`
/// prints as `2550` and `2000833.333...` as `2000833.3333`. Infinite
/// values print as `inf` / `-inf`.
pub fn format_number(value: f64, precision: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    let formatted = format!("{:.*}", precision, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Format a value at full precision for machine-readable output
pub fn format_exact(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    value.to_string()
}

/// Format a possibly-undefined value, using `missing` for gaps
pub fn format_optional(value: Option<f64>, missing: &str, format: impl Fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| missing.to_string())
}

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
