use std::time::Duration;

pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Text form of a float as written into XML, matching the Python `repr` of
/// the same value.
///
/// Shortest round-trip digits are used. Integral values keep a trailing `.0`,
/// and values whose decimal exponent is below -4 or at least 16 switch to
/// exponent notation with a signed, two-digit minimum exponent (`1e-07`,
/// `1.5e+300`).
pub fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    // `{:e}` yields the shortest round-trip mantissa, e.g. "1.5e300" or "1e-7"
    let scientific = format!("{value:e}");
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exponent.unsigned_abs());
    }

    let positional = value.to_string();
    if positional.contains('.') {
        positional
    } else {
        format!("{positional}.0")
    }
}
