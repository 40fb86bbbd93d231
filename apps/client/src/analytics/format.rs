//! Display formatting. Locale-fixed: `.` decimal separator, no grouping, so the
//! same value always renders to the same string.

const RUPEE: char = '₹';
const LAKH: f64 = 100_000.0;
const NOT_AVAILABLE: &str = "N/A";

/// Rounds to one decimal and folds `-0.0` into `0.0`.
fn round1(value: f64) -> f64 {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Currency in lakhs with one decimal: 1_800_000 → "₹18.0L".
pub fn format_lakhs(amount: f64) -> String {
    if !amount.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let lakhs = round1(amount / LAKH);
    if lakhs < 0.0 {
        format!("-{RUPEE}{:.1}L", -lakhs)
    } else {
        format!("{RUPEE}{lakhs:.1}L")
    }
}

/// 62.45 → "62.5%".
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    format!("{:.1}%", round1(value))
}

/// Milliseconds below one second stay in ms, everything else becomes seconds
/// with one decimal: 850.4 → "850 ms", 1420 → "1.4 s".
pub fn format_duration_ms(ms: f64) -> String {
    if !ms.is_finite() || ms < 0.0 {
        return NOT_AVAILABLE.to_string();
    }
    if ms < 999.5 {
        format!("{} ms", ms.round() as u64)
    } else {
        format!("{:.1} s", round1(ms / 1000.0))
    }
}

/// Whole numbers without a fraction, anything else with one decimal.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let rounded = round1(value);
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}

/// 1 → "1st", 62 → "62nd", 113 → "113th".
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}
