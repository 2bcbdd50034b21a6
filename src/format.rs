//! Number formatting policies shared by KPI cards, chart axes and tooltips.
//!
//! All functions follow en-US conventions, round half away from zero and
//! render an absent value as `"0"`.

const ZERO: &str = "0";

/// Magnitudes at or above which tooltips switch to compact notation.
pub const TOOLTIP_COMPACT_THRESHOLD: f64 = 10_000.0;

const SCALES: [(f64, &str); 5] = [
    (1.0, ""),
    (1e3, "K"),
    (1e6, "M"),
    (1e9, "B"),
    (1e12, "T"),
];

/// Compact notation with a magnitude suffix and at most one fractional
/// digit: `1500` is `"1.5K"`, `2_000_000` is `"2M"`.
pub fn compact(value: Option<f64>) -> String {
    let Some(v) = value else {
        return ZERO.to_string();
    };
    if let Some(s) = non_finite(v) {
        return s;
    }

    let abs = v.abs();
    let mut idx = SCALES.iter().rposition(|(scale, _)| abs >= *scale).unwrap_or(0);
    let mut scaled = round_tenths(abs / SCALES[idx].0);
    // 999_960 rounds to 1000K; carry into the next suffix.
    if scaled >= 1000.0 && idx + 1 < SCALES.len() {
        idx += 1;
        scaled = round_tenths(abs / SCALES[idx].0);
    }

    let digits = if scaled.fract() == 0.0 {
        format!("{scaled:.0}")
    } else {
        format!("{scaled:.1}")
    };
    format!("{}{}{}", sign(v, scaled), digits, SCALES[idx].1)
}

/// Whole number with thousands separators: `1234567.8` is `"1,234,568"`.
pub fn full(value: Option<f64>) -> String {
    let Some(v) = value else {
        return ZERO.to_string();
    };
    if let Some(s) = non_finite(v) {
        return s;
    }

    let rounded = v.abs().round();
    format!("{}{}", sign(v, rounded), group_thousands(&format!("{rounded:.0}")))
}

/// Exact below ten thousand, compact from there on.
pub fn tooltip(value: Option<f64>) -> String {
    match value {
        Some(v) if v.abs() < TOOLTIP_COMPACT_THRESHOLD => full(value),
        _ => compact(value),
    }
}

/// Tooltip text for a chart value, e.g. `"$1.5M"`.
pub fn tooltip_value(prefix: &str, value: Option<f64>) -> String {
    format!("{prefix}{}", tooltip(value))
}

/// Period delta as a signed percentage: `0.5` is `"+50.00%"`.
pub fn delta(delta: f64) -> String {
    let sign = if delta >= 0.0 { "+" } else { "" };
    format!("{sign}{:.2}%", delta * 100.0)
}

fn round_tenths(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

// A value that rounds to zero is shown unsigned.
fn sign(v: f64, rounded: f64) -> &'static str {
    if v < 0.0 && rounded != 0.0 {
        "-"
    } else {
        ""
    }
}

fn non_finite(v: f64) -> Option<String> {
    if v.is_nan() {
        Some("NaN".to_string())
    } else if v.is_infinite() {
        Some(if v > 0.0 { "∞" } else { "-∞" }.to_string())
    } else {
        None
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
