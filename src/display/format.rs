//! Number formatting for terminal output

use crate::types::allocation::round_half_up;

/// Whole dollars with thousands separators, e.g. `$12,500`
pub fn format_money(value: f64) -> String {
    let rounded = round_half_up(value);
    let digits = group_thousands(rounded.unsigned_abs());
    if rounded < 0 {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

/// Budget as entered: whole amounts plain, fractional ones to two places
pub fn format_budget(value: f64) -> String {
    if value.fract() == 0.0 || !value.is_finite() {
        return format_money(value);
    }
    let cents = round_half_up(value.abs() * 100.0);
    let sign = if value < 0.0 { "-" } else { "" };
    format!(
        "{}${}.{:02}",
        sign,
        group_thousands((cents / 100) as u64),
        cents % 100
    )
}

/// Horizontal bar proportional to `percent` out of `width` cells
pub fn bar(percent: i64, width: usize) -> String {
    let filled = (percent.clamp(0, 100) as usize * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
