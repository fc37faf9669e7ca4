/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use dash_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(0.0, 2), "0.00");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    // Handle the sign separately so the thousands grouping works on the
    // absolute value.
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Round to the requested decimal places.
    // Add a tiny epsilon (half ULP at the target precision) before rounding
    // to avoid IEEE 754 binary-representation issues at exact midpoints.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let frac_part = rounded - rounded.trunc();

    // Build the thousands-separated integer portion.
    let int_str = integer_part.to_string();
    let grouped = group_thousands(&int_str);

    let result = if decimals == 0 {
        grouped
    } else {
        // Format the fractional part to the exact number of decimals.
        let frac_str = format!("{:.prec$}", frac_part, prec = decimals as usize);
        // `frac_str` starts with "0.", e.g. "0.50". Strip the leading "0".
        let decimal_digits = &frac_str[1..]; // ".50"
        format!("{}{}", grouped, decimal_digits)
    };

    if negative {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format an energy amount in watt-hours with two decimal places.
///
/// # Examples
///
/// ```
/// use dash_core::formatting::format_energy;
///
/// assert_eq!(format_energy(45.2), "45.20 Wh");
/// assert_eq!(format_energy(0.0),  "0.00 Wh");
/// assert_eq!(format_energy(1234.5), "1,234.50 Wh");
/// ```
pub fn format_energy(watt_hours: f64) -> String {
    format!("{} Wh", format_number(watt_hours, 2))
}

/// Format a CPU utilization fraction (`0.0..=1.0`) as a percentage with two
/// decimal places.
///
/// # Examples
///
/// ```
/// use dash_core::formatting::format_utilization;
///
/// assert_eq!(format_utilization(0.75), "75.00%");
/// assert_eq!(format_utilization(0.0),  "0.00%");
/// assert_eq!(format_utilization(1.0),  "100.00%");
/// ```
pub fn format_utilization(fraction: f64) -> String {
    format!("{}%", format_number(fraction * 100.0, 2))
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = chars.len() % 3;
    for (i, &c) in chars.iter().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_number ────────────────────────────────────────────────────────

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_no_thousands() {
        assert_eq!(format_number(123.456, 2), "123.46");
    }

    #[test]
    fn test_format_number_with_thousands() {
        assert_eq!(format_number(1_234.5, 1), "1,234.5");
    }

    #[test]
    fn test_format_number_millions() {
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    }

    #[test]
    fn test_format_number_negative() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
    }

    #[test]
    fn test_format_number_exact_thousands() {
        assert_eq!(format_number(1_000.0, 0), "1,000");
    }

    #[test]
    fn test_format_number_rounds_up() {
        assert_eq!(format_number(1.005, 2), "1.01");
    }

    // ── format_energy ────────────────────────────────────────────────────────

    #[test]
    fn test_format_energy_basic() {
        assert_eq!(format_energy(10.0), "10.00 Wh");
        assert_eq!(format_energy(45.237), "45.24 Wh");
    }

    #[test]
    fn test_format_energy_zero() {
        assert_eq!(format_energy(0.0), "0.00 Wh");
    }

    // ── format_utilization ───────────────────────────────────────────────────

    #[test]
    fn test_format_utilization_fraction() {
        assert_eq!(format_utilization(0.5), "50.00%");
        assert_eq!(format_utilization(0.1234), "12.34%");
    }

    #[test]
    fn test_format_utilization_full() {
        assert_eq!(format_utilization(1.0), "100.00%");
    }

    // ── group_thousands (via format_number) ──────────────────────────────────

    #[test]
    fn test_group_thousands_one_digit() {
        assert_eq!(format_number(5.0, 0), "5");
    }

    #[test]
    fn test_group_thousands_four_digits() {
        assert_eq!(format_number(1234.0, 0), "1,234");
    }

    #[test]
    fn test_group_thousands_seven_digits() {
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    }
}
