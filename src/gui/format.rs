//! Display formatting for metric cards and heatmap annotations.

/// Whole number with thousands separators: `1234567.4` -> `"1,234,567"`.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Damages are stored in thousands of US dollars.
pub fn format_damages(thousands_usd: f64) -> String {
    format!("${}k", format_thousands(thousands_usd))
}

pub fn format_correlation(value: f64) -> String {
    if value.is_nan() {
        "N/A".to_string()
    } else {
        format!("{value:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(1234567.4), "1,234,567");
        assert_eq!(format_thousands(-45210.0), "-45,210");
        assert_eq!(format_thousands(f64::NAN), "N/A");
    }

    #[test]
    fn damages_have_currency_suffix() {
        assert_eq!(format_damages(2500.0), "$2,500k");
    }

    #[test]
    fn correlation_annotation() {
        assert_eq!(format_correlation(0.4567), "0.46");
        assert_eq!(format_correlation(f64::NAN), "N/A");
    }
}
