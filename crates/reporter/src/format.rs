//! Currency formatting

/// Render a price rounded to whole units with thousands separators,
/// e.g. `$208,500`. Negative estimates keep the sign after the currency
/// symbol (`$-1,250`).
pub fn format_price(price: f64) -> String {
    let rounded = price.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("${}{}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_separators() {
        assert_eq!(format_price(208_500.0), "$208,500");
        assert_eq!(format_price(1_234_567.0), "$1,234,567");
        assert_eq!(format_price(999.0), "$999");
        assert_eq!(format_price(0.0), "$0");
    }

    #[test]
    fn test_rounds_to_whole_units() {
        assert_eq!(format_price(181_234.49), "$181,234");
        assert_eq!(format_price(181_234.5), "$181,235");
        assert_eq!(format_price(999.7), "$1,000");
    }

    #[test]
    fn test_negative() {
        assert_eq!(format_price(-1_250.0), "$-1,250");
        assert_eq!(format_price(-0.2), "$0");
    }
}
