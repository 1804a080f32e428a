//! Best-effort numeric coercion and display helpers for CSV cell values.

/// Converts a cell value to a number.
///
/// Every character that is not an ASCII digit, `.` or `-` is stripped
/// first, then the remainder is parsed. Anything that does not parse to a
/// finite number yields `0.0`. This is not locale-aware: `"1,234 mm"`
/// becomes `1234`.
pub fn to_number(value: &str) -> f64 {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => 0.0,
    }
}

/// Fixed-point rendering used for summary cards and chart labels.
pub fn format_number(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Escapes a cell value for embedding in HTML text content.
///
/// Only `&`, `<` and `>` are replaced; values are never placed inside
/// attribute quotes unescaped by callers.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a value for use inside a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    escape_html(value).replace('"', "&quot;")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thousands_separator_and_unit_are_stripped() {
        assert_eq!(to_number("1,234.5 mm"), 1234.5);
        assert_eq!(to_number("1,234 mm"), 1234.0);
    }

    #[test]
    fn test_non_numeric_coerces_to_zero() {
        assert_eq!(to_number("N/A"), 0.0);
        assert_eq!(to_number(""), 0.0);
        assert_eq!(to_number("."), 0.0);
    }

    #[test]
    fn test_negative_values_survive() {
        assert_eq!(to_number("-12"), -12.0);
        assert_eq!(to_number("-12 %"), -12.0);
    }

    #[test]
    fn test_strip_happens_before_parse() {
        // Letters between digits are removed, joining the digits.
        assert_eq!(to_number("1a2b3"), 123.0);
        // Two minus signs cannot parse and fall back to zero.
        assert_eq!(to_number("12-3"), 0.0);
    }

    #[test]
    fn test_format_number_fixed_decimals() {
        assert_eq!(format_number(12.345, 1), "12.3");
        assert_eq!(format_number(-3.0, 2), "-3.00");
    }

    #[test]
    fn test_escape_html_only_touches_markup_characters() {
        assert_eq!(escape_html("<b>A & B</b>"), "&lt;b&gt;A &amp; B&lt;/b&gt;");
        assert_eq!(escape_html("\"quoted\""), "\"quoted\"");
        assert_eq!(escape_attr("a\"b"), "a&quot;b");
    }
}
