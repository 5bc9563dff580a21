/// Numeric normalization for upstream JSON fields
///
/// The ranking service is loose about types: ranks arrive as numbers or
/// numeric strings, and any field may be null or missing. Everything is
/// funnelled through `parse_numeric` once, at ingestion, so the formatters
/// only ever see `Option<f64>`.
use serde_json::Value;

/// Coerce a JSON value into a finite number
///
/// - numbers pass through when finite
/// - strings use the longest numeric prefix ("42abc" -> 42, "abc" -> None)
/// - everything else (null, bool, array, object) is absent
pub fn parse_numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_numeric_str(s),
        _ => None,
    }
}

/// Same as `parse_numeric`, for an optional lookup result
pub fn parse_numeric_opt(value: Option<&Value>) -> Option<f64> {
    value.and_then(parse_numeric)
}

/// Lenient float parsing on the longest valid prefix of a string
pub fn parse_numeric_str(s: &str) -> Option<f64> {
    let trimmed = s.trim_start();
    let prefix = numeric_prefix(trimmed);
    if prefix.is_empty() {
        return None;
    }

    prefix.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Find the end of `[+-]digits[.digits][e[+-]digits]`
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return "";
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(parse_numeric(&json!(42)), Some(42.0));
        assert_eq!(parse_numeric(&json!(0.5557)), Some(0.5557));
        assert_eq!(parse_numeric(&json!(-5)), Some(-5.0));
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(parse_numeric(&json!("42")), Some(42.0));
        assert_eq!(parse_numeric(&json!("  12.5 ")), Some(12.5));
        assert_eq!(parse_numeric(&json!("1e3")), Some(1000.0));
        assert_eq!(parse_numeric(&json!("-7")), Some(-7.0));
        assert_eq!(parse_numeric(&json!(".5")), Some(0.5));
    }

    #[test]
    fn test_numeric_prefix_is_used() {
        assert_eq!(parse_numeric(&json!("42abc")), Some(42.0));
        assert_eq!(parse_numeric(&json!("3.14.15")), Some(3.14));
        assert_eq!(parse_numeric(&json!("12e")), Some(12.0));
        assert_eq!(parse_numeric(&json!("5.")), Some(5.0));
    }

    #[test]
    fn test_non_numeric_is_absent() {
        assert_eq!(parse_numeric(&json!("abc")), None);
        assert_eq!(parse_numeric(&json!("")), None);
        assert_eq!(parse_numeric(&json!(".")), None);
        assert_eq!(parse_numeric(&json!("-")), None);
        assert_eq!(parse_numeric(&json!("Infinity")), None);
        assert_eq!(parse_numeric(&json!(null)), None);
        assert_eq!(parse_numeric(&json!(true)), None);
        assert_eq!(parse_numeric(&json!([1])), None);
        assert_eq!(parse_numeric(&json!({"Rank": 1})), None);
    }

    #[test]
    fn test_parse_numeric_opt() {
        let data = json!({"Rank": "7"});
        assert_eq!(parse_numeric_opt(data.get("Rank")), Some(7.0));
        assert_eq!(parse_numeric_opt(data.get("Missing")), None);
    }
}
