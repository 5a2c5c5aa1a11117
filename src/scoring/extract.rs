//! Coercion of loosely-typed attribute values into numbers.
//!
//! Both extractors are total: anything unreadable becomes 0.

use regex::Regex;
use serde_json::Value;

lazy_static::lazy_static! {
    // Magnitude words must directly follow a number as their own word.
    static ref THOUSAND_RE: Regex =
        Regex::new(r"([0-9]+(?:[.,][0-9]+)*)\s*(?:thousand|bin|k)\b").unwrap();
    static ref MILLION_RE: Regex =
        Regex::new(r"([0-9]+(?:[.,][0-9]+)*)\s*(?:million|milyon|mn|m)\b").unwrap();
    static ref DIGITS_RE: Regex = Regex::new(r"[0-9]+").unwrap();
}

/// Integer count from a number or a string such as `"250"`, `"5k"`,
/// `"2,5 milyon"` or `"approx. 1200 staff"`.
pub fn extract_number(raw: &Value) -> u64 {
    match raw {
        Value::Number(n) => n.as_f64().map(non_negative_floor).unwrap_or(0),
        Value::String(s) => extract_number_str(s),
        _ => 0,
    }
}

pub fn extract_number_str(raw: &str) -> u64 {
    let text = raw.trim().to_lowercase();
    if text.is_empty() {
        return 0;
    }

    for (re, factor) in [(&*THOUSAND_RE, 1_000.0), (&*MILLION_RE, 1_000_000.0)] {
        if let Some(base) = re.captures(&text).and_then(|caps| magnitude_base(&caps[1])) {
            return non_negative_floor(base * factor);
        }
    }

    // A digit run too long for u64 is still a very large count.
    DIGITS_RE
        .find(&text)
        .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Number in front of a magnitude word. A comma followed by exactly three
/// digits groups thousands ("1,500k"); any other comma is a decimal mark
/// ("2,5 milyon").
fn magnitude_base(raw: &str) -> Option<f64> {
    let mut groups = raw.split(',');
    let head = groups.next().unwrap_or_default();
    let tail: Vec<&str> = groups.collect();
    let thousands = !tail.is_empty()
        && tail.iter().all(|group| {
            let digits = group.split('.').next().unwrap_or_default();
            digits.len() == 3
        });

    let normalized = if thousands {
        format!("{}{}", head, tail.concat())
    } else {
        raw.replace(',', ".")
    };
    normalized.parse::<f64>().ok()
}

/// Decimal amount from a number or a string such as `"1,200,000,000 TL"`
/// or `"1.200.000.50"`. Every point but the last is a thousands separator.
pub fn extract_decimal(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).unwrap_or(0.0).max(0.0),
        Value::String(s) => extract_decimal_str(s),
        _ => 0.0,
    }
}

pub fn extract_decimal_str(raw: &str) -> f64 {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let normalized = match kept.rfind('.') {
        Some(last) => {
            let (int_part, frac_part) = kept.split_at(last);
            let int_digits: String = int_part.chars().filter(|c| *c != '.').collect();
            format!("{}{}", int_digits, frac_part)
        }
        None => kept,
    };

    // Overlong digit strings parse to infinity; keep them as the largest amount.
    match normalized.parse::<f64>() {
        Ok(value) if value.is_infinite() => f64::MAX,
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Floor to u64; non-positive and NaN become 0, overflow saturates.
fn non_negative_floor(value: f64) -> u64 {
    if value > 0.0 {
        value.floor() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_number_plain() {
        assert_eq!(extract_number(&json!(6000)), 6000);
        assert_eq!(extract_number(&json!(12.9)), 12);
        assert_eq!(extract_number(&json!("250")), 250);
        assert_eq!(extract_number(&json!("approx. 1200 staff")), 1200);
    }

    #[test]
    fn test_extract_number_first_digit_run() {
        assert_eq!(extract_number(&json!("51-200")), 51);
        assert_eq!(extract_number(&json!("1,500")), 1);
    }

    #[test]
    fn test_extract_number_thousand_tokens() {
        assert_eq!(extract_number(&json!("5k")), 5_000);
        assert_eq!(extract_number(&json!("2.5K")), 2_500);
        assert_eq!(extract_number(&json!("3 bin")), 3_000);
        assert_eq!(extract_number(&json!("12 thousand")), 12_000);
    }

    #[test]
    fn test_extract_number_million_tokens() {
        assert_eq!(extract_number(&json!("2 milyon")), 2_000_000);
        assert_eq!(extract_number(&json!("1,5 million")), 1_500_000);
        assert_eq!(extract_number(&json!("4m")), 4_000_000);
    }

    #[test]
    fn test_extract_number_comma_groups_before_magnitude() {
        assert_eq!(extract_number(&json!("1,500k")), 1_500_000);
        assert_eq!(extract_number(&json!("2,250,000 bin")), 2_250_000_000);
        assert_eq!(extract_number(&json!("1,25 milyon")), 1_250_000);
        assert_eq!(extract_number(&json!("1,500.5k")), 1_500_500);
    }

    #[test]
    fn test_extract_number_saturates_on_overflow() {
        assert_eq!(extract_number(&json!("18446744073709551615")), u64::MAX);
        assert_eq!(extract_number(&json!("18446744073709551616")), u64::MAX);
        assert_eq!(extract_number(&json!(format!("{} staff", "9".repeat(60)))), u64::MAX);
        assert_eq!(extract_number(&json!(format!("{}k", "9".repeat(400)))), u64::MAX);
    }

    #[test]
    fn test_extract_number_thousand_checked_before_million() {
        assert_eq!(extract_number(&json!("3 milyon veya 5 bin")), 5_000);
    }

    #[test]
    fn test_extract_number_unit_words_are_not_magnitudes() {
        assert_eq!(extract_number(&json!("120 employees")), 120);
        assert_eq!(extract_number(&json!("80 kişi")), 80);
    }

    #[test]
    fn test_extract_number_garbage() {
        assert_eq!(extract_number(&json!("")), 0);
        assert_eq!(extract_number(&json!("unknown")), 0);
        assert_eq!(extract_number(&json!(null)), 0);
        assert_eq!(extract_number(&json!(-40)), 0);
        assert_eq!(extract_number(&json!({"n": 3})), 0);
    }

    #[test]
    fn test_extract_decimal_numbers() {
        assert_eq!(extract_decimal(&json!(1_200_000_000u64)), 1_200_000_000.0);
        assert_eq!(extract_decimal(&json!(-5.0)), 0.0);
    }

    #[test]
    fn test_extract_decimal_strings() {
        assert_eq!(extract_decimal(&json!("1,200,000,000 TL")), 1_200_000_000.0);
        assert_eq!(extract_decimal(&json!("₺45.5")), 45.5);
        assert_eq!(extract_decimal(&json!("1.200.000.50")), 1_200_000.5);
    }

    #[test]
    fn test_extract_decimal_saturates_on_overflow() {
        assert_eq!(extract_decimal(&json!("9".repeat(400))), f64::MAX);
        assert_eq!(extract_decimal_str(&format!("{} TL", "1".repeat(320))), f64::MAX);
        assert!(extract_decimal(&json!("9".repeat(300))) > 1e299);
    }

    #[test]
    fn test_extract_decimal_garbage() {
        assert_eq!(extract_decimal(&json!("n/a")), 0.0);
        assert_eq!(extract_decimal(&json!("")), 0.0);
        assert_eq!(extract_decimal(&json!(".")), 0.0);
        assert_eq!(extract_decimal(&json!(false)), 0.0);
    }
}
