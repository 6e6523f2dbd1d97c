use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces a transported quota value to an integer, defaulting to 0.
///
/// Strings are read by their leading integer (`"12abc"` is 12, `"abc"` is 0),
/// numbers are truncated toward zero, anything else is 0.
pub fn parse_quota(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => parse_quota_str(s),
        _ => 0,
    }
}

pub fn parse_quota_str(input: &str) -> i64 {
    let s = input.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        value = value.saturating_mul(radix as i64).saturating_add(d as i64);
    }

    match (seen, negative) {
        (false, _) => 0,
        (true, true) => -value,
        (true, false) => value,
    }
}

/// `deserialize_with` hook for quota fields that may arrive as strings,
/// numbers or null.
pub fn lenient_quota<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_quota(&value))
}
