//! Lenient accessors for loosely-typed upstream JSON.

use serde_json::Value;

/// Read an integral number, accepting whole floats such as `40.0`.
pub fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Read a percentage in `0..=100`.
pub fn as_percent(value: &Value) -> Option<u8> {
    as_integer(value)
        .filter(|n| (0..=100).contains(n))
        .and_then(|n| u8::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_as_integer() {
        assert_eq!(as_integer(&json!(42)), Some(42));
        assert_eq!(as_integer(&json!(-3)), Some(-3));
        assert_eq!(as_integer(&json!(40.0)), Some(40));
        assert_eq!(as_integer(&json!(40.5)), None);
        assert_eq!(as_integer(&json!("40")), None);
        assert_eq!(as_integer(&Value::Null), None);
    }

    #[test]
    fn test_as_percent() {
        assert_eq!(as_percent(&json!(0)), Some(0));
        assert_eq!(as_percent(&json!(100)), Some(100));
        assert_eq!(as_percent(&json!(101)), None);
        assert_eq!(as_percent(&json!(-1)), None);
    }
}
