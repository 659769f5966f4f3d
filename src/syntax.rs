//! JavaScript source-text primitives shared by the engine and the module emitter.
//!
//! These helpers are total: every input has a textual form.

use base64::{engine::general_purpose, Engine};
use chrono::{DateTime, SecondsFormat, Utc};

/// Wraps `s` in single quotes, escaping only backslashes and single quotes.
///
/// Control characters such as newlines and tabs are emitted as-is.
#[inline]
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

/// Returns `true` if `s` matches `[A-Za-z_$][A-Za-z0-9_$]*`.
#[inline]
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Parses `key` as a canonical array index: decimal digits without a leading zero,
/// below `2^32 - 1`.
pub(crate) fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|&n| n != u32::MAX)
}

/// Renders an object key, quoting it unless it is an identifier.
#[inline]
pub(crate) fn key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// Renders `segment` as a property access: `.name` or `['na-me']`.
pub(crate) fn member(segment: &str) -> String {
    if is_identifier(segment) {
        format!(".{}", segment)
    } else {
        format!("[{}]", quote(segment))
    }
}

/// Formats a double the way `Number.prototype.toString` does.
pub(crate) fn format_f64(v: f64) -> String {
    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if v == 0.0 {
        // -0 prints as 0
        return "0".to_string();
    }

    let abs = v.abs();
    if (1e-6..1e21).contains(&abs) {
        return v.to_string();
    }

    let exp = format!("{:e}", v);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

/// Encodes bytes as standard, padded base64.
#[inline]
pub(crate) fn base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Formats an instant as ISO-8601 UTC with millisecond precision.
#[inline]
pub(crate) fn iso_millis(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_quote_escapes_only_backslash_and_quote() {
        assert_eq!(quote("it's"), "'it\\'s'");
        assert_eq!(quote("a\\b"), "'a\\\\b'");
        assert_eq!(quote("line\nbreak\ttab"), "'line\nbreak\ttab'");
        assert_eq!(quote(""), "''");
        assert_eq!(quote("\"double\""), "'\"double\"'");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("one"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("$el"));
        assert!(is_identifier("a1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("5"));
        assert!(!is_identifier("1a"));
        assert!(!is_identifier("thr-ee"));
        assert!(!is_identifier("with space"));
        assert!(!is_identifier("ünïcode"));
    }

    #[test]
    fn test_array_index() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("5"), Some(5));
        assert_eq!(array_index("4294967294"), Some(4_294_967_294));
        assert_eq!(array_index("4294967295"), None);
        assert_eq!(array_index("01"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("1.5"), None);
        assert_eq!(array_index(""), None);
        assert_eq!(array_index("a"), None);
    }

    #[test]
    fn test_member_access() {
        assert_eq!(member("a"), ".a");
        assert_eq!(member("thr-ee"), "['thr-ee']");
        assert_eq!(member("0"), "['0']");
        assert_eq!(member("it's"), "['it\\'s']");
    }

    #[test]
    fn test_format_f64() {
        assert_eq!(format_f64(3.1415), "3.1415");
        assert_eq!(format_f64(-17.0), "-17");
        assert_eq!(format_f64(1.0), "1");
        assert_eq!(format_f64(-0.0), "0");
        assert_eq!(format_f64(0.000001), "0.000001");
        assert_eq!(format_f64(1.5e-7), "1.5e-7");
        assert_eq!(format_f64(1e21), "1e+21");
        assert_eq!(format_f64(-2.5e22), "-2.5e+22");
        assert_eq!(format_f64(123456789012345680000.0), "123456789012345680000");
        assert_eq!(format_f64(f64::NAN), "NaN");
        assert_eq!(format_f64(f64::INFINITY), "Infinity");
        assert_eq!(format_f64(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_base64() {
        assert_eq!(base64(b"buffer"), "YnVmZmVy");
        assert_eq!(base64(b""), "");
    }

    #[test]
    fn test_iso_millis() {
        let instant = Utc.timestamp_millis_opt(24 * 12 * 3_600_000).unwrap();
        assert_eq!(iso_millis(&instant), "1970-01-13T00:00:00.000Z");

        let instant = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(iso_millis(&instant), "2023-11-14T22:13:20.123Z");
    }
}
