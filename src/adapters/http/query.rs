//! Query-string value parsing shared by both route tables.
//!
//! Numeric values are unsigned counts: leading whitespace is skipped
//! and the leading run of digits is used, so `"12abc"` reads as 12.
//! A value with no leading digit, a negative value or one that does
//! not fit in `u32` counts as absent and the caller's default applies.

/// Leading unsigned integer of `raw`, if there is one and it fits in `u32`.
pub fn parse_count(raw: Option<&str>) -> Option<u32> {
    let trimmed = raw?.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}

/// Page size: zero, negative or non-numeric values use `default`.
pub fn limit_or(raw: Option<&str>, default: u32) -> u32 {
    parse_count(raw).filter(|n| *n > 0).unwrap_or(default)
}

/// Page offset, zero when absent or unparsable.
pub fn offset_or_zero(raw: Option<&str>) -> u32 {
    parse_count(raw).unwrap_or(0)
}

/// Boolean filter: only the literal `"true"` is true.
pub fn flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}

/// Drop empty strings so they are never forwarded upstream.
pub fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count_reads_leading_digits() {
        assert_eq!(parse_count(Some("25")), Some(25));
        assert_eq!(parse_count(Some(" 12abc")), Some(12));
        assert_eq!(parse_count(Some("abc")), None);
        assert_eq!(parse_count(Some("-5")), None);
        assert_eq!(parse_count(Some("")), None);
        assert_eq!(parse_count(None), None);
    }

    #[test]
    fn test_limit_falls_back() {
        assert_eq!(limit_or(Some("0"), 50), 50);
        assert_eq!(limit_or(Some("ten"), 100), 100);
        assert_eq!(limit_or(Some("99999999999"), 20), 20);
        assert_eq!(limit_or(Some("7"), 50), 7);
    }

    #[test]
    fn test_negative_and_oversized_counts_are_absent() {
        assert_eq!(parse_count(Some("-5")), None);
        assert_eq!(parse_count(Some("4294967296")), None);
        assert_eq!(parse_count(Some("4294967295")), Some(u32::MAX));
        assert_eq!(limit_or(Some("-5"), 100), 100);
        assert_eq!(offset_or_zero(Some("-20")), 0);
    }

    #[test]
    fn test_flag_is_literal_true() {
        assert!(flag(Some("true")));
        assert!(!flag(Some("TRUE")));
        assert!(!flag(Some("1")));
        assert!(!flag(None));
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("open".to_string())), Some("open".to_string()));
    }
}
