//! Container format detection
//!
//! Classifies a file from its first and last lines only. JSON well-formedness
//! is not checked here; a malformed document surfaces later as a read error.

pub use crate::models::Format;

/// Detect the container format from the first and last lines of a file
///
/// Rules, in order:
/// 1. first line starts with `{` and ends with `}` → [`Format::Json`]
/// 2. first line starts with `[` and the last line ends with `]` → [`Format::ArrayJson`]
/// 3. anything else → [`Format::Dsv`]
///
/// Lines are compared as given, surrounding whitespace included.
pub fn detect_format(first: &str, last: &str) -> Format {
    if first.starts_with('{') && first.ends_with('}') {
        Format::Json
    } else if first.starts_with('[') && last.ends_with(']') {
        Format::ArrayJson
    } else {
        Format::Dsv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_json_lines() {
        assert_eq!(detect_format(r#"{"a":1}"#, r#"{"a":1}"#), Format::Json);
        assert_eq!(detect_format(r#"{"a":1}"#, "garbage"), Format::Json);
    }

    #[test]
    fn test_detect_array_json() {
        assert_eq!(detect_format("[1,2", "...,3]"), Format::ArrayJson);
        assert_eq!(detect_format("[", "]"), Format::ArrayJson);
    }

    #[test]
    fn test_single_line_array() {
        let line = r#"[{"a":1},{"a":2}]"#;
        assert_eq!(detect_format(line, line), Format::ArrayJson);
    }

    #[test]
    fn test_detect_dsv() {
        assert_eq!(detect_format("a,b,c", "1,2,3"), Format::Dsv);
        assert_eq!(detect_format("[1,2", "3,4"), Format::Dsv);
        // an object that does not close on its first line is not JSON lines
        assert_eq!(detect_format("{", "}"), Format::Dsv);
    }

    #[test]
    fn test_whitespace_is_significant() {
        assert_eq!(detect_format(r#" {"a":1}"#, r#" {"a":1}"#), Format::Dsv);
        assert_eq!(detect_format(r#"{"a":1} "#, r#"{"a":1} "#), Format::Dsv);
        assert_eq!(detect_format("[1,", "2] "), Format::Dsv);
    }

    #[test]
    fn test_detection_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(detect_format("a;b", "1;2"), Format::Dsv);
        }
    }
}
