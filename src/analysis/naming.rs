//! Naming convention classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Word separator inside identifiers.
pub const SEPARATOR: char = '_';

/// Leading character that marks a name as private.
pub const PRIVACY_MARKER: char = '_';

/// Naming convention categories.
///
/// Variant order is the key order used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StyleTag {
    #[serde(rename = "snake_case")]
    SnakeCase,
    #[serde(rename = "camelCase")]
    CamelCase,
    #[serde(rename = "PascalCase")]
    PascalCase,
    #[serde(rename = "UPPER_SNAKE_CASE")]
    UpperSnakeCase,
    #[serde(rename = "_private")]
    Private,
    #[serde(rename = "other")]
    Other,
    #[serde(rename = "unknown")]
    Unknown,
}

impl StyleTag {
    pub const ALL: [StyleTag; 7] = [
        StyleTag::SnakeCase,
        StyleTag::CamelCase,
        StyleTag::PascalCase,
        StyleTag::UpperSnakeCase,
        StyleTag::Private,
        StyleTag::Other,
        StyleTag::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleTag::SnakeCase => "snake_case",
            StyleTag::CamelCase => "camelCase",
            StyleTag::PascalCase => "PascalCase",
            StyleTag::UpperSnakeCase => "UPPER_SNAKE_CASE",
            StyleTag::Private => "_private",
            StyleTag::Other => "other",
            StyleTag::Unknown => "unknown",
        }
    }
}

impl fmt::Display for StyleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of classifying one identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Style of the identifier as written.
    pub style: StyleTag,
    /// Style of the name with the privacy marker stripped, if it had one.
    pub private: Option<StyleTag>,
}

/// True if the string has at least one cased character and all cased
/// characters are uppercase.
pub fn is_all_upper(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            cased = true;
        }
    }
    cased
}

/// True if the string has at least one cased character and all cased
/// characters are lowercase.
pub fn is_all_lower(s: &str) -> bool {
    let mut cased = false;
    for c in s.chars() {
        if c.is_uppercase() {
            return false;
        }
        if c.is_lowercase() {
            cased = true;
        }
    }
    cased
}

/// Classify the naming style of an identifier.
///
/// The checks run in a fixed order and the first match wins, so `MY_CONST`
/// is `UPPER_SNAKE_CASE` even though it also starts with an uppercase letter,
/// and `_helper` is `snake_case` because it is lowercase with a separator.
pub fn classify(name: &str) -> StyleTag {
    let Some(first) = name.chars().next() else {
        return StyleTag::Unknown;
    };
    let has_separator = name.contains(SEPARATOR);

    if has_separator && is_all_upper(name) {
        return StyleTag::UpperSnakeCase;
    }
    if has_separator && is_all_lower(name) {
        return StyleTag::SnakeCase;
    }
    if !has_separator && first.is_uppercase() {
        return StyleTag::PascalCase;
    }
    if !has_separator && first.is_lowercase() && name.chars().any(char::is_uppercase) {
        return StyleTag::CamelCase;
    }
    if first == SEPARATOR {
        return StyleTag::Private;
    }
    StyleTag::Other
}

/// Classify an identifier and, if it carries the privacy marker, the
/// underlying name as well.
pub fn classify_identifier(name: &str) -> Classification {
    Classification {
        style: classify(name),
        private: name.strip_prefix(PRIVACY_MARKER).map(classify),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_basic_styles() {
        assert_eq!(classify("user_name"), StyleTag::SnakeCase);
        assert_eq!(classify("userName"), StyleTag::CamelCase);
        assert_eq!(classify("UserName"), StyleTag::PascalCase);
        assert_eq!(classify("MAX_SIZE"), StyleTag::UpperSnakeCase);
        assert_eq!(classify("x"), StyleTag::Other);
        assert_eq!(classify("count"), StyleTag::Other);
    }

    #[test]
    fn test_upper_snake_checked_before_pascal() {
        assert_eq!(classify("MY_CONST"), StyleTag::UpperSnakeCase);
        // No separator: the uppercase-first rule applies.
        assert_eq!(classify("URL"), StyleTag::PascalCase);
    }

    #[test]
    fn test_leading_separator() {
        // Lowercase with separator wins before the privacy rule.
        assert_eq!(classify("_helper"), StyleTag::SnakeCase);
        assert_eq!(classify("__init__"), StyleTag::SnakeCase);
        assert_eq!(classify("_Helper"), StyleTag::Private);
        assert_eq!(classify("_fooBar"), StyleTag::Private);
        assert_eq!(classify("__"), StyleTag::Private);
    }

    #[test]
    fn test_classify_identifier_records_privacy() {
        let c = classify_identifier("_helper");
        assert_eq!(c.style, StyleTag::SnakeCase);
        assert_eq!(c.private, Some(classify("helper")));

        let c = classify_identifier("_MAX_RETRIES");
        assert_eq!(c.style, StyleTag::UpperSnakeCase);
        assert_eq!(c.private, Some(StyleTag::UpperSnakeCase));

        let c = classify_identifier("public_name");
        assert_eq!(c.private, None);
    }

    #[test]
    fn test_empty_and_odd_inputs() {
        assert_eq!(classify(""), StyleTag::Unknown);
        assert_eq!(classify("1abc"), StyleTag::Other);
        assert_eq!(classify("x1_y2"), StyleTag::SnakeCase);
        assert_eq!(classify("HTTP2_PORT"), StyleTag::UpperSnakeCase);
    }

    #[test]
    fn test_case_predicates() {
        assert!(is_all_upper("ABC_1"));
        assert!(!is_all_upper("___"));
        assert!(is_all_lower("abc_1"));
        assert!(!is_all_lower("aBc"));
        assert!(!is_all_lower("123"));
    }

    #[test]
    fn test_tag_names_round_trip() {
        for tag in StyleTag::ALL {
            let json = serde_json::to_string(&tag).unwrap();
            assert_eq!(json, format!("\"{}\"", tag.as_str()));
            assert_eq!(serde_json::from_str::<StyleTag>(&json).unwrap(), tag);
        }
        assert_eq!(
            serde_json::to_string(&StyleTag::UpperSnakeCase).unwrap(),
            "\"UPPER_SNAKE_CASE\""
        );
    }
}
