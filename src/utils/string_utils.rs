//! # String utilities
//!
//! Common helpers for string cleanup in request payloads.

use serde::Deserialize;

/// Cleans an optional string field.
///
/// Empty or whitespace-only values become `None`; anything else is
/// trimmed and returned as `Some`.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Serde deserializer for optional string fields.
///
/// Converts empty or whitespace-only strings to `None` and trims valid
/// values. Use with `#[serde(deserialize_with = "deserialize_optional_string")]`.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct User {
///     #[serde(deserialize_with = "deserialize_optional_string")]
///     nickname: Option<String>,
/// }
///
/// // JSON: {"nickname": "  Alice  "} → Some("Alice")
/// // JSON: {"nickname": ""} → None
/// // JSON: {"nickname": null} → None
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some("Hello".to_string())), Some("Hello".to_string()));
        assert_eq!(clean_optional_string(Some("  World  ".to_string())), Some("World".to_string()));
        assert_eq!(clean_optional_string(Some("".to_string())), None);
        assert_eq!(clean_optional_string(Some("   ".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_deserialize_optional_string() {
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct TestStruct {
            #[serde(deserialize_with = "deserialize_optional_string")]
            optional_field: Option<String>,
        }

        // Valid string gets trimmed
        let json = r#"{"optional_field": "  Hello World  "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.optional_field, Some("Hello World".to_string()));

        // Empty string becomes None
        let json = r#"{"optional_field": ""}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.optional_field, None);

        // Whitespace only becomes None
        let json = r#"{"optional_field": "   "}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.optional_field, None);

        // Explicit null
        let json = r#"{"optional_field": null}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.optional_field, None);

        // "0" stays a valid value
        let json = r#"{"optional_field": "0"}"#;
        let result: TestStruct = serde_json::from_str(json).unwrap();
        assert_eq!(result.optional_field, Some("0".to_string()));
    }
}
