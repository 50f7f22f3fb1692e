//! Normalized Input Fields
//!
//! The flat output records produced from CWL input parameters. Serialized
//! key order and casing are fixed; downstream form renderers rely on them.

use serde::Serialize;
use serde_json::Value;

/// One normalized input field.
///
/// Example JSON:
///
/// ```json
/// {
///   "default": null,
///   "doc": "Aligned reads",
///   "id": "reads",
///   "label": null,
///   "type": "File",
///   "array": false,
///   "required": true,
///   "secondaryFiles": [
///     {"pattern": ".bai", "required": true}
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputField {
    /// Declared default value; for `File` fields narrowed to the
    /// descriptor's `location` or `path` string.
    pub default: Option<Value>,

    /// Documentation with embedded newlines collapsed to spaces.
    pub doc: Option<String>,

    /// Short name: the fragment after the last `#` of the parameter id.
    pub id: Option<String>,

    pub label: Option<String>,

    /// One of `boolean`, `int`, `string`, `File`, `Directory`, `Any`.
    /// For array fields this is the element type.
    #[serde(rename = "type")]
    pub ty: Option<String>,

    /// True when the source type was an array schema.
    pub array: bool,

    /// False only when the source type was a nullable union.
    pub required: bool,

    /// Only populated for `File` fields that declare secondary files.
    #[serde(rename = "secondaryFiles")]
    pub secondary_files: Option<Vec<SecondaryFile>>,
}

/// One expanded secondary-file declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SecondaryFile {
    pub pattern: String,
    pub required: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_field() -> InputField {
        InputField {
            default: None,
            doc: None,
            id: Some("reads".to_string()),
            label: None,
            ty: Some("File".to_string()),
            array: false,
            required: true,
            secondary_files: Some(vec![SecondaryFile {
                pattern: ".bai".to_string(),
                required: true,
            }]),
        }
    }

    #[test]
    fn test_serialized_key_casing() {
        let json = serde_json::to_string(&sample_field()).unwrap();
        assert!(json.contains("\"type\":\"File\""));
        assert!(json.contains("\"secondaryFiles\""));
        assert!(!json.contains("\"ty\""));
        assert!(!json.contains("secondary_files"));
    }

    #[test]
    fn test_serialized_key_order() {
        let json = serde_json::to_string(&sample_field()).unwrap();
        let expected_order = [
            "\"default\"",
            "\"doc\"",
            "\"id\"",
            "\"label\"",
            "\"type\"",
            "\"array\"",
            "\"required\"",
            "\"secondaryFiles\"",
        ];
        let positions: Vec<usize> = expected_order
            .iter()
            .map(|key| json.find(key).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_absent_secondary_files_serializes_as_null() {
        let field = InputField {
            secondary_files: None,
            ..sample_field()
        };
        let json = serde_json::to_string(&field).unwrap();
        assert!(json.contains("\"secondaryFiles\":null"));
    }
}
