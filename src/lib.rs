//! cwl-inputs-parser - CWL Workflow Inputs Extractor
//!
//! Extracts a normalized description of the declared inputs of a Common
//! Workflow Language (CWL) workflow or tool and exposes it as JSON, so
//! that downstream UIs can render input forms without understanding CWL.
//!
//! # Architecture
//!
//! The library is organized into four main modules:
//!
//! - [`cwl`]: Document object model and loading (YAML/JSON, `$graph`)
//! - [`inputs`]: Type classification and field normalization (the core)
//! - [`fetch`]: Resolving workflow locations (local path or remote URL)
//! - [`server`]: The REST API wrapper
//!
//! # Example
//!
//! ```rust
//! use cwl_inputs_parser::inputs_from_content;
//!
//! let workflow = r#"
//! class: CommandLineTool
//! cwlVersion: v1.2
//! inputs:
//!   - id: reads
//!     type: File
//! "#;
//!
//! let fields = inputs_from_content(workflow).unwrap();
//! assert_eq!(fields[0].ty.as_deref(), Some("File"));
//! ```

pub mod cwl;
pub mod error;
pub mod fetch;
pub mod inputs;
pub mod server;

// Re-export commonly used types
pub use cwl::loader::{extract_main_tool, parse_document};
pub use cwl::model::{CwlDocument, InputParameter, ToolClass, TypeShape};
pub use error::{CwlInputsError, Result};
pub use fetch::fetch_document;
pub use inputs::classifier::{classify, input_fields};
pub use inputs::field::{InputField, SecondaryFile};
pub use server::create_router;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "cwl-inputs-parser";

/// Extracts the input fields of the main process of a CWL document string.
pub fn inputs_from_content(content: &str) -> Result<Vec<InputField>> {
    let documents = parse_document(content)?;
    let tool = extract_main_tool(&documents)?;
    input_fields(tool)
}

/// Fetches a CWL document from a local path or remote URL, then extracts
/// its input fields.
pub async fn inputs_from_location(location: &str) -> Result<Vec<InputField>> {
    let content = fetch_document(location).await?;
    inputs_from_content(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }

    #[test]
    fn test_app_name() {
        assert_eq!(APP_NAME, "cwl-inputs-parser");
    }

    #[test]
    fn test_tool_without_inputs_yields_empty_list() {
        let fields = inputs_from_content("class: CommandLineTool\ninputs: []\n").unwrap();
        assert!(fields.is_empty());
    }

    #[test]
    fn test_file_input_with_secondary_pattern() {
        let fields = inputs_from_content(
            r#"
class: CommandLineTool
cwlVersion: v1.2
inputs:
  - id: reads
    type: File
    secondaryFiles:
      - pattern: .bai
"#,
        )
        .unwrap();

        assert_eq!(fields.len(), 1);
        let field = &fields[0];
        assert_eq!(field.ty.as_deref(), Some("File"));
        assert!(!field.array);
        assert!(field.required);
        assert!(field.default.is_none());
        assert_eq!(
            field.secondary_files,
            Some(vec![SecondaryFile {
                pattern: ".bai".to_string(),
                required: true,
            }])
        );
    }

    #[test]
    fn test_packed_workflow_end_to_end() {
        let fields = inputs_from_content(
            r##"
cwlVersion: v1.2
$graph:
  - class: CommandLineTool
    id: "#count"
    inputs:
      - id: ignored
        type: {type: record, fields: []}
  - class: Workflow
    id: "#main"
    inputs:
      - id: threshold
        type: int?
"##,
        )
        .unwrap();

        // Only the main workflow is described; the auxiliary tool with an
        // unsupported record input is skipped entirely.
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].id.as_deref(), Some("threshold"));
        assert_eq!(fields[0].ty.as_deref(), Some("int"));
        assert!(!fields[0].required);
    }

    #[test]
    fn test_unsupported_input_fails_whole_conversion() {
        let err = inputs_from_content(
            r#"
class: CommandLineTool
inputs:
  - id: rec
    type: {type: record, fields: []}
"#,
        )
        .unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_output_json_shape() {
        let fields = inputs_from_content(
            r#"
class: CommandLineTool
inputs:
  - id: verbose
    type: boolean
    default: true
"#,
        )
        .unwrap();
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "default": true,
                "doc": null,
                "id": "verbose",
                "label": null,
                "type": "boolean",
                "array": false,
                "required": true,
                "secondaryFiles": null,
            }])
        );
    }
}
