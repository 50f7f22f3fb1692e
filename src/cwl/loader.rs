//! CWL Document Loading
//!
//! Parses CWL document text (YAML or JSON) into the object model, handles
//! the packed `$graph` form, expands type shorthands, and selects the main
//! runnable process of a document.

use log::{debug, info};
use serde_yaml::Value as YamlValue;

use crate::error::{CwlInputsError, Result};

use super::model::{CwlDocument, ToolClass};

/// Parses a CWL document string into one or more document objects.
///
/// A plain document yields a single-element list. A packed document
/// (top-level `$graph`) yields one element per graph entry, in order.
/// Every parameter type is desugared (`T?`, `T[]`) after parsing.
///
/// # Example
///
/// ```rust
/// use cwl_inputs_parser::cwl::loader::parse_document;
///
/// let docs = parse_document("class: CommandLineTool\ninputs: []\n").unwrap();
/// assert_eq!(docs.len(), 1);
/// ```
pub fn parse_document(content: &str) -> Result<Vec<CwlDocument>> {
    let value: YamlValue = serde_yaml::from_str(content)?;

    let documents: Vec<CwlDocument> = if let Some(graph) = value.get("$graph") {
        debug!("Parsing packed $graph document");
        serde_yaml::from_value(graph.clone())?
    } else {
        vec![serde_yaml::from_value(value)?]
    };

    let documents: Vec<CwlDocument> = documents.into_iter().map(desugar_document).collect();

    info!(
        "Parsed {} CWL document(s), {} input(s) in the first",
        documents.len(),
        documents.first().map_or(0, |d| d.inputs.len())
    );

    Ok(documents)
}

/// Expands type shorthands on every input parameter of a document.
fn desugar_document(mut doc: CwlDocument) -> CwlDocument {
    for param in &mut doc.inputs {
        if let Some(shape) = param.ty.take() {
            param.ty = Some(shape.desugar());
        }
    }
    doc
}

/// Selects the process to describe from a parsed document list.
///
/// A single document is the main process. In a packed document the main
/// process is the entry whose class is `Workflow`, or whose id fragment is
/// `main`; auxiliary tool definitions are skipped.
pub fn extract_main_tool(documents: &[CwlDocument]) -> Result<&CwlDocument> {
    match documents {
        [] => Err(CwlInputsError::Document(
            "The document contains no tool or workflow".to_string(),
        )),
        [single] => Ok(single),
        multiple => multiple
            .iter()
            .find(|doc| doc.class == ToolClass::Workflow || doc.id_fragment() == Some("main"))
            .ok_or_else(|| {
                CwlInputsError::Document(
                    "No main workflow found in the packed document".to_string(),
                )
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cwl::model::{ArraySchema, TypeShape};

    #[test]
    fn test_parse_plain_document() {
        let docs = parse_document(
            r#"
class: CommandLineTool
cwlVersion: v1.2
inputs:
  - id: message
    type: string
"#,
        )
        .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].class, ToolClass::CommandLineTool);
        assert_eq!(docs[0].inputs.len(), 1);
    }

    #[test]
    fn test_parse_json_document() {
        // YAML is a superset of JSON, so packed JSON documents work too.
        let docs = parse_document(r#"{"class": "ExpressionTool", "inputs": []}"#).unwrap();
        assert_eq!(docs[0].class, ToolClass::ExpressionTool);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        assert!(parse_document("this is not valid yaml: [[[").is_err());
    }

    #[test]
    fn test_parse_desugars_shorthands() {
        let docs = parse_document(
            r#"
class: CommandLineTool
inputs:
  name: string?
  reads: File[]
"#,
        )
        .unwrap();
        assert_eq!(
            docs[0].inputs[0].ty,
            Some(TypeShape::Union(vec![
                TypeShape::Name("null".to_string()),
                TypeShape::Name("string".to_string()),
            ]))
        );
        assert_eq!(
            docs[0].inputs[1].ty,
            Some(TypeShape::Array(ArraySchema::new(TypeShape::Name(
                "File".to_string()
            ))))
        );
    }

    #[test]
    fn test_parse_graph_document() {
        let docs = parse_document(
            r##"
cwlVersion: v1.2
$graph:
  - class: CommandLineTool
    id: "#sort"
    inputs: []
  - class: Workflow
    id: "#main"
    inputs:
      - id: input_file
        type: File
"##,
        )
        .unwrap();
        assert_eq!(docs.len(), 2);

        let main = extract_main_tool(&docs).unwrap();
        assert_eq!(main.class, ToolClass::Workflow);
        assert_eq!(main.inputs.len(), 1);
    }

    #[test]
    fn test_extract_main_tool_by_id_fragment() {
        let docs = parse_document(
            r##"
$graph:
  - class: CommandLineTool
    id: "#sort"
    inputs: []
  - class: CommandLineTool
    id: "file:///tmp/packed.cwl#main"
    inputs: []
"##,
        )
        .unwrap();
        let main = extract_main_tool(&docs).unwrap();
        assert_eq!(main.id_fragment(), Some("main"));
    }

    #[test]
    fn test_extract_main_tool_single() {
        let docs = parse_document("class: CommandLineTool\ninputs: []\n").unwrap();
        assert!(extract_main_tool(&docs).is_ok());
    }

    #[test]
    fn test_extract_main_tool_missing() {
        let docs = parse_document(
            r##"
$graph:
  - class: CommandLineTool
    id: "#sort"
  - class: CommandLineTool
    id: "#count"
"##,
        )
        .unwrap();
        let err = extract_main_tool(&docs).unwrap_err();
        assert!(matches!(err, CwlInputsError::Document(_)));
    }

    #[test]
    fn test_extract_main_tool_empty() {
        assert!(extract_main_tool(&[]).is_err());
    }
}
