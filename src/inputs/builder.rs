//! Primitive Field Builders
//!
//! Builds a normalized [`InputField`] from a parameter already known to
//! carry a primitive type tag. All derived values (cleaned strings, short
//! id, narrowed default) are computed first and the field is constructed
//! once; builders never mutate their input parameter.

use serde_json::Value;

use crate::cwl::model::InputParameter;
use crate::error::{CwlInputsError, Result};

use super::field::InputField;

/// The primitive tags a scalar parameter may carry.
pub const PRIMITIVE_TYPES: [&str; 7] =
    ["boolean", "int", "string", "File", "stdin", "Directory", "Any"];

/// Collapses embedded newlines to spaces and trims surrounding whitespace.
pub(crate) fn clean_val(val: &str) -> String {
    val.replace('\n', " ").trim().to_string()
}

/// The fragment after the last `#`, or the whole id when there is none.
fn short_id(id: &str) -> &str {
    id.rsplit('#').next().unwrap_or(id)
}

/// Builds a field for any primitive tag, dispatching to the `File` and
/// `stdin` builders where extra normalization applies.
pub(crate) fn primitive_field(param: &InputParameter, name: &str) -> Result<InputField> {
    match name {
        "boolean" | "int" | "string" | "Directory" | "Any" => Ok(template_field(param, name)),
        "File" => Ok(file_field(param, "File")),
        "stdin" => Ok(stdin_field(param)),
        _ => Err(CwlInputsError::UnsupportedFormat),
    }
}

/// The shared template: copies the default, cleans doc/label, shortens the
/// id, and records the type tag verbatim.
pub(crate) fn template_field(param: &InputParameter, type_tag: &str) -> InputField {
    InputField {
        default: param.default.clone(),
        doc: param.doc.as_deref().map(clean_val),
        id: param
            .id
            .as_deref()
            .map(|id| short_id(&clean_val(id)).to_string()),
        label: param.label.as_deref().map(clean_val),
        ty: Some(type_tag.to_string()),
        array: false,
        required: true,
        secondary_files: None,
    }
}

/// `File` fields narrow a `{class: File, location|path: ...}` default
/// descriptor down to its location, preferring `location` over `path`
/// (CWL treats `path` as a local-filesystem fallback for `location`).
fn file_field(param: &InputParameter, type_tag: &str) -> InputField {
    let default = match &param.default {
        Some(Value::Object(map)) if !map.is_empty() => {
            if let Some(location) = map.get("location") {
                Some(location.clone())
            } else if let Some(path) = map.get("path") {
                Some(path.clone())
            } else {
                param.default.clone()
            }
        }
        other => other.clone(),
    };

    InputField {
        default,
        ..template_field(param, type_tag)
    }
}

/// `stdin` is CWL shorthand for a File bound to standard input; the
/// published type tag is always `File`.
fn stdin_field(param: &InputParameter) -> InputField {
    InputField {
        ty: Some("File".to_string()),
        ..file_field(param, "stdin")
    }
}
