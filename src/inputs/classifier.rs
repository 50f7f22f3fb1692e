//! Input Type Classifier
//!
//! Reduces CWL's recursive, union-capable type grammar to flat
//! [`InputField`] records. Each supported parameter yields exactly one
//! field; the first unsupported shape aborts the whole conversion.
//!
//! Supported shapes:
//! - a primitive tag (`boolean`, `int`, `string`, `File`, `stdin`,
//!   `Directory`, `Any`)
//! - a single-element union of a supported shape
//! - a nullable union (`["null", T]`), which clears the required flag
//! - an array schema whose items are a scalar tag
//!
//! Record schemas, enum schemas, and non-null unions are rejected, each
//! with its own error category.

use log::debug;

use crate::cwl::model::{ArraySchema, CwlDocument, InputParameter, TypeShape};
use crate::error::{CwlInputsError, Result};

use super::builder::{clean_val, primitive_field, template_field};
use super::field::{InputField, SecondaryFile};

/// The scalar tags an array schema's `items` may carry. `stdin` is a
/// process-level shorthand and never valid as an element type.
const ARRAY_ITEM_TYPES: [&str; 6] = ["boolean", "int", "string", "File", "Directory", "Any"];

/// Converts every declared input of a tool or workflow, in declaration
/// order. Fails on the first unsupported parameter; no partial output.
pub fn input_fields(tool: &CwlDocument) -> Result<Vec<InputField>> {
    debug!("Classifying {} input parameter(s)", tool.inputs.len());
    tool.inputs.iter().map(classify).collect()
}

/// Classifies a single input parameter into a normalized field.
pub fn classify(param: &InputParameter) -> Result<InputField> {
    let field = match &param.ty {
        Some(shape) => classify_shape(param, shape)?,
        None => return Err(CwlInputsError::UnsupportedFormat),
    };
    Ok(expand_secondary_files(field, param))
}

fn classify_shape(param: &InputParameter, shape: &TypeShape) -> Result<InputField> {
    match shape {
        TypeShape::Name(name) => primitive_field(param, name),
        TypeShape::Union(members) => classify_union(param, members),
        TypeShape::Array(schema) => array_field(param, schema),
        TypeShape::Enum(_) => Err(CwlInputsError::UnsupportedEnum),
        TypeShape::Record(_) => Err(CwlInputsError::UnsupportedRecord),
    }
}

fn classify_union(param: &InputParameter, members: &[TypeShape]) -> Result<InputField> {
    match members {
        // Degenerate single-member union: classify the member directly.
        [TypeShape::Name(name)] => primitive_field(param, name),
        [TypeShape::Array(schema)] => array_field(param, schema),
        [_] => Err(CwlInputsError::UnsupportedFormat),

        // Nullable union: classify the non-null member, then clear the
        // required flag.
        [a, b] if a.is_null() || b.is_null() => {
            let inner = if a.is_null() { b } else { a };
            let field = classify_shape(param, inner)?;
            Ok(InputField {
                required: false,
                ..field
            })
        }

        // Any other union is unsupported.
        _ => Err(CwlInputsError::UnsupportedUnion),
    }
}

/// Array schemas flatten to their element tag plus the array flag. The
/// schema's own label/doc fill in when the parameter declares none.
fn array_field(param: &InputParameter, schema: &ArraySchema) -> Result<InputField> {
    let items = match schema.items.as_ref() {
        TypeShape::Name(name) if ARRAY_ITEM_TYPES.contains(&name.as_str()) => name,
        TypeShape::Record(_) => return Err(CwlInputsError::UnsupportedRecordInArray),
        _ => return Err(CwlInputsError::UnsupportedFormat),
    };

    let base = template_field(param, items);
    Ok(InputField {
        array: true,
        label: base.label.or_else(|| schema.label.as_deref().map(clean_val)),
        doc: base.doc.or_else(|| schema.doc.as_deref().map(clean_val)),
        ..base
    })
}

/// Expands declared secondary files onto `File`-typed fields: a trailing
/// `?` on a pattern strips and forces the entry optional, an unset
/// required flag defaults to true. Declaration order is preserved.
fn expand_secondary_files(field: InputField, param: &InputParameter) -> InputField {
    if field.ty.as_deref() != Some("File") {
        return field;
    }
    let declared = match param.secondary_files.as_ref() {
        Some(declared) if !declared.is_empty() => declared,
        _ => return field,
    };

    let expanded = declared
        .iter()
        .map(|schema| {
            if schema.pattern.ends_with('?') {
                SecondaryFile {
                    pattern: schema.pattern.trim_end_matches('?').to_string(),
                    required: false,
                }
            } else {
                SecondaryFile {
                    pattern: schema.pattern.clone(),
                    required: schema.required.unwrap_or(true),
                }
            }
        })
        .collect();

    InputField {
        secondary_files: Some(expanded),
        ..field
    }
}
