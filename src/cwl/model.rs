//! CWL Document Object Model
//!
//! Serde data structures for the subset of the CWL v1.2 object model this
//! crate consumes: the document header and its declared input parameters.
//! Everything else in a document (steps, outputs, requirements, hints) is
//! ignored at deserialization time.
//!
//! CWL allows several "one or many" shorthands in source documents:
//!
//! ```yaml
//! inputs:
//!   reads:
//!     type: File
//!     doc:
//!       - first doc line
//!       - second doc line
//!     secondaryFiles: .bai
//! ```
//!
//! is equivalent to the fully expanded list form. The deserializers below
//! accept both spellings so the classifier only ever sees one shape.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_yaml::Value as YamlValue;

/// The runnable document classes this parser recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ToolClass {
    Workflow,
    CommandLineTool,
    ExpressionTool,
}

/// One CWL document: a workflow or a tool with its declared inputs.
#[derive(Debug, Clone, Deserialize)]
pub struct CwlDocument {
    pub class: ToolClass,

    #[serde(rename = "cwlVersion", default)]
    pub cwl_version: Option<String>,

    /// URI-like identifier; the fragment after `#` is the short name.
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "string_or_seq")]
    pub doc: Option<String>,

    /// Declared input parameters, in declaration order.
    #[serde(default, deserialize_with = "params_map_or_seq")]
    pub inputs: Vec<InputParameter>,
}

impl CwlDocument {
    /// The fragment after the last `#` of the document id, if any.
    pub fn id_fragment(&self) -> Option<&str> {
        self.id.as_deref().and_then(|id| id.rsplit('#').next())
    }
}

/// One declared input slot of a tool or workflow.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InputParameter {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "string_or_seq")]
    pub doc: Option<String>,

    #[serde(rename = "type", default)]
    pub ty: Option<TypeShape>,

    /// Default value, kept verbatim; file defaults use the
    /// `{class: File, location|path: ...}` descriptor convention.
    #[serde(default)]
    pub default: Option<serde_json::Value>,

    #[serde(
        rename = "secondaryFiles",
        default,
        deserialize_with = "secondary_one_or_many"
    )]
    pub secondary_files: Option<Vec<SecondaryFileSchema>>,
}

/// The recursive type grammar of a parameter's `type` attribute.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TypeShape {
    /// A bare type name: `string`, `File`, `null`, ...
    Name(String),
    /// A union written as a YAML sequence of shapes.
    Union(Vec<TypeShape>),
    /// An array schema: `{type: array, items: ...}`.
    Array(ArraySchema),
    /// An enum schema: `{type: enum, symbols: [...]}`.
    Enum(EnumSchema),
    /// A record schema: `{type: record, fields: ...}`.
    Record(RecordSchema),
}

impl TypeShape {
    /// True for the literal `null` member of a union.
    pub fn is_null(&self) -> bool {
        matches!(self, TypeShape::Name(name) if name == "null")
    }

    /// Expands the `T?` and `T[]` type shorthands into their canonical
    /// union/array forms, recursively. `T[]?` expands to `["null", T[]]`.
    pub fn desugar(self) -> TypeShape {
        match self {
            TypeShape::Name(name) => {
                if let Some(inner) = name.strip_suffix('?') {
                    if !inner.is_empty() && inner != "null" {
                        return TypeShape::Union(vec![
                            TypeShape::Name("null".to_string()),
                            TypeShape::Name(inner.to_string()).desugar(),
                        ]);
                    }
                }
                if let Some(inner) = name.strip_suffix("[]") {
                    if !inner.is_empty() {
                        return TypeShape::Array(ArraySchema::new(
                            TypeShape::Name(inner.to_string()).desugar(),
                        ));
                    }
                }
                TypeShape::Name(name)
            }
            TypeShape::Union(members) => {
                TypeShape::Union(members.into_iter().map(TypeShape::desugar).collect())
            }
            TypeShape::Array(schema) => {
                let ArraySchema {
                    tag,
                    items,
                    label,
                    doc,
                } = schema;
                TypeShape::Array(ArraySchema {
                    tag,
                    items: Box::new((*items).desugar()),
                    label,
                    doc,
                })
            }
            other => other,
        }
    }
}

/// An `{type: array}` schema. Arrays may carry their own label/doc,
/// independent of the parameter that uses them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ArraySchema {
    #[serde(rename = "type")]
    tag: ArrayTag,

    pub items: Box<TypeShape>,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "string_or_seq")]
    pub doc: Option<String>,
}

impl ArraySchema {
    pub fn new(items: TypeShape) -> Self {
        Self {
            tag: ArrayTag::Array,
            items: Box::new(items),
            label: None,
            doc: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
enum ArrayTag {
    #[serde(rename = "array")]
    Array,
}

/// An `{type: enum}` schema. Recognized so it can be rejected with its own
/// category; the symbols themselves are never interpreted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EnumSchema {
    #[serde(rename = "type")]
    tag: EnumTag,

    #[serde(default)]
    pub symbols: Vec<String>,
}

impl EnumSchema {
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            tag: EnumTag::Enum,
            symbols,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
enum EnumTag {
    #[serde(rename = "enum")]
    Enum,
}

/// A `{type: record}` schema. Recognized so it can be rejected with its own
/// category; the field list is carried opaquely.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecordSchema {
    #[serde(rename = "type")]
    tag: RecordTag,

    #[serde(default)]
    pub fields: Option<serde_json::Value>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self {
            tag: RecordTag::Record,
            fields: None,
        }
    }
}

impl Default for RecordSchema {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
enum RecordTag {
    #[serde(rename = "record")]
    Record,
}

/// One declared secondary file: a glob-like pattern plus an optional
/// required flag. Written in CWL as a bare pattern string or a mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct SecondaryFileSchema {
    pub pattern: String,
    pub required: Option<bool>,
}

impl<'de> Deserialize<'de> for SecondaryFileSchema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let val = YamlValue::deserialize(deserializer)?;
        match val {
            YamlValue::String(pattern) => Ok(Self {
                pattern,
                required: None,
            }),
            YamlValue::Mapping(_) => {
                let pattern = val
                    .get("pattern")
                    .and_then(YamlValue::as_str)
                    .ok_or_else(|| de::Error::custom("secondaryFiles entry has no pattern"))?
                    .to_string();
                let required = match val.get("required") {
                    None => None,
                    Some(YamlValue::Null) => None,
                    Some(YamlValue::Bool(b)) => Some(*b),
                    Some(_) => {
                        return Err(de::Error::custom(
                            "secondaryFiles required must be a boolean",
                        ))
                    }
                };
                Ok(Self { pattern, required })
            }
            _ => Err(de::Error::custom(
                "Expected string or mapping for secondaryFiles entry",
            )),
        }
    }
}

/// Deserializes either a single string or a sequence of strings, joining
/// the sequence form with newlines (CWL allows both for `doc`).
fn string_or_seq<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let val = YamlValue::deserialize(deserializer)?;
    match val {
        YamlValue::Null => Ok(None),
        YamlValue::String(s) => Ok(Some(s)),
        YamlValue::Sequence(parts) => {
            let lines = parts
                .into_iter()
                .map(|v| match v {
                    YamlValue::String(s) => Ok(s),
                    _ => Err(de::Error::custom("Expected string in doc list")),
                })
                .collect::<Result<Vec<String>, D::Error>>()?;
            Ok(Some(lines.join("\n")))
        }
        _ => Err(de::Error::custom("Expected string or list of strings")),
    }
}

/// Deserializes one secondaryFiles entry or a sequence of them.
fn secondary_one_or_many<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<SecondaryFileSchema>>, D::Error>
where
    D: Deserializer<'de>,
{
    let val = YamlValue::deserialize(deserializer)?;
    match val {
        YamlValue::Null => Ok(None),
        YamlValue::Sequence(entries) => entries
            .into_iter()
            .map(|v| serde_yaml::from_value(v).map_err(de::Error::custom))
            .collect::<Result<Vec<SecondaryFileSchema>, D::Error>>()
            .map(Some),
        other => serde_yaml::from_value(other)
            .map(|schema| Some(vec![schema]))
            .map_err(de::Error::custom),
    }
}

/// True for a mapping whose `type` key marks it as a type schema rather
/// than a parameter object.
fn is_inline_schema(v: &YamlValue) -> bool {
    matches!(
        v.get("type").and_then(YamlValue::as_str),
        Some("array") | Some("enum") | Some("record")
    )
}

/// Deserializes the `inputs` section in either of its two CWL spellings:
/// a sequence of parameter objects, or a mapping of id to parameter (where
/// the value may be a bare type shorthand). Mapping order is preserved.
fn params_map_or_seq<'de, D>(deserializer: D) -> Result<Vec<InputParameter>, D::Error>
where
    D: Deserializer<'de>,
{
    let val = YamlValue::deserialize(deserializer)?;
    match val {
        YamlValue::Null => Ok(Vec::new()),
        YamlValue::Sequence(entries) => entries
            .into_iter()
            .map(|v| serde_yaml::from_value(v).map_err(de::Error::custom))
            .collect(),
        YamlValue::Mapping(map) => map
            .into_iter()
            .map(|(key, v)| {
                let id = match key {
                    YamlValue::String(id) => id,
                    _ => return Err(de::Error::custom("Input parameter id must be a string")),
                };
                let mut param: InputParameter = match v {
                    YamlValue::String(name) => InputParameter {
                        ty: Some(TypeShape::Name(name)),
                        ..Default::default()
                    },
                    // A sequence, or a mapping that is itself a schema
                    // (`array`/`enum`/`record` are never parameter type
                    // names), is the type rather than a parameter object.
                    v @ YamlValue::Sequence(_) => InputParameter {
                        ty: Some(serde_yaml::from_value(v).map_err(de::Error::custom)?),
                        ..Default::default()
                    },
                    v @ YamlValue::Mapping(_) if is_inline_schema(&v) => InputParameter {
                        ty: Some(serde_yaml::from_value(v).map_err(de::Error::custom)?),
                        ..Default::default()
                    },
                    v @ YamlValue::Mapping(_) => {
                        serde_yaml::from_value(v).map_err(de::Error::custom)?
                    }
                    _ => {
                        return Err(de::Error::custom(
                            "Expected type name or mapping for input parameter",
                        ))
                    }
                };
                if param.id.is_none() {
                    param.id = Some(id);
                }
                Ok(param)
            })
            .collect(),
        _ => Err(de::Error::custom(
            "Expected list or mapping of input parameters",
        )),
    }
}
