//! CWL Document Module
//!
//! A thin, serde-based loader for the parts of a CWL v1.2 document this
//! crate needs: the document header and the declared input parameters.
//!
//! # Structure
//!
//! - [`model`]: Serde data structures (documents, parameters, type shapes)
//! - [`loader`]: Document parsing, `$graph` handling, main-tool selection

pub mod loader;
pub mod model;

pub use loader::{extract_main_tool, parse_document};
pub use model::{
    ArraySchema, CwlDocument, EnumSchema, InputParameter, RecordSchema, SecondaryFileSchema,
    ToolClass, TypeShape,
};
