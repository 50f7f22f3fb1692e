//! Input Field Extraction Module
//!
//! The core of the crate: turns a parsed CWL document's input parameters
//! into flat, normalized field records ready for JSON serialization.
//!
//! # Structure
//!
//! - [`field`]: Output data structures ([`InputField`], [`SecondaryFile`])
//! - [`builder`]: Primitive field builders and value cleaning
//! - [`classifier`]: Type-shape classification and conversion

pub mod builder;
pub mod classifier;
pub mod field;

pub use classifier::{classify, input_fields};
pub use field::{InputField, SecondaryFile};
