//! Error types for CWL input extraction.
//!
//! Unsupported type shapes each get their own variant so that callers (for
//! example bulk conformance scanners) can branch on the rejection category
//! without string matching.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CwlInputsError {
    /// A union type with two or more non-null members.
    #[error("The union type is not supported")]
    UnsupportedUnion,

    /// An enum schema.
    #[error("The enum type is not supported")]
    UnsupportedEnum,

    /// A record schema declared directly on a parameter.
    #[error("The record type is not supported")]
    UnsupportedRecord,

    /// A record schema used as the items of an array schema.
    #[error("The record type inside an array type is not supported")]
    UnsupportedRecordInArray,

    /// Any other type shape this parser does not understand.
    #[error("The type field contains an unsupported format")]
    UnsupportedFormat,

    /// Structural problems in the document itself (no runnable tool, etc.).
    #[error("Document error: {0}")]
    Document(String),

    /// A remote document could not be downloaded.
    #[error("Failed to download file: {0}")]
    Download(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl CwlInputsError {
    /// True for the rejection variants raised when a parameter's type shape
    /// falls outside the supported subset.
    pub fn is_unsupported(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedUnion
                | Self::UnsupportedEnum
                | Self::UnsupportedRecord
                | Self::UnsupportedRecordInArray
                | Self::UnsupportedFormat
        )
    }
}

pub type Result<T> = std::result::Result<T, CwlInputsError>;
