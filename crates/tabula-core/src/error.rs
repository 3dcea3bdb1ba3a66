//! Error types for schema mutation, configuration and transforms.
//!
//! This module provides structured error types for every fallible operation in
//! the workspace, with error chaining support via `thiserror`.

use thiserror::Error;

/// Result type alias for schema and dataset operations that may fail.
pub type SchemaResult<T> = core::result::Result<T, SchemaError>;

/// Result type alias for transform configuration.
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for transform operations that may fail.
pub type TransformResult<T> = core::result::Result<T, TransformError>;

/// Errors raised by schema and dataset mutation primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// An attribute position beyond the end of the schema.
    #[error("Attribute index {index} out of range for schema with {len} attributes")]
    IndexOutOfRange {
        /// Offending position.
        index: usize,
        /// Number of attributes in the schema.
        len: usize,
    },

    /// An attribute with the same name is already present.
    #[error("Attribute name '{0}' already in use")]
    DuplicateAttribute(String),

    /// Deleting the class attribute without re-pointing the class first.
    #[error("Cannot delete attribute {0}: it is the class attribute")]
    ClassAttributeDeleted(usize),

    /// A record whose width does not match the schema.
    #[error("Record width mismatch: expected {expected} values, got {actual}")]
    WidthMismatch {
        /// Number of attributes in the schema.
        expected: usize,
        /// Number of values in the record.
        actual: usize,
    },

    /// A value that does not agree with the kind of its attribute.
    #[error("Value at attribute {index} ('{name}') does not match its kind: {reason}")]
    KindMismatch {
        /// Attribute position.
        index: usize,
        /// Attribute name.
        name: String,
        /// What was wrong with the value.
        reason: &'static str,
    },
}

/// Errors raised when a transform is configured with unusable parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Attribute indices are 1-based, so 0 never names an attribute.
    #[error("Invalid attribute index {0}: indices start at 1")]
    InvalidAttributeIndex(usize),

    /// Every cutoff token was malformed, or the list was empty.
    #[error("No valid cutoff values configured")]
    NoCutoffs,

    /// A cutoff that is NaN or infinite.
    #[error("Cutoff value {0} is not finite")]
    NonFiniteCutoff(f64),

    /// Cutoffs must be sorted ascending without repeats.
    #[error("Cutoff values must be strictly ascending: {previous} is followed by {next}")]
    UnsortedCutoffs {
        /// The earlier cutoff.
        previous: f64,
        /// The cutoff that breaks the ordering.
        next: f64,
    },

    /// Two cutoffs that print the same at label precision, so their
    /// interval labels would collide.
    #[error("Cutoff values {previous} and {next} are indistinguishable at 4 decimal places")]
    IndistinctCutoffs {
        /// The earlier cutoff.
        previous: f64,
        /// The later cutoff.
        next: f64,
    },
}

/// Errors that can occur during data transformation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// Records were supplied or a batch finished before the schema was known.
    #[error("No input instance format defined")]
    NoInputFormat,

    /// The transform needs a class attribute but the schema has no attributes.
    #[error("Schema has no attributes to use as the class")]
    NoClassAttribute,

    /// Configured attribute index does not exist in the input schema.
    #[error("Attribute index {index} out of range: schema has {len} attributes")]
    AttributeIndexOutOfRange {
        /// Configured 0-based index.
        index: usize,
        /// Number of attributes in the schema.
        len: usize,
    },

    /// The target attribute is not numeric.
    #[error("Attribute '{0}' is not numeric")]
    NotNumeric(String),

    /// A schema or dataset primitive failed.
    #[error("Schema mutation failed")]
    Schema(#[from] SchemaError),

    /// The transform configuration is invalid.
    #[error("Invalid configuration")]
    Config(#[from] ConfigError),

    /// Pipeline configuration error.
    #[error("Pipeline error: {0}")]
    PipelineError(String),
}
