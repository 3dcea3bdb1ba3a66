//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits from tabula-core.
//!
//! # Example
//!
//! ```rust
//! use tabula_core::prelude::*;
//!
//! let schema = Schema::from_attributes(vec![Attribute::numeric("x")]).unwrap();
//! let data: Dataset<f64> = Dataset::new(schema);
//! assert!(data.is_empty());
//! ```

// Core types
pub use crate::attribute::{Attribute, AttributeKind};
pub use crate::dataset::Dataset;
pub use crate::num::DataFloat;
pub use crate::record::{Record, Value};
pub use crate::schema::Schema;

// Error types
pub use crate::error::{
    ConfigError, ConfigResult, SchemaError, SchemaResult, TransformError, TransformResult,
};

// Traits
pub use crate::traits::{Transform, TransformConfig};
