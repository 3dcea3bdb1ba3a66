//! # tabula-core
//!
//! Core types and traits for the tabula batch filter library.
//!
//! This crate provides the foundational abstractions used throughout the library:
//!
//! - [`DataFloat`] - Trait for numeric value types (f32/f64)
//! - [`Attribute`] and [`AttributeKind`] - Named numeric or nominal columns
//! - [`Schema`] - Ordered attribute list with a class designation
//! - [`Record`] and [`Value`] - Rows of numeric, categorical or missing values
//! - [`Dataset`] - Records bound to a schema, with co-mutation primitives
//! - [`Transform`] - Batch transformation trait
//!
//! ## Feature Flags
//!
//! - `serde` - Enable serialization/deserialization support
//!
//! ## Example
//!
//! ```rust
//! use tabula_core::prelude::*;
//!
//! let schema = Schema::from_attributes(vec![
//!     Attribute::numeric("temperature"),
//!     Attribute::nominal("play", ["yes", "no"]),
//! ])
//! .unwrap();
//!
//! let mut data: Dataset<f64> = Dataset::new(schema);
//! data.push(Record::from_vec(vec![Value::Number(21.5), Value::Category(0)])).unwrap();
//! data.insert_attribute(Attribute::numeric("humidity"), 1).unwrap();
//!
//! assert_eq!(data.schema().names(), vec!["temperature", "humidity", "play"]);
//! assert!(data.value(0, 1).unwrap().is_missing());
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod attribute;
pub mod dataset;
pub mod error;
pub mod num;
pub mod prelude;
pub mod record;
pub mod schema;
pub mod traits;

// Re-export core types at crate root
pub use attribute::{Attribute, AttributeKind};
pub use dataset::Dataset;
pub use error::{
    ConfigError, ConfigResult, SchemaError, SchemaResult, TransformError, TransformResult,
};
pub use num::DataFloat;
pub use record::{Record, Value};
pub use schema::Schema;
pub use traits::{Transform, TransformConfig};
