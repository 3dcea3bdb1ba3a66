//! # tabula-filters
//!
//! Batch filters for the tabula library.
//!
//! This crate provides the dataset transforms and the batch lifecycle that
//! hosts them:
//!
//! - `ChainTransform`: Sequence windowing into a "predict the next step" dataset
//! - `CutoffTransform`: Threshold discretization of one numeric attribute
//! - `TransformPipeline`: Compose multiple transforms
//! - `BatchFilter`: Collect a batch, transform it, emit the results
//!
//! # Example
//!
//! ```rust
//! use tabula_core::prelude::*;
//! use tabula_filters::prelude::*;
//!
//! let schema = Schema::from_attributes(vec![Attribute::numeric("load")]).unwrap();
//! let records = [3.0, 14.0, 9.0, 21.0]
//!     .iter()
//!     .map(|&v| Record::from_numbers(&[v]))
//!     .collect();
//! let data: Dataset<f64> = Dataset::from_records(schema, records).unwrap();
//!
//! let bucket = CutoffTransform::new(CutoffConfig::from_cutoff_str("10,20").unwrap()).unwrap();
//! let bucketed = bucket.transform(&data).unwrap();
//!
//! let chain = ChainTransform::new(ChainConfig::new(2));
//! let windowed = chain.transform(&bucketed).unwrap();
//!
//! assert_eq!(windowed.schema().names(), vec!["load", "load_1", "load_future"]);
//! assert_eq!(windowed.len(), 2);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

mod batch;
mod chain;
mod cutoff;
mod intervals;
mod pipeline;

pub mod prelude;

pub use batch::{filter_dataset, BatchFilter};
pub use chain::{ChainConfig, ChainTransform};
pub use cutoff::{CutoffConfig, CutoffTransform};
pub use intervals::{parse_cutoffs, CutoffIntervals, CutoffParseError};
pub use pipeline::{ErasedTransform, TransformPipeline};
