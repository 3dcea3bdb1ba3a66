//! Prelude for tabula-filters.
//!
//! This module re-exports all commonly used types and traits.

pub use crate::batch::{filter_dataset, BatchFilter};
pub use crate::chain::{ChainConfig, ChainTransform};
pub use crate::cutoff::{CutoffConfig, CutoffTransform};
pub use crate::intervals::{parse_cutoffs, CutoffIntervals, CutoffParseError};
pub use crate::pipeline::TransformPipeline;

// Re-export core Transform trait
pub use tabula_core::traits::Transform;
