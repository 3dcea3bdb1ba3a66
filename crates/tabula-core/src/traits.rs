//! Core trait definitions for dataset transforms.
//!
//! This module defines the contract every transform implements: configure once,
//! then turn a fully buffered [`Dataset`] into a new one.

use core::fmt::Debug;

use crate::dataset::Dataset;
use crate::error::{ConfigResult, TransformResult};
use crate::num::{DataFloat, MaybeSerde};
use crate::schema::Schema;

/// Configuration trait bounds for transform configurations.
pub trait TransformConfig: Clone + Default + Debug + MaybeSerde + Send + Sync {}

impl<T> TransformConfig for T where T: Clone + Default + Debug + MaybeSerde + Send + Sync {}

/// Core trait for batch dataset transformations.
///
/// A transform is configured with a parameter struct and then applied to a
/// complete batch. Implementations must not mutate their input: the output
/// schema is derived first and the output records are materialized from the
/// input by index mapping, so a failed call leaves nothing half-applied.
///
/// # Example
///
/// ```rust,ignore
/// use tabula_core::Transform;
///
/// let mut chain = ChainTransform::<f64>::new(ChainConfig::new(2));
/// chain.configure(ChainConfig::new(3))?;
///
/// let windowed = chain.transform(&data)?;
/// assert_eq!(windowed.len(), data.len().saturating_sub(3));
/// ```
pub trait Transform<T: DataFloat>: Send + Sync {
    /// Configuration parameters.
    type Config: TransformConfig;

    /// Replace the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are unusable. The previous
    /// configuration stays in effect in that case.
    fn configure(&mut self, config: Self::Config) -> ConfigResult<()>;

    /// Get a reference to the current configuration.
    fn config(&self) -> &Self::Config;

    /// Derive the output schema for a given input schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not apply to `input`.
    fn output_schema(&self, input: &Schema) -> TransformResult<Schema>;

    /// Apply the transformation to a fully buffered dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not apply to the dataset's
    /// schema.
    fn transform(&self, data: &Dataset<T>) -> TransformResult<Dataset<T>>;
}
