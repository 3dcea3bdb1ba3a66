//! Transform Pipeline.
//!
//! Composes multiple transforms into a single pipeline.

use tabula_core::{
    dataset::Dataset,
    error::{TransformError, TransformResult},
    num::DataFloat,
    schema::Schema,
    traits::Transform,
};

/// Type-erased transform trait for use in pipelines.
///
/// This trait allows storing transforms with different Config types
/// in the same collection by erasing the Config associated type.
pub trait ErasedTransform<T: DataFloat>: Send + Sync {
    /// Derive the output schema for a given input schema.
    fn output_schema(&self, input: &Schema) -> TransformResult<Schema>;

    /// Apply the transformation to input data.
    fn transform(&self, data: &Dataset<T>) -> TransformResult<Dataset<T>>;
}

/// Blanket implementation of ErasedTransform for any Transform.
impl<T: DataFloat, Tr: Transform<T>> ErasedTransform<T> for Tr {
    fn output_schema(&self, input: &Schema) -> TransformResult<Schema> {
        Transform::output_schema(self, input)
    }

    fn transform(&self, data: &Dataset<T>) -> TransformResult<Dataset<T>> {
        Transform::transform(self, data)
    }
}

/// Transform Pipeline.
///
/// Chains multiple transforms together; each one sees the output of the
/// previous one. An empty pipeline returns its input unchanged.
///
/// # Example
///
/// ```ignore
/// let pipeline = TransformPipeline::new()
///     .add_named("discretize", cutoff_transform)
///     .add_named("window", chain_transform);
///
/// let transformed = pipeline.transform(&data)?;
/// ```
pub struct TransformPipeline<T: DataFloat> {
    transforms: Vec<Box<dyn ErasedTransform<T>>>,
    names: Vec<String>,
}

impl<T: DataFloat> core::fmt::Debug for TransformPipeline<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TransformPipeline")
            .field("num_transforms", &self.transforms.len())
            .field("names", &self.names)
            .finish()
    }
}

impl<T: DataFloat> Default for TransformPipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DataFloat> TransformPipeline<T> {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            transforms: Vec::new(),
            names: Vec::new(),
        }
    }

    /// Add a transform to the pipeline.
    ///
    /// Accepts any type that implements `Transform<T>`.
    pub fn add<Tr>(self, transform: Tr) -> Self
    where
        Tr: Transform<T> + 'static,
    {
        let name = format!("transform_{}", self.transforms.len());
        self.add_named(name, transform)
    }

    /// Add a transform with a custom name.
    pub fn add_named<Tr>(mut self, name: impl Into<String>, transform: Tr) -> Self
    where
        Tr: Transform<T> + 'static,
    {
        self.names.push(name.into());
        self.transforms.push(Box::new(transform));
        self
    }

    /// Get the number of transforms in the pipeline.
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Check if the pipeline is empty.
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Get transform names.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Transform data through all transforms.
    ///
    /// # Errors
    ///
    /// Returns the first failure, wrapped with the name of the failing step.
    pub fn transform(&self, data: &Dataset<T>) -> TransformResult<Dataset<T>> {
        let mut current = data.clone();

        for (name, transform) in self.names.iter().zip(&self.transforms) {
            current = transform
                .transform(&current)
                .map_err(|err| Self::step_error(name, &err))?;
        }

        Ok(current)
    }

    /// Get the output schema after all transforms.
    ///
    /// # Errors
    ///
    /// Returns the first failure, wrapped with the name of the failing step.
    pub fn output_schema(&self, input: &Schema) -> TransformResult<Schema> {
        let mut schema = input.clone();

        for (name, transform) in self.names.iter().zip(&self.transforms) {
            schema = transform
                .output_schema(&schema)
                .map_err(|err| Self::step_error(name, &err))?;
        }

        Ok(schema)
    }

    fn step_error(name: &str, err: &TransformError) -> TransformError {
        match err {
            // precondition failures are not specific to a step
            TransformError::NoInputFormat => TransformError::NoInputFormat,
            other => TransformError::PipelineError(format!("step '{name}' failed: {other}")),
        }
    }
}

impl<T: DataFloat> Transform<T> for TransformPipeline<T> {
    type Config = ();

    fn configure(&mut self, _config: Self::Config) -> tabula_core::ConfigResult<()> {
        Ok(())
    }

    fn config(&self) -> &Self::Config {
        &()
    }

    fn output_schema(&self, input: &Schema) -> TransformResult<Schema> {
        TransformPipeline::output_schema(self, input)
    }

    fn transform(&self, data: &Dataset<T>) -> TransformResult<Dataset<T>> {
        TransformPipeline::transform(self, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{ChainConfig, ChainTransform};
    use crate::cutoff::{CutoffConfig, CutoffTransform};
    use tabula_core::{Attribute, Record};

    fn create_test_dataset() -> Dataset<f64> {
        let schema = Schema::from_attributes(vec![Attribute::numeric("level")]).unwrap();
        let records = [1.0, 12.0, 7.0, 25.0]
            .iter()
            .map(|&v| Record::from_numbers(&[v]))
            .collect();
        Dataset::from_records(schema, records).unwrap()
    }

    #[test]
    fn test_pipeline_default() {
        let pipeline = TransformPipeline::<f64>::new();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.len(), 0);
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let data = create_test_dataset();
        let pipeline = TransformPipeline::<f64>::new();
        assert_eq!(pipeline.transform(&data).unwrap(), data);
        assert_eq!(pipeline.output_schema(data.schema()).unwrap(), *data.schema());
    }

    #[test]
    fn test_discretize_then_window() {
        let cutoff =
            CutoffTransform::<f64>::new(CutoffConfig::new(vec![10.0, 20.0])).unwrap();
        let pipeline = TransformPipeline::new()
            .add_named("discretize", cutoff)
            .add(ChainTransform::<f64>::new(ChainConfig::new(2)));

        assert_eq!(pipeline.names(), &["discretize", "transform_1"]);

        let data = create_test_dataset();
        let schema = pipeline.output_schema(data.schema()).unwrap();
        assert_eq!(schema.names(), vec!["level", "level_1", "level_future"]);

        let result = pipeline.transform(&data).unwrap();
        assert_eq!(*result.schema(), schema);
        assert_eq!(result.len(), 2);
        // 12 -> [10, 20), history 1 -> (-Inf, 10), future 7 -> (-Inf, 10)
        assert_eq!(
            result.records()[0].values(),
            &[
                tabula_core::Value::Category(1),
                tabula_core::Value::Category(0),
                tabula_core::Value::Category(0),
            ]
        );
    }

    #[test]
    fn test_step_failure_names_step() {
        let cutoff = CutoffTransform::<f64>::new(CutoffConfig::default().with_attribute_index(3))
            .unwrap();
        let pipeline = TransformPipeline::new().add_named("bucket", cutoff);

        match pipeline.transform(&create_test_dataset()) {
            Err(TransformError::PipelineError(message)) => {
                assert!(message.contains("bucket"), "{message}");
            }
            other => panic!("expected pipeline error, got {other:?}"),
        }
    }
}
