//! Batch lifecycle driver.
//!
//! Hosts a [`Transform`] behind the "collect everything, then emit everything"
//! contract: records are buffered with [`BatchFilter::input`], the transform
//! runs once in [`BatchFilter::batch_finished`], and the results are drained
//! one at a time with [`BatchFilter::output`].

use std::collections::VecDeque;

use log::debug;

use tabula_core::{
    dataset::Dataset,
    error::{TransformError, TransformResult},
    num::DataFloat,
    record::Record,
    schema::Schema,
    traits::Transform,
};

/// Buffers one batch of records and runs a transform over it.
///
/// # Example
///
/// ```rust
/// use tabula_core::prelude::*;
/// use tabula_filters::prelude::*;
///
/// let schema = Schema::from_attributes(vec![Attribute::numeric("y")]).unwrap();
/// let mut filter = BatchFilter::new(ChainTransform::<f64>::new(ChainConfig::new(1)));
/// filter.set_input_format(schema);
///
/// for y in [1.0, 2.0, 3.0] {
///     filter.input(Record::from_numbers(&[y])).unwrap();
/// }
/// assert!(filter.batch_finished().unwrap());
/// assert_eq!(filter.num_pending_output(), 2);
/// assert_eq!(filter.output_format().unwrap().names(), vec!["y", "y_future"]);
/// ```
#[derive(Debug)]
pub struct BatchFilter<T: DataFloat, Tr: Transform<T>> {
    transform: Tr,
    buffer: Option<Dataset<T>>,
    output_format: Option<Schema>,
    queue: VecDeque<Record<T>>,
    new_batch: bool,
}

impl<T: DataFloat, Tr: Transform<T>> BatchFilter<T, Tr> {
    /// Wrap a configured transform. No input format is set yet.
    pub fn new(transform: Tr) -> Self {
        Self {
            transform,
            buffer: None,
            output_format: None,
            queue: VecDeque::new(),
            new_batch: true,
        }
    }

    /// The wrapped transform.
    pub fn transform(&self) -> &Tr {
        &self.transform
    }

    /// The wrapped transform, for reconfiguration between batches.
    pub fn transform_mut(&mut self) -> &mut Tr {
        &mut self.transform
    }

    /// Establish the input schema. Discards any buffered or pending records.
    pub fn set_input_format(&mut self, schema: Schema) {
        self.buffer = Some(Dataset::new(schema));
        self.output_format = None;
        self.queue.clear();
        self.new_batch = true;
    }

    /// The input schema, once set.
    pub fn input_format(&self) -> Option<&Schema> {
        self.buffer.as_ref().map(Dataset::schema)
    }

    /// The schema of emitted records, available after a finished batch.
    pub fn output_format(&self) -> Option<&Schema> {
        self.output_format.as_ref()
    }

    /// Buffer a record. Nothing is emitted until the batch is finished.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NoInputFormat`] before an input format is set,
    /// or a schema error if the record does not fit the input schema.
    pub fn input(&mut self, record: Record<T>) -> TransformResult<()> {
        let buffer = self.buffer.as_mut().ok_or(TransformError::NoInputFormat)?;
        if self.new_batch {
            self.queue.clear();
            self.new_batch = false;
        }
        buffer.push(record)?;
        Ok(())
    }

    /// Run the transform over the buffered batch and queue its output.
    ///
    /// Returns whether any output is pending. The input buffer is emptied so
    /// the next batch starts fresh; on failure it is left as it was and
    /// nothing is queued.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::NoInputFormat`] before an input format is set,
    /// or whatever the transform reports.
    pub fn batch_finished(&mut self) -> TransformResult<bool> {
        let buffer = self.buffer.as_mut().ok_or(TransformError::NoInputFormat)?;

        let result = self.transform.transform(buffer)?;
        debug!(
            "batch finished: {} records buffered, {} queued for output",
            buffer.len(),
            result.len()
        );
        buffer.clear();

        let (schema, records) = result.into_parts();
        self.output_format = Some(schema);
        self.queue.extend(records);
        self.new_batch = true;

        Ok(!self.queue.is_empty())
    }

    /// Next output record, in order.
    pub fn output(&mut self) -> Option<Record<T>> {
        self.queue.pop_front()
    }

    /// Number of records waiting to be collected.
    pub fn num_pending_output(&self) -> usize {
        self.queue.len()
    }

    /// Feed a whole dataset through one batch and collect the output.
    ///
    /// # Errors
    ///
    /// Returns an error if a record does not fit or the transform fails.
    pub fn run(&mut self, data: &Dataset<T>) -> TransformResult<Dataset<T>> {
        self.set_input_format(data.schema().clone());
        for record in data {
            self.input(record.clone())?;
        }
        self.batch_finished()?;

        let schema = self.output_format.clone().unwrap_or_default();
        let mut output = Dataset::with_capacity(schema, self.queue.len());
        while let Some(record) = self.output() {
            output.push(record)?;
        }
        Ok(output)
    }
}

/// Run `transform` over `data` through a fresh [`BatchFilter`].
///
/// # Errors
///
/// Returns an error if the transform fails.
pub fn filter_dataset<T, Tr>(transform: Tr, data: &Dataset<T>) -> TransformResult<Dataset<T>>
where
    T: DataFloat,
    Tr: Transform<T>,
{
    BatchFilter::new(transform).run(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{ChainConfig, ChainTransform};
    use crate::cutoff::{CutoffConfig, CutoffTransform};
    use tabula_core::{Attribute, SchemaError, Value};

    fn schema() -> Schema {
        Schema::from_attributes(vec![Attribute::numeric("t"), Attribute::numeric("y")]).unwrap()
    }

    fn record(t: f64, y: f64) -> Record<f64> {
        Record::from_numbers(&[t, y])
    }

    #[test]
    fn test_input_before_format() {
        let mut filter = BatchFilter::new(ChainTransform::<f64>::default());
        assert_eq!(
            filter.input(record(0.0, 1.0)),
            Err(TransformError::NoInputFormat)
        );
        assert_eq!(filter.batch_finished(), Err(TransformError::NoInputFormat));
    }

    #[test]
    fn test_batch_lifecycle() {
        let mut filter = BatchFilter::new(ChainTransform::<f64>::new(ChainConfig::new(2)));
        assert!(filter.input_format().is_none());
        filter.set_input_format(schema());
        assert_eq!(filter.input_format(), Some(&schema()));

        for i in 0..4 {
            filter.input(record(f64::from(i), f64::from(i) * 2.0)).unwrap();
        }
        assert_eq!(filter.num_pending_output(), 0);
        assert!(filter.output_format().is_none());

        assert!(filter.batch_finished().unwrap());
        assert_eq!(filter.num_pending_output(), 2);
        assert_eq!(filter.input_format(), Some(&schema()));
        assert_eq!(
            filter.output_format().unwrap().names(),
            vec!["t", "y", "t_1", "y_1", "y_future"]
        );

        let first = filter.output().unwrap();
        assert_eq!(first[4], Value::Number(4.0));
        let second = filter.output().unwrap();
        assert_eq!(second[2], Value::Number(1.0));
        assert!(filter.output().is_none());
    }

    #[test]
    fn test_next_batch_starts_fresh() {
        let mut filter = BatchFilter::new(ChainTransform::<f64>::default());
        filter.set_input_format(schema());

        for i in 0..3 {
            filter.input(record(f64::from(i), 0.0)).unwrap();
        }
        filter.batch_finished().unwrap();
        assert_eq!(filter.num_pending_output(), 2);

        // uncollected output is dropped when the next batch begins
        filter.input(record(10.0, 1.0)).unwrap();
        assert_eq!(filter.num_pending_output(), 0);
        filter.input(record(11.0, 2.0)).unwrap();

        assert!(filter.batch_finished().unwrap());
        let only = filter.output().unwrap();
        assert_eq!(only[0], Value::Number(10.0));
        assert_eq!(only[2], Value::Number(2.0));
    }

    #[test]
    fn test_malformed_record_rejected() {
        let mut filter = BatchFilter::new(ChainTransform::<f64>::default());
        filter.set_input_format(schema());

        let result = filter.input(Record::from_numbers(&[1.0]));
        assert!(matches!(
            result,
            Err(TransformError::Schema(SchemaError::WidthMismatch { .. }))
        ));
    }

    #[test]
    fn test_failed_batch_keeps_buffer() {
        let cutoff = CutoffTransform::<f64>::new(CutoffConfig::default().with_attribute_index(5))
            .unwrap();
        let mut filter = BatchFilter::new(cutoff);
        filter.set_input_format(schema());
        filter.input(record(1.0, 2.0)).unwrap();

        assert!(matches!(
            filter.batch_finished(),
            Err(TransformError::AttributeIndexOutOfRange { index: 4, len: 2 })
        ));
        assert_eq!(filter.num_pending_output(), 0);

        filter
            .transform_mut()
            .configure(CutoffConfig::default().with_attribute_index(2))
            .unwrap();
        assert!(filter.batch_finished().unwrap());
        assert_eq!(filter.output().unwrap()[1], Value::Category(1));
    }

    #[test]
    fn test_filter_dataset() {
        let data = Dataset::from_records(
            schema(),
            (0..6).map(|i| record(f64::from(i), f64::from(i % 2))).collect(),
        )
        .unwrap();

        let direct = ChainTransform::<f64>::new(ChainConfig::new(3)).transform(&data).unwrap();
        let hosted = filter_dataset(ChainTransform::<f64>::new(ChainConfig::new(3)), &data).unwrap();
        assert_eq!(hosted, direct);
        assert_eq!(hosted.len(), 3);
    }
}
