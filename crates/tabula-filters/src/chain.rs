//! Chain (sequence window) Transform.
//!
//! Turns an ordered dataset into a "predict the next step" dataset: each output
//! record carries lagged copies of earlier records and, as its class, the class
//! value of the record that follows it.

use log::debug;

use tabula_core::{
    attribute::Attribute,
    dataset::Dataset,
    error::{ConfigResult, TransformError, TransformResult},
    num::DataFloat,
    record::Record,
    schema::Schema,
    traits::Transform,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for ChainTransform.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChainConfig {
    /// How many steps the window spans. 0 is read as 1.
    pub order: usize,
    /// Copy every attribute of earlier records, not just the class.
    pub include_attributes_in_order: bool,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            order: 1,
            include_attributes_in_order: true,
        }
    }
}

impl ChainConfig {
    /// Create a configuration with the given order; values below 1 are
    /// clamped to 1.
    pub fn new(order: i64) -> Self {
        Self {
            order: usize::try_from(order.max(1)).unwrap_or(usize::MAX),
            include_attributes_in_order: true,
        }
    }

    /// Set whether earlier records contribute all attributes or only the class.
    pub fn with_include_attributes(mut self, include: bool) -> Self {
        self.include_attributes_in_order = include;
        self
    }

    /// The order actually used.
    #[must_use]
    pub fn effective_order(&self) -> usize {
        self.order.max(1)
    }
}

/// Chain Transform.
///
/// For a dataset with `C` attributes, class `k` and order `N`, the output
/// schema is the original attributes, then for each lag `j` in `1..N` either a
/// full copy of the attributes named `<name>_<j>` or just `<class>_<j>`, then
/// `<class>_future`, which becomes the class.
///
/// # Edge Cases
///
/// - The first `N - 1` records lack history and the last lacks a successor;
///   all are dropped, leaving `max(0, R - N)` records.
/// - No class designated: the last attribute is used.
/// - Applying the transform to its own output works on the new class and
///   compounds: a generated name already in use gets `_` appended until it is
///   free, and a second pass keeps `max(0, R - 2N)` records.
#[derive(Debug, Clone)]
pub struct ChainTransform<T: DataFloat> {
    config: ChainConfig,
    _phantom: core::marker::PhantomData<T>,
}

impl<T: DataFloat> Default for ChainTransform<T> {
    fn default() -> Self {
        Self::new(ChainConfig::default())
    }
}

impl<T: DataFloat> ChainTransform<T> {
    /// Create a new ChainTransform with the given configuration.
    pub fn new(config: ChainConfig) -> Self {
        let mut config = config;
        config.order = config.effective_order();
        Self {
            config,
            _phantom: core::marker::PhantomData,
        }
    }

    fn class_index(schema: &Schema) -> TransformResult<usize> {
        schema
            .resolved_class_index()
            .ok_or(TransformError::NoClassAttribute)
    }

    /// Build one output record from the buffered input around `index`.
    fn window_record(
        &self,
        records: &[Record<T>],
        index: usize,
        class_index: usize,
        width: usize,
    ) -> Record<T> {
        let order = self.config.order;
        let mut values = Vec::with_capacity(width);

        values.extend(records[index].iter().copied());
        for lag in 1..order {
            let previous = &records[index - lag];
            if self.config.include_attributes_in_order {
                values.extend(previous.iter().copied());
            } else {
                values.push(previous[class_index]);
            }
        }
        values.push(records[index + 1][class_index]);

        Record::from_vec(values)
    }
}

impl<T: DataFloat> Transform<T> for ChainTransform<T> {
    type Config = ChainConfig;

    fn configure(&mut self, config: Self::Config) -> ConfigResult<()> {
        *self = Self::new(config);
        Ok(())
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn output_schema(&self, input: &Schema) -> TransformResult<Schema> {
        let class_index = Self::class_index(input)?;
        let mut schema = input.clone();

        for lag in 1..self.config.order {
            for (index, (name, kind)) in input.iter().enumerate() {
                if !self.config.include_attributes_in_order && index != class_index {
                    continue;
                }
                let copy_name = schema.unique_name(&format!("{name}_{lag}"));
                schema.push_attribute(Attribute::new(copy_name, kind.clone()))?;
            }
        }

        let class = input
            .attribute(class_index)
            .ok_or(TransformError::NoClassAttribute)?;
        let future = class.renamed(schema.unique_name(&format!("{}_future", class.name())));
        let future_index = schema.push_attribute(future)?;
        schema.set_class_index(future_index)?;

        Ok(schema)
    }

    fn transform(&self, data: &Dataset<T>) -> TransformResult<Dataset<T>> {
        let schema = self.output_schema(data.schema())?;
        let class_index = Self::class_index(data.schema())?;
        let order = self.config.order;
        let records = data.records();
        let width = schema.len();

        let retained = records.len().saturating_sub(order);
        let mut result = Dataset::with_capacity(schema, retained);

        // the last record has no successor to label it
        for index in (order - 1)..records.len().saturating_sub(1) {
            result.push(self.window_record(records, index, class_index, width))?;
        }

        debug!(
            "chain transform (order {}): {} records in, {} out, {} attributes",
            order,
            records.len(),
            result.len(),
            width
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_core::{AttributeKind, Value};

    /// Five records of (x, y) where y is the class: x = 1..5, y = 10 * x.
    fn create_test_dataset() -> Dataset<f64> {
        let schema = Schema::from_attributes(vec![Attribute::numeric("x"), Attribute::numeric("y")])
            .unwrap()
            .with_class_index(1)
            .unwrap();
        let records = (1..=5)
            .map(|i| Record::from_numbers(&[f64::from(i), f64::from(i * 10)]))
            .collect();
        Dataset::from_records(schema, records).unwrap()
    }

    fn numbers(record: &Record<f64>) -> Vec<Option<f64>> {
        record.iter().map(Value::as_number).collect()
    }

    #[test]
    fn test_chain_default_config() {
        let config = ChainConfig::default();
        assert_eq!(config.order, 1);
        assert!(config.include_attributes_in_order);
    }

    #[test]
    fn test_order_clamped() {
        assert_eq!(ChainConfig::new(0).order, 1);
        assert_eq!(ChainConfig::new(-4).order, 1);
        assert_eq!(ChainConfig::new(3).order, 3);

        let transform = ChainTransform::<f64>::new(ChainConfig {
            order: 0,
            include_attributes_in_order: false,
        });
        assert_eq!(transform.config().order, 1);
    }

    #[test]
    fn test_order_one() {
        let transform = ChainTransform::<f64>::new(ChainConfig::new(1));
        let result = transform.transform(&create_test_dataset()).unwrap();

        assert_eq!(result.schema().names(), vec!["x", "y", "y_future"]);
        assert_eq!(result.schema().class_index(), Some(2));
        assert_eq!(result.len(), 4);
        assert_eq!(numbers(&result.records()[0]), vec![Some(1.0), Some(10.0), Some(20.0)]);
        assert_eq!(numbers(&result.records()[3]), vec![Some(4.0), Some(40.0), Some(50.0)]);
    }

    #[test]
    fn test_order_three_with_attributes() {
        let transform = ChainTransform::<f64>::new(ChainConfig::new(3));
        let result = transform.transform(&create_test_dataset()).unwrap();

        assert_eq!(
            result.schema().names(),
            vec!["x", "y", "x_1", "y_1", "x_2", "y_2", "y_future"]
        );
        assert_eq!(result.schema().class_index(), Some(6));
        assert_eq!(result.len(), 2);

        // first retained record is original index 2
        assert_eq!(
            numbers(&result.records()[0]),
            vec![Some(3.0), Some(30.0), Some(2.0), Some(20.0), Some(1.0), Some(10.0), Some(40.0)]
        );
        assert_eq!(
            numbers(&result.records()[1]),
            vec![Some(4.0), Some(40.0), Some(3.0), Some(30.0), Some(2.0), Some(20.0), Some(50.0)]
        );
    }

    #[test]
    fn test_order_three_class_only() {
        let config = ChainConfig::new(3).with_include_attributes(false);
        let transform = ChainTransform::<f64>::new(config);
        let result = transform.transform(&create_test_dataset()).unwrap();

        assert_eq!(result.schema().names(), vec!["x", "y", "y_1", "y_2", "y_future"]);
        assert_eq!(
            numbers(&result.records()[0]),
            vec![Some(3.0), Some(30.0), Some(20.0), Some(10.0), Some(40.0)]
        );
    }

    #[test]
    fn test_default_class_is_last_attribute() {
        let schema = Schema::from_attributes(vec![
            Attribute::numeric("a"),
            Attribute::nominal("b", ["u", "v"]),
        ])
        .unwrap();
        let records = vec![
            Record::from_vec(vec![Value::Number(1.0), Value::Category(0)]),
            Record::from_vec(vec![Value::Number(2.0), Value::Category(1)]),
        ];
        let data = Dataset::from_records(schema, records).unwrap();

        let result = ChainTransform::<f64>::default().transform(&data).unwrap();
        assert_eq!(result.schema().name(2), Some("b_future"));
        assert_eq!(
            result.schema().kind(2),
            Some(&AttributeKind::nominal(["u", "v"]))
        );
        assert_eq!(result.records()[0][2], Value::Category(1));
    }

    #[test]
    fn test_missing_class_carried_forward() {
        let schema = Schema::from_attributes(vec![Attribute::numeric("y")]).unwrap();
        let records = vec![
            Record::from_numbers(&[1.0]),
            Record::from_vec(vec![Value::Missing]),
            Record::from_numbers(&[3.0]),
        ];
        let data = Dataset::from_records(schema, records).unwrap();

        let result = ChainTransform::<f64>::default().transform(&data).unwrap();
        assert!(result.records()[0][1].is_missing());
        assert!(result.records()[1][0].is_missing());
    }

    #[test]
    fn test_too_few_records() {
        let data = create_test_dataset();
        for order in [5, 6, 50] {
            let transform = ChainTransform::<f64>::new(ChainConfig::new(order));
            let result = transform.transform(&data).unwrap();
            assert!(result.is_empty());
            assert_eq!(result.schema().name(result.num_attributes() - 1), Some("y_future"));
        }

        let empty = Dataset::new(data.schema().clone());
        let result = ChainTransform::<f64>::default().transform(&empty).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_schema_rejected() {
        let data: Dataset<f64> = Dataset::new(Schema::new());
        let result = ChainTransform::<f64>::default().transform(&data);
        assert_eq!(result, Err(TransformError::NoClassAttribute));
    }

    #[test]
    fn test_input_untouched() {
        let data = create_test_dataset();
        let before = data.clone();
        let _ = ChainTransform::<f64>::new(ChainConfig::new(2)).transform(&data).unwrap();
        assert_eq!(data, before);
    }

    #[test]
    fn test_reapplication() {
        let data = create_test_dataset();

        let once = ChainTransform::<f64>::default().transform(&data).unwrap();
        let twice = ChainTransform::<f64>::default().transform(&once).unwrap();
        assert_eq!(twice.schema().names(), vec!["x", "y", "y_future", "y_future_future"]);
        assert_eq!(twice.len(), 3);

        let chain = ChainTransform::<f64>::new(ChainConfig::new(2));
        let once = chain.transform(&data).unwrap();
        assert_eq!(once.schema().names(), vec!["x", "y", "x_1", "y_1", "y_future"]);

        let twice = chain.transform(&once).unwrap();
        assert_eq!(
            twice.schema().names(),
            vec![
                "x", "y", "x_1", "y_1", "y_future", "x_1_", "y_1_", "x_1_1", "y_1_1",
                "y_future_1", "y_future_future"
            ]
        );
        assert_eq!(twice.schema().class_index(), Some(10));
        assert_eq!(twice.len(), data.len() - 4);

        // second pass record 0 sits on first pass record 1, labelled by record 2
        let record = &twice.records()[0];
        assert_eq!(&record.values()[..5], once.records()[1].values());
        assert_eq!(&record.values()[5..10], once.records()[0].values());
        assert_eq!(record[10], once.records()[2][4]);
    }

    #[test]
    fn test_configure_replaces_config() {
        let mut transform = ChainTransform::<f64>::default();
        transform.configure(ChainConfig::new(4)).unwrap();
        assert_eq!(transform.config().order, 4);
    }
}
