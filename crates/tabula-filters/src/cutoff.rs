//! Cutoff Discretization Transform.
//!
//! Replaces one numeric attribute with a nominal attribute whose labels are the
//! intervals between configured cutoff values.

use log::{debug, warn};

use tabula_core::{
    attribute::Attribute,
    dataset::Dataset,
    error::{ConfigError, ConfigResult, TransformError, TransformResult},
    num::DataFloat,
    record::{Record, Value},
    schema::Schema,
    traits::Transform,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::intervals::{normalize_cutoffs, parse_cutoffs, validate_cutoffs, CutoffIntervals};

/// Configuration for CutoffTransform.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CutoffConfig {
    /// Cutoff values, strictly ascending and finite.
    pub cutoffs: Vec<f64>,
    /// 1-based index of the attribute to discretize.
    pub attribute_index: usize,
    /// Close intervals on their lower bound (`[a, b)`) instead of their upper
    /// bound (`(a, b]`).
    pub lower_closed: bool,
}

impl Default for CutoffConfig {
    fn default() -> Self {
        Self {
            cutoffs: vec![0.0],
            attribute_index: 1,
            lower_closed: true,
        }
    }
}

impl CutoffConfig {
    /// Create a configuration from cutoff values, which are sorted and
    /// de-duplicated.
    pub fn new(mut cutoffs: Vec<f64>) -> Self {
        normalize_cutoffs(&mut cutoffs);
        Self {
            cutoffs,
            ..Self::default()
        }
    }

    /// Create a configuration from a comma-separated cutoff list.
    ///
    /// Tokens that are not finite numbers are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoCutoffs`] if no token is usable.
    pub fn from_cutoff_str(cutoffs: &str) -> ConfigResult<Self> {
        let (values, errors) = parse_cutoffs(cutoffs);
        for error in &errors {
            warn!("Skipping cutoff: {}", error);
        }
        if values.is_empty() {
            return Err(ConfigError::NoCutoffs);
        }

        Ok(Self {
            cutoffs: values,
            ..Self::default()
        })
    }

    /// Set the 1-based attribute index.
    pub fn with_attribute_index(mut self, index: usize) -> Self {
        self.attribute_index = index;
        self
    }

    /// Set the boundary mode.
    pub fn with_lower_closed(mut self, lower_closed: bool) -> Self {
        self.lower_closed = lower_closed;
        self
    }

    /// Cutoffs as a comma-separated list.
    #[must_use]
    pub fn cutoffs_string(&self) -> String {
        self.cutoffs
            .iter()
            .map(f64::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    /// The 0-based attribute index.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured index is 0.
    pub fn zero_based_index(&self) -> ConfigResult<usize> {
        self.attribute_index
            .checked_sub(1)
            .ok_or(ConfigError::InvalidAttributeIndex(self.attribute_index))
    }

    /// Check the parameters without building anything.
    ///
    /// # Errors
    ///
    /// Returns an error for a 0 attribute index or an unusable cutoff list.
    pub fn validate(&self) -> ConfigResult<()> {
        self.zero_based_index()?;
        validate_cutoffs(&self.cutoffs)
    }
}

/// Cutoff Discretization Transform.
///
/// The target attribute keeps its position and name but becomes nominal, with
/// one label per interval. The label domain is built once at configuration.
///
/// # Edge Cases
///
/// - Missing (or NaN) source values stay missing
/// - Values exactly on a cutoff fall in the interval closed on that side
/// - If the target was the class attribute it remains the class
#[derive(Debug, Clone)]
pub struct CutoffTransform<T: DataFloat> {
    config: CutoffConfig,
    intervals: CutoffIntervals,
    _phantom: core::marker::PhantomData<T>,
}

impl<T: DataFloat> Default for CutoffTransform<T> {
    fn default() -> Self {
        let config = CutoffConfig::default();
        let intervals = CutoffIntervals::from_sorted(&config.cutoffs, config.lower_closed);
        Self {
            config,
            intervals,
            _phantom: core::marker::PhantomData,
        }
    }
}

impl<T: DataFloat> CutoffTransform<T> {
    /// Create a new CutoffTransform with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: CutoffConfig) -> ConfigResult<Self> {
        let mut transform = Self::default();
        transform.configure(config)?;
        Ok(transform)
    }

    /// The interval domain in use.
    #[must_use]
    pub fn intervals(&self) -> &CutoffIntervals {
        &self.intervals
    }

    /// Resolve and check the target attribute against a schema.
    fn target_index(&self, schema: &Schema) -> TransformResult<usize> {
        let index = self.config.zero_based_index()?;
        let kind = schema
            .kind(index)
            .ok_or(TransformError::AttributeIndexOutOfRange {
                index,
                len: schema.len(),
            })?;
        if !kind.is_numeric() {
            let name = schema.name(index).unwrap_or_default().to_string();
            return Err(TransformError::NotNumeric(name));
        }
        Ok(index)
    }

    fn discretize(&self, value: &Value<T>) -> Value<T> {
        match value.as_number() {
            Some(v) => Value::Category(self.intervals.label_index(v.to_f64_lossy())),
            None => Value::Missing,
        }
    }
}

impl<T: DataFloat> Transform<T> for CutoffTransform<T> {
    type Config = CutoffConfig;

    fn configure(&mut self, config: Self::Config) -> ConfigResult<()> {
        config.validate()?;
        self.intervals = CutoffIntervals::new(&config.cutoffs, config.lower_closed)?;
        self.config = config;
        Ok(())
    }

    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn output_schema(&self, input: &Schema) -> TransformResult<Schema> {
        let index = self.target_index(input)?;
        let name = input.name(index).unwrap_or_default().to_string();

        let mut schema = input.clone();
        let discretized = Attribute::nominal(
            // placeholder while old and new attributes coexist
            input.unique_name(&format!("{name}_discretized")),
            self.intervals.labels().iter().cloned(),
        );
        schema.insert_attribute(discretized, index + 1)?;
        if schema.class_index() == Some(index) {
            schema.set_class_index(index + 1)?;
        }
        schema.delete_attribute(index)?;
        schema.rename_attribute(index, name)?;

        Ok(schema)
    }

    fn transform(&self, data: &Dataset<T>) -> TransformResult<Dataset<T>> {
        let schema = self.output_schema(data.schema())?;
        let index = self.target_index(data.schema())?;

        let mut result = Dataset::with_capacity(schema, data.len());
        for record in data {
            let values = record
                .iter()
                .enumerate()
                .map(|(column, value)| {
                    if column == index {
                        self.discretize(value)
                    } else {
                        *value
                    }
                })
                .collect::<Record<T>>();
            result.push(values)?;
        }

        debug!(
            "cutoff transform: attribute {} discretized into {} intervals over {} records",
            index,
            self.intervals.len(),
            result.len()
        );

        Ok(result)
    }
}
