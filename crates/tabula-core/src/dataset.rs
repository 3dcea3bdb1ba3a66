//! Buffered records bound to a schema.
//!
//! The [`Dataset`] type owns its schema and records together. Every structural
//! change goes through a primitive that updates both, so records always stay
//! positionally aligned with the schema.

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::attribute::Attribute;
use crate::error::{SchemaError, SchemaResult};
use crate::num::DataFloat;
use crate::record::{Record, Value};
use crate::schema::Schema;

/// An ordered sequence of records sharing one schema.
///
/// # Example
///
/// ```rust
/// use tabula_core::{Attribute, Dataset, Record, Schema};
///
/// let schema = Schema::from_attributes(vec![
///     Attribute::numeric("x"),
///     Attribute::numeric("y"),
/// ])
/// .unwrap();
///
/// let mut data: Dataset<f64> = Dataset::new(schema);
/// data.push(Record::from_numbers(&[1.0, 2.0])).unwrap();
/// data.push(Record::from_numbers(&[3.0, 4.0])).unwrap();
///
/// assert_eq!(data.len(), 2);
/// assert_eq!(data.num_attributes(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: DataFloat"))]
pub struct Dataset<T: DataFloat> {
    schema: Schema,
    records: Vec<Record<T>>,
}

impl<T: DataFloat> Dataset<T> {
    /// Create an empty dataset with the given schema.
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    /// Create an empty dataset with room for `capacity` records.
    #[must_use]
    pub fn with_capacity(schema: Schema, capacity: usize) -> Self {
        Self {
            schema,
            records: Vec::with_capacity(capacity),
        }
    }

    /// Create a dataset from a schema and records.
    ///
    /// # Errors
    ///
    /// Returns an error if any record does not fit the schema.
    pub fn from_records(schema: Schema, records: Vec<Record<T>>) -> SchemaResult<Self> {
        for record in &records {
            schema.validate_record(record)?;
        }
        Ok(Self { schema, records })
    }

    /// The schema in effect.
    #[must_use]
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of attributes in the schema.
    #[must_use]
    pub fn num_attributes(&self) -> usize {
        self.schema.len()
    }

    /// Record at `index`.
    #[must_use]
    pub fn record(&self, index: usize) -> Option<&Record<T>> {
        self.records.get(index)
    }

    /// All records in order.
    #[must_use]
    pub fn records(&self) -> &[Record<T>] {
        &self.records
    }

    /// Iterate over records.
    pub fn iter(&self) -> core::slice::Iter<'_, Record<T>> {
        self.records.iter()
    }

    /// Value at (`row`, `column`).
    #[must_use]
    pub fn value(&self, row: usize, column: usize) -> Option<&Value<T>> {
        self.records.get(row)?.get(column)
    }

    /// Iterate over one attribute's values, or `None` if `column` is out of
    /// range.
    pub fn column(&self, column: usize) -> Option<impl Iterator<Item = &Value<T>> + '_> {
        (column < self.schema.len()).then(|| self.records.iter().map(move |r| &r[column]))
    }

    /// Append a record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record does not fit the schema.
    pub fn push(&mut self, record: Record<T>) -> SchemaResult<()> {
        self.schema.validate_record(&record)?;
        self.records.push(record);
        Ok(())
    }

    /// Overwrite a single value.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of range or the value does not
    /// match the attribute kind.
    pub fn set_value(&mut self, row: usize, column: usize, value: Value<T>) -> SchemaResult<()> {
        self.schema.validate_value(column, &value)?;
        let len = self.records.len();
        let record = self
            .records
            .get_mut(row)
            .ok_or(SchemaError::IndexOutOfRange { index: row, len })?;
        record.set(column, value);
        Ok(())
    }

    /// Insert an attribute at `position`; every record gets a missing value in
    /// the new slot.
    ///
    /// # Errors
    ///
    /// See [`Schema::insert_attribute`].
    pub fn insert_attribute(&mut self, attribute: Attribute, position: usize) -> SchemaResult<()> {
        self.schema.insert_attribute(attribute, position)?;
        for record in &mut self.records {
            record.insert(position, Value::Missing);
        }
        Ok(())
    }

    /// Delete the attribute at `position` and its value in every record.
    ///
    /// # Errors
    ///
    /// See [`Schema::delete_attribute`].
    pub fn delete_attribute(&mut self, position: usize) -> SchemaResult<Attribute> {
        let removed = self.schema.delete_attribute(position)?;
        for record in &mut self.records {
            record.remove(position);
        }
        Ok(removed)
    }

    /// Rename the attribute at `position`.
    ///
    /// # Errors
    ///
    /// See [`Schema::rename_attribute`].
    pub fn rename_attribute(&mut self, position: usize, new_name: impl Into<String>) -> SchemaResult<()> {
        self.schema.rename_attribute(position, new_name)
    }

    /// Designate the class attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is out of range.
    pub fn set_class_index(&mut self, position: usize) -> SchemaResult<()> {
        self.schema.set_class_index(position)
    }

    /// Remove and return all records, keeping the schema.
    pub fn drain(&mut self) -> std::vec::Drain<'_, Record<T>> {
        self.records.drain(..)
    }

    /// Remove all records, keeping the schema.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Split into schema and records.
    #[must_use]
    pub fn into_parts(self) -> (Schema, Vec<Record<T>>) {
        (self.schema, self.records)
    }
}

impl<'a, T: DataFloat> IntoIterator for &'a Dataset<T> {
    type Item = &'a Record<T>;
    type IntoIter = core::slice::Iter<'a, Record<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Deserialization goes through [`Dataset::from_records`], so a decoded
/// dataset is held to the same width and kind checks as a built one.
#[cfg(feature = "serde")]
impl<'de, T: DataFloat> Deserialize<'de> for Dataset<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(bound = "T: DataFloat")]
        struct RawDataset<T: DataFloat> {
            schema: Schema,
            records: Vec<Record<T>>,
        }

        let raw = RawDataset::<T>::deserialize(deserializer)?;
        Self::from_records(raw.schema, raw.records).map_err(de::Error::custom)
    }
}
