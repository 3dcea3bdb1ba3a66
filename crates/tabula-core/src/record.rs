//! Record values.
//!
//! A [`Record`] is a row of [`Value`]s positionally aligned to a
//! [`Schema`](crate::Schema).

use core::ops::Index;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::num::DataFloat;

/// A single cell.
///
/// Numeric attributes hold [`Value::Number`], nominal attributes hold
/// [`Value::Category`] (an index into the attribute's label domain). Either may
/// be [`Value::Missing`]. A `NaN` number is read as missing.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: DataFloat"))]
pub enum Value<T: DataFloat> {
    /// A numeric value.
    Number(T),
    /// Index of a label in a nominal domain.
    Category(usize),
    /// No value.
    Missing,
}

impl<T: DataFloat> Value<T> {
    /// Returns `true` for [`Value::Missing`] and for `NaN` numbers.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Number(v) => v.is_nan(),
            Self::Category(_) => false,
        }
    }

    /// The numeric value, if this is a non-missing number.
    #[must_use]
    pub fn as_number(&self) -> Option<T> {
        match *self {
            Self::Number(v) if !v.is_nan() => Some(v),
            _ => None,
        }
    }

    /// The category index, if this is a nominal value.
    #[must_use]
    pub fn as_category(&self) -> Option<usize> {
        match *self {
            Self::Category(index) => Some(index),
            _ => None,
        }
    }
}

impl<T: DataFloat> Default for Value<T> {
    fn default() -> Self {
        Self::Missing
    }
}

impl<T: DataFloat> From<T> for Value<T> {
    fn from(value: T) -> Self {
        Self::Number(value)
    }
}

/// An ordered row of values.
///
/// # Example
///
/// ```rust
/// use tabula_core::{Record, Value};
///
/// let record: Record<f64> = Record::from_vec(vec![Value::Number(1.5), Value::Missing]);
/// assert_eq!(record.len(), 2);
/// assert!(record[1].is_missing());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: DataFloat"))]
pub struct Record<T: DataFloat> {
    values: Vec<Value<T>>,
}

impl<T: DataFloat> Record<T> {
    /// Create a record from its values.
    #[must_use]
    pub fn from_vec(values: Vec<Value<T>>) -> Self {
        Self { values }
    }

    /// Create a record of `width` missing values.
    #[must_use]
    pub fn missing(width: usize) -> Self {
        Self {
            values: vec![Value::Missing; width],
        }
    }

    /// Create an all-numeric record.
    #[must_use]
    pub fn from_numbers(values: &[T]) -> Self {
        values.iter().copied().map(Value::Number).collect()
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the record has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Value<T>> {
        self.values.get(index)
    }

    /// Values as a slice.
    #[must_use]
    pub fn values(&self) -> &[Value<T>] {
        &self.values
    }

    /// Iterate over values.
    pub fn iter(&self) -> core::slice::Iter<'_, Value<T>> {
        self.values.iter()
    }

    /// Consume the record, returning its values.
    #[must_use]
    pub fn into_values(self) -> Vec<Value<T>> {
        self.values
    }

    pub(crate) fn set(&mut self, index: usize, value: Value<T>) {
        self.values[index] = value;
    }

    pub(crate) fn insert(&mut self, index: usize, value: Value<T>) {
        self.values.insert(index, value);
    }

    pub(crate) fn remove(&mut self, index: usize) -> Value<T> {
        self.values.remove(index)
    }
}

impl<T: DataFloat> Index<usize> for Record<T> {
    type Output = Value<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.values[index]
    }
}

impl<T: DataFloat> FromIterator<Value<T>> for Record<T> {
    fn from_iter<I: IntoIterator<Item = Value<T>>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<T: DataFloat> From<Vec<Value<T>>> for Record<T> {
    fn from(values: Vec<Value<T>>) -> Self {
        Self::from_vec(values)
    }
}

impl<'a, T: DataFloat> IntoIterator for &'a Record<T> {
    type Item = &'a Value<T>;
    type IntoIter = core::slice::Iter<'a, Value<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
