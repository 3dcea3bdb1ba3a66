//! Ordered attribute lists with a class designation.
//!
//! The [`Schema`] type stores attributes in an `IndexMap` keyed by name, so an
//! attribute is addressed by position (its identity) or looked up by name, and
//! iteration order is always the positional order.

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::attribute::{Attribute, AttributeKind};
use crate::error::{SchemaError, SchemaResult};
use crate::num::DataFloat;
use crate::record::{Record, Value};

/// Ordered attribute list plus an optional class attribute.
///
/// Attribute names are unique. When no class is set, algorithms that need one
/// use the last attribute (see [`Schema::resolved_class_index`]).
///
/// # Example
///
/// ```rust
/// use tabula_core::{Attribute, Schema};
///
/// let mut schema = Schema::new();
/// schema.push_attribute(Attribute::numeric("temperature")).unwrap();
/// schema.push_attribute(Attribute::nominal("play", ["yes", "no"])).unwrap();
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.names(), vec!["temperature", "play"]);
/// assert_eq!(schema.class_index(), None);
/// assert_eq!(schema.resolved_class_index(), Some(1));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Schema {
    attributes: IndexMap<String, AttributeKind>,
    class_index: Option<usize>,
}

impl Schema {
    /// Create an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a schema with pre-allocated capacity for attributes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            attributes: IndexMap::with_capacity(capacity),
            class_index: None,
        }
    }

    /// Create a schema from a list of attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if two attributes share a name.
    pub fn from_attributes(attributes: Vec<Attribute>) -> SchemaResult<Self> {
        let mut schema = Self::with_capacity(attributes.len());
        for attribute in attributes {
            schema.push_attribute(attribute)?;
        }
        Ok(schema)
    }

    /// Builder form of [`Schema::set_class_index`].
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn with_class_index(mut self, index: usize) -> SchemaResult<Self> {
        self.set_class_index(index)?;
        Ok(self)
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` if the schema has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Attribute names in positional order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.attributes.keys().map(String::as_str).collect()
    }

    /// Name of the attribute at `index`.
    #[must_use]
    pub fn name(&self, index: usize) -> Option<&str> {
        self.attributes.get_index(index).map(|(name, _)| name.as_str())
    }

    /// Kind of the attribute at `index`.
    #[must_use]
    pub fn kind(&self, index: usize) -> Option<&AttributeKind> {
        self.attributes.get_index(index).map(|(_, kind)| kind)
    }

    /// Owned copy of the attribute at `index`.
    #[must_use]
    pub fn attribute(&self, index: usize) -> Option<Attribute> {
        self.attributes
            .get_index(index)
            .map(|(name, kind)| Attribute::new(name.clone(), kind.clone()))
    }

    /// Position of the attribute called `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.attributes.get_index_of(name)
    }

    /// `base`, extended with `_` until no attribute has that name.
    #[must_use]
    pub fn unique_name(&self, base: &str) -> String {
        let mut name = base.to_string();
        while self.attributes.contains_key(&name) {
            name.push('_');
        }
        name
    }

    /// Returns an iterator over (name, kind) pairs in positional order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeKind)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The explicitly designated class attribute, if any.
    #[must_use]
    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    /// The class attribute, falling back to the last attribute when none is
    /// designated. `None` only for an empty schema.
    #[must_use]
    pub fn resolved_class_index(&self) -> Option<usize> {
        self.class_index.or_else(|| self.len().checked_sub(1))
    }

    /// Designate the class attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_class_index(&mut self, index: usize) -> SchemaResult<()> {
        self.check_index(index)?;
        self.class_index = Some(index);
        Ok(())
    }

    /// Remove the class designation.
    pub fn clear_class_index(&mut self) {
        self.class_index = None;
    }

    /// Append an attribute, returning its position.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already in use.
    pub fn push_attribute(&mut self, attribute: Attribute) -> SchemaResult<usize> {
        let position = self.len();
        self.insert_attribute(attribute, position)?;
        Ok(position)
    }

    /// Insert an attribute at `position`, shifting later attributes up by one.
    ///
    /// A class designation at or after `position` moves with its attribute.
    ///
    /// # Errors
    ///
    /// Returns an error if `position > len` or the name is already in use.
    pub fn insert_attribute(&mut self, attribute: Attribute, position: usize) -> SchemaResult<()> {
        if position > self.len() {
            return Err(SchemaError::IndexOutOfRange {
                index: position,
                len: self.len(),
            });
        }

        let (name, kind) = attribute.into_parts();
        if self.attributes.contains_key(&name) {
            return Err(SchemaError::DuplicateAttribute(name));
        }

        self.attributes.shift_insert(position, name, kind);
        if let Some(class) = self.class_index.as_mut() {
            if *class >= position {
                *class += 1;
            }
        }
        Ok(())
    }

    /// Remove the attribute at `position`, shifting later attributes down by one.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is out of range, or if it is the class
    /// attribute (re-point the class first).
    pub fn delete_attribute(&mut self, position: usize) -> SchemaResult<Attribute> {
        self.check_index(position)?;
        if self.class_index == Some(position) {
            return Err(SchemaError::ClassAttributeDeleted(position));
        }

        let (name, kind) = self
            .attributes
            .shift_remove_index(position)
            .ok_or(SchemaError::IndexOutOfRange {
                index: position,
                len: self.len(),
            })?;

        if let Some(class) = self.class_index.as_mut() {
            if *class > position {
                *class -= 1;
            }
        }
        Ok(Attribute::new(name, kind))
    }

    /// Rename the attribute at `position`. Values are unaffected.
    ///
    /// # Errors
    ///
    /// Returns an error if `position` is out of range or another attribute
    /// already has `new_name`.
    pub fn rename_attribute(&mut self, position: usize, new_name: impl Into<String>) -> SchemaResult<()> {
        self.check_index(position)?;
        let new_name = new_name.into();
        if self.name(position) == Some(new_name.as_str()) {
            return Ok(());
        }
        if self.attributes.contains_key(&new_name) {
            return Err(SchemaError::DuplicateAttribute(new_name));
        }

        // Remove and re-insert under the new key (preserves position)
        if let Some((_, kind)) = self.attributes.shift_remove_index(position) {
            self.attributes.shift_insert(position, new_name, kind);
        }
        Ok(())
    }

    /// Check that a record fits this schema: same width, and every value
    /// agrees with its attribute kind.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::WidthMismatch`] or [`SchemaError::KindMismatch`].
    pub fn validate_record<T: DataFloat>(&self, record: &Record<T>) -> SchemaResult<()> {
        if record.len() != self.len() {
            return Err(SchemaError::WidthMismatch {
                expected: self.len(),
                actual: record.len(),
            });
        }

        for (index, ((name, kind), value)) in self.attributes.iter().zip(record.iter()).enumerate() {
            self.check_value(index, name, kind, value)?;
        }
        Ok(())
    }

    pub(crate) fn validate_value<T: DataFloat>(&self, index: usize, value: &Value<T>) -> SchemaResult<()> {
        let (name, kind) = self
            .attributes
            .get_index(index)
            .ok_or(SchemaError::IndexOutOfRange {
                index,
                len: self.len(),
            })?;
        self.check_value(index, name, kind, value)
    }

    fn check_value<T: DataFloat>(
        &self,
        index: usize,
        name: &str,
        kind: &AttributeKind,
        value: &Value<T>,
    ) -> SchemaResult<()> {
        let reason = match (kind, value) {
            (_, Value::Missing) => return Ok(()),
            (AttributeKind::Numeric, Value::Number(_)) => return Ok(()),
            (AttributeKind::Nominal(values), Value::Category(c)) if *c < values.len() => {
                return Ok(())
            }
            (AttributeKind::Numeric, Value::Category(_)) => "category for numeric attribute",
            (AttributeKind::Nominal(_), Value::Number(_)) => "number for nominal attribute",
            (AttributeKind::Nominal(_), Value::Category(_)) => "category outside the label domain",
        };
        Err(SchemaError::KindMismatch {
            index,
            name: name.to_string(),
            reason,
        })
    }

    fn check_index(&self, index: usize) -> SchemaResult<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(SchemaError::IndexOutOfRange {
                index,
                len: self.len(),
            })
        }
    }
}

/// A decoded class designation must name an existing attribute.
#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Schema {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct RawSchema {
            attributes: IndexMap<String, AttributeKind>,
            class_index: Option<usize>,
        }

        let raw = RawSchema::deserialize(deserializer)?;
        let mut schema = Schema {
            attributes: raw.attributes,
            class_index: None,
        };
        if let Some(index) = raw.class_index {
            schema.set_class_index(index).map_err(de::Error::custom)?;
        }
        Ok(schema)
    }
}
