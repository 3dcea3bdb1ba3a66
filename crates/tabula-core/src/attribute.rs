//! Attribute metadata: a name plus a numeric or nominal kind.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The type of values an attribute holds.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AttributeKind {
    /// Floating-point values.
    Numeric,
    /// Values drawn from a fixed, ordered set of labels. Records store the
    /// position of the label in this list.
    Nominal(Vec<String>),
}

impl AttributeKind {
    /// Build a nominal kind from any list of labels.
    pub fn nominal<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Nominal(values.into_iter().map(Into::into).collect())
    }

    /// Returns `true` for numeric attributes.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Numeric)
    }

    /// Returns `true` for nominal attributes.
    #[must_use]
    pub fn is_nominal(&self) -> bool {
        matches!(self, Self::Nominal(_))
    }

    /// The label domain of a nominal attribute.
    #[must_use]
    pub fn values(&self) -> Option<&[String]> {
        match self {
            Self::Numeric => None,
            Self::Nominal(values) => Some(values),
        }
    }

    /// Number of labels (0 for numeric attributes).
    #[must_use]
    pub fn num_values(&self) -> usize {
        self.values().map_or(0, <[String]>::len)
    }

    /// Position of `label` in the domain, if present.
    #[must_use]
    pub fn index_of_value(&self, label: &str) -> Option<usize> {
        self.values()?.iter().position(|v| v == label)
    }
}

/// A named column description.
///
/// # Example
///
/// ```rust
/// use tabula_core::{Attribute, AttributeKind};
///
/// let outlook = Attribute::nominal("outlook", ["sunny", "overcast", "rainy"]);
/// let lagged = outlook.renamed("outlook_1");
///
/// assert_eq!(lagged.name(), "outlook_1");
/// assert_eq!(lagged.kind(), outlook.kind());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
}

impl Attribute {
    /// Create an attribute from a name and kind.
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Create a numeric attribute.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Numeric)
    }

    /// Create a nominal attribute with the given label domain.
    pub fn nominal<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(name, AttributeKind::nominal(values))
    }

    /// Attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute kind.
    #[must_use]
    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    /// Copy of this attribute under a different name; the kind, including any
    /// nominal domain, is carried over.
    #[must_use]
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self::new(name, self.kind.clone())
    }

    /// Split into name and kind.
    #[must_use]
    pub fn into_parts(self) -> (String, AttributeKind) {
        (self.name, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nominal_domain() {
        let attr = Attribute::nominal("play", ["yes", "no"]);
        assert!(attr.kind().is_nominal());
        assert_eq!(attr.kind().num_values(), 2);
        assert_eq!(attr.kind().index_of_value("no"), Some(1));
        assert_eq!(attr.kind().index_of_value("maybe"), None);
    }

    #[test]
    fn test_numeric_has_no_domain() {
        let attr = Attribute::numeric("temperature");
        assert!(attr.kind().is_numeric());
        assert!(attr.kind().values().is_none());
        assert_eq!(attr.kind().num_values(), 0);
    }

    #[test]
    fn test_renamed_keeps_kind() {
        let attr = Attribute::nominal("play", ["yes", "no"]);
        let copy = attr.renamed("play_future");
        assert_eq!(copy.name(), "play_future");
        assert_eq!(copy.kind(), attr.kind());
    }
}
