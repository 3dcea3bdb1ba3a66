//! Cutoff parsing and interval labeling.
//!
//! A sorted cutoff list `[c0, .., cn]` splits the real line into `n + 2`
//! intervals: an unbounded left tail, one interval between each pair of
//! neighbouring cutoffs, and an unbounded right tail. Which side of each
//! interval is closed depends on the boundary mode.

use thiserror::Error;

use tabula_core::error::{ConfigError, ConfigResult};

/// A cutoff token that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CutoffParseError {
    /// The token is not a number.
    #[error("Malformed cutoff '{token}' at position {position}")]
    Malformed {
        /// Token text after whitespace removal.
        token: String,
        /// 0-based position in the comma-separated list.
        position: usize,
    },

    /// The token parses to NaN or an infinity.
    #[error("Non-finite cutoff '{token}' at position {position}")]
    NonFinite {
        /// Token text after whitespace removal.
        token: String,
        /// 0-based position in the comma-separated list.
        position: usize,
    },
}

/// Parse a comma-separated cutoff list.
///
/// Whitespace is ignored. Valid values are returned sorted ascending with
/// repeats collapsed; every unusable token is reported separately and does not
/// affect the others.
///
/// # Example
///
/// ```rust
/// use tabula_filters::parse_cutoffs;
///
/// let (cutoffs, errors) = parse_cutoffs("20, 0, abc, 10");
/// assert_eq!(cutoffs, vec![0.0, 10.0, 20.0]);
/// assert_eq!(errors.len(), 1);
/// ```
#[must_use]
pub fn parse_cutoffs(input: &str) -> (Vec<f64>, Vec<CutoffParseError>) {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();

    let mut cutoffs = Vec::new();
    let mut errors = Vec::new();

    for (position, token) in compact.split(',').enumerate() {
        match token.parse::<f64>() {
            Ok(value) if value.is_finite() => cutoffs.push(value),
            Ok(_) => errors.push(CutoffParseError::NonFinite {
                token: token.to_string(),
                position,
            }),
            Err(_) => errors.push(CutoffParseError::Malformed {
                token: token.to_string(),
                position,
            }),
        }
    }

    normalize_cutoffs(&mut cutoffs);
    (cutoffs, errors)
}

/// Sort ascending and drop repeated values. `-0.0` is read as `0.0`.
pub(crate) fn normalize_cutoffs(cutoffs: &mut Vec<f64>) {
    for cutoff in cutoffs.iter_mut() {
        *cutoff = canonical(*cutoff);
    }
    cutoffs.sort_by(f64::total_cmp);
    cutoffs.dedup();
}

fn canonical(cutoff: f64) -> f64 {
    if cutoff == 0.0 {
        0.0
    } else {
        cutoff
    }
}

/// Cutoff text as it appears in labels.
fn cutoff_text(cutoff: f64) -> String {
    format!("{:.4}", canonical(cutoff))
}

/// The interval domain built from a cutoff list.
///
/// # Example
///
/// ```rust
/// use tabula_filters::CutoffIntervals;
///
/// let intervals = CutoffIntervals::new(&[0.0, 10.0, 20.0], true).unwrap();
/// assert_eq!(intervals.len(), 4);
/// assert_eq!(intervals.label_for(10.0), "[10.0000, 20.0000)");
///
/// let intervals = CutoffIntervals::new(&[0.0, 10.0, 20.0], false).unwrap();
/// assert_eq!(intervals.label_for(10.0), "(0.0000, 10.0000]");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CutoffIntervals {
    cutoffs: Vec<f64>,
    lower_closed: bool,
    labels: Vec<String>,
}

impl CutoffIntervals {
    /// Build the domain.
    ///
    /// With `lower_closed` every interval includes its lower bound
    /// (`[a, b)`), otherwise its upper bound (`(a, b]`).
    ///
    /// # Errors
    ///
    /// Returns an error if `cutoffs` is empty, contains a non-finite value, is
    /// not strictly ascending, or has two values that print the same at label
    /// precision.
    pub fn new(cutoffs: &[f64], lower_closed: bool) -> ConfigResult<Self> {
        validate_cutoffs(cutoffs)?;
        Ok(Self::from_sorted(cutoffs, lower_closed))
    }

    /// Build the domain from cutoffs already known to be valid.
    pub(crate) fn from_sorted(cutoffs: &[f64], lower_closed: bool) -> Self {
        let cutoffs: Vec<f64> = cutoffs.iter().copied().map(canonical).collect();
        let mut labels = Vec::with_capacity(cutoffs.len() + 1);
        labels.push(format_label(None, cutoffs.first().copied(), lower_closed));
        for pair in cutoffs.windows(2) {
            labels.push(format_label(Some(pair[0]), Some(pair[1]), lower_closed));
        }
        labels.push(format_label(cutoffs.last().copied(), None, lower_closed));

        Self {
            cutoffs,
            lower_closed,
            labels,
        }
    }

    /// The cutoffs, ascending.
    #[must_use]
    pub fn cutoffs(&self) -> &[f64] {
        &self.cutoffs
    }

    /// Whether intervals are closed on their lower side.
    #[must_use]
    pub fn lower_closed(&self) -> bool {
        self.lower_closed
    }

    /// Interval labels, left tail first.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of intervals (cutoff count + 1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`: a domain has at least the two tails.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Index of the interval containing `value`.
    ///
    /// Infinite values fall in the tails. NaN lands in the left tail; callers
    /// treat NaN as missing before asking.
    #[must_use]
    pub fn label_index(&self, value: f64) -> usize {
        // number of cutoffs at or below the value on the closed side
        if self.lower_closed {
            self.cutoffs.partition_point(|&c| c <= value)
        } else {
            self.cutoffs.partition_point(|&c| c < value)
        }
    }

    /// Label of the interval containing `value`.
    #[must_use]
    pub fn label_for(&self, value: f64) -> &str {
        &self.labels[self.label_index(value)]
    }
}

pub(crate) fn validate_cutoffs(cutoffs: &[f64]) -> ConfigResult<()> {
    if cutoffs.is_empty() {
        return Err(ConfigError::NoCutoffs);
    }
    if let Some(&bad) = cutoffs.iter().find(|c| !c.is_finite()) {
        return Err(ConfigError::NonFiniteCutoff(bad));
    }
    if let Some(pair) = cutoffs.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(ConfigError::UnsortedCutoffs {
            previous: pair[0],
            next: pair[1],
        });
    }
    if let Some(pair) = cutoffs
        .windows(2)
        .find(|pair| cutoff_text(pair[0]) == cutoff_text(pair[1]))
    {
        return Err(ConfigError::IndistinctCutoffs {
            previous: pair[0],
            next: pair[1],
        });
    }
    Ok(())
}

fn format_label(lower: Option<f64>, upper: Option<f64>, lower_closed: bool) -> String {
    let open = if lower_closed { '[' } else { '(' };
    let close = if lower_closed { ')' } else { ']' };

    match (lower.map(cutoff_text), upper.map(cutoff_text)) {
        (Some(l), Some(u)) => format!("{open}{l}, {u}{close}"),
        (None, Some(u)) => format!("(-Inf, {u}{close}"),
        (Some(l), None) => format!("{open}{l}, +Inf)"),
        (None, None) => "(-Inf, +Inf)".to_string(),
    }
}
