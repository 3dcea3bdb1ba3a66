//! Numeric type abstractions for dataset values.
//!
//! This module defines the [`DataFloat`] trait which abstracts over `f32` and `f64`
//! so a [`Dataset`](crate::Dataset) can be stored at either precision.

use core::fmt::{Debug, Display};
use num_traits::{Float, FromPrimitive, ToPrimitive};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Serialize};

/// Serialization bounds, only required when the `serde` feature is enabled.
#[cfg(feature = "serde")]
pub trait MaybeSerde: Serialize + DeserializeOwned {}

#[cfg(feature = "serde")]
impl<T> MaybeSerde for T where T: Serialize + DeserializeOwned {}

/// Serialization bounds, only required when the `serde` feature is enabled.
#[cfg(not(feature = "serde"))]
pub trait MaybeSerde {}

#[cfg(not(feature = "serde"))]
impl<T> MaybeSerde for T {}

/// Trait for floating-point types stored in numeric attributes.
///
/// # Example
///
/// ```rust
/// use tabula_core::DataFloat;
///
/// fn midpoint<T: DataFloat>(a: T, b: T) -> f64 {
///     (a.to_f64_lossy() + b.to_f64_lossy()) * 0.5
/// }
///
/// assert_eq!(midpoint(1.0f32, 2.0f32), 1.5);
/// ```
pub trait DataFloat:
    Float
    + FromPrimitive
    + ToPrimitive
    + Copy
    + Send
    + Sync
    + Default
    + Debug
    + Display
    + MaybeSerde
    + 'static
{
    /// Convert to `f64`.
    #[must_use]
    fn to_f64_lossy(self) -> f64;
}

impl DataFloat for f32 {
    #[inline]
    fn to_f64_lossy(self) -> f64 {
        f64::from(self)
    }
}

impl DataFloat for f64 {
    #[inline]
    fn to_f64_lossy(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_f64_lossy() {
        assert_eq!(42.5f32.to_f64_lossy(), 42.5);
        assert_eq!(0.1f64.to_f64_lossy(), 0.1);
        assert!(f32::NAN.to_f64_lossy().is_nan());
    }
}
