//! Key and weight traits for empirical distributions
//!
//! Distributions are maps from hashable keys to numeric weights. Keys only
//! need `Eq + Hash + Clone`; arithmetic and moments additionally require
//! [`Numeric`], which converts a key to `f64`.
//!
//! `f64` is neither `Eq` nor `Ord`, so floating-point keys are stored as
//! [`Real`] (`OrderedFloat<f64>`), which gives NaN a fixed place in the order.

use num_traits::Num;
use ordered_float::OrderedFloat;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::AddAssign;

/// Totally ordered floating-point key
pub type Real = OrderedFloat<f64>;

/// Wrap a float as a [`Real`] key
#[inline]
pub fn real(x: f64) -> Real {
    OrderedFloat(x)
}

/// Wrap a slice of floats as [`Real`] keys
pub fn reals(xs: &[f64]) -> Vec<Real> {
    xs.iter().copied().map(OrderedFloat).collect()
}

/// Anything usable as a distribution key
///
/// Implemented for the integer types, strings, `bool`, `char`, [`Real`] and
/// tuples, arrays, vectors and options of keys. Custom hypothesis types opt in
/// with an empty `impl Key for MyType {}`.
pub trait Key: Eq + Hash + Clone + Debug {
    /// Whether this key is (or contains) a NaN
    ///
    /// NaN keys sort last and never compare equal to a probe value, so
    /// lookups against them silently miss.
    fn is_nan(&self) -> bool {
        false
    }
}

macro_rules! impl_plain_key {
    ($($t:ty),*) => {
        $(impl Key for $t {})*
    };
}

impl_plain_key!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, bool, char, String);

impl Key for &'static str {}

impl Key for Real {
    fn is_nan(&self) -> bool {
        self.0.is_nan()
    }
}

impl<A: Key, B: Key> Key for (A, B) {
    fn is_nan(&self) -> bool {
        self.0.is_nan() || self.1.is_nan()
    }
}

impl<A: Key, B: Key, C: Key> Key for (A, B, C) {
    fn is_nan(&self) -> bool {
        self.0.is_nan() || self.1.is_nan() || self.2.is_nan()
    }
}

impl<T: Key, const N: usize> Key for [T; N] {
    fn is_nan(&self) -> bool {
        self.iter().any(Key::is_nan)
    }
}

impl<T: Key> Key for Vec<T> {
    fn is_nan(&self) -> bool {
        self.iter().any(Key::is_nan)
    }
}

impl<T: Key> Key for Option<T> {
    fn is_nan(&self) -> bool {
        self.as_ref().is_some_and(Key::is_nan)
    }
}

/// Values with a lossless-enough conversion to and from `f64`
///
/// Integer implementations truncate in `from_f64`.
pub trait Numeric: Copy + Debug + PartialOrd {
    /// Convert to `f64`
    fn to_f64(self) -> f64;

    /// Convert from `f64`
    fn from_f64(x: f64) -> Self;
}

macro_rules! impl_numeric_cast {
    ($($t:ty),*) => {
        $(
            impl Numeric for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(x: f64) -> Self {
                    x as $t
                }
            }
        )*
    };
}

impl_numeric_cast!(f64, f32, i32, i64, u32, u64, usize);

impl Numeric for Real {
    #[inline]
    fn to_f64(self) -> f64 {
        self.into_inner()
    }

    #[inline]
    fn from_f64(x: f64) -> Self {
        OrderedFloat(x)
    }
}

/// Weight attached to a key: an integer frequency or a float probability
pub trait Weight: Num + Copy + PartialOrd + Debug + AddAssign + Numeric {}

impl<T: Num + Copy + PartialOrd + Debug + AddAssign + Numeric> Weight for T {}

#[cfg(test)]
mod tests {
    use super::*;

    fn total<W: Weight>(ws: &[W]) -> W {
        let mut acc = W::zero();
        for &w in ws {
            acc += w;
        }
        acc
    }

    #[test]
    fn test_numeric_conversions() {
        assert_eq!(3i64.to_f64(), 3.0);
        assert_eq!(i64::from_f64(3.9), 3);
        assert_eq!(real(2.5).to_f64(), 2.5);
        assert_eq!(Real::from_f64(-1.0), real(-1.0));
        assert_eq!(7usize.to_f64(), 7.0);
    }

    #[test]
    fn test_weight_blanket() {
        assert_eq!(total(&[1i64, 2, 3]), 6);
        assert!((total(&[0.25f64, 0.5]) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_key_nan_detection() {
        assert!(real(f64::NAN).is_nan());
        assert!(!real(1.0).is_nan());
        assert!((real(1.0), real(f64::NAN)).is_nan());
        assert!(!(1i64, 2i64).is_nan());
        assert!(!"heads".is_nan());
    }

    #[test]
    fn test_reals_order_nan_last() {
        let mut keys = reals(&[2.0, f64::NAN, -1.0]);
        keys.sort();
        assert_eq!(keys[0], real(-1.0));
        assert_eq!(keys[1], real(2.0));
        assert!(keys[2].is_nan());
    }
}
