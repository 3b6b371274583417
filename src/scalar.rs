//! Floating point element type of the transforms.
use std::fmt::{Debug, Display};

use num_traits::{Float, FloatConst};

/// Real scalar the transforms operate on, implemented for `f32` and `f64`.
///
/// Phases are evaluated in `f64` and narrowed with [`Scalar::from_f64`], so single precision
/// matrices and twiddles carry the same (rounded) values a double precision build would.
pub trait Scalar: Float + FloatConst + Debug + Display + Send + Sync + 'static {
    /// Narrow (or keep) a double precision value.
    fn from_f64(value: f64) -> Self;

    /// Widen to double precision.
    fn as_f64(self) -> f64;

    /// Convert a length or index.
    fn from_usize(value: usize) -> Self;
}

macro_rules! impl_scalar_for {
    ($precision:ty) => {
        impl Scalar for $precision {
            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $precision
            }

            #[inline]
            fn as_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_usize(value: usize) -> Self {
                value as $precision
            }
        }
    };
}

impl_scalar_for!(f32);
impl_scalar_for!(f64);
