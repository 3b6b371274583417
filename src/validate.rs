//! Checking transform results against a trusted reference.
//!
//! [`naive_dft`] evaluates the DFT sum directly in double precision without going through the
//! Fourier matrices or the batched matmul, so it is independent of the code under test.
//! [`compare`] applies the usual `|actual - expected| <= absolute + relative * |expected|`
//! closeness test element by element.
use std::f64::consts::PI;

use crate::error::{ensure_same_len, FftError};
use crate::scalar::Scalar;

/// Allowed deviation from a reference value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// Allowed deviation as a fraction of the reference value's magnitude.
    pub relative: f64,
    /// Allowed deviation independent of the reference value.
    pub absolute: f64,
}

impl Default for Tolerance {
    /// `relative = 1e-5`, `absolute = 1e-8`
    fn default() -> Self {
        Self {
            relative: 1e-5,
            absolute: 1e-8,
        }
    }
}

impl Tolerance {
    /// The allowed deviation from `expected`.
    pub fn bound(&self, expected: f64) -> f64 {
        self.absolute + self.relative * expected.abs()
    }
}

/// Direct O(N^2) evaluation of the DFT sum `X[k] = sum_j x[j] * exp(-2*pi*i*j*k/N)`.
///
/// Returns [`FftError::SizeMismatch`] if the real and imaginary parts differ in length.
pub fn naive_dft<T: Scalar>(reals: &[T], imags: &[T]) -> Result<(Vec<T>, Vec<T>), FftError> {
    ensure_same_len("imaginary input length", reals.len(), imags.len())?;
    let n = reals.len();

    Ok((0..n)
        .map(|k| {
            let (sum_re, sum_im) = reals.iter().zip(imags.iter()).enumerate().fold(
                (0.0, 0.0),
                |(acc_re, acc_im), (j, (x_re, x_im))| {
                    let phase = -2.0 * PI * ((j * k) % n) as f64 / n as f64;
                    let (sin, cos) = phase.sin_cos();
                    let (x_re, x_im) = (x_re.as_f64(), x_im.as_f64());
                    (
                        acc_re + x_re * cos - x_im * sin,
                        acc_im + x_re * sin + x_im * cos,
                    )
                },
            );
            (T::from_f64(sum_re), T::from_f64(sum_im))
        })
        .unzip())
}

/// Check every element of `actual` against `expected`.
///
/// Returns [`FftError::SizeMismatch`] if the lengths differ and
/// [`FftError::ToleranceExceeded`] for the first element outside the tolerance (a NaN is never
/// within tolerance).
pub fn compare<T: Scalar>(actual: &[T], expected: &[T], tolerance: &Tolerance) -> Result<(), FftError> {
    ensure_same_len("compared length", expected.len(), actual.len())?;

    actual
        .iter()
        .zip(expected.iter())
        .enumerate()
        .try_for_each(|(index, (a, e))| {
            let (actual, expected) = (a.as_f64(), e.as_f64());
            let bound = tolerance.bound(expected);
            if (actual - expected).abs() <= bound {
                Ok(())
            } else {
                Err(FftError::ToleranceExceeded {
                    index,
                    actual,
                    expected,
                    tolerance: bound,
                })
            }
        })
}

/// [`compare`] for split complex values: the real parts are checked first, then the imaginary
/// parts.
pub fn compare_complex<T: Scalar>(
    actual_re: &[T],
    actual_im: &[T],
    expected_re: &[T],
    expected_im: &[T],
    tolerance: &Tolerance,
) -> Result<(), FftError> {
    compare(actual_re, expected_re, tolerance)?;
    compare(actual_im, expected_im, tolerance)
}

/// Largest absolute element-wise difference between two complex vectors.
///
/// # Panics
///
/// Panics if the slices differ in length
pub fn max_abs_error<T: Scalar>(actual_re: &[T], actual_im: &[T], expected_re: &[T], expected_im: &[T]) -> f64 {
    assert!(actual_re.len() == actual_im.len() && expected_re.len() == expected_im.len());
    assert_eq!(actual_re.len(), expected_re.len());

    actual_re
        .iter()
        .zip(expected_re.iter())
        .chain(actual_im.iter().zip(expected_im.iter()))
        .map(|(a, e)| (a.as_f64() - e.as_f64()).abs())
        .fold(0.0, f64::max)
}
