//! A radix-2 Cooley-Tukey FFT whose DFT sub-problems are evaluated as real matrix
//! multiplications.
//!
//! Complex vectors are always kept as separate real and imaginary buffers. The DFT of the even
//! and odd halves of the input is computed for the whole batch at once with exactly two dense
//! real matrix products (see [`batched_complex_matmul`]), the form a matrix-multiply accelerator
//! can execute, and the halves are recombined with twiddle-weighted butterflies.
//!
//! ```
//! let reals: [f64; 4] = [1.0, 1.0, 1.0, 1.0];
//! let imags = [0.0; 4];
//! let (out_re, out_im) = matfft::fft(&reals, &imags).unwrap();
//! assert!((out_re[0] - 4.0).abs() < 1e-12);
//! assert!(out_re[1..].iter().chain(&out_im).all(|z| z.abs() < 1e-12));
//! ```
#![warn(
    missing_docs,
    clippy::complexity,
    clippy::perf,
    clippy::style,
    clippy::correctness,
    clippy::suspicious
)]
#![forbid(unsafe_code)]

#[cfg(feature = "complex-nums")]
use bytemuck::Pod;
#[cfg(feature = "complex-nums")]
use num_complex::Complex;
use tracing::instrument;

use crate::batch::{multiply_batch, ComplexBatch};
use crate::error::ensure_same_len;
#[cfg(feature = "complex-nums")]
use crate::utils::{combine_re_im, deinterleave_complex};

pub use crate::algorithms::fft2d::fft_2d;
pub use crate::batch::{batched_complex_matmul, batched_complex_matmul_with_opts};
pub use crate::error::FftError;
pub use crate::fourier::{inverse_fourier_matrix, ComplexMatrix};
pub use crate::options::Options;
pub use crate::planner::{Direction, Plan};
pub use crate::scalar::Scalar;
pub use crate::twiddles::twiddle_coefficients;

mod algorithms;
mod batch;
mod error;
mod fourier;
mod kernels;
/// Tuning options for the transforms.
pub mod options;
mod parallel;
pub mod planner;
mod scalar;
mod twiddles;
mod utils;
pub mod validate;

/// Forward FFT of a complex signal given as separate real and imaginary parts, with options
/// chosen by [`Options::guess_options`].
///
/// Performs a single decimation level: the DFTs of the even and odd halves are computed
/// together by the batched complex matmul.
///
/// # Errors
///
/// - [`FftError::SizeMismatch`] if `reals.len() != imags.len()`
/// - [`FftError::InvalidSize`] if the length is zero or odd
pub fn fft<T: Scalar>(reals: &[T], imags: &[T]) -> Result<(Vec<T>, Vec<T>), FftError> {
    let opts = Options::guess_options(reals.len());
    fft_with_opts(reals, imags, Direction::Forward, &opts)
}

/// Inverse FFT, scaled by `1 / N` so that `ifft(fft(x)) == x`.
///
/// # Errors
///
/// Same as [`fft`]
pub fn ifft<T: Scalar>(reals: &[T], imags: &[T]) -> Result<(Vec<T>, Vec<T>), FftError> {
    let opts = Options::guess_options(reals.len());
    fft_with_opts(reals, imags, Direction::Reverse, &opts)
}

/// FFT in the given [`Direction`] with explicit [`Options`].
///
/// # Errors
///
/// - [`FftError::SizeMismatch`] if `reals.len() != imags.len()`
/// - [`FftError::InvalidSize`] if the length cannot be planned with `opts` (see [`Plan::new`])
#[instrument(skip_all, fields(size = reals.len()), level = "debug")]
pub fn fft_with_opts<T: Scalar>(
    reals: &[T],
    imags: &[T],
    direction: Direction,
    opts: &Options,
) -> Result<(Vec<T>, Vec<T>), FftError> {
    ensure_same_len("imaginary input length", reals.len(), imags.len())?;
    let plan = Plan::new(reals.len(), direction, opts)?;

    let input = ComplexBatch::from_parts(reals.to_vec(), imags.to_vec(), reals.len());
    Ok(algorithms::dit::execute(&input, &plan, opts)?.into_parts())
}

/// FFT of every vector in a batch of equally long complex vectors.
///
/// The vectors are transformed together, so the direct DFT at the bottom of the recursion is a
/// single batched matmul for the whole batch. Results are returned in input order.
///
/// # Errors
///
/// - [`FftError::SizeMismatch`] if the number of real and imaginary vectors differs or the
///   vectors are not all of the same length
/// - [`FftError::InvalidSize`] if the length cannot be planned with `opts`
#[instrument(skip_all, fields(batch = reals.len()), level = "debug")]
pub fn fft_batch<T: Scalar, R: AsRef<[T]>>(
    reals: &[R],
    imags: &[R],
    direction: Direction,
    opts: &Options,
) -> Result<(Vec<Vec<T>>, Vec<Vec<T>>), FftError> {
    let input = ComplexBatch::from_vectors(reals, imags)?;
    if input.count() == 0 {
        return Ok((Vec::new(), Vec::new()));
    }

    let plan = Plan::new(input.len(), direction, opts)?;
    Ok(algorithms::dit::execute(&input, &plan, opts)?.into_vectors())
}

/// Direct O(N^2) DFT: one multiply by the Fourier matrix through the batched complex matmul.
///
/// Works for any positive length.
///
/// # Errors
///
/// - [`FftError::SizeMismatch`] if `reals.len() != imags.len()`
/// - [`FftError::InvalidSize`] if the length is zero
pub fn dft<T: Scalar>(reals: &[T], imags: &[T]) -> Result<(Vec<T>, Vec<T>), FftError> {
    ensure_same_len("imaginary input length", reals.len(), imags.len())?;
    let fourier_matrix = inverse_fourier_matrix::<T>(reals.len())?;

    let input = ComplexBatch::from_parts(reals.to_vec(), imags.to_vec(), reals.len());
    let opts = Options::guess_options(reals.len());
    Ok(multiply_batch(&fourier_matrix, &input, &opts)?.into_parts())
}

/// FFT of a signal of [`Complex`] numbers.
///
/// # Errors
///
/// Same as [`fft_with_opts`]
#[cfg(feature = "complex-nums")]
pub fn fft_complex<T: Scalar + Pod>(
    signal: &[Complex<T>],
    direction: Direction,
    opts: &Options,
) -> Result<Vec<Complex<T>>, FftError> {
    let (reals, imags) = deinterleave_complex(signal);
    let (out_re, out_im) = fft_with_opts(&reals, &imags, direction, opts)?;
    Ok(combine_re_im(&out_re, &out_im))
}
