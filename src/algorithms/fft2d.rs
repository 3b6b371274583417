//! 2-D FFT of a square matrix
//!
//! A batched 1-D transform is applied to every row, then to every column. The rows are handed
//! to the 1-D transform in `serialisation_factor` chunks, which bounds the width of the
//! right-hand sides of the matmuls at the cost of more (smaller) calls.
//!
use tracing::{debug, info, instrument};

use crate::algorithms::dit::execute;
use crate::batch::ComplexBatch;
use crate::error::{ensure_same_len, FftError};
use crate::fourier::square_len;
use crate::options::Options;
use crate::planner::{Direction, Plan};
use crate::scalar::Scalar;

/// 2-D FFT of a square `dim x dim` matrix given as row-major real and imaginary parts
///
/// Returns the transform as new row-major buffers.
///
/// # Errors
///
/// - [`FftError::SizeMismatch`] if either buffer does not hold `dim * dim` elements
/// - [`FftError::InvalidSize`] if `dim * dim` overflows, if `dim` cannot be planned with `opts` (see [`Plan::new`]), or if
///   `opts.serialisation_factor` is zero or does not divide `dim`
#[instrument(skip_all, fields(dim = dim), level = "debug")]
pub fn fft_2d<T: Scalar>(
    reals: &[T],
    imags: &[T],
    dim: usize,
    direction: Direction,
    opts: &Options,
) -> Result<(Vec<T>, Vec<T>), FftError> {
    let elements = square_len(dim)?;
    ensure_same_len("real matrix elements", elements, reals.len())?;
    ensure_same_len("imaginary matrix elements", elements, imags.len())?;

    let plan = Plan::new(dim, direction, opts)?;

    let factor = opts.serialisation_factor;
    if factor == 0 || dim % factor != 0 {
        return Err(FftError::invalid_size(
            dim,
            "the number of rows must be divisible by the serialisation factor",
        ));
    }
    let rows_per_call = dim / factor;

    info!("FFT-2D input shape: [{dim}, {dim}]");
    debug!(
        "Serialised FFT input shape: [{rows_per_call}, {dim}] serialisation-factor: {factor}"
    );
    debug!(
        "Serialised FFT FLOPS per call: {}",
        plan.flop_estimate(rows_per_call)
    );

    let mut matrix = ComplexBatch::from_parts(reals.to_vec(), imags.to_vec(), dim);

    // First pass transforms the rows, second pass the columns (the rows of the transpose).
    // Transposing after each pass restores the original orientation at the end.
    for _ in 0..2 {
        let mut transformed = ComplexBatch::zeros(dim, dim);
        for chunk in 0..factor {
            let first = chunk * rows_per_call;
            let rows = matrix.slice(first, rows_per_call);
            transformed.write(first, &execute(&rows, &plan, opts)?);
        }
        matrix = transformed.transpose();
    }

    Ok(matrix.into_parts())
}

#[cfg(test)]
mod tests {
    use utilities::{assert_float_closeness, rustfft_forward};

    use super::*;

    /// Row-then-column transform using RustFFT on each line
    fn reference_2d(reals: &[f64], imags: &[f64], dim: usize) -> (Vec<f64>, Vec<f64>) {
        let mut re = reals.to_vec();
        let mut im = imags.to_vec();

        for r in 0..dim {
            let (row_re, row_im) = rustfft_forward(&re[r * dim..(r + 1) * dim], &im[r * dim..(r + 1) * dim]);
            re[r * dim..(r + 1) * dim].copy_from_slice(&row_re);
            im[r * dim..(r + 1) * dim].copy_from_slice(&row_im);
        }

        for c in 0..dim {
            let col_re: Vec<f64> = (0..dim).map(|r| re[r * dim + c]).collect();
            let col_im: Vec<f64> = (0..dim).map(|r| im[r * dim + c]).collect();
            let (out_re, out_im) = rustfft_forward(&col_re, &col_im);
            for r in 0..dim {
                re[r * dim + c] = out_re[r];
                im[r * dim + c] = out_im[r];
            }
        }

        (re, im)
    }

    #[test]
    fn matches_reference() {
        for dim in [2, 4, 8, 16] {
            let reals: Vec<f64> = (1..=dim * dim).map(|i| i as f64).collect();
            let imags = reals.clone();
            let (expected_re, expected_im) = reference_2d(&reals, &imags, dim);

            for serialisation_factor in [1, 2] {
                let opts = Options {
                    serialisation_factor,
                    ..Options::default()
                };
                let (out_re, out_im) =
                    fft_2d(&reals, &imags, dim, Direction::Forward, &opts).unwrap();
                for i in 0..dim * dim {
                    assert_float_closeness(out_re[i], expected_re[i], 1e-8);
                    assert_float_closeness(out_im[i], expected_im[i], 1e-8);
                }
            }
        }
    }

    #[test]
    fn inverse_recovers_input() {
        let dim = 8;
        let reals: Vec<f64> = (0..dim * dim).map(|i| (i as f64 * 0.1).sin()).collect();
        let imags: Vec<f64> = (0..dim * dim).map(|i| (i as f64 * 0.2).cos()).collect();
        let opts = Options {
            radix: Some(2),
            ..Options::default()
        };

        let (freq_re, freq_im) = fft_2d(&reals, &imags, dim, Direction::Forward, &opts).unwrap();
        let (out_re, out_im) = fft_2d(&freq_re, &freq_im, dim, Direction::Reverse, &opts).unwrap();
        for i in 0..dim * dim {
            assert_float_closeness(out_re[i], reals[i], 1e-12);
            assert_float_closeness(out_im[i], imags[i], 1e-12);
        }
    }

    #[test]
    fn bad_serialisation_factor() {
        let data = vec![0.0f64; 16];
        for serialisation_factor in [0, 3] {
            let opts = Options {
                serialisation_factor,
                ..Options::default()
            };
            assert!(matches!(
                fft_2d(&data, &data, 4, Direction::Forward, &opts),
                Err(FftError::InvalidSize { size: 4, .. })
            ));
        }
    }

    #[test]
    fn not_square() {
        let data = vec![0.0f64; 12];
        assert!(matches!(
            fft_2d(&data, &data, 4, Direction::Forward, &Options::default()),
            Err(FftError::SizeMismatch { expected: 16, found: 12, .. })
        ));
    }

    #[test]
    fn huge_dim_is_invalid() {
        let data = vec![0.0f64; 4];
        assert!(matches!(
            fft_2d(&data, &data, usize::MAX, Direction::Forward, &Options::default()),
            Err(FftError::InvalidSize { size: usize::MAX, .. })
        ));
    }
}
