//! Decimation-in-Time (DIT) FFT Implementation
//!
//! Radix-2 Cooley-Tukey where the DFT sub-problems are evaluated by matrix multiplication.
//!
//! ## Algorithm Overview
//!
//! 1. Split every vector of the batch into its even and odd indexed halves, folding the halves
//!    into one batch of twice the size (all even halves first, then all odd halves)
//! 2. Transform the folded batch: recursively while the plan has levels left, otherwise as a
//!    direct DFT through the batched complex matmul with the Fourier matrix of half the size
//! 3. Multiply each transformed odd half by the twiddle factors of the current size
//! 4. Butterflies: `even + twiddled` is the lower half of the result, `even - twiddled` the
//!    upper half
//!
//! The inverse transform conjugates the input and output of the forward transform and scales
//! by `1 / N`.
//!
use tracing::{debug, instrument};

use crate::batch::{multiply_batch, ComplexBatch};
use crate::error::{ensure_same_len, FftError};
use crate::fourier::inverse_fourier_matrix;
use crate::kernels::common::{butterfly, complex_multiply};
use crate::options::Options;
use crate::planner::{Direction, Plan};
use crate::scalar::Scalar;
use crate::twiddles::twiddle_coefficients;

/// Transform every vector of `input` according to `plan`.
///
/// Returns [`FftError::SizeMismatch`] if the vector length is not the planned size.
#[instrument(skip_all, fields(size = plan.size(), batch = input.count()), level = "debug")]
pub(crate) fn execute<T: Scalar>(
    input: &ComplexBatch<T>,
    plan: &Plan,
    opts: &Options,
) -> Result<ComplexBatch<T>, FftError> {
    if input.count() == 0 {
        return Ok(input.clone());
    }
    ensure_same_len("transform length", plan.size(), input.len())?;

    match plan.direction() {
        Direction::Forward => recursive_dit_fft(input, 0, plan, opts),
        Direction::Reverse => {
            let mut conjugated = input.clone();
            conjugated.conjugate();

            let mut output = recursive_dit_fft(&conjugated, 0, plan, opts)?;
            output.conjugate();
            output.scale(T::one() / T::from_usize(plan.size()));
            Ok(output)
        }
    }
}

/// One decimation level for the whole batch, recursing into the folded halves.
fn recursive_dit_fft<T: Scalar>(
    input: &ComplexBatch<T>,
    level: usize,
    plan: &Plan,
    opts: &Options,
) -> Result<ComplexBatch<T>, FftError> {
    let size = input.len();
    let half = size / 2;
    let count = input.count();

    let folded = input.split_even_odd();

    let sub_result = if level + 1 == plan.levels().len() {
        // Reached the base size: finish with the DFT matrices
        let fourier_matrix = inverse_fourier_matrix::<T>(half)?;
        let sub_result = multiply_batch(&fourier_matrix, &folded, opts)?;
        debug!(
            "DFT-1D result shape: [{}, {}]",
            sub_result.count(),
            sub_result.len()
        );
        sub_result
    } else {
        debug!(
            "Recursive FFT-1D. Sub-problem input shape: [{}, {}]",
            folded.count(),
            folded.len()
        );
        recursive_dit_fft(&folded, level + 1, plan, opts)?
    };

    let (twiddles_re, twiddles_im) = twiddle_coefficients::<T>(size)?;

    let mut output = ComplexBatch::zeros(size, count);
    let mut twiddled_re = vec![T::zero(); half];
    let mut twiddled_im = vec![T::zero(); half];

    for j in 0..count {
        let (even_re, even_im) = sub_result.vector(j);
        let (odd_re, odd_im) = sub_result.vector(count + j);

        complex_multiply(
            &twiddles_re,
            &twiddles_im,
            odd_re,
            odd_im,
            &mut twiddled_re,
            &mut twiddled_im,
        );

        let (out_re, out_im) = output.vector_mut(j);
        butterfly(even_re, even_im, &twiddled_re, &twiddled_im, out_re, out_im);
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use utilities::{assert_float_closeness, gen_random_signal, rustfft_forward};

    use super::*;

    fn run(reals: &[f64], imags: &[f64], direction: Direction, opts: &Options) -> (Vec<f64>, Vec<f64>) {
        let plan = Plan::new(reals.len(), direction, opts).unwrap();
        let batch = ComplexBatch::from_parts(reals.to_vec(), imags.to_vec(), reals.len());
        execute(&batch, &plan, opts).unwrap().into_parts()
    }

    #[test]
    fn every_radix_agrees_with_rustfft() {
        for k in 1..=9 {
            let n = 1 << k;
            let mut reals = vec![0.0; n];
            let mut imags = vec![0.0; n];
            gen_random_signal(&mut reals, &mut imags);
            let (expected_re, expected_im) = rustfft_forward(&reals, &imags);

            let mut radix = 1;
            while radix <= n / 2 {
                let opts = Options {
                    radix: Some(radix),
                    ..Options::default()
                };
                let (out_re, out_im) = run(&reals, &imags, Direction::Forward, &opts);
                for i in 0..n {
                    assert_float_closeness(out_re[i], expected_re[i], 1e-9);
                    assert_float_closeness(out_im[i], expected_im[i], 1e-9);
                }
                radix <<= 1;
            }
        }
    }

    #[test]
    fn non_power_of_two_radix() {
        // 24 = 3 * 2^3
        let n = 24;
        let reals: Vec<f64> = (0..n).map(|i| (i as f64 * 0.3).sin()).collect();
        let imags: Vec<f64> = (0..n).map(|i| (i as f64 * 0.7).cos()).collect();
        let (expected_re, expected_im) = rustfft_forward(&reals, &imags);

        let opts = Options {
            radix: Some(3),
            ..Options::default()
        };
        let (out_re, out_im) = run(&reals, &imags, Direction::Forward, &opts);
        for i in 0..n {
            assert_float_closeness(out_re[i], expected_re[i], 1e-9);
            assert_float_closeness(out_im[i], expected_im[i], 1e-9);
        }
    }

    #[test]
    fn batch_keeps_order() {
        let n = 16;
        let reals: Vec<Vec<f64>> = (0..3)
            .map(|j| (0..n).map(|i| (i * (j + 1)) as f64).collect())
            .collect();
        let imags: Vec<Vec<f64>> = (0..3)
            .map(|j| (0..n).map(|i| (n - i + j) as f64).collect())
            .collect();

        let opts = Options {
            radix: Some(2),
            ..Options::default()
        };
        let plan = Plan::new(n, Direction::Forward, &opts).unwrap();
        let batch = ComplexBatch::from_vectors(&reals, &imags).unwrap();
        let (out_re, out_im) = execute(&batch, &plan, &opts).unwrap().into_vectors();

        for j in 0..3 {
            let (expected_re, expected_im) = rustfft_forward(&reals[j], &imags[j]);
            for i in 0..n {
                assert_float_closeness(out_re[j][i], expected_re[i], 1e-9);
                assert_float_closeness(out_im[j][i], expected_im[i], 1e-9);
            }
        }
    }

    #[test]
    fn inverse_recovers_input() {
        let n = 64;
        let mut reals = vec![0.0; n];
        let mut imags = vec![0.0; n];
        gen_random_signal(&mut reals, &mut imags);

        let opts = Options::default();
        let (freq_re, freq_im) = run(&reals, &imags, Direction::Forward, &opts);
        let (out_re, out_im) = run(&freq_re, &freq_im, Direction::Reverse, &opts);

        for i in 0..n {
            assert_float_closeness(out_re[i], reals[i], 1e-12);
            assert_float_closeness(out_im[i], imags[i], 1e-12);
        }
    }

    #[test]
    fn wrong_length_for_plan() {
        let opts = Options::default();
        let plan = Plan::new(8, Direction::Forward, &opts).unwrap();
        let batch = ComplexBatch::from_parts(vec![0.0f64; 4], vec![0.0; 4], 4);
        assert!(matches!(
            execute(&batch, &plan, &opts),
            Err(FftError::SizeMismatch { expected: 8, found: 4, .. })
        ));
    }
}
