use std::f64::consts::PI;

use crate::error::FftError;
use crate::scalar::Scalar;

/// Generate the `n / 2` coefficients that recombine the two half-size transforms of a
/// length-`n` transform:
///
/// `w_re[k] = cos(2*pi*k*(n-1)/n)`, `w_im[k] = sin(2*pi*k*(n-1)/n)`
///
/// i.e. `w[k] = exp(-2*pi*i*k/n)`, the factors applied to the odd half before the butterflies.
///
/// Returns [`FftError::InvalidSize`] if `n` is zero or odd.
pub fn twiddle_coefficients<T: Scalar>(n: usize) -> Result<(Vec<T>, Vec<T>), FftError> {
    if n == 0 {
        return Err(FftError::invalid_size(n, "twiddle size must be positive"));
    }
    if n % 2 != 0 {
        return Err(FftError::invalid_size(n, "twiddle size must be a multiple of 2"));
    }

    let dist = n / 2;
    let mut twiddles_re = vec![T::zero(); dist];
    let mut twiddles_im = vec![T::zero(); dist];

    let two_pi_over_n = 2.0 * PI / n as f64;
    twiddles_re
        .iter_mut()
        .zip(twiddles_im.iter_mut())
        .enumerate()
        .for_each(|(k, (re, im))| {
            let phase = two_pi_over_n * ((k * (n - 1)) % n) as f64;
            let (sin, cos) = phase.sin_cos();
            *re = T::from_f64(cos);
            *im = T::from_f64(sin);
        });

    Ok((twiddles_re, twiddles_im))
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_1_SQRT_2;

    use utilities::assert_float_closeness;

    use super::*;

    #[test]
    fn twiddles_8() {
        const N: usize = 8;
        let (w_re, w_im) = twiddle_coefficients::<f64>(N).unwrap();
        assert_eq!(w_re.len(), N / 2);
        assert_eq!(w_im.len(), N / 2);

        let expected = [
            (1.0, 0.0),
            (FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
            (0.0, -1.0),
            (-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
        ];
        for ((re, im), (e_re, e_im)) in w_re.iter().zip(w_im.iter()).zip(expected) {
            assert_float_closeness(*re, e_re, 1e-10);
            assert_float_closeness(*im, e_im, 1e-10);
        }
    }

    #[test]
    fn twiddles_2() {
        let (w_re, w_im) = twiddle_coefficients::<f32>(2).unwrap();
        assert_eq!(w_re, vec![1.0]);
        assert_eq!(w_im, vec![0.0]);
    }

    #[test]
    fn roots_of_unity() {
        for n in [4, 6, 16, 1024] {
            let (w_re, w_im) = twiddle_coefficients::<f64>(n).unwrap();
            for (k, (re, im)) in w_re.iter().zip(w_im.iter()).enumerate() {
                let angle = -2.0 * PI * k as f64 / n as f64;
                assert_float_closeness(*re, angle.cos(), 1e-10);
                assert_float_closeness(*im, angle.sin(), 1e-10);
            }
        }
    }

    #[test]
    fn invalid_sizes() {
        for n in [0, 1, 3, 7] {
            assert!(matches!(
                twiddle_coefficients::<f64>(n),
                Err(FftError::InvalidSize { size, .. }) if size == n
            ));
        }
    }
}
