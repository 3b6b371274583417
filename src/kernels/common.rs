//! Element-wise kernels
//!
//! Complex arithmetic on split real/imaginary buffers used by the recombination step of the
//! decimation-in-time FFT.
//!
use num_traits::Float;

/// Element-wise complex multiply `out = a * b`
///
/// `Re(out) = Re(a)*Re(b) - Im(a)*Im(b)`, `Im(out) = Re(a)*Im(b) + Im(a)*Re(b)`
///
/// # Panics
///
/// Panics if the slices are not all of the same length
#[multiversion::multiversion(targets(
    "x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
    "x86_64+avx2+fma",
    "x86_64+sse4.2",
    "x86+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    "aarch64+neon",
))]
#[inline]
pub fn complex_multiply<T: Float>(
    a_re: &[T],
    a_im: &[T],
    b_re: &[T],
    b_im: &[T],
    out_re: &mut [T],
    out_im: &mut [T],
) {
    let n = out_re.len();
    assert!(out_im.len() == n && a_re.len() == n && a_im.len() == n);
    assert!(b_re.len() == n && b_im.len() == n);

    out_re
        .iter_mut()
        .zip(out_im.iter_mut())
        .zip(a_re.iter().zip(a_im.iter()))
        .zip(b_re.iter().zip(b_im.iter()))
        .for_each(|(((z_re, z_im), (x_re, x_im)), (y_re, y_im))| {
            *z_re = *x_re * *y_re - *x_im * *y_im;
            *z_im = *x_re * *y_im + *x_im * *y_re;
        });
}

/// Radix-2 butterfly recombining two half-size transforms
///
/// `twiddled` is the odd half already multiplied by the twiddle factors. Writes `even + twiddled`
/// to the lower half of the output and `even - twiddled` to the upper half.
///
/// # Panics
///
/// Panics if the inputs are not all of length `out_re.len() / 2`, or `out_re.len() != out_im.len()`
#[multiversion::multiversion(targets(
    "x86_64+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
    "x86_64+avx2+fma",
    "x86_64+sse4.2",
    "x86+avx512f+avx512bw+avx512cd+avx512dq+avx512vl",
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    "aarch64+neon",
))]
#[inline]
pub fn butterfly<T: Float>(
    even_re: &[T],
    even_im: &[T],
    twiddled_re: &[T],
    twiddled_im: &[T],
    out_re: &mut [T],
    out_im: &mut [T],
) {
    let dist = even_re.len();
    assert_eq!(out_re.len(), dist << 1);
    assert_eq!(out_im.len(), dist << 1);
    assert!(even_im.len() == dist && twiddled_re.len() == dist && twiddled_im.len() == dist);

    let (lower_re, upper_re) = out_re.split_at_mut(dist);
    let (lower_im, upper_im) = out_im.split_at_mut(dist);

    lower_re
        .iter_mut()
        .zip(lower_im.iter_mut())
        .zip(upper_re.iter_mut().zip(upper_im.iter_mut()))
        .zip(even_re.iter().zip(even_im.iter()))
        .zip(twiddled_re.iter().zip(twiddled_im.iter()))
        .for_each(|((((lo_re, lo_im), (up_re, up_im)), (e_re, e_im)), (t_re, t_im))| {
            *lo_re = *e_re + *t_re;
            *lo_im = *e_im + *t_im;
            *up_re = *e_re - *t_re;
            *up_im = *e_im - *t_im;
        });
}
