//! Utility functions such as interleave/deinterleave

#[cfg(feature = "complex-nums")]
use num_complex::Complex;

#[cfg(feature = "complex-nums")]
use num_traits::Float;

#[cfg(feature = "complex-nums")]
use bytemuck::{cast_slice, Pod};

#[multiversion::multiversion(
    targets(
    "x86_64+avx2+fma", // x86_64-v3
    "x86_64+sse4.2", // x86_64-v2
    "x86+avx2+fma",
    "x86+sse4.2",
    "x86+sse2",
    ))]
/// Separates data like `[1, 2, 3, 4]` into `([1, 3], [2, 4])` for any length
///
/// A trailing element of an odd-length input is dropped.
pub(crate) fn deinterleave<T: Copy>(input: &[T]) -> (Vec<T>, Vec<T>) {
    let out_len = input.len() / 2;
    let mut out_even = Vec::with_capacity(out_len);
    let mut out_odd = Vec::with_capacity(out_len);

    input.chunks_exact(2).for_each(|pair| {
        out_even.push(pair[0]);
        out_odd.push(pair[1]);
    });

    (out_even, out_odd)
}

/// Utility function to separate a slice of [`Complex`] numbers
/// into separate vectors of real and imaginary components.
#[cfg(feature = "complex-nums")]
pub(crate) fn deinterleave_complex<T: Pod>(signal: &[Complex<T>]) -> (Vec<T>, Vec<T>) {
    let complex_t: &[T] = cast_slice(signal);
    deinterleave(complex_t)
}

/// Utility function to combine separate vectors of real and imaginary components
/// into a single vector of Complex Number Structs.
///
/// # Panics
///
/// Panics if `reals.len() != imags.len()`.
#[cfg(feature = "complex-nums")]
pub(crate) fn combine_re_im<T: Float>(reals: &[T], imags: &[T]) -> Vec<Complex<T>> {
    assert_eq!(reals.len(), imags.len());

    reals
        .iter()
        .zip(imags.iter())
        .map(|(z_re, z_im)| Complex::new(*z_re, *z_im))
        .collect()
}
