//! Dense real matrix products
//!
//! All operands are owned, contiguous, row-major buffers. The left-hand side is always square
//! (`n x n`, the Fourier matrix part) and the right-hand side is `n x width` (a batch of column
//! vectors).
//!
use num_traits::Float;

/// `out += lhs * rhs` with `lhs` of shape `n x n`, `rhs` and `out` of shape `n x width`
///
/// The inner loop walks a row of `rhs` and a row of `out` contiguously.
///
/// # Panics
///
/// Panics if the buffer lengths do not match the shapes
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
pub fn matmul_acc<T: Float>(out: &mut [T], lhs: &[T], rhs: &[T], n: usize, width: usize) {
    assert_eq!(lhs.len(), n * n);
    assert_eq!(rhs.len(), n * width);
    assert_eq!(out.len(), n * width);

    if width == 0 {
        return;
    }

    out.chunks_exact_mut(width)
        .zip(lhs.chunks_exact(n))
        .for_each(|(out_row, lhs_row)| {
            lhs_row
                .iter()
                .zip(rhs.chunks_exact(width))
                .for_each(|(a, rhs_row)| {
                    out_row
                        .iter_mut()
                        .zip(rhs_row.iter())
                        .for_each(|(o, b)| *o = *o + *a * *b);
                });
        });
}

/// `lhs * rhs` into a freshly allocated `n x width` buffer
///
/// # Panics
///
/// Panics if the buffer lengths do not match the shapes
pub fn matmul<T: Float>(lhs: &[T], rhs: &[T], n: usize, width: usize) -> Vec<T> {
    let mut out = vec![T::zero(); n * width];
    matmul_acc(&mut out, lhs, rhs, n, width);
    out
}
