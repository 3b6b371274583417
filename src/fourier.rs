//! The Fourier basis matrix used for direct (O(N^2)) DFT evaluation.
//!
//! The matrix is kept as two real, row-major `N x N` buffers so that each part can be handed to
//! a real matrix multiply on its own.
use std::f64::consts::PI;

use crate::error::{ensure_same_len, FftError};
use crate::scalar::Scalar;

/// A square complex matrix stored as separate real and imaginary row-major buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexMatrix<T> {
    real: Vec<T>,
    imag: Vec<T>,
    dim: usize,
}

impl<T: Scalar> ComplexMatrix<T> {
    /// Wrap existing row-major buffers as a `dim x dim` complex matrix.
    ///
    /// Returns [`FftError::InvalidSize`] if `dim` is zero or `dim * dim` overflows, and
    /// [`FftError::SizeMismatch`] if either buffer does not hold `dim * dim` elements.
    pub fn new(real: Vec<T>, imag: Vec<T>, dim: usize) -> Result<Self, FftError> {
        if dim == 0 {
            return Err(FftError::invalid_size(dim, "matrix dimension must be positive"));
        }
        let elements = square_len(dim)?;
        ensure_same_len("real matrix elements", elements, real.len())?;
        ensure_same_len("imaginary matrix elements", elements, imag.len())?;
        Ok(Self { real, imag, dim })
    }

    /// Number of rows (and columns).
    pub const fn dim(&self) -> usize {
        self.dim
    }

    /// The real part, row-major.
    pub fn real(&self) -> &[T] {
        &self.real
    }

    /// The imaginary part, row-major.
    pub fn imag(&self) -> &[T] {
        &self.imag
    }

    /// The element at (`row`, `col`) as a `(re, im)` pair.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is out of bounds.
    pub fn get(&self, row: usize, col: usize) -> (T, T) {
        assert!(row < self.dim && col < self.dim);
        let idx = row * self.dim + col;
        (self.real[idx], self.imag[idx])
    }
}

/// Number of elements of a `dim x dim` matrix.
pub(crate) fn square_len(dim: usize) -> Result<usize, FftError> {
    dim.checked_mul(dim)
        .ok_or_else(|| FftError::invalid_size(dim, "matrix element count overflows usize"))
}

/// Build the matrix `F` whose product with a length-`n` complex vector is that vector's DFT:
///
/// `Re(F)[r][c] = cos(2*pi*c*r/n)`, `Im(F)[r][c] = -sin(2*pi*c*r/n)`
///
/// It is the inverse of the Fourier basis (solving `y = B c` for the coefficients `c`), hence the
/// name.
///
/// Returns [`FftError::InvalidSize`] for `n == 0`.
pub fn inverse_fourier_matrix<T: Scalar>(n: usize) -> Result<ComplexMatrix<T>, FftError> {
    if n == 0 {
        return Err(FftError::invalid_size(
            n,
            "Fourier matrix dimension must be positive",
        ));
    }

    let two_pi_over_n = 2.0 * PI / n as f64;
    let mut real = vec![T::zero(); n * n];
    let mut imag = vec![T::zero(); n * n];

    real.chunks_exact_mut(n)
        .zip(imag.chunks_exact_mut(n))
        .enumerate()
        .for_each(|(row, (re_row, im_row))| {
            re_row
                .iter_mut()
                .zip(im_row.iter_mut())
                .enumerate()
                .for_each(|(col, (re, im))| {
                    // c*r and (c*r mod n) give the same root of unity
                    let phase = two_pi_over_n * ((row * col) % n) as f64;
                    let (sin, cos) = phase.sin_cos();
                    *re = T::from_f64(cos);
                    *im = T::from_f64(-sin);
                });
        });

    Ok(ComplexMatrix { real, imag, dim: n })
}
