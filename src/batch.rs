//! Batched complex matrix-vector products computed with two real matrix multiplies.
//!
//! For a complex matrix `M` and a batch of complex column vectors `V`,
//!
//! `M * V = [Re(M)*Re(V) - Im(M)*Im(V)] + i[Im(M)*Re(V) + Re(M)*Im(V)]`
//!
//! which is evaluated by concatenating the vectors into two real `n x 2k` right-hand sides:
//!
//! `Re(M) * [ Re(V) : Im(V) ] + Im(M) * [ -Im(V) : Re(V) ]`
//!
//! The first `k` columns of the sum are the real parts of the results and the last `k` columns
//! the imaginary parts. However large the batch, only two dense products are formed.
use tracing::debug;

use crate::error::{ensure_same_len, FftError};
use crate::fourier::ComplexMatrix;
use crate::kernels::matmul::matmul;
use crate::options::Options;
use crate::parallel::run_maybe_in_parallel;
use crate::scalar::Scalar;
use crate::utils::deinterleave;

/// An ordered batch of `count` complex vectors of length `len`.
///
/// Vector `j` occupies `re[j * len..(j + 1) * len]` and the same range of `im`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ComplexBatch<T> {
    re: Vec<T>,
    im: Vec<T>,
    len: usize,
    count: usize,
}

impl<T: Scalar> ComplexBatch<T> {
    pub(crate) fn zeros(len: usize, count: usize) -> Self {
        Self {
            re: vec![T::zero(); len * count],
            im: vec![T::zero(); len * count],
            len,
            count,
        }
    }

    /// Wrap packed buffers holding `re.len() / len` vectors.
    ///
    /// # Panics
    ///
    /// Panics if the buffers differ in length, or `len` is zero or does not divide it.
    pub(crate) fn from_parts(re: Vec<T>, im: Vec<T>, len: usize) -> Self {
        assert_eq!(re.len(), im.len());
        assert!(len > 0 && re.len() % len == 0);
        let count = re.len() / len;
        Self { re, im, len, count }
    }

    /// Pack separate real and imaginary vectors, checking that counts and lengths agree.
    pub(crate) fn from_vectors<R: AsRef<[T]>>(reals: &[R], imags: &[R]) -> Result<Self, FftError> {
        ensure_same_len("imaginary vector count", reals.len(), imags.len())?;

        let len = reals.first().map_or(0, |v| v.as_ref().len());
        let count = reals.len();
        let mut re = Vec::with_capacity(len * count);
        let mut im = Vec::with_capacity(len * count);

        for (v_re, v_im) in reals.iter().zip(imags.iter()) {
            let (v_re, v_im) = (v_re.as_ref(), v_im.as_ref());
            ensure_same_len("real vector length", len, v_re.len())?;
            ensure_same_len("imaginary vector length", len, v_im.len())?;
            re.extend_from_slice(v_re);
            im.extend_from_slice(v_im);
        }

        Ok(Self { re, im, len, count })
    }

    pub(crate) fn into_vectors(self) -> (Vec<Vec<T>>, Vec<Vec<T>>) {
        (0..self.count)
            .map(|j| {
                let (v_re, v_im) = self.vector(j);
                (v_re.to_vec(), v_im.to_vec())
            })
            .unzip()
    }

    pub(crate) fn into_parts(self) -> (Vec<T>, Vec<T>) {
        (self.re, self.im)
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn vector(&self, j: usize) -> (&[T], &[T]) {
        let range = j * self.len..(j + 1) * self.len;
        (&self.re[range.clone()], &self.im[range])
    }

    pub(crate) fn vector_mut(&mut self, j: usize) -> (&mut [T], &mut [T]) {
        let range = j * self.len..(j + 1) * self.len;
        (&mut self.re[range.clone()], &mut self.im[range])
    }

    /// Consecutive vectors `first..first + count` as a batch of their own.
    pub(crate) fn slice(&self, first: usize, count: usize) -> Self {
        let range = first * self.len..(first + count) * self.len;
        Self {
            re: self.re[range.clone()].to_vec(),
            im: self.im[range].to_vec(),
            len: self.len,
            count,
        }
    }

    /// Overwrite vectors starting at `first` with the vectors of `other`.
    ///
    /// # Panics
    ///
    /// Panics if the vector lengths differ or `other` does not fit.
    pub(crate) fn write(&mut self, first: usize, other: &Self) {
        assert_eq!(self.len, other.len);
        let start = first * self.len;
        let end = start + other.re.len();
        self.re[start..end].copy_from_slice(&other.re);
        self.im[start..end].copy_from_slice(&other.im);
    }

    /// Split every vector into its even and odd indexed elements.
    ///
    /// The result holds `2 * count` vectors of length `len / 2`: the even halves of all vectors
    /// in order, followed by the odd halves in the same order.
    pub(crate) fn split_even_odd(&self) -> Self {
        let half = self.len / 2;
        let mut out = Self::zeros(half, 2 * self.count);

        for j in 0..self.count {
            let (v_re, v_im) = self.vector(j);
            let (even_re, odd_re) = deinterleave(v_re);
            let (even_im, odd_im) = deinterleave(v_im);

            let (out_re, out_im) = out.vector_mut(j);
            out_re.copy_from_slice(&even_re);
            out_im.copy_from_slice(&even_im);

            let (out_re, out_im) = out.vector_mut(self.count + j);
            out_re.copy_from_slice(&odd_re);
            out_im.copy_from_slice(&odd_im);
        }

        out
    }

    /// Swap the roles of vector index and element index.
    pub(crate) fn transpose(&self) -> Self {
        let mut out = Self::zeros(self.count, self.len);
        for j in 0..self.count {
            for c in 0..self.len {
                out.re[c * self.count + j] = self.re[j * self.len + c];
                out.im[c * self.count + j] = self.im[j * self.len + c];
            }
        }
        out
    }

    /// Negate every imaginary part.
    pub(crate) fn conjugate(&mut self) {
        self.im.iter_mut().for_each(|z_im| *z_im = -*z_im);
    }

    pub(crate) fn scale(&mut self, factor: T) {
        self.re
            .iter_mut()
            .chain(self.im.iter_mut())
            .for_each(|z| *z = *z * factor);
    }
}

/// Multiply every vector of `batch` by `matrix` using two real matrix products.
pub(crate) fn multiply_batch<T: Scalar>(
    matrix: &ComplexMatrix<T>,
    batch: &ComplexBatch<T>,
    opts: &Options,
) -> Result<ComplexBatch<T>, FftError> {
    let n = matrix.dim();
    let k = batch.count();
    if k == 0 {
        return Ok(ComplexBatch::zeros(n, 0));
    }
    ensure_same_len("vector length", n, batch.len())?;

    let width = 2 * k;
    let mut re_batch = vec![T::zero(); n * width];
    let mut im_batch = vec![T::zero(); n * width];

    // Column j of each right-hand side holds vector j; row r holds element r of every vector
    for j in 0..k {
        let (v_re, v_im) = batch.vector(j);
        for (r, (z_re, z_im)) in v_re.iter().zip(v_im.iter()).enumerate() {
            let row = r * width;
            re_batch[row + j] = *z_re;
            re_batch[row + k + j] = *z_im;
            im_batch[row + j] = -*z_im;
            im_batch[row + k + j] = *z_re;
        }
    }

    debug!("DFT Re-Matmul shape: [{n}, {n}] x [{n}, {width}]");
    debug!("DFT Im-Matmul shape: [{n}, {n}] x [{n}, {width}]");

    let (mut partial, imag_partial) = run_maybe_in_parallel(
        opts.multithreaded_matmul,
        || matmul(matrix.real(), &re_batch, n, width),
        || matmul(matrix.imag(), &im_batch, n, width),
    );
    partial
        .iter_mut()
        .zip(imag_partial.iter())
        .for_each(|(p, q)| *p = *p + *q);

    let mut out = ComplexBatch::zeros(n, k);
    for j in 0..k {
        let (out_re, out_im) = out.vector_mut(j);
        for (r, (z_re, z_im)) in out_re.iter_mut().zip(out_im.iter_mut()).enumerate() {
            *z_re = partial[r * width + j];
            *z_im = partial[r * width + k + j];
        }
    }

    Ok(out)
}

/// Compute `matrix * v` for every complex vector `v` of a batch, with options chosen by
/// [`Options::guess_options`].
///
/// The batch is given as `reals[j]`, `imags[j]` pairs; results come back in the same order.
///
/// Returns [`FftError::SizeMismatch`] if the number of real vectors differs from the number of
/// imaginary vectors, or if any vector's length differs from the matrix dimension.
pub fn batched_complex_matmul<T: Scalar, R: AsRef<[T]>>(
    matrix: &ComplexMatrix<T>,
    reals: &[R],
    imags: &[R],
) -> Result<(Vec<Vec<T>>, Vec<Vec<T>>), FftError> {
    let opts = Options::guess_options(matrix.dim());
    batched_complex_matmul_with_opts(matrix, reals, imags, &opts)
}

/// [`batched_complex_matmul`] with explicit options.
pub fn batched_complex_matmul_with_opts<T: Scalar, R: AsRef<[T]>>(
    matrix: &ComplexMatrix<T>,
    reals: &[R],
    imags: &[R],
    opts: &Options,
) -> Result<(Vec<Vec<T>>, Vec<Vec<T>>), FftError> {
    let batch = ComplexBatch::from_vectors(reals, imags)?;
    Ok(multiply_batch(matrix, &batch, opts)?.into_vectors())
}
