/// Options to tune the transforms depending on the hardware and input size.
///
/// Calling FFT routines without specifying options will automatically select reasonable defaults
/// depending on the input size and other factors.
///
/// You only need to tune these options if you are trying to match a particular accelerator
/// layout, or to squeeze maximum performance out of a known hardware platform.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Size of the direct DFT evaluated at the bottom of the recursion.
    ///
    /// `None` (or `Some(0)`) means half the transform length: a single decimation level whose
    /// two halves go straight to the matrix multiply. Smaller values recurse deeper, down to a
    /// DFT of exactly this size, and require the transform length to be `radix * 2^k`. Values
    /// above half the transform length are clamped to it.
    pub radix: Option<usize>,
    /// Evaluate the two real matrix products of the batched complex matmul on two threads.
    pub multithreaded_matmul: bool,
    /// Number of row chunks a 2-D transform is split into. Must divide the number of rows.
    pub serialisation_factor: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            radix: None,
            multithreaded_matmul: false,
            serialisation_factor: 1,
        }
    }
}

impl Options {
    /// Options for a transform of length `input_size`.
    pub fn guess_options(input_size: usize) -> Self {
        let mut options = Self::default();
        // The base-case matmul is (n/2)^2 multiply-adds per batch column, so threads pay for
        // themselves once it no longer fits in L1
        if input_size >= MULTITHREADED_MATMUL_THRESHOLD {
            options.multithreaded_matmul = true;
        }
        options
    }
}

const MULTITHREADED_MATMUL_THRESHOLD: usize = 1 << 10;
