//! The planner module validates a transform size against the [`Options`] and works out the
//! decimation schedule: the sizes that are split in two on the way down to the direct DFT at
//! the bottom of the recursion. Matrices and twiddle factors are not cached; they are derived
//! from the schedule on every call.
use crate::error::FftError;
use crate::options::Options;

/// Which way a transform runs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// The DFT, `X[k] = sum_j x[j] * exp(-2*pi*i*j*k/N)`
    #[default]
    Forward,
    /// The inverse DFT, computed as `conj(fft(conj(x))) / N`
    Reverse,
}

/// A validated decimation schedule for transforms of one length.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plan {
    /// Sizes that get decimated, largest first. Never empty.
    levels: Vec<usize>,
    /// Size of the direct DFT at the bottom.
    base_size: usize,
    direction: Direction,
}

impl Plan {
    /// Plan a transform of length `size`.
    ///
    /// A radix of zero selects the default, half of `size`.
    ///
    /// Returns [`FftError::InvalidSize`] if `size` is zero or odd, or if `size` is not
    /// `radix * 2^k` for the requested radix.
    pub fn new(size: usize, direction: Direction, opts: &Options) -> Result<Self, FftError> {
        if size == 0 {
            return Err(FftError::invalid_size(size, "transform length must be positive"));
        }
        if size % 2 != 0 {
            return Err(FftError::invalid_size(
                size,
                "transform length must be a multiple of 2 to split into even and odd halves",
            ));
        }

        let half = size / 2;
        let base_size = match opts.radix {
            None | Some(0) => half,
            Some(radix) => radix.min(half),
        };

        let mut levels = Vec::new();
        let mut n = size;
        loop {
            levels.push(n);
            let split = n / 2;
            if split == base_size {
                break;
            }
            if split < base_size || split % 2 != 0 {
                return Err(FftError::invalid_size(
                    size,
                    "transform length must be the radix times a power of two",
                ));
            }
            n = split;
        }

        Ok(Self {
            levels,
            base_size,
            direction,
        })
    }

    /// The transform length.
    pub fn size(&self) -> usize {
        self.levels[0]
    }

    /// Size of the direct DFT evaluated by the batched matmul.
    pub const fn base_size(&self) -> usize {
        self.base_size
    }

    /// Sizes that are split into even and odd halves, largest first.
    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    /// Direction the transform runs in.
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Coarse estimate of the floating point operations needed to transform `batch` vectors.
    ///
    /// Counts `2 * n * n * (2 * vectors) * 2` for the batched matmul at the bottom, `6` per
    /// element of every twiddle multiply and `4` per element of every butterfly. This is not
    /// the exact number of operations a given backend executes.
    pub fn flop_estimate(&self, batch: usize) -> usize {
        let mut flops = 0;
        let mut vectors = batch;
        for &n in &self.levels {
            let twiddled_elements = (n / 2) * vectors;
            flops += 6 * twiddled_elements + 4 * twiddled_elements;
            vectors *= 2;
        }

        let n = self.base_size;
        flops + 2 * n * n * (2 * vectors) * 2
    }
}
