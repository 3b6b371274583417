//! FFT Algorithm Implementations
//!
//! ## Available Algorithms
//!
//! - **DIT (Decimation-in-Time)**: radix-2 Cooley-Tukey. Every level splits the input into its
//!   even and odd indexed halves; the halves of all vectors are folded into one batch so that
//!   the direct DFT at the bottom is a single batched complex matmul.
//!
//! - **2-D**: a square 2-D transform built from batched DIT transforms over the rows and then
//!   the columns.

pub mod dit;
pub mod fft2d;
