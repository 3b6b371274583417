//! Real-valued kernels
//!
//! The transforms never use a native complex type: every complex operation is spelled out on
//! separate real and imaginary buffers. The kernels are dispatched at runtime on the available
//! CPU features.
//!
//! ## Organization
//!
//! - `matmul`: dense real matrix products used by the batched complex matmul
//! - `common`: element-wise complex multiply and the radix-2 butterfly

pub mod common;
pub mod matmul;
