//! Compression kernels.
//!
//! [`portable`] is the normative scalar reference; [`simd128`] is the 4-way
//! lane-packed variant, compiled only where SSE2 is a static guarantee.
//! Every other kernel must be bit-exact with `portable`.

pub mod constants;
pub mod portable;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod simd128;
