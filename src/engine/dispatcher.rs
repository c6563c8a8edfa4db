//! Scalar/SIMD dispatch.
//!
//! The only decision made here is whether the 4-way lane-packed kernel is
//! available on this target. The accumulator's merge order never depends on
//! this choice, so there is nothing to pick between for correctness, only
//! throughput.

/// Whether the 4-chunk SIMD batch path (`kernels::simd128::compress4`) can
/// be used on this target.
///
/// x86_64 guarantees SSE2 at the ABI level, so no runtime probe is needed
/// there. 32-bit x86 does not make that guarantee, so under `std` we probe
/// at runtime; without `std` we fall back to a compile-time `target_feature`
/// check.
#[must_use]
pub(crate) fn simd4_available() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        true
    }

    #[cfg(target_arch = "x86")]
    {
        #[cfg(feature = "std")]
        {
            is_x86_feature_detected!("sse2")
        }
        #[cfg(not(feature = "std"))]
        {
            cfg!(target_feature = "sse2")
        }
    }

    #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
    {
        false
    }
}

/// Name of the compression backend currently selected, for diagnostics.
#[must_use]
pub fn active_backend_name() -> &'static str {
    if simd4_available() {
        "simd128 (4-way)"
    } else {
        "portable (scalar)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_name_is_non_empty() {
        assert!(!active_backend_name().is_empty());
    }
}
