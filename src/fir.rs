//! Scalar FIR engine: a single dot product of a tap row against a windowed
//! view of the input stream.
//!
//! This mirrors `gr_fir_ccf::filter` from the upstream polyphase resampler:
//! stateless between calls, no allocation, precondition-checked only in
//! debug builds since the resampler core is the sole caller and derives the
//! window bounds itself.

use num_complex::Complex32;

/// Compute `sum(taps[j] * input[j])` for `j in 0..taps.len()`.
///
/// `input` must provide at least `taps.len()` samples; this is the "view"
/// the resampler core hands in starting at its current read cursor.
#[inline]
pub fn filter(taps: &[f32], input: &[Complex32]) -> Complex32 {
    debug_assert!(
        input.len() >= taps.len(),
        "FIR engine needs {} samples, got {}",
        taps.len(),
        input.len()
    );

    let mut acc = Complex32::new(0.0, 0.0);
    for (tap, sample) in taps.iter().zip(input.iter()) {
        acc += sample * *tap;
    }
    acc
}
