//! Polyphase arbitrary-rate resampler: the streaming state machine that
//! converts a complex sample stream at rate `R_in` to `R_out = R_in * rho`
//! for any positive real `rho`.
//!
//! Grounded on `gr_pfb_arb_resampler_ccf` (upstream GNU Radio): a bank of
//! `N` polyphase sub-filters plus a fractional accumulator select and
//! linearly interpolate between adjacent sub-filter outputs. The streaming
//! contract (consume-some, produce-some, preserve `(acc, last_filter)`
//! across calls, re-sync on `set_taps`) is carried over unchanged; only the
//! storage model (owned row buffer instead of `N` heap sub-filter objects)
//! and the error handling (typed `Result` at construction instead of
//! aborting) are re-architected for this crate.

use num_complex::Complex32;
use tracing::{debug, info, trace};

use crate::error::ResamplerError;
use crate::polyphase::PolyphaseBank;

/// A streaming polyphase arbitrary-rate resampler for complex samples.
pub struct Resampler {
    rate: f32,
    bank: PolyphaseBank,
    /// N: filter count / interpolation factor.
    int_rate: usize,
    /// D = floor(N / rho): integer decimation stride.
    dec_rate: usize,
    /// F = N/rho - D: fractional stride, in [0, 1).
    flt_rate: f32,
    /// Fractional accumulator, in [0, 1).
    acc: f32,
    /// Sub-filter index the next `work` call resumes at.
    last_filter: usize,
    /// One-shot flag: history requirements changed since the last `work`.
    updated: bool,
}

impl Resampler {
    /// Construct a resampler for ratio `rho` (`R_out = R_in * rho`) from
    /// prototype taps `taps`, using `n` polyphase sub-filters.
    ///
    /// `rho` must be positive, `n` must be at least 1, and `taps` must not
    /// be empty.
    pub fn new(rho: f32, taps: &[f32], n: usize) -> Result<Self, ResamplerError> {
        if rho <= 0.0 {
            return Err(ResamplerError::InvalidRate(rho));
        }
        if n == 0 {
            return Err(ResamplerError::InvalidFilterCount(n));
        }
        if taps.is_empty() {
            return Err(ResamplerError::EmptyTaps);
        }

        let bank = PolyphaseBank::new(n, taps);
        let (dec_rate, flt_rate) = Self::compute_strides(n, rho);

        info!(
            rho,
            n,
            history = bank.taps_per_filter(),
            "resampler constructed"
        );

        Ok(Self {
            rate: rho,
            bank,
            int_rate: n,
            dec_rate,
            flt_rate,
            acc: 0.0,
            last_filter: 0,
            updated: false,
        })
    }

    fn compute_strides(n: usize, rho: f32) -> (usize, f32) {
        let scaled = n as f32 / rho;
        let dec_rate = scaled.floor() as usize;
        let flt_rate = scaled - dec_rate as f32;
        (dec_rate, flt_rate)
    }

    /// Replace the prototype taps. `K` (and thus [`Resampler::history`]) may
    /// change; `acc` and `last_filter` are preserved so phase stays
    /// continuous across the swap. The next `work` call returns `(0, 0)`
    /// unconditionally so the hosting framework can re-size its buffers
    /// before resuming.
    pub fn set_taps(&mut self, taps: &[f32]) {
        self.bank.set_taps(taps);
        self.updated = true;
        debug!(
            new_history = self.bank.taps_per_filter(),
            num_taps = taps.len(),
            "resampler taps replaced"
        );
    }

    /// Number of input samples that must be in scope ahead of the read
    /// cursor before the next `work` call (`K`, the taps-per-filter count).
    #[inline]
    pub fn history(&self) -> usize {
        self.bank.taps_per_filter()
    }

    /// The configured resampling ratio `rho`.
    #[inline]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Whether a tap swap is pending re-synchronization with the host
    /// framework (see [`Resampler::set_taps`]).
    #[inline]
    pub fn updated(&self) -> bool {
        self.updated
    }

    /// Diagnostic textual dump, one row per sub-filter.
    pub fn print_taps(&self) -> String {
        let mut out = String::new();
        for (i, row) in self.bank.tap_rows().enumerate() {
            out.push_str(&format!("filter[{i}]: ["));
            for tap in row {
                out.push_str(&format!(" {tap:.4e}"));
            }
            out.push_str("]\n");
        }
        trace!(taps = %out, "resampler tap dump");
        out
    }

    /// Consume some of `input`, produce some of `output`.
    ///
    /// Returns `(produced, consumed)`. If a tap swap is pending (see
    /// [`Resampler::set_taps`]), returns `(0, 0)` immediately without
    /// touching `input` or `output`. Otherwise runs the polyphase advance
    /// loop until `output` is full or fewer than `history() + 1` input
    /// samples remain in scope.
    pub fn work(&mut self, input: &[Complex32], output: &mut [Complex32]) -> (usize, usize) {
        if self.updated {
            self.updated = false;
            return (0, 0);
        }

        let n_out = output.len();
        let n_in = input.len();
        let n = self.int_rate;

        let mut i = 0usize;
        let mut c = 0usize;
        let mut j = self.last_filter;

        // The wrap-around branch below reads input[c+1], so one sentinel
        // input beyond c must remain in scope.
        while i < n_out && c < n_in.saturating_sub(1) {
            while j < n && i < n_out {
                let o0 = self.bank.filter(j, &input[c..]);
                let o1 = if j + 1 == n {
                    self.bank.filter(0, &input[c + 1..])
                } else {
                    self.bank.filter(j + 1, &input[c..])
                };

                output[i] = o0 + (o1 - o0) * self.acc;
                i += 1;

                self.acc += self.flt_rate;
                j += self.dec_rate + self.acc.floor() as usize;
                self.acc = self.acc.fract();
            }
            if i < n_out {
                c += 1;
                j %= n;
            }
        }

        self.last_filter = j;
        (i, c)
    }
}
