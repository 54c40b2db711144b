//! Polyphase filter bank: N FIR sub-filters sharing a single prototype tap
//! set, laid out column-major so that streaming the input forward by one
//! sample advances every sub-filter by exactly one tap of its own impulse
//! response.
//!
//! Grounded on `gr_pfb_arb_resampler_ccf::set_taps` (upstream GNU Radio):
//! `M[i][j] = T[i + j*N]`, zero-extended so every row has the same length.
//! Rows are kept in a single contiguous buffer rather than N heap-allocated
//! sub-filter objects for cache locality and to make `set_taps` a single
//! atomic swap.

use num_complex::Complex32;

use crate::fir;

/// Owns the N x K tap matrix and dispatches per-row FIR evaluation.
#[derive(Debug, Clone)]
pub struct PolyphaseBank {
    num_filters: usize,
    taps_per_filter: usize,
    /// Row-major: row `i` occupies `rows[i*taps_per_filter .. (i+1)*taps_per_filter]`.
    rows: Vec<f32>,
}

impl PolyphaseBank {
    /// Build a bank of `num_filters` sub-filters from prototype taps `proto`.
    ///
    /// `num_filters` must be at least 1; `proto` must not be empty. Both are
    /// assumed pre-validated by the caller (the resampler core checks these
    /// at construction).
    pub fn new(num_filters: usize, proto: &[f32]) -> Self {
        let mut bank = PolyphaseBank {
            num_filters,
            taps_per_filter: 0,
            rows: Vec::new(),
        };
        bank.set_taps(proto);
        bank
    }

    /// Recompute `K` and `M` from a new prototype tap vector, replacing all
    /// rows atomically: the new buffer is built off to the side and swapped
    /// in with a single assignment, so a reader never observes a
    /// half-updated bank.
    pub fn set_taps(&mut self, proto: &[f32]) {
        let n = self.num_filters;
        let taps_per_filter = proto.len().div_ceil(n);

        let mut rows = vec![0.0_f32; n * taps_per_filter];
        for i in 0..n {
            for j in 0..taps_per_filter {
                let src = i + j * n;
                if src < proto.len() {
                    rows[i * taps_per_filter + j] = proto[src];
                }
            }
        }

        self.taps_per_filter = taps_per_filter;
        self.rows = rows;
    }

    /// Number of polyphase sub-filters (`N`).
    #[inline]
    pub fn num_filters(&self) -> usize {
        self.num_filters
    }

    /// Taps per sub-filter (`K`), i.e. the history the resampler must keep.
    #[inline]
    pub fn taps_per_filter(&self) -> usize {
        self.taps_per_filter
    }

    /// Read-only view of sub-filter `i`'s tap row.
    #[inline]
    pub fn row(&self, i: usize) -> &[f32] {
        let k = self.taps_per_filter;
        &self.rows[i * k..(i + 1) * k]
    }

    /// All rows, for diagnostics / introspection.
    pub fn tap_rows(&self) -> impl Iterator<Item = &[f32]> {
        (0..self.num_filters).map(move |i| self.row(i))
    }

    /// Delegate to sub-filter `i` with the given input view.
    #[inline]
    pub fn filter(&self, i: usize, input: &[Complex32]) -> Complex32 {
        fir::filter(self.row(i), input)
    }
}
