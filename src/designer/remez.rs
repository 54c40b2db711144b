//! The Parks-McClellan / Remez-exchange engine boundary.
//!
//! The designer depends on the exchange algorithm only through the
//! [`RemezEngine`] trait below, so a host application can substitute any
//! concrete equiripple implementation without touching `low_pass`/`high_pass`/
//! `band_pass`/`band_reject`. [`PmRemez`] wires in the `pm-remez` crate as the
//! default, matching the closest DSP example in this repository's lineage
//! (`charlieh0tel-rotaryclub`, which designs its bandpass/highpass filters
//! the same way).

use crate::error::RemezError;

/// Band-shape hint passed to the Remez engine, mirroring `gr_remez`'s
/// `filter_type` string argument (`"bandpass"`, `"differentiator"`,
/// `"hilbert"`). Only `Bandpass` is used by the convenience constructors in
/// [`crate::designer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterClass {
    Bandpass,
    Differentiator,
    Hilbert,
}

/// A pluggable equiripple FIR design engine.
pub trait RemezEngine {
    /// Design `num_taps` taps (i.e. order `num_taps - 1`) over the given
    /// band edges.
    ///
    /// `bands` is the flattened `[lo0, hi0, lo1, hi1, ...]` edge list
    /// normalized to `[0, 1]` (`1.0` = Nyquist); `desired` and `weights`
    /// carry one entry per band.
    fn design(
        &self,
        num_taps: usize,
        bands: &[f64],
        desired: &[f64],
        weights: &[f64],
        class: FilterClass,
    ) -> Result<Vec<f64>, RemezError>;
}

/// Default [`RemezEngine`] backed by the `pm-remez` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PmRemez;

impl RemezEngine for PmRemez {
    fn design(
        &self,
        num_taps: usize,
        bands: &[f64],
        desired: &[f64],
        weights: &[f64],
        _class: FilterClass,
    ) -> Result<Vec<f64>, RemezError> {
        if bands.len() % 2 != 0 || bands.len() / 2 != desired.len() || desired.len() != weights.len() {
            return Err(RemezError::DegenerateBands(
                "bands/desired/weights length mismatch".into(),
            ));
        }

        let band_settings: Vec<pm_remez::BandSetting> = bands
            .chunks(2)
            .zip(desired.iter())
            .zip(weights.iter())
            .map(|((edge, &d), &w)| pm_remez::BandSetting {
                lower_edge: edge[0],
                upper_edge: edge[1],
                desired_value: d,
                weight: w,
            })
            .collect();

        let params = pm_remez::PMParameters {
            band_setting: band_settings,
            neg: false,
            fs: 2.0,
        };

        pm_remez::pm_parameters(num_taps, &params)
            .map(|design| design.impulse_response)
            .map_err(|e| {
                let message = e.to_string();
                if message.to_lowercase().contains("converg") {
                    RemezError::DidNotConverge {
                        iterations: trailing_digits(&message).unwrap_or(0),
                    }
                } else {
                    RemezError::Other(message)
                }
            })
    }
}

/// Pulls the last contiguous run of digits out of an engine error message,
/// e.g. the iteration count in "did not converge after 42 iterations". Falls
/// back to `None` when the message carries no such count.
fn trailing_digits(message: &str) -> Option<u32> {
    let digits: String = message
        .chars()
        .rev()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.chars().rev().collect::<String>().parse().ok()
}
