//! Optimal-FIR tap designer: four convenience constructors over a pluggable
//! Remez-exchange engine, grounded on `gr_optfir.cc` (upstream GNU Radio).

pub mod conversions;
pub mod remez;

use tracing::{debug, warn};

use crate::error::DesignerError;
use conversions::{lporder, passband_ripple_to_dev, stopband_atten_to_dev};
use remez::{FilterClass, RemezEngine};

/// Extra taps added to the Herrmann-estimated order before invoking the
/// Remez engine, matching the upstream default.
pub const DEFAULT_NEXTRA_TAPS: usize = 2;

fn max_of(values: &[f64]) -> f64 {
    values.iter().cloned().fold(f64::MIN, f64::max)
}

fn weights_from_deviations(deviations: &[f64]) -> Vec<f64> {
    let max_dev = max_of(deviations);
    deviations.iter().map(|&d| max_dev / d).collect()
}

fn warn_if_edge_near_dc_or_nyquist(fs: f64, edges: &[f64]) {
    for &e in edges {
        let normalized = e / (fs / 2.0);
        if normalized < 0.01 || normalized > 0.99 {
            warn!(
                edge_hz = e,
                fs,
                "transition band near DC or Nyquist; Herrmann's order estimate is unreliable here"
            );
        }
    }
}

fn validate_gain(gain: f64) -> Result<(), DesignerError> {
    if gain <= 0.0 {
        return Err(DesignerError::InvalidGain(gain));
    }
    Ok(())
}

fn validate_band_edges(edges: &[f64], fs: f64) -> Result<(), DesignerError> {
    let normalized: Vec<f64> = edges.iter().map(|&e| e / (fs / 2.0)).collect();
    let ok = normalized.windows(2).all(|w| w[0] < w[1])
        && normalized.iter().all(|&e| (0.0..=1.0).contains(&e));
    if !ok {
        return Err(DesignerError::InvalidBandEdges(normalized));
    }
    Ok(())
}

/// Build a gain-1-normalized low-pass filter.
///
/// `freq1` is the end of the passband, `freq2` the start of the stopband
/// (both in Hz); `fs` is the sampling rate (Hz). `passband_ripple_db`
/// should be small (< 1 dB), `stopband_atten_db` large (>= 60 dB).
pub fn low_pass<R: RemezEngine>(
    engine: &R,
    gain: f64,
    fs: f64,
    freq1: f64,
    freq2: f64,
    passband_ripple_db: f64,
    stopband_atten_db: f64,
    nextra_taps: usize,
) -> Result<Vec<f32>, DesignerError> {
    validate_gain(gain)?;
    validate_band_edges(&[freq1, freq2], fs)?;
    warn_if_edge_near_dc_or_nyquist(fs, &[freq1, freq2]);

    // Two bands, one pair of edges each: passband (0, f1) and stopband (f2, 1).
    let bands = [0.0, (freq1 / fs) * 2.0, (freq2 / fs) * 2.0, 1.0];
    let desired = [gain, 0.0];
    let deviations = [
        passband_ripple_to_dev(passband_ripple_db) / gain,
        stopband_atten_to_dev(stopband_atten_db),
    ];

    let order = lporder(freq1 / fs, freq2 / fs, deviations[0], deviations[1]);
    let num_taps_order = order.ceil() as i64 - 1;
    let weights = weights_from_deviations(&deviations);

    let num_taps = (num_taps_order.max(0) as usize) + nextra_taps;
    debug!(estimated_order = num_taps_order, num_taps, "low_pass design");

    let double_taps = engine.design(num_taps + 1, &bands, &desired, &weights, FilterClass::Bandpass)?;
    Ok(double_taps.into_iter().map(|x| x as f32).collect())
}

/// Build a gain-1-normalized high-pass filter.
///
/// `freq1` is the end of the stopband, `freq2` the start of the passband
/// (both in Hz). The resulting tap count is forced odd, which is required
/// for non-zero gain at Nyquist.
pub fn high_pass<R: RemezEngine>(
    engine: &R,
    gain: f64,
    fs: f64,
    freq1: f64,
    freq2: f64,
    passband_ripple_db: f64,
    stopband_atten_db: f64,
    nextra_taps: usize,
) -> Result<Vec<f32>, DesignerError> {
    validate_gain(gain)?;
    validate_band_edges(&[freq1, freq2], fs)?;
    warn_if_edge_near_dc_or_nyquist(fs, &[freq1, freq2]);

    // Two bands: stopband (0, f1) and passband (f2, 1).
    let bands = [0.0, (freq1 / fs) * 2.0, (freq2 / fs) * 2.0, 1.0];
    let desired = [0.0, gain];
    let deviations = [
        stopband_atten_to_dev(stopband_atten_db),
        passband_ripple_to_dev(passband_ripple_db) / gain,
    ];

    let order = lporder(freq1 / fs, freq2 / fs, deviations[0], deviations[1]);
    let mut num_taps_order = (order.ceil() as i64 - 1).max(0) as usize;

    // For a HPF we need an odd tap count; in the Remez call below
    // ntaps = n + 1, so n (num_taps_order + nextra_taps) must be even.
    if (num_taps_order + nextra_taps) % 2 == 1 {
        num_taps_order += 1;
    }

    let weights = weights_from_deviations(&deviations);
    let num_taps = num_taps_order + nextra_taps;
    debug!(estimated_order = num_taps_order, num_taps, "high_pass design");

    let double_taps = engine.design(num_taps + 1, &bands, &desired, &weights, FilterClass::Bandpass)?;
    Ok(double_taps.into_iter().map(|x| x as f32).collect())
}

/// Build a gain-1-normalized band-pass filter.
///
/// Edges, left to right: end of lower stopband, start of passband, end of
/// passband, start of upper stopband (all in Hz).
#[allow(clippy::too_many_arguments)]
pub fn band_pass<R: RemezEngine>(
    engine: &R,
    gain: f64,
    fs: f64,
    freq_sb1: f64,
    freq_pb1: f64,
    freq_pb2: f64,
    freq_sb2: f64,
    passband_ripple_db: f64,
    stopband_atten_db: f64,
    nextra_taps: usize,
) -> Result<Vec<f32>, DesignerError> {
    validate_gain(gain)?;
    validate_band_edges(&[freq_sb1, freq_pb1, freq_pb2, freq_sb2], fs)?;
    warn_if_edge_near_dc_or_nyquist(fs, &[freq_sb1, freq_pb1, freq_pb2, freq_sb2]);

    // Three bands: lower stopband, passband, upper stopband.
    let bands = [
        0.0,
        (freq_sb1 / fs) * 2.0,
        (freq_pb1 / fs) * 2.0,
        (freq_pb2 / fs) * 2.0,
        (freq_sb2 / fs) * 2.0,
        1.0,
    ];
    let desired = [0.0, gain, 0.0];
    let deviations = [
        stopband_atten_to_dev(stopband_atten_db),
        passband_ripple_to_dev(passband_ripple_db) / gain,
        stopband_atten_to_dev(stopband_atten_db),
    ];

    // Find the side (lower or upper transition) that needs the most taps.
    let order = lporder(freq_pb2 / fs, freq_sb2 / fs, deviations[1], deviations[2]).max(lporder(
        freq_sb1 / fs,
        freq_pb1 / fs,
        deviations[1],
        deviations[0],
    ));
    let num_taps_order = (order.ceil() as i64 - 1).max(0) as usize;

    let weights = weights_from_deviations(&deviations);
    let num_taps = num_taps_order + nextra_taps;
    debug!(estimated_order = num_taps_order, num_taps, "band_pass design");

    let double_taps = engine.design(num_taps + 1, &bands, &desired, &weights, FilterClass::Bandpass)?;
    Ok(double_taps.into_iter().map(|x| x as f32).collect())
}

/// Build a gain-1-normalized band-reject filter.
///
/// Edges, left to right: end of lower passband, start of stopband, end of
/// stopband, start of upper passband (all in Hz). The resulting tap count
/// is forced odd, required for non-zero gain at Nyquist/DC.
#[allow(clippy::too_many_arguments)]
pub fn band_reject<R: RemezEngine>(
    engine: &R,
    gain: f64,
    fs: f64,
    freq_pb1: f64,
    freq_sb1: f64,
    freq_sb2: f64,
    freq_pb2: f64,
    passband_ripple_db: f64,
    stopband_atten_db: f64,
    nextra_taps: usize,
) -> Result<Vec<f32>, DesignerError> {
    validate_gain(gain)?;
    validate_band_edges(&[freq_pb1, freq_sb1, freq_sb2, freq_pb2], fs)?;
    warn_if_edge_near_dc_or_nyquist(fs, &[freq_pb1, freq_sb1, freq_sb2, freq_pb2]);

    // Three bands: lower passband, stopband, upper passband.
    let bands = [
        0.0,
        (freq_pb1 / fs) * 2.0,
        (freq_sb1 / fs) * 2.0,
        (freq_sb2 / fs) * 2.0,
        (freq_pb2 / fs) * 2.0,
        1.0,
    ];
    let desired = [gain, 0.0, gain];
    let deviations = [
        passband_ripple_to_dev(passband_ripple_db) / gain,
        stopband_atten_to_dev(stopband_atten_db),
        passband_ripple_to_dev(passband_ripple_db) / gain,
    ];

    let order = lporder(freq_pb2 / fs, freq_sb2 / fs, deviations[1], deviations[2]).max(lporder(
        freq_sb1 / fs,
        freq_pb1 / fs,
        deviations[1],
        deviations[0],
    ));
    let mut num_taps_order = (order.ceil() as i64 - 1).max(0) as usize;

    if (num_taps_order + nextra_taps) % 2 == 1 {
        num_taps_order += 1;
    }

    let weights = weights_from_deviations(&deviations);
    let num_taps = num_taps_order + nextra_taps;
    debug!(estimated_order = num_taps_order, num_taps, "band_reject design");

    let double_taps = engine.design(num_taps + 1, &bands, &desired, &weights, FilterClass::Bandpass)?;
    Ok(double_taps.into_iter().map(|x| x as f32).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic stand-in for the real exchange engine: returns a
    /// Hamming-windowed sinc shaped from the requested band split. Good
    /// enough to exercise the designer's order estimation, validation, and
    /// odd-tap-count correction without depending on `pm-remez`'s actual
    /// convergence behavior in a unit test.
    struct WindowedSincEngine;

    impl RemezEngine for WindowedSincEngine {
        fn design(
            &self,
            num_taps: usize,
            bands: &[f64],
            desired: &[f64],
            _weights: &[f64],
            _class: FilterClass,
        ) -> Result<Vec<f64>, crate::error::RemezError> {
            if num_taps == 0 {
                return Err(crate::error::RemezError::DegenerateBands("zero taps".into()));
            }
            // crude cutoff: midpoint of the transition zone between the
            // first two adjacent bands with different desired amplitude.
            let band_edges: Vec<(f64, f64)> = bands.chunks(2).map(|c| (c[0], c[1])).collect();
            let cutoff = band_edges
                .windows(2)
                .zip(desired.windows(2))
                .find(|(_, d)| d[0] != d[1])
                .map(|(e, _)| (e[0].1 + e[1].0) / 2.0)
                .unwrap_or(0.5);
            let center = (num_taps - 1) as f64 / 2.0;
            let omega_c = std::f64::consts::PI * cutoff;
            Ok((0..num_taps)
                .map(|k| {
                    let n = k as f64 - center;
                    let sinc = if n.abs() < 1e-12 {
                        omega_c / std::f64::consts::PI
                    } else {
                        (omega_c * n).sin() / (std::f64::consts::PI * n)
                    };
                    let window =
                        0.54 - 0.46 * (2.0 * std::f64::consts::PI * k as f64 / (num_taps - 1) as f64).cos();
                    sinc * window
                })
                .collect())
        }
    }

    /// Kaiser-windowed-sinc stand-in tuned for a specific stopband
    /// attenuation target, used where a test needs the stub's stopband to
    /// actually meet the attenuation it was asked to hit (the Hamming
    /// window above tops out around 53 dB regardless of length, which
    /// isn't enough to exercise a 60 dB requirement).
    struct KaiserLowpassEngine {
        stopband_atten_db: f64,
    }

    impl KaiserLowpassEngine {
        fn bessel_i0(x: f64) -> f64 {
            let mut sum = 1.0_f64;
            let mut term = 1.0_f64;
            let y = x * x / 4.0;
            for k in 1..25 {
                term *= y / (k * k) as f64;
                sum += term;
            }
            sum
        }

        fn beta(&self) -> f64 {
            let a = self.stopband_atten_db;
            if a > 50.0 {
                0.1102 * (a - 8.7)
            } else if a >= 21.0 {
                0.5842 * (a - 21.0).powf(0.4) + 0.07886 * (a - 21.0)
            } else {
                0.0
            }
        }
    }

    impl RemezEngine for KaiserLowpassEngine {
        fn design(
            &self,
            num_taps: usize,
            bands: &[f64],
            desired: &[f64],
            _weights: &[f64],
            _class: FilterClass,
        ) -> Result<Vec<f64>, crate::error::RemezError> {
            if num_taps == 0 {
                return Err(crate::error::RemezError::DegenerateBands("zero taps".into()));
            }
            let band_edges: Vec<(f64, f64)> = bands.chunks(2).map(|c| (c[0], c[1])).collect();
            let gain = max_of(desired);
            let cutoff = band_edges
                .windows(2)
                .zip(desired.windows(2))
                .find(|(_, d)| d[0] != d[1])
                .map(|(e, _)| (e[0].1 + e[1].0) / 2.0)
                .unwrap_or(0.5);

            let m = num_taps - 1;
            let alpha = m as f64 / 2.0;
            let beta = self.beta();
            let i0_beta = Self::bessel_i0(beta);
            let omega_c = std::f64::consts::PI * cutoff;

            let mut taps: Vec<f64> = (0..num_taps)
                .map(|k| {
                    let x = k as f64 - alpha;
                    let sinc = if x.abs() < 1e-12 {
                        omega_c / std::f64::consts::PI
                    } else {
                        (omega_c * x).sin() / (std::f64::consts::PI * x)
                    };
                    let ratio = if alpha > 0.0 { x / alpha } else { 0.0 };
                    let window = if ratio.abs() <= 1.0 {
                        Self::bessel_i0(beta * (1.0 - ratio * ratio).sqrt()) / i0_beta
                    } else {
                        0.0
                    };
                    sinc * window
                })
                .collect();

            let dc: f64 = taps.iter().sum();
            if dc.abs() > 1e-12 {
                let scale = gain / dc;
                for t in taps.iter_mut() {
                    *t *= scale;
                }
            }
            Ok(taps)
        }
    }

    /// `20*log10(|H(f)|)` of a real-coefficient FIR evaluated directly as a
    /// sum of complex exponentials, used to check passband/stopband
    /// magnitude at a specific frequency rather than just a raw tap sum.
    fn magnitude_db(taps: &[f32], freq_hz: f64, fs: f64) -> f64 {
        let omega = 2.0 * std::f64::consts::PI * freq_hz / fs;
        let mut re = 0.0_f64;
        let mut im = 0.0_f64;
        for (k, &t) in taps.iter().enumerate() {
            let phase = omega * k as f64;
            re += t as f64 * phase.cos();
            im -= t as f64 * phase.sin();
        }
        20.0 * (re * re + im * im).sqrt().log10()
    }

    #[test]
    fn low_pass_magnitude_response_meets_passband_and_stopband_targets() {
        let fs = 48_000.0;
        let engine = KaiserLowpassEngine { stopband_atten_db: 60.0 };
        let taps = low_pass(&engine, 1.0, fs, 4_000.0, 5_000.0, 0.1, 60.0, DEFAULT_NEXTRA_TAPS).unwrap();

        let passband_db = magnitude_db(&taps, 3_000.0, fs);
        let stopband_db = magnitude_db(&taps, 6_000.0, fs);

        assert!(passband_db.abs() < 0.1, "passband gain {passband_db} dB not within 0.1 dB of 0");
        assert!(stopband_db <= -60.0, "stopband attenuation {stopband_db} dB weaker than -60 dB");
    }

    #[test]
    fn low_pass_returns_taps_consistent_with_herrmann_plus_extra() {
        let taps = low_pass(
            &WindowedSincEngine,
            1.0,
            48000.0,
            4000.0,
            5000.0,
            0.1,
            60.0,
            DEFAULT_NEXTRA_TAPS,
        )
        .unwrap();
        assert!(taps.len() > 10);
    }

    #[test]
    fn high_pass_tap_count_is_odd() {
        let taps = high_pass(
            &WindowedSincEngine,
            1.0,
            48000.0,
            4000.0,
            5000.0,
            0.1,
            60.0,
            DEFAULT_NEXTRA_TAPS,
        )
        .unwrap();
        assert_eq!(taps.len() % 2, 1);
    }

    #[test]
    fn band_reject_tap_count_is_odd() {
        let taps = band_reject(
            &WindowedSincEngine,
            1.0,
            48000.0,
            4000.0,
            5000.0,
            7000.0,
            8000.0,
            0.1,
            60.0,
            DEFAULT_NEXTRA_TAPS,
        )
        .unwrap();
        assert_eq!(taps.len() % 2, 1);
    }

    #[test]
    fn invalid_gain_is_rejected() {
        let err = low_pass(&WindowedSincEngine, 0.0, 48000.0, 4000.0, 5000.0, 0.1, 60.0, 2);
        assert!(matches!(err, Err(DesignerError::InvalidGain(_))));
    }

    #[test]
    fn out_of_order_band_edges_are_rejected() {
        let err = low_pass(&WindowedSincEngine, 1.0, 48000.0, 5000.0, 4000.0, 0.1, 60.0, 2);
        assert!(matches!(err, Err(DesignerError::InvalidBandEdges(_))));
    }

    #[test]
    fn band_edges_outside_nyquist_are_rejected() {
        let err = low_pass(&WindowedSincEngine, 1.0, 48000.0, 4000.0, 30000.0, 0.1, 60.0, 2);
        assert!(matches!(err, Err(DesignerError::InvalidBandEdges(_))));
    }

    #[test]
    fn band_pass_returns_taps_and_respects_requested_order_of_magnitude() {
        let taps = band_pass(
            &WindowedSincEngine,
            1.0,
            48000.0,
            3000.0,
            4000.0,
            5000.0,
            6000.0,
            0.1,
            60.0,
            DEFAULT_NEXTRA_TAPS,
        )
        .unwrap();
        assert!(taps.len() > 10);
    }

    #[test]
    fn lowpass_and_highpass_designer_symmetry() {
        // Gain-1 low-pass and high-pass over the same transition band sum
        // to ~1.0 and ~0.0 respectively (DC gain vs Nyquist-adjacent null
        // at DC).
        let lp = low_pass(&WindowedSincEngine, 1.0, 48000.0, 4000.0, 5000.0, 0.1, 60.0, DEFAULT_NEXTRA_TAPS)
            .unwrap();
        let hp = high_pass(&WindowedSincEngine, 1.0, 48000.0, 4000.0, 5000.0, 0.1, 60.0, DEFAULT_NEXTRA_TAPS)
            .unwrap();

        let lp_sum: f32 = lp.iter().sum();
        let hp_sum: f32 = hp.iter().sum();
        assert!((lp_sum - 1.0).abs() < 0.1);
        assert!(hp_sum.abs() < 0.1);
    }

    #[test]
    fn low_pass_taps_sum_near_unity_gain() {
        let taps = low_pass(
            &WindowedSincEngine,
            1.0,
            48000.0,
            4000.0,
            5000.0,
            0.1,
            60.0,
            DEFAULT_NEXTRA_TAPS,
        )
        .unwrap();
        let sum: f32 = taps.iter().sum();
        assert!((sum - 1.0).abs() < 0.1);
    }
}
