//! Deviation conversions and the Herrmann tap-count estimator.
//!
//! Grounded on `gr_optfir.cc` (upstream GNU Radio). The literal constants
//! are carried through unchanged; they are not refactored into symbolic
//! forms that could drift numerically (see DESIGN.md).

/// Convert a stopband attenuation in dB to an absolute (linear) deviation.
pub fn stopband_atten_to_dev(atten_db: f64) -> f64 {
    10f64.powf(-atten_db / 20.0)
}

/// Convert a passband ripple in dB to an absolute (linear) deviation.
pub fn passband_ripple_to_dev(ripple_db: f64) -> f64 {
    (10f64.powf(ripple_db / 20.0) - 1.0) / (10f64.powf(ripple_db / 20.0) + 1.0)
}

/// Herrmann et al. (1973) FIR order estimator.
///
/// `freq1`/`freq2` are normalized to the sampling frequency. `delta_p` is
/// the passband deviation, `delta_s` the stopband deviation. Works for
/// high-pass filters too (`freq1 > freq2`) but the estimate degrades near
/// `f == 0` or `f == fs/2`.
pub fn lporder(freq1: f64, freq2: f64, delta_p: f64, delta_s: f64) -> f64 {
    let df = (freq2 - freq1).abs();
    let ddp = delta_p.log10();
    let dds = delta_s.log10();

    const A1: f64 = 5.309e-3;
    const A2: f64 = 7.114e-2;
    const A3: f64 = -4.761e-1;
    const A4: f64 = -2.66e-3;
    const A5: f64 = -5.941e-1;
    const A6: f64 = -4.278e-1;
    const B1: f64 = 11.01217;
    const B2: f64 = 0.5124401;

    let t1 = A1 * ddp * ddp;
    let t2 = A2 * ddp;
    let t3 = A4 * ddp * ddp;
    let t4 = A5 * ddp;

    let dinf = (t1 + t2 + A3) * dds + (t3 + t4 + A6);
    // Several published forms use +ff*df; the sign below is preserved from
    // the upstream implementation to keep tap-count parity with legacy
    // outputs (see DESIGN.md open question).
    let ff = B1 + B2 * (ddp - dds);

    dinf / df - ff * df + 1.0
}
