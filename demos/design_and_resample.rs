//! Manual end-to-end check: design a low-pass prototype, feed it into the
//! resampler, and print a short summary. Not part of the library's public
//! surface — a verification tool only, the same role
//! `layers/examples/test_ofdm_backend.rs` played in the donor workspace.

use albor_resampler::designer::{low_pass, DEFAULT_NEXTRA_TAPS};
use albor_resampler::{PmRemez, Resampler};
use num_complex::Complex32;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let taps = low_pass(
        &PmRemez,
        1.0,
        48_000.0,
        4_000.0,
        5_000.0,
        0.1,
        60.0,
        DEFAULT_NEXTRA_TAPS,
    )?;
    println!("designed {} taps", taps.len());

    let mut resampler = Resampler::new(1.5, &taps, 32)?;
    println!("{}", resampler.print_taps());

    let input: Vec<Complex32> = (0..2000)
        .map(|k| {
            let phase = 2.0 * std::f32::consts::PI * 0.1 * k as f32;
            Complex32::new(phase.cos(), phase.sin())
        })
        .collect();
    let mut output = vec![Complex32::new(0.0, 0.0); 4000];

    let (produced, consumed) = resampler.work(&input, &mut output);
    println!("consumed {consumed} input samples, produced {produced} output samples");

    Ok(())
}
