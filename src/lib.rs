//! Polyphase arbitrary-rate resampler for complex baseband signals, plus an
//! optimal-FIR tap designer to feed it.
//!
//! This crate is a streaming DSP building block, not a standalone
//! application: it has no on-disk format, no wire protocol, and no CLI. A
//! host streaming framework is expected to own buffer allocation and
//! scheduling, guarantee [`Resampler::history`] samples of look-ahead
//! before every [`Resampler::work`] call, and slide its input window
//! forward by exactly the `consumed` count each call returns.
//!
//! - [`fir`] — the scalar FIR dot-product primitive.
//! - [`polyphase`] — the N-row polyphase tap matrix built from one
//!   prototype tap set.
//! - [`resampler`] — the streaming state machine tying the bank to a
//!   fractional-rate accumulator.
//! - [`designer`] — `low_pass`/`high_pass`/`band_pass`/`band_reject`
//!   constructors over a pluggable Remez-exchange engine.
//! - [`error`] — the error taxonomy surfaced at each of those boundaries.

pub mod designer;
pub mod error;
pub mod fir;
pub mod polyphase;
pub mod resampler;

pub use designer::remez::{FilterClass, PmRemez, RemezEngine};
pub use error::{DesignerError, RemezError, ResamplerError};
pub use polyphase::PolyphaseBank;
pub use resampler::Resampler;
