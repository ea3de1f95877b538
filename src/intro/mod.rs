//! Hero intro sequence
//!
//! Timed phase machine behind the name reveal on the landing section. The
//! header logo only appears once the intro is revealed.

mod sequencer;

pub use sequencer::{DimOverlay, IntroConfig, IntroPhase, IntroSequencer};
