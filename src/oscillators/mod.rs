//! Oscillator implementations.
//!
//! Currently provides the stereo sawtooth phaser used for the fist tone.

mod sawtooth;
mod traits;

pub use sawtooth::{
    DEFAULT_AMPLITUDE, DEFAULT_LEFT_STEP, DEFAULT_RIGHT_STEP, PhasePair, SawtoothParams,
    StereoSawtooth,
};
pub use traits::Oscillator;
