//! Stereo signal types and traits.
//!
//! This module provides the abstractions the playback session pulls audio
//! through:
//! - `Frame` for one interleaved left/right sample pair
//! - `StereoSignal` trait for anything that can fill an output buffer

mod stereo;

pub use stereo::{Frame, StereoSignal};
