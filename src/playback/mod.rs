//! Playback sessions and the audio hosts they run on.
//!
//! This module provides:
//! - `AudioHost` / `OutputStream` traits, the seam to an audio library
//! - `Session` and `Subsystem` for the initialize-to-terminate lifecycle
//! - `play_with` to run a complete session, and `Player` to repeat it
//! - `OfflineHost` for rendering without a device
//! - `CpalHost` for the default output device (feature `playback`)

mod cancel;
#[cfg(feature = "playback")]
mod cpal_host;
mod host;
mod offline;
mod player;
mod session;
mod settings;

pub use cancel::{CancelToken, WaitOutcome};
#[cfg(feature = "playback")]
pub use cpal_host::{CpalHost, CpalStream};
pub use host::{AudioHost, OutputStream, StreamSpec};
pub use offline::{OfflineHost, OfflineStream, Rendered};
pub use player::{Player, Tone};
pub use session::{Session, SessionState, Subsystem, play_with};
pub use settings::{
    DEFAULT_DURATION, DEFAULT_SAMPLE_RATE, FRAMES_PER_BUFFER, OUTPUT_CHANNELS, PlaybackSettings,
};

#[cfg(feature = "playback")]
use crate::error::AudioError;

/// Plays the default sawtooth tone on the default output device.
///
/// # Arguments
///
/// * `sample_rate` - Sample rate in Hz
/// * `duration_seconds` - How long the tone plays
#[cfg(feature = "playback")]
pub fn play(sample_rate: u32, duration_seconds: f64) -> Result<(), AudioError> {
    let settings = PlaybackSettings::default()
        .with_sample_rate(sample_rate)
        .with_duration_secs(duration_seconds)?;
    play_with(&mut CpalHost::new(), &settings, &CancelToken::new())
}
