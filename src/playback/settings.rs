//! Playback settings with the defaults used for the fist tone.

use std::time::Duration;

use super::StreamSpec;
use crate::SawtoothParams;
use crate::error::SettingsError;

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 44100;
/// Default tone length.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(200);
/// Frames requested from the fill routine per callback.
pub const FRAMES_PER_BUFFER: u32 = 256;
/// Output is always stereo.
pub const OUTPUT_CHANNELS: u16 = 2;

/// Everything a playback session needs to know.
///
/// # Examples
///
/// ```
/// use pinky::{PlaybackSettings, SawtoothParams};
/// use std::time::Duration;
///
/// let settings = PlaybackSettings::default()
///     .with_sample_rate(48000)
///     .with_duration(Duration::from_millis(500))
///     .with_waveform(SawtoothParams::default().with_amplitude(0.25));
/// assert!(settings.validate().is_ok());
/// assert_eq!(settings.total_frames(), 24000);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSettings {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// How long the stream runs before it is stopped
    pub duration: Duration,
    /// Frames per callback buffer
    pub frames_per_buffer: u32,
    /// Generator parameters
    pub waveform: SawtoothParams,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            duration: DEFAULT_DURATION,
            frames_per_buffer: FRAMES_PER_BUFFER,
            waveform: SawtoothParams::default(),
        }
    }
}

impl PlaybackSettings {
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the duration from a number of seconds.
    ///
    /// Fails for negative, NaN or overflowing values.
    pub fn with_duration_secs(self, seconds: f64) -> Result<Self, SettingsError> {
        let duration = Duration::try_from_secs_f64(seconds)
            .map_err(|_| SettingsError::InvalidDuration(seconds))?;
        Ok(self.with_duration(duration))
    }

    pub fn with_frames_per_buffer(mut self, frames: u32) -> Self {
        self.frames_per_buffer = frames;
        self
    }

    pub fn with_waveform(mut self, waveform: SawtoothParams) -> Self {
        self.waveform = waveform;
        self
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.sample_rate == 0 {
            return Err(SettingsError::ZeroSampleRate);
        }
        if self.frames_per_buffer == 0 {
            return Err(SettingsError::ZeroBufferSize);
        }
        self.waveform.validate()
    }

    /// The stream an output-only stereo session opens.
    pub fn stream_spec(&self) -> StreamSpec {
        StreamSpec {
            input_channels: 0,
            output_channels: OUTPUT_CHANNELS,
            sample_rate: self.sample_rate,
            frames_per_buffer: self.frames_per_buffer,
        }
    }

    /// Number of frames that play over `duration`, rounded to the nearest
    /// frame.
    pub fn total_frames(&self) -> u64 {
        (f64::from(self.sample_rate) * self.duration.as_secs_f64()).round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = PlaybackSettings::default();
        assert_eq!(settings.sample_rate, 44100);
        assert_eq!(settings.duration, Duration::from_millis(200));
        assert_eq!(settings.frames_per_buffer, 256);
        assert_eq!(settings.total_frames(), 8820);
    }

    #[test]
    fn test_stream_spec_is_output_only_stereo() {
        let spec = PlaybackSettings::default().with_sample_rate(22050).stream_spec();
        assert_eq!(spec.input_channels, 0);
        assert_eq!(spec.output_channels, 2);
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(spec.frames_per_buffer, 256);
    }

    #[test]
    fn test_duration_secs() {
        let settings = PlaybackSettings::default().with_duration_secs(0.5).unwrap();
        assert_eq!(settings.duration, Duration::from_millis(500));

        assert_eq!(
            PlaybackSettings::default().with_duration_secs(-1.0),
            Err(SettingsError::InvalidDuration(-1.0))
        );
        assert!(
            PlaybackSettings::default()
                .with_duration_secs(f64::NAN)
                .is_err()
        );
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            PlaybackSettings::default().with_sample_rate(0).validate(),
            Err(SettingsError::ZeroSampleRate)
        );
        assert_eq!(
            PlaybackSettings::default()
                .with_frames_per_buffer(0)
                .validate(),
            Err(SettingsError::ZeroBufferSize)
        );
        let bad_waveform = SawtoothParams::default().with_amplitude(2.0);
        assert!(
            PlaybackSettings::default()
                .with_waveform(bad_waveform)
                .validate()
                .is_err()
        );
    }
}
