//! Renders the tone to a WAV file instead of a device.

use std::path::Path;

use crate::error::AudioError;
use crate::playback::{CancelToken, OfflineHost, PlaybackSettings, play_with};

/// Errors from [`write_wav`].
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Audio(#[from] AudioError),
    #[error("failed to write WAV file: {0}")]
    Wav(#[from] hound::Error),
}

/// Plays `settings` through an [`OfflineHost`] and writes the result as a
/// stereo 32-bit float WAV file.
///
/// The file holds exactly `settings.total_frames()` frames. Returns that
/// frame count.
pub fn write_wav<P: AsRef<Path>>(path: P, settings: &PlaybackSettings) -> Result<u64, RenderError> {
    let mut host = OfflineHost::new();
    play_with(&mut host, settings, &CancelToken::new())?;
    let rendered = host.take_rendered();

    let frames = settings.total_frames().min(rendered.frames() as u64);
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate: settings.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path.as_ref(), spec)?;
    for &sample in &rendered.samples[..2 * frames as usize] {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    log::info!("wrote {frames} frames to {}", path.as_ref().display());
    Ok(frames)
}
