//! Reusable tone player.

use super::{AudioHost, CancelToken, PlaybackSettings, play_with};
use crate::error::AudioError;

/// Something that can play the fist tone once.
pub trait Tone {
    /// Plays the tone to completion, blocking the caller.
    fn play_tone(&mut self) -> Result<(), AudioError>;
}

/// Plays one full session per call through an owned host.
///
/// # Examples
///
/// ```
/// use pinky::{OfflineHost, PlaybackSettings, Player, Tone};
/// use std::time::Duration;
///
/// let settings = PlaybackSettings::default().with_duration(Duration::from_millis(5));
/// let mut player = Player::new(OfflineHost::new(), settings);
/// player.play_tone().unwrap();
/// player.play_tone().unwrap();
/// assert_eq!(player.host().lifecycle_calls(), (2, 2));
/// ```
pub struct Player<H: AudioHost> {
    host: H,
    settings: PlaybackSettings,
    cancel: CancelToken,
}

impl<H: AudioHost> Player<H> {
    pub fn new(host: H, settings: PlaybackSettings) -> Self {
        Self {
            host,
            settings,
            cancel: CancelToken::new(),
        }
    }

    /// Uses `cancel` to cut running tones short.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn settings(&self) -> &PlaybackSettings {
        &self.settings
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }
}

impl<H: AudioHost> Tone for Player<H> {
    fn play_tone(&mut self) -> Result<(), AudioError> {
        play_with(&mut self.host, &self.settings, &self.cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_cancelled_player_returns_quickly() {
        let cancel = CancelToken::new();
        cancel.cancel();
        let settings = PlaybackSettings::default().with_duration(Duration::from_secs(30));
        let mut player = Player::new(crate::OfflineHost::new(), settings).with_cancel(cancel);

        let started = Instant::now();
        player.play_tone().unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));

        let host = player.into_host();
        assert_eq!(host.lifecycle_calls(), (1, 1));
    }

    #[test]
    fn test_keeps_settings() {
        let settings = PlaybackSettings::default().with_sample_rate(48000);
        let player = Player::new(crate::OfflineHost::new(), settings.clone());
        assert_eq!(player.settings(), &settings);
    }
}
