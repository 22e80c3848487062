//! Stereo sawtooth phaser implementation.

use super::Oscillator;
use crate::error::SettingsError;
use crate::{Frame, StereoSignal};

/// Default phase advance per frame on the left channel.
pub const DEFAULT_LEFT_STEP: f32 = 0.01;
/// Default phase advance per frame on the right channel (5x the left, so the
/// two channels are easy to tell apart).
pub const DEFAULT_RIGHT_STEP: f32 = 0.05;
/// Default output amplitude.
pub const DEFAULT_AMPLITUDE: f32 = 1.0;

/// The pair of phase accumulators driving a [`StereoSawtooth`].
///
/// Each phase lies in `[-1.0, 1.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhasePair {
    pub left: f32,
    pub right: f32,
}

impl PhasePair {
    /// Both phases at zero, the state every playback session starts from.
    pub const ZERO: PhasePair = PhasePair {
        left: 0.0,
        right: 0.0,
    };

    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }
}

/// Per-channel phase steps and output amplitude for a [`StereoSawtooth`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SawtoothParams {
    /// Phase advance per frame on the left channel, in `[0.0, 2.0)`
    pub left_step: f32,
    /// Phase advance per frame on the right channel, in `[0.0, 2.0)`
    pub right_step: f32,
    /// Output gain in `[0.0, 1.0]`. Scales samples, never the phase.
    pub amplitude: f32,
}

impl Default for SawtoothParams {
    fn default() -> Self {
        Self {
            left_step: DEFAULT_LEFT_STEP,
            right_step: DEFAULT_RIGHT_STEP,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }
}

impl SawtoothParams {
    /// Derives phase steps from channel frequencies.
    ///
    /// The phase covers a range of width 2.0 per cycle, so the step is
    /// `2 * frequency / sample_rate`.
    ///
    /// # Arguments
    ///
    /// * `left_hz` - Left channel frequency in Hz
    /// * `right_hz` - Right channel frequency in Hz
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Examples
    ///
    /// ```
    /// use pinky::SawtoothParams;
    ///
    /// let params = SawtoothParams::from_frequencies(220.5, 1102.5, 44100);
    /// assert!((params.left_step - 0.01).abs() < 1e-6);
    /// assert!((params.right_step - 0.05).abs() < 1e-6);
    /// ```
    pub fn from_frequencies(left_hz: f64, right_hz: f64, sample_rate: u32) -> Self {
        let rate = f64::from(sample_rate);
        Self {
            left_step: (2.0 * left_hz / rate) as f32,
            right_step: (2.0 * right_hz / rate) as f32,
            amplitude: DEFAULT_AMPLITUDE,
        }
    }

    /// Returns these parameters with a different amplitude.
    pub fn with_amplitude(mut self, amplitude: f32) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Channel frequencies in Hz at the given sample rate.
    pub fn frequencies(&self, sample_rate: u32) -> (f64, f64) {
        let rate = f64::from(sample_rate);
        (
            f64::from(self.left_step) * rate / 2.0,
            f64::from(self.right_step) * rate / 2.0,
        )
    }

    /// Checks that a single wrap keeps both phases in range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (channel, step) in [("left", self.left_step), ("right", self.right_step)] {
            if !(0.0..2.0).contains(&step) {
                return Err(SettingsError::StepOutOfRange { channel, step });
            }
        }
        if !(0.0..=1.0).contains(&self.amplitude) {
            return Err(SettingsError::AmplitudeOutOfRange(self.amplitude));
        }
        Ok(())
    }
}

/// Advances one phase accumulator and wraps it back into `[-1.0, 1.0)`.
#[inline]
pub(crate) fn advance(phase: f32, step: f32) -> f32 {
    let next = phase + step;
    if next >= 1.0 { next - 2.0 } else { next }
}

/// A two-channel sawtooth phaser.
///
/// Each channel emits its raw phase, which ramps linearly from -1.0 towards
/// 1.0 and then drops by 2.0. The right channel runs at a different step so
/// the two pitches are distinguishable. Generation touches nothing but the
/// oscillator itself, which makes it safe to run on a real-time audio thread.
///
/// # Examples
///
/// ```
/// use pinky::{Frame, StereoSawtooth, StereoSignal};
///
/// let mut saw = StereoSawtooth::default();
/// assert_eq!(saw.next_frame(), Frame::new(0.0, 0.0));
/// assert_eq!(saw.next_frame(), Frame::new(0.01, 0.05));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StereoSawtooth {
    phase: PhasePair,
    params: SawtoothParams,
}

impl StereoSawtooth {
    /// Creates a phaser starting from `(0.0, 0.0)`.
    pub fn new(params: SawtoothParams) -> Self {
        Self::with_state(params, PhasePair::ZERO)
    }

    /// Creates a phaser that continues from a saved phase state.
    ///
    /// # Arguments
    ///
    /// * `params` - Phase steps and amplitude
    /// * `phase` - Starting phases, each in `[-1.0, 1.0]`
    pub fn with_state(params: SawtoothParams, phase: PhasePair) -> Self {
        debug_assert!((-1.0..=1.0).contains(&phase.left));
        debug_assert!((-1.0..=1.0).contains(&phase.right));
        Self { phase, params }
    }

    /// Gets the phase steps and amplitude.
    pub fn params(&self) -> &SawtoothParams {
        &self.params
    }
}

impl StereoSignal for StereoSawtooth {
    fn next_frame(&mut self) -> Frame {
        let gain = self.params.amplitude;
        let frame = Frame::new(self.phase.left * gain, self.phase.right * gain);

        self.phase.left = advance(self.phase.left, self.params.left_step);
        self.phase.right = advance(self.phase.right, self.params.right_step);

        frame
    }
}

impl Oscillator for StereoSawtooth {
    type State = PhasePair;

    fn state(&self) -> PhasePair {
        self.phase
    }

    fn reset(&mut self) {
        self.phase = PhasePair::ZERO;
    }
}
