//! Core trait definitions for oscillators.

/// Common interface for all oscillators.
///
/// This trait defines oscillator-specific state management on top of
/// [`StereoSignal`](crate::StereoSignal) sample generation.
pub trait Oscillator {
    /// Phase state carried between buffers.
    type State: Copy;

    /// Returns a snapshot of the current phase state.
    fn state(&self) -> Self::State;

    /// Resets the oscillator to its initial state.
    fn reset(&mut self);
}
