//! Seams between the playback session and an audio library.

use crate::error::AudioError;
use crate::StereoSignal;

/// Parameters for opening a default output stream.
///
/// Samples are always 32-bit floats, interleaved when there is more than one
/// channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSpec {
    /// Number of input channels (0 for an output-only stream)
    pub input_channels: u16,
    /// Number of output channels
    pub output_channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Frames requested from the fill routine per callback
    pub frames_per_buffer: u32,
}

/// An audio library that can open output streams.
///
/// `initialize()` and `terminate()` bracket all other calls. Callers are
/// expected to go through [`Subsystem`](super::Subsystem) so every
/// successful `initialize()` is balanced by exactly one `terminate()`.
pub trait AudioHost {
    /// Stream handle returned by `open_default_stream()`.
    type Stream: OutputStream;

    /// Initializes the audio library.
    fn initialize(&mut self) -> Result<(), AudioError>;

    /// Opens the default output device with `source` as its fill routine.
    ///
    /// The source is moved to whichever thread the library runs its
    /// callbacks on and is dropped when the stream closes.
    fn open_default_stream<S>(
        &mut self,
        spec: &StreamSpec,
        source: S,
    ) -> Result<Self::Stream, AudioError>
    where
        S: StereoSignal + Send + 'static;

    /// Shuts the audio library down.
    fn terminate(&mut self) -> Result<(), AudioError>;
}

/// An open output stream.
///
/// Dropping a stream without calling `close()` releases it without
/// reporting errors.
pub trait OutputStream {
    /// Starts pulling buffers from the fill routine.
    fn start(&mut self) -> Result<(), AudioError>;

    /// Stops pulling buffers once the pending ones have played.
    fn stop(&mut self) -> Result<(), AudioError>;

    /// Releases the stream.
    fn close(self) -> Result<(), AudioError>
    where
        Self: Sized;
}
