//! A device-free audio host that renders into memory.
//!
//! The offline stream pulls the buffers a driver would have asked for while
//! the stream was running: when the stream stops, it renders one
//! `frames_per_buffer` block per elapsed buffer period (rounded up) into the
//! host's shared output.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use super::{AudioHost, OutputStream, StreamSpec};
use crate::StereoSignal;
use crate::error::{AudioError, ErrorCode, Operation};

/// Interleaved stereo samples captured by an [`OfflineHost`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    /// Interleaved `[left, right, ...]` samples
    pub samples: Vec<f32>,
    /// Number of fill-routine calls that produced `samples`
    pub buffers: usize,
}

impl Rendered {
    /// Number of stereo frames captured.
    pub fn frames(&self) -> usize {
        self.samples.len() / 2
    }
}

/// Audio host with no device behind it.
///
/// # Examples
///
/// ```
/// use pinky::{AudioHost, OfflineHost, OutputStream, PlaybackSettings, StereoSawtooth};
///
/// let mut host = OfflineHost::new();
/// host.initialize().unwrap();
/// let spec = PlaybackSettings::default().stream_spec();
/// let mut stream = host.open_default_stream(&spec, StereoSawtooth::default()).unwrap();
/// stream.start().unwrap();
/// stream.stop().unwrap();
/// stream.close().unwrap();
/// host.terminate().unwrap();
///
/// let rendered = host.rendered();
/// assert_eq!(rendered.frames(), rendered.buffers * 256);
/// ```
#[derive(Debug, Default)]
pub struct OfflineHost {
    initialized: bool,
    initialize_calls: usize,
    terminate_calls: usize,
    output: Arc<Mutex<Rendered>>,
}

impl OfflineHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// How many times `initialize()` and `terminate()` succeeded.
    pub fn lifecycle_calls(&self) -> (usize, usize) {
        (self.initialize_calls, self.terminate_calls)
    }

    /// A copy of everything rendered so far.
    pub fn rendered(&self) -> Rendered {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Takes everything rendered so far, leaving the capture empty.
    pub fn take_rendered(&mut self) -> Rendered {
        std::mem::take(&mut *self.output.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl AudioHost for OfflineHost {
    type Stream = OfflineStream;

    fn initialize(&mut self) -> Result<(), AudioError> {
        self.initialized = true;
        self.initialize_calls += 1;
        Ok(())
    }

    fn open_default_stream<S>(
        &mut self,
        spec: &StreamSpec,
        source: S,
    ) -> Result<OfflineStream, AudioError>
    where
        S: StereoSignal + Send + 'static,
    {
        let fail = |code| Err(AudioError::from_code(Operation::OpenStream, code));
        if !self.initialized {
            return fail(ErrorCode::NOT_INITIALIZED);
        }
        if spec.input_channels != 0 || spec.output_channels != 2 {
            return fail(ErrorCode::INVALID_CHANNEL_COUNT);
        }
        if spec.sample_rate == 0 {
            return fail(ErrorCode::INVALID_SAMPLE_RATE);
        }
        if spec.frames_per_buffer == 0 {
            return fail(ErrorCode::INVALID_ARGUMENT);
        }

        Ok(OfflineStream {
            source: Box::new(source),
            scratch: vec![0.0; 2 * spec.frames_per_buffer as usize],
            sample_rate: spec.sample_rate,
            started_at: None,
            output: Arc::clone(&self.output),
        })
    }

    fn terminate(&mut self) -> Result<(), AudioError> {
        if !self.initialized {
            return Err(AudioError::from_code(
                Operation::Terminate,
                ErrorCode::NOT_INITIALIZED,
            ));
        }
        self.initialized = false;
        self.terminate_calls += 1;
        Ok(())
    }
}

/// Stream opened by an [`OfflineHost`].
pub struct OfflineStream {
    source: Box<dyn StereoSignal + Send>,
    scratch: Vec<f32>,
    sample_rate: u32,
    started_at: Option<Instant>,
    output: Arc<Mutex<Rendered>>,
}

impl OfflineStream {
    fn frames_per_buffer(&self) -> u64 {
        (self.scratch.len() / 2) as u64
    }
}

impl OutputStream for OfflineStream {
    fn start(&mut self) -> Result<(), AudioError> {
        if self.started_at.is_some() {
            return Err(AudioError::from_code(
                Operation::StartStream,
                ErrorCode::STREAM_IS_NOT_STOPPED,
            ));
        }
        self.started_at = Some(Instant::now());
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        let started_at = self.started_at.take().ok_or_else(|| {
            AudioError::from_code(Operation::StopStream, ErrorCode::STREAM_IS_STOPPED)
        })?;

        let elapsed_frames =
            (started_at.elapsed().as_secs_f64() * f64::from(self.sample_rate)).ceil() as u64;
        let buffers = elapsed_frames.div_ceil(self.frames_per_buffer()).max(1);

        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        for _ in 0..buffers {
            self.source.fill_interleaved(&mut self.scratch);
            output.samples.extend_from_slice(&self.scratch);
            output.buffers += 1;
        }
        Ok(())
    }

    fn close(mut self) -> Result<(), AudioError> {
        if self.started_at.is_some() {
            self.stop()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Frame, PlaybackSettings};
    use std::time::Duration;

    fn spec() -> StreamSpec {
        PlaybackSettings::default().stream_spec()
    }

    #[test]
    fn test_open_requires_initialize() {
        let mut host = OfflineHost::new();
        let err = host.open_default_stream(&spec(), Frame::default()).err().unwrap();
        assert_eq!(err.code, ErrorCode::NOT_INITIALIZED);
    }

    #[test]
    fn test_rejects_non_stereo_output() {
        let mut host = OfflineHost::new();
        host.initialize().unwrap();
        let mono = StreamSpec {
            output_channels: 1,
            ..spec()
        };
        let err = host.open_default_stream(&mono, Frame::default()).err().unwrap();
        assert_eq!(err.code, ErrorCode::INVALID_CHANNEL_COUNT);
    }

    #[test]
    fn test_terminate_without_initialize_fails() {
        let mut host = OfflineHost::new();
        assert_eq!(
            host.terminate().unwrap_err().code,
            ErrorCode::NOT_INITIALIZED
        );
    }

    #[test]
    fn test_renders_whole_buffers_for_elapsed_time() {
        let mut host = OfflineHost::new();
        host.initialize().unwrap();
        let mut stream = host.open_default_stream(&spec(), Frame::new(0.5, -0.5)).unwrap();
        stream.start().unwrap();
        std::thread::sleep(Duration::from_millis(20));
        stream.stop().unwrap();
        stream.close().unwrap();

        let rendered = host.rendered();
        // 20 ms at 44.1 kHz is at least 882 frames, i.e. four 256-frame buffers
        assert!(rendered.buffers >= 4);
        assert_eq!(rendered.frames(), rendered.buffers * 256);
        assert!(rendered.samples.chunks(2).all(|pair| pair == [0.5, -0.5]));
    }

    #[test]
    fn test_stop_before_start_fails() {
        let mut host = OfflineHost::new();
        host.initialize().unwrap();
        let mut stream = host.open_default_stream(&spec(), Frame::default()).unwrap();
        assert_eq!(
            stream.stop().unwrap_err().code,
            ErrorCode::STREAM_IS_STOPPED
        );
    }

    #[test]
    fn test_take_rendered_clears_capture() {
        let mut host = OfflineHost::new();
        host.initialize().unwrap();
        let mut stream = host.open_default_stream(&spec(), Frame::default()).unwrap();
        stream.start().unwrap();
        stream.stop().unwrap();
        assert!(host.take_rendered().buffers >= 1);
        assert_eq!(host.rendered(), Rendered::default());
    }
}
