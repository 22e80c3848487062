//! Playback session lifecycle.
//!
//! A session walks the audio subsystem through
//! `Uninitialized → Initialized → StreamOpen → StreamRunning → StreamStopped
//! → StreamClosed → Terminated`. A failure at any step skips the steps that
//! were never reached but always ends in `Terminated`: the [`Subsystem`]
//! guard shuts the library down when it goes out of scope.

use std::fmt;
use std::time::Duration;

use super::{AudioHost, CancelToken, OutputStream, PlaybackSettings, StreamSpec, WaitOutcome};
use crate::error::{AudioError, ErrorCode, Operation};
use crate::{StereoSawtooth, StereoSignal};

/// Where a [`Session`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initialized,
    StreamOpen,
    StreamRunning,
    StreamStopped,
    StreamClosed,
    Terminated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// An initialized audio subsystem.
///
/// Holding a `Subsystem` proves `initialize()` succeeded. It is shut down
/// exactly once: by [`Subsystem::terminate`], or on drop if that was never
/// called.
pub struct Subsystem<'h, H: AudioHost> {
    host: &'h mut H,
    live: bool,
}

impl<'h, H: AudioHost> Subsystem<'h, H> {
    /// Initializes `host`.
    pub fn initialize(host: &'h mut H) -> Result<Self, AudioError> {
        host.initialize()?;
        Ok(Self { host, live: true })
    }

    pub fn host(&mut self) -> &mut H {
        &mut *self.host
    }

    /// Shuts the subsystem down and reports the result.
    pub fn terminate(mut self) -> Result<(), AudioError> {
        self.live = false;
        self.host.terminate()
    }
}

impl<H: AudioHost> Drop for Subsystem<'_, H> {
    fn drop(&mut self) {
        if self.live {
            self.live = false;
            if let Err(err) = self.host.terminate() {
                log::warn!("audio subsystem shutdown failed: {err}");
            }
        }
    }
}

/// One run of the audio subsystem, from initialize to terminate.
///
/// Each step checks that the session is in the state the step starts
/// from. Dropping a session at any point shuts the subsystem down; an open
/// stream is released first, without a `stop()` or `close()` call.
pub struct Session<'h, H: AudioHost> {
    // Declared before `subsystem` so the stream is released first.
    stream: Option<H::Stream>,
    subsystem: Subsystem<'h, H>,
    state: SessionState,
}

impl<'h, H: AudioHost> Session<'h, H> {
    /// Initializes the audio subsystem.
    pub fn initialize(host: &'h mut H) -> Result<Self, AudioError> {
        let subsystem = Subsystem::initialize(host)?;
        log::debug!(
            "playback session: {} -> {}",
            SessionState::Uninitialized,
            SessionState::Initialized
        );
        Ok(Self {
            stream: None,
            subsystem,
            state: SessionState::Initialized,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Opens the default output stream with `source` as its fill routine.
    pub fn open<S>(&mut self, spec: &StreamSpec, source: S) -> Result<(), AudioError>
    where
        S: StereoSignal + Send + 'static,
    {
        self.expect(SessionState::Initialized, Operation::OpenStream)?;
        let stream = self.subsystem.host().open_default_stream(spec, source)?;
        self.stream = Some(stream);
        self.advance(SessionState::StreamOpen);
        Ok(())
    }

    /// Starts the open stream.
    pub fn start(&mut self) -> Result<(), AudioError> {
        self.expect(SessionState::StreamOpen, Operation::StartStream)?;
        self.stream_mut(Operation::StartStream)?.start()?;
        self.advance(SessionState::StreamRunning);
        Ok(())
    }

    /// Blocks the calling thread while the stream plays.
    pub fn wait(&self, duration: Duration, cancel: &CancelToken) -> WaitOutcome {
        let outcome = cancel.wait_timeout(duration);
        if outcome == WaitOutcome::Cancelled {
            log::debug!("playback session: wait cancelled");
        }
        outcome
    }

    /// Stops the running stream.
    pub fn stop(&mut self) -> Result<(), AudioError> {
        self.expect(SessionState::StreamRunning, Operation::StopStream)?;
        self.stream_mut(Operation::StopStream)?.stop()?;
        self.advance(SessionState::StreamStopped);
        Ok(())
    }

    /// Closes the stopped stream.
    pub fn close(&mut self) -> Result<(), AudioError> {
        self.expect(SessionState::StreamStopped, Operation::CloseStream)?;
        let stream = self
            .stream
            .take()
            .ok_or_else(|| AudioError::from_code(Operation::CloseStream, ErrorCode::BAD_STREAM_PTR))?;
        stream.close()?;
        self.advance(SessionState::StreamClosed);
        Ok(())
    }

    /// Shuts the subsystem down.
    ///
    /// Releases a stream that is still open without closing it.
    pub fn terminate(self) -> Result<(), AudioError> {
        let Session {
            stream,
            subsystem,
            state,
        } = self;
        drop(stream);
        let result = subsystem.terminate();
        log::debug!("playback session: {} -> {}", state, SessionState::Terminated);
        result
    }

    fn expect(&self, expected: SessionState, operation: Operation) -> Result<(), AudioError> {
        if self.state == expected {
            return Ok(());
        }
        let code = match self.state {
            SessionState::StreamRunning => ErrorCode::STREAM_IS_NOT_STOPPED,
            SessionState::StreamStopped if operation == Operation::StopStream => {
                ErrorCode::STREAM_IS_STOPPED
            }
            _ => ErrorCode::BAD_STREAM_PTR,
        };
        Err(AudioError::new(
            operation,
            code,
            format!("cannot {operation} while {}", self.state),
        ))
    }

    fn stream_mut(&mut self, operation: Operation) -> Result<&mut H::Stream, AudioError> {
        self.stream
            .as_mut()
            .ok_or_else(|| AudioError::from_code(operation, ErrorCode::BAD_STREAM_PTR))
    }

    fn advance(&mut self, next: SessionState) {
        log::debug!("playback session: {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Plays the sawtooth tone described by `settings` through `host`.
///
/// Runs the full session: initialize, open, start, wait for
/// `settings.duration` (or until `cancel` fires), stop, close, terminate.
/// The first failing step aborts the rest and the subsystem is still shut
/// down before the error is returned. Invalid settings are rejected before
/// the subsystem is touched.
///
/// # Examples
///
/// ```
/// use pinky::{CancelToken, OfflineHost, PlaybackSettings, play_with};
/// use std::time::Duration;
///
/// let mut host = OfflineHost::new();
/// let settings = PlaybackSettings::default().with_duration(Duration::from_millis(10));
/// play_with(&mut host, &settings, &CancelToken::new()).unwrap();
/// assert!(host.rendered().frames() >= 441);
/// ```
pub fn play_with<H: AudioHost>(
    host: &mut H,
    settings: &PlaybackSettings,
    cancel: &CancelToken,
) -> Result<(), AudioError> {
    settings.validate()?;

    let (left_hz, right_hz) = settings.waveform.frequencies(settings.sample_rate);
    log::info!(
        "playing sawtooth tone ({left_hz:.1} Hz / {right_hz:.1} Hz) at {} Hz for {:?}",
        settings.sample_rate,
        settings.duration
    );

    let mut session = Session::initialize(host)?;
    let generator = StereoSawtooth::new(settings.waveform);

    // On error the session drops here, which shuts the subsystem down.
    session.open(&settings.stream_spec(), generator)?;
    session.start()?;
    session.wait(settings.duration, cancel);
    session.stop()?;
    session.close()?;
    session.terminate()?;

    log::info!("tone finished");
    Ok(())
}
