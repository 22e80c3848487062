//! Error types shared by the playback session and its audio backends.

use std::fmt;

/// Numeric status code reported alongside every [`AudioError`].
///
/// Codes follow the classic audio-I/O numbering: `0` means success and
/// failures are negative values counting up from `-10000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    pub const NO_ERROR: ErrorCode = ErrorCode(0);
    pub const NOT_INITIALIZED: ErrorCode = ErrorCode(-10000);
    pub const UNANTICIPATED_HOST_ERROR: ErrorCode = ErrorCode(-9999);
    pub const INVALID_CHANNEL_COUNT: ErrorCode = ErrorCode(-9998);
    pub const INVALID_SAMPLE_RATE: ErrorCode = ErrorCode(-9997);
    pub const INVALID_DEVICE: ErrorCode = ErrorCode(-9996);
    pub const SAMPLE_FORMAT_NOT_SUPPORTED: ErrorCode = ErrorCode(-9994);
    pub const INSUFFICIENT_MEMORY: ErrorCode = ErrorCode(-9992);
    pub const BAD_STREAM_PTR: ErrorCode = ErrorCode(-9988);
    pub const INTERNAL_ERROR: ErrorCode = ErrorCode(-9986);
    pub const DEVICE_UNAVAILABLE: ErrorCode = ErrorCode(-9985);
    pub const STREAM_IS_STOPPED: ErrorCode = ErrorCode(-9983);
    pub const STREAM_IS_NOT_STOPPED: ErrorCode = ErrorCode(-9982);
    pub const INVALID_ARGUMENT: ErrorCode = ErrorCode(-9977);
    pub const UNSUPPORTED_STREAM_CONFIG: ErrorCode = ErrorCode(-9976);

    /// Returns the raw numeric value.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Returns true for every code other than [`ErrorCode::NO_ERROR`].
    pub fn is_error(self) -> bool {
        self.0 != 0
    }

    /// Default human-readable text for a code.
    pub fn text(self) -> &'static str {
        match self {
            ErrorCode::NO_ERROR => "Success",
            ErrorCode::NOT_INITIALIZED => "Audio subsystem not initialized",
            ErrorCode::UNANTICIPATED_HOST_ERROR => "Unanticipated host error",
            ErrorCode::INVALID_CHANNEL_COUNT => "Invalid number of channels",
            ErrorCode::INVALID_SAMPLE_RATE => "Invalid sample rate",
            ErrorCode::INVALID_DEVICE => "Invalid device",
            ErrorCode::SAMPLE_FORMAT_NOT_SUPPORTED => "Sample format not supported",
            ErrorCode::INSUFFICIENT_MEMORY => "Insufficient memory",
            ErrorCode::BAD_STREAM_PTR => "Invalid stream",
            ErrorCode::INTERNAL_ERROR => "Internal error",
            ErrorCode::DEVICE_UNAVAILABLE => "Device unavailable",
            ErrorCode::STREAM_IS_STOPPED => "Stream is stopped",
            ErrorCode::STREAM_IS_NOT_STOPPED => "Stream is not stopped",
            ErrorCode::INVALID_ARGUMENT => "Invalid argument",
            ErrorCode::UNSUPPORTED_STREAM_CONFIG => "Stream configuration not supported",
            _ => "Illegal error number",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The audio subsystem call that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Initialize,
    OpenStream,
    StartStream,
    StopStream,
    CloseStream,
    Terminate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Initialize => "initialize",
            Operation::OpenStream => "open stream",
            Operation::StartStream => "start stream",
            Operation::StopStream => "stop stream",
            Operation::CloseStream => "close stream",
            Operation::Terminate => "terminate",
        };
        f.write_str(name)
    }
}

/// Failure reported by any audio subsystem call.
///
/// Every step of a playback session (initialize, open, start, stop, close,
/// terminate) produces this one error kind, carrying the numeric code and
/// the message supplied by the audio backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{operation} failed: {message} (error {code})")]
pub struct AudioError {
    /// The subsystem call that failed
    pub operation: Operation,
    /// Numeric status code
    pub code: ErrorCode,
    /// Human-readable description from the backend
    pub message: String,
}

impl AudioError {
    /// Creates an error with an explicit message.
    pub fn new(operation: Operation, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            operation,
            code,
            message: message.into(),
        }
    }

    /// Creates an error whose message is the code's default text.
    pub fn from_code(operation: Operation, code: ErrorCode) -> Self {
        Self::new(operation, code, code.text())
    }

    /// Two-line diagnostic with the numeric code and the message.
    ///
    /// # Examples
    ///
    /// ```
    /// use pinky::{AudioError, ErrorCode, Operation};
    ///
    /// let err = AudioError::from_code(Operation::StartStream, ErrorCode::DEVICE_UNAVAILABLE);
    /// assert_eq!(
    ///     err.report().to_string(),
    ///     "Error number: -9985\nError message: Device unavailable"
    /// );
    /// ```
    pub fn report(&self) -> ErrorReport<'_> {
        ErrorReport(self)
    }
}

/// Display adapter returned by [`AudioError::report`].
#[derive(Debug, Clone, Copy)]
pub struct ErrorReport<'a>(&'a AudioError);

impl fmt::Display for ErrorReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error number: {}", self.0.code)?;
        write!(f, "Error message: {}", self.0.message)
    }
}

/// Invalid playback or waveform settings.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("sample rate must be greater than zero")]
    ZeroSampleRate,
    #[error("frames per buffer must be greater than zero")]
    ZeroBufferSize,
    #[error("duration {0} is not a non-negative number of seconds")]
    InvalidDuration(f64),
    #[error("{channel} phase step {step} is outside [0.0, 2.0)")]
    StepOutOfRange { channel: &'static str, step: f32 },
    #[error("amplitude {0} is outside [0.0, 1.0]")]
    AmplitudeOutOfRange(f32),
}

impl From<SettingsError> for AudioError {
    fn from(err: SettingsError) -> Self {
        AudioError::new(
            Operation::OpenStream,
            ErrorCode::INVALID_ARGUMENT,
            err.to_string(),
        )
    }
}
