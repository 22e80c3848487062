//! Pinky - plays a tone while an armband reports a fist
//!
//! This library provides a stereo sawtooth generator, a playback session
//! that always shuts its audio subsystem down, and the pose listener loop
//! that ties the two together.

pub mod error;
pub mod listener;
pub mod oscillators;
pub mod playback;
#[cfg(feature = "wav-export")]
pub mod render;
pub mod signals;

// Re-export commonly used types at the crate root
pub use error::{AudioError, ErrorCode, ErrorReport, Operation, SettingsError};
pub use listener::{
    Arm, Collector, DeviceListener, EventSource, ListenerError, Pose, SourceStatus, XDirection,
    run_loop,
};
pub use oscillators::{Oscillator, PhasePair, SawtoothParams, StereoSawtooth};
#[cfg(feature = "playback")]
pub use playback::{CpalHost, play};
pub use playback::{
    AudioHost, CancelToken, OfflineHost, OutputStream, PlaybackSettings, Player, Session,
    SessionState, StreamSpec, Tone, WaitOutcome, play_with,
};
pub use signals::{Frame, StereoSignal};
