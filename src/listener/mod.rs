//! Armband pose listening.
//!
//! This module provides:
//! - `Pose`, `Arm` and `XDirection` values reported by the band
//! - `DeviceListener` callbacks and the `Collector` that records them
//! - `EventSource`, the hub abstraction, and `run_loop`, which polls it
//!   and plays a tone while a fist is held
//! - `KeyboardSource`, a terminal stand-in for the band (feature `cli`)

mod collector;
mod hub;
#[cfg(feature = "cli")]
pub mod keyboard;
mod pose;

pub use collector::{Collector, DeviceListener, POSE_COLUMN_WIDTH};
pub use hub::{DEVICE_WAIT, EventSource, ListenerError, POLL_INTERVAL, SourceStatus, run_loop};
#[cfg(feature = "cli")]
pub use keyboard::KeyboardSource;
pub use pose::{Arm, Pose, XDirection};
