//! Keyboard stand-in for an armband.
//!
//! Keys map to the events a real hub would deliver:
//!
//! | Key        | Event                          |
//! |------------|--------------------------------|
//! | `f`        | pose `fist`                    |
//! | `r`        | pose `rest`                    |
//! | `s`        | pose `fingersSpread`           |
//! | `i` / `o`  | pose `waveIn` / `waveOut`      |
//! | `d`        | pose `doubleTap`               |
//! | `l` / `k`  | arm recognized (left / right)  |
//! | `x`        | arm lost                       |
//! | `q` / Esc  | finish                         |

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use super::{Arm, DeviceListener, EventSource, ListenerError, Pose, SourceStatus, XDirection};
use crate::playback::CancelToken;

/// Event produced by one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Pose(Pose),
    ArmRecognized(Arm),
    ArmLost,
    Quit,
}

/// Maps a key to the event it simulates.
pub fn command_for_key(code: KeyCode) -> Option<KeyCommand> {
    let command = match code {
        KeyCode::Char('f') => KeyCommand::Pose(Pose::Fist),
        KeyCode::Char('r') => KeyCommand::Pose(Pose::Rest),
        KeyCode::Char('s') => KeyCommand::Pose(Pose::FingersSpread),
        KeyCode::Char('i') => KeyCommand::Pose(Pose::WaveIn),
        KeyCode::Char('o') => KeyCommand::Pose(Pose::WaveOut),
        KeyCode::Char('d') => KeyCommand::Pose(Pose::DoubleTap),
        KeyCode::Char('l') => KeyCommand::ArmRecognized(Arm::Left),
        KeyCode::Char('k') => KeyCommand::ArmRecognized(Arm::Right),
        KeyCode::Char('x') => KeyCommand::ArmLost,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyCommand::Quit,
        _ => return None,
    };
    Some(command)
}

/// Event source reading key presses from the terminal.
///
/// Raw mode is enabled on the first `run()` and restored on drop. The quit
/// key fires the source's [`CancelToken`], so a tone sharing that token
/// stops with it.
pub struct KeyboardSource {
    raw_mode: bool,
    started: Instant,
    cancel: CancelToken,
}

impl Default for KeyboardSource {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyboardSource {
    pub fn new() -> Self {
        Self {
            raw_mode: false,
            started: Instant::now(),
            cancel: CancelToken::new(),
        }
    }

    /// Fires `cancel` when the quit key is pressed.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Delivers one key command to `listener`.
    pub fn dispatch(
        &mut self,
        command: KeyCommand,
        listener: &mut dyn DeviceListener,
    ) -> SourceStatus {
        let timestamp = self.timestamp();
        match command {
            KeyCommand::Pose(pose) => listener.on_pose(timestamp, pose),
            KeyCommand::ArmRecognized(arm) => {
                listener.on_arm_recognized(timestamp, arm, XDirection::TowardWrist)
            }
            KeyCommand::ArmLost => listener.on_arm_lost(timestamp),
            KeyCommand::Quit => {
                self.cancel.cancel();
                return SourceStatus::Finished;
            }
        }
        SourceStatus::Running
    }

    fn timestamp(&self) -> u64 {
        self.started.elapsed().as_micros() as u64
    }
}

impl EventSource for KeyboardSource {
    fn wait_for_device(&mut self, _timeout: Duration) -> Result<bool, ListenerError> {
        Ok(true)
    }

    fn run(
        &mut self,
        duration: Duration,
        listener: &mut dyn DeviceListener,
    ) -> Result<SourceStatus, ListenerError> {
        if !self.raw_mode {
            enable_raw_mode()?;
            self.raw_mode = true;
        }

        let deadline = Instant::now() + duration;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !event::poll(remaining)? {
                return Ok(SourceStatus::Running);
            }
            if let Event::Key(key) = event::read()?
                && key.kind == KeyEventKind::Press
                && let Some(command) = command_for_key(key.code)
                && self.dispatch(command, listener) == SourceStatus::Finished
            {
                return Ok(SourceStatus::Finished);
            }
        }
    }
}

impl Drop for KeyboardSource {
    fn drop(&mut self) {
        if self.raw_mode {
            let _ = disable_raw_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Collector;

    #[test]
    fn test_pose_keys() {
        assert_eq!(
            command_for_key(KeyCode::Char('f')),
            Some(KeyCommand::Pose(Pose::Fist))
        );
        assert_eq!(
            command_for_key(KeyCode::Char('s')),
            Some(KeyCommand::Pose(Pose::FingersSpread))
        );
    }

    #[test]
    fn test_arm_and_quit_keys() {
        assert_eq!(
            command_for_key(KeyCode::Char('k')),
            Some(KeyCommand::ArmRecognized(Arm::Right))
        );
        assert_eq!(command_for_key(KeyCode::Char('x')), Some(KeyCommand::ArmLost));
        assert_eq!(command_for_key(KeyCode::Esc), Some(KeyCommand::Quit));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(command_for_key(KeyCode::Char('z')), None);
        assert_eq!(command_for_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_dispatch_updates_listener() {
        let mut source = KeyboardSource::new();
        let mut collector = Collector::new();
        let status = source.dispatch(KeyCommand::ArmRecognized(Arm::Left), &mut collector);
        assert_eq!(status, SourceStatus::Running);
        source.dispatch(KeyCommand::Pose(Pose::Fist), &mut collector);
        assert_eq!(collector.status_line(), "[L][fist          ]");
        source.dispatch(KeyCommand::ArmLost, &mut collector);
        assert_eq!(collector.arm(), None);
    }

    #[test]
    fn test_quit_fires_shared_cancel_token() {
        let cancel = CancelToken::new();
        let mut source = KeyboardSource::new().with_cancel(cancel.clone());
        let mut collector = Collector::new();

        source.dispatch(KeyCommand::Pose(Pose::Rest), &mut collector);
        assert!(!cancel.is_cancelled());

        let status = source.dispatch(KeyCommand::Quit, &mut collector);
        assert_eq!(status, SourceStatus::Finished);
        assert!(cancel.is_cancelled());
    }
}
