//! Event sources and the status/tone poll loop.

use std::io::{self, Write};
use std::time::Duration;

use super::{Collector, DeviceListener};
use crate::playback::{CancelToken, Tone};

/// How long each `run()` call lasts: 20 status updates per second.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1000 / 20);
/// How long to wait for a device before giving up.
pub const DEVICE_WAIT: Duration = Duration::from_secs(10);

/// Errors from an event source or from writing the status line.
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("Unable to find an armband!")]
    DeviceNotFound,
    #[error("event source failed: {0}")]
    Source(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Whether a source has more events to deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceStatus {
    Running,
    Finished,
}

/// A hub that delivers armband events to a listener.
pub trait EventSource {
    /// Waits up to `timeout` for a device to connect.
    ///
    /// Returns `false` if none showed up.
    fn wait_for_device(&mut self, timeout: Duration) -> Result<bool, ListenerError>;

    /// Dispatches events to `listener` for `duration`.
    fn run(
        &mut self,
        duration: Duration,
        listener: &mut dyn DeviceListener,
    ) -> Result<SourceStatus, ListenerError>;
}

/// Runs the status/tone loop until `cancel` fires or the source finishes.
///
/// Each iteration runs the source for [`POLL_INTERVAL`], rewrites the
/// status line in place and, while the pose is a fist, plays the tone.
/// A failed tone is logged, with its error number and message, and the
/// loop keeps going.
pub fn run_loop<S, T, W>(
    source: &mut S,
    collector: &mut Collector,
    tone: &mut T,
    out: &mut W,
    cancel: &CancelToken,
) -> Result<(), ListenerError>
where
    S: EventSource + ?Sized,
    T: Tone + ?Sized,
    W: Write + ?Sized,
{
    writeln!(out, "Attempting to find an armband...")?;
    if !source.wait_for_device(DEVICE_WAIT)? {
        return Err(ListenerError::DeviceNotFound);
    }
    writeln!(out, "Connected to an armband!")?;
    writeln!(out)?;
    log::info!("armband connected, polling every {POLL_INTERVAL:?}");

    while !cancel.is_cancelled() {
        let status = source.run(POLL_INTERVAL, collector)?;

        write!(out, "\r")?;
        collector.write_status(out)?;

        if collector.wants_tone()
            && let Err(err) = tone.play_tone()
        {
            log::error!("tone playback failed: {err}\n{}", err.report());
        }

        out.flush()?;

        if status == SourceStatus::Finished {
            log::debug!("event source finished");
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AudioError, ErrorCode, Operation};
    use crate::listener::{Arm, Pose, XDirection};

    enum Scripted {
        Pose(Pose),
        ArmRecognized(Arm),
        ArmLost,
    }

    /// Delivers one batch of events per `run()` call.
    struct ScriptedSource {
        connected: bool,
        batches: Vec<Vec<Scripted>>,
        runs: usize,
    }

    impl ScriptedSource {
        fn new(batches: Vec<Vec<Scripted>>) -> Self {
            Self {
                connected: true,
                batches,
                runs: 0,
            }
        }
    }

    impl EventSource for ScriptedSource {
        fn wait_for_device(&mut self, _timeout: Duration) -> Result<bool, ListenerError> {
            Ok(self.connected)
        }

        fn run(
            &mut self,
            _duration: Duration,
            listener: &mut dyn DeviceListener,
        ) -> Result<SourceStatus, ListenerError> {
            let timestamp = self.runs as u64;
            if let Some(batch) = self.batches.get(self.runs) {
                for event in batch {
                    match event {
                        Scripted::Pose(pose) => listener.on_pose(timestamp, *pose),
                        Scripted::ArmRecognized(arm) => {
                            listener.on_arm_recognized(timestamp, *arm, XDirection::TowardWrist)
                        }
                        Scripted::ArmLost => listener.on_arm_lost(timestamp),
                    }
                }
            }
            self.runs += 1;
            if self.runs >= self.batches.len() {
                Ok(SourceStatus::Finished)
            } else {
                Ok(SourceStatus::Running)
            }
        }
    }

    #[derive(Default)]
    struct CountingTone {
        plays: usize,
        fail: bool,
    }

    impl Tone for CountingTone {
        fn play_tone(&mut self) -> Result<(), AudioError> {
            self.plays += 1;
            if self.fail {
                Err(AudioError::from_code(
                    Operation::OpenStream,
                    ErrorCode::DEVICE_UNAVAILABLE,
                ))
            } else {
                Ok(())
            }
        }
    }

    fn run(source: &mut ScriptedSource, tone: &mut CountingTone) -> (Result<(), ListenerError>, String) {
        let mut collector = Collector::new();
        let mut out = Vec::new();
        let result = run_loop(source, &mut collector, tone, &mut out, &CancelToken::new());
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_plays_once_per_tick_while_fist_is_held() {
        let mut source = ScriptedSource::new(vec![
            vec![Scripted::ArmRecognized(Arm::Left)],
            vec![Scripted::Pose(Pose::Fist)],
            vec![],
            vec![Scripted::Pose(Pose::Rest)],
            vec![],
        ]);
        let mut tone = CountingTone::default();
        let (result, output) = run(&mut source, &mut tone);
        result.unwrap();
        assert_eq!(tone.plays, 2);
        assert_eq!(source.runs, 5);
        assert!(output.starts_with("Attempting to find an armband...\nConnected to an armband!\n\n"));
        assert!(output.contains("\r[L][fist          ]"));
        assert!(output.ends_with("\r[L][rest          ]"));
    }

    #[test]
    fn test_status_line_tracks_arm() {
        let mut source = ScriptedSource::new(vec![
            vec![],
            vec![Scripted::ArmRecognized(Arm::Right), Scripted::Pose(Pose::WaveOut)],
            vec![Scripted::ArmLost],
        ]);
        let mut tone = CountingTone::default();
        let (result, output) = run(&mut source, &mut tone);
        result.unwrap();
        let lines: Vec<&str> = output.split('\r').skip(1).collect();
        assert_eq!(
            lines,
            ["[?][              ]", "[R][waveOut       ]", "[?][              ]"]
        );
    }

    #[test]
    fn test_missing_device() {
        let mut source = ScriptedSource::new(vec![vec![]]);
        source.connected = false;
        let mut tone = CountingTone::default();
        let (result, _) = run(&mut source, &mut tone);
        assert!(matches!(result, Err(ListenerError::DeviceNotFound)));
        assert_eq!(source.runs, 0);
    }

    #[test]
    fn test_tone_failure_does_not_stop_loop() {
        let mut source = ScriptedSource::new(vec![
            vec![Scripted::ArmRecognized(Arm::Left), Scripted::Pose(Pose::Fist)],
            vec![],
            vec![],
        ]);
        let mut tone = CountingTone {
            fail: true,
            ..CountingTone::default()
        };
        let (result, _) = run(&mut source, &mut tone);
        result.unwrap();
        assert_eq!(tone.plays, 3);
    }

    #[test]
    fn test_cancelled_loop_never_polls() {
        let mut source = ScriptedSource::new(vec![vec![], vec![]]);
        let mut collector = Collector::new();
        let mut tone = CountingTone::default();
        let cancel = CancelToken::new();
        cancel.cancel();
        run_loop(&mut source, &mut collector, &mut tone, &mut io::sink(), &cancel).unwrap();
        assert_eq!(source.runs, 0);
    }
}
