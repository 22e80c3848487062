//! Device listener that remembers the latest arm and pose.

use std::io::{self, Write};

use super::{Arm, Pose, XDirection};

/// Width of the pose column in the status line.
pub const POSE_COLUMN_WIDTH: usize = 14;

/// Callbacks an [`EventSource`](super::EventSource) dispatches to.
///
/// Timestamps are in microseconds on the source's clock. Every method has
/// a no-op default so listeners only implement what they need.
pub trait DeviceListener {
    fn on_pose(&mut self, _timestamp: u64, _pose: Pose) {}

    fn on_arm_recognized(&mut self, _timestamp: u64, _arm: Arm, _x_direction: XDirection) {}

    fn on_arm_lost(&mut self, _timestamp: u64) {}
}

/// Tracks the arm the band is on and the most recent pose.
///
/// # Examples
///
/// ```
/// use pinky::{Arm, Collector, DeviceListener, Pose, XDirection};
///
/// let mut collector = Collector::new();
/// assert_eq!(collector.status_line(), "[?][              ]");
///
/// collector.on_arm_recognized(0, Arm::Left, XDirection::TowardWrist);
/// collector.on_pose(1, Pose::Fist);
/// assert_eq!(collector.status_line(), "[L][fist          ]");
/// assert!(collector.wants_tone());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Collector {
    arm: Option<Arm>,
    current_pose: Pose,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The arm the band is on, if it has been recognized and not lost.
    pub fn arm(&self) -> Option<Arm> {
        self.arm
    }

    pub fn current_pose(&self) -> Pose {
        self.current_pose
    }

    /// True while the last reported pose is a fist.
    pub fn wants_tone(&self) -> bool {
        self.current_pose == Pose::Fist
    }

    /// Writes `[arm][pose]`, with the pose padded to a fixed column.
    pub fn write_status<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        match self.arm {
            Some(arm) => write!(
                out,
                "[{}][{:<width$}]",
                arm.letter(),
                self.current_pose,
                width = POSE_COLUMN_WIDTH
            ),
            None => write!(out, "[?][{:width$}]", "", width = POSE_COLUMN_WIDTH),
        }
    }

    pub fn status_line(&self) -> String {
        let mut line = Vec::with_capacity(POSE_COLUMN_WIDTH + 6);
        // Writing to a Vec cannot fail.
        let _ = self.write_status(&mut line);
        String::from_utf8_lossy(&line).into_owned()
    }
}

impl DeviceListener for Collector {
    fn on_pose(&mut self, _timestamp: u64, pose: Pose) {
        self.current_pose = pose;
    }

    fn on_arm_recognized(&mut self, _timestamp: u64, arm: Arm, _x_direction: XDirection) {
        self.arm = Some(arm);
    }

    fn on_arm_lost(&mut self, _timestamp: u64) {
        self.arm = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_off_arm_hides_pose() {
        let mut collector = Collector::new();
        collector.on_pose(0, Pose::WaveIn);
        assert_eq!(collector.status_line(), "[?][              ]");
    }

    #[test]
    fn test_status_pads_longest_pose() {
        let mut collector = Collector::new();
        collector.on_arm_recognized(0, Arm::Right, XDirection::TowardElbow);
        collector.on_pose(1, Pose::FingersSpread);
        assert_eq!(collector.status_line(), "[R][fingersSpread ]");
    }

    #[test]
    fn test_arm_lost_keeps_pose() {
        let mut collector = Collector::new();
        collector.on_arm_recognized(0, Arm::Left, XDirection::TowardWrist);
        collector.on_pose(1, Pose::Fist);
        collector.on_arm_lost(2);
        assert_eq!(collector.arm(), None);
        assert_eq!(collector.current_pose(), Pose::Fist);
        assert!(collector.wants_tone());
    }

    #[test]
    fn test_only_fist_wants_tone() {
        let mut collector = Collector::new();
        for pose in [
            Pose::Rest,
            Pose::WaveIn,
            Pose::WaveOut,
            Pose::FingersSpread,
            Pose::DoubleTap,
            Pose::Unknown,
        ] {
            collector.on_pose(0, pose);
            assert!(!collector.wants_tone(), "{pose} should not play");
        }
    }
}
