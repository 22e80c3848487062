//! Pose and arm values reported by the armband.

use std::fmt;

/// A hand pose recognized by the armband.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pose {
    #[default]
    Rest,
    Fist,
    WaveIn,
    WaveOut,
    FingersSpread,
    DoubleTap,
    Unknown,
}

impl Pose {
    /// The name the armband SDK uses for this pose.
    pub fn name(self) -> &'static str {
        match self {
            Pose::Rest => "rest",
            Pose::Fist => "fist",
            Pose::WaveIn => "waveIn",
            Pose::WaveOut => "waveOut",
            Pose::FingersSpread => "fingersSpread",
            Pose::DoubleTap => "doubleTap",
            Pose::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Which arm the band is worn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arm {
    Left,
    Right,
}

impl Arm {
    /// Single-letter tag used in the status line.
    pub fn letter(self) -> char {
        match self {
            Arm::Left => 'L',
            Arm::Right => 'R',
        }
    }
}

/// Orientation of the band's +x axis on the arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XDirection {
    TowardWrist,
    TowardElbow,
}
