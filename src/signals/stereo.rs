//! Stereo frame type and the signal trait used by output streams.

/// One stereo sample pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    /// Left channel sample
    pub left: f32,
    /// Right channel sample
    pub right: f32,
}

impl Frame {
    /// Creates a frame from its two channel samples.
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }
}

/// Common interface for stereo signal sources.
///
/// Output streams call `fill_interleaved()` from the audio driver's
/// real-time thread, so implementations must not allocate, lock or perform
/// I/O while producing frames.
///
/// The trait provides two fundamental operations:
/// - Single frame generation via `next_frame()`
/// - Interleaved buffer filling via `fill_interleaved()`
pub trait StereoSignal {
    /// Generates the next frame from the signal.
    fn next_frame(&mut self) -> Frame;

    /// Fills an interleaved `[left, right, left, right, ...]` buffer.
    ///
    /// Writes `out.len() / 2` frames. A trailing odd sample is set to
    /// silence.
    ///
    /// # Arguments
    ///
    /// * `out` - Mutable slice of interleaved stereo samples
    fn fill_interleaved(&mut self, out: &mut [f32]) {
        let mut pairs = out.chunks_exact_mut(2);
        for pair in &mut pairs {
            let frame = self.next_frame();
            pair[0] = frame.left;
            pair[1] = frame.right;
        }
        pairs.into_remainder().fill(0.0);
    }
}

/// A constant frame, useful for silence or DC testing.
///
/// # Examples
///
/// ```
/// use pinky::{Frame, StereoSignal};
///
/// let mut dc = Frame::new(0.25, -0.5);
/// let mut buffer = [1.0_f32; 5];
/// dc.fill_interleaved(&mut buffer);
/// assert_eq!(buffer, [0.25, -0.5, 0.25, -0.5, 0.0]);
/// ```
impl StereoSignal for Frame {
    fn next_frame(&mut self) -> Frame {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(f32);

    impl StereoSignal for Counter {
        fn next_frame(&mut self) -> Frame {
            self.0 += 1.0;
            Frame::new(self.0, -self.0)
        }
    }

    #[test]
    fn test_fill_interleaves_left_then_right() {
        let mut counter = Counter(0.0);
        let mut buffer = [0.0_f32; 6];
        counter.fill_interleaved(&mut buffer);
        assert_eq!(buffer, [1.0, -1.0, 2.0, -2.0, 3.0, -3.0]);
    }

    #[test]
    fn test_odd_tail_is_silenced_without_advancing() {
        let mut counter = Counter(0.0);
        let mut buffer = [9.0_f32; 3];
        counter.fill_interleaved(&mut buffer);
        assert_eq!(buffer, [1.0, -1.0, 0.0]);
        assert_eq!(counter.0, 1.0);
    }

    #[test]
    fn test_empty_buffer() {
        let mut counter = Counter(0.0);
        let mut buffer: [f32; 0] = [];
        counter.fill_interleaved(&mut buffer);
        assert_eq!(counter.0, 0.0);
    }
}
