//! The one animation clock every field reads.
//!
//! `AnimationClock::tick` is called once per rendered frame and the resulting
//! `FrameTime` is handed to every field, so periodic terms like
//! `sin(elapsed * rate + phase)` stay in phase across independent fields.

use crate::constants::{MAX_FRAME_DELTA, REFERENCE_FPS};
use instant::Instant;

/// Snapshot of the clock for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous frame, capped at `MAX_FRAME_DELTA`.
    pub delta: f32,
    pub frame: u64,
}

impl FrameTime {
    /// A frame at an explicit clock value, with no elapsed delta.
    pub fn at(elapsed: f32) -> Self {
        Self {
            elapsed,
            delta: 0.0,
            frame: 0,
        }
    }

    /// The following frame, `dt` seconds later.
    pub fn advanced(self, dt: f32) -> Self {
        let delta = dt.clamp(0.0, MAX_FRAME_DELTA);
        Self {
            elapsed: self.elapsed + delta,
            delta,
            frame: self.frame + 1,
        }
    }

    /// Delta expressed in reference (60 Hz) frames.
    #[inline]
    pub fn frames(&self) -> f32 {
        self.delta * REFERENCE_FPS
    }
}

pub struct AnimationClock {
    start: Instant,
    last: Instant,
    frame: u64,
}

impl AnimationClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame: 0,
        }
    }

    /// Read the time source. Call exactly once per rendered frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let delta = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        self.frame += 1;
        FrameTime {
            elapsed: now.duration_since(self.start).as_secs_f32(),
            delta: delta.min(MAX_FRAME_DELTA),
            frame: self.frame,
        }
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_are_monotonic() {
        let mut clock = AnimationClock::new();
        let mut prev = clock.tick();
        for _ in 0..100 {
            let next = clock.tick();
            assert!(next.elapsed >= prev.elapsed);
            assert_eq!(next.frame, prev.frame + 1);
            assert!(next.delta >= 0.0 && next.delta <= MAX_FRAME_DELTA);
            prev = next;
        }
    }

    #[test]
    fn advanced_caps_long_stalls() {
        let t = FrameTime::at(2.0).advanced(5.0);
        assert_eq!(t.delta, MAX_FRAME_DELTA);
        assert!((t.elapsed - (2.0 + MAX_FRAME_DELTA)).abs() < 1e-6);
        assert_eq!(t.frame, 1);
    }

    #[test]
    fn one_reference_frame() {
        let t = FrameTime::at(0.0).advanced(1.0 / 60.0);
        assert!((t.frames() - 1.0).abs() < 1e-4);
    }
}
