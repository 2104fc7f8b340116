use crate::core::Clock;

const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Frame metadata - carries frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

impl FrameInfo {
    pub fn new(number: u64, time: f32, delta: f32) -> Self {
        Self { number, time, delta }
    }
}

/// Infinite iterator that yields frame information, one item per redraw
pub struct Frames {
    number: u64,
    time: f32,
    clock: Clock,
}

impl Frames {
    pub fn new() -> Self {
        Self {
            number: 0,
            time: 0.0,
            clock: Clock::new(),
        }
    }

    pub fn frame_number(&self) -> u64 {
        self.number
    }
}

impl Default for Frames {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Frames {
    type Item = FrameInfo;

    fn next(&mut self) -> Option<FrameInfo> {
        let delta = self.clock.tick();
        self.time += delta;

        let info = FrameInfo::new(self.number, self.time, delta);
        self.number += 1;
        Some(info)
    }
}

/// Frames-per-second over a one second window
#[derive(Debug, Default)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
}

impl FpsCounter {
    /// Record one frame; returns the new rate when the window closes
    pub fn record(&mut self, delta: f32) -> Option<f32> {
        self.frames += 1;
        self.elapsed += delta;

        if self.elapsed < FPS_UPDATE_INTERVAL {
            return None;
        }
        let fps = self.frames as f32 / self.elapsed;
        self.frames = 0;
        self.elapsed = 0.0;
        Some(fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_count_up() {
        let mut frames = Frames::new();
        let a = frames.next().unwrap();
        let b = frames.next().unwrap();
        assert_eq!(a.number, 0);
        assert_eq!(b.number, 1);
        assert!(b.time >= a.time);
        assert_eq!(frames.frame_number(), 2);
    }

    #[test]
    fn fps_reports_once_per_second() {
        let mut fps = FpsCounter::default();
        for _ in 0..59 {
            assert!(fps.record(1.0 / 60.0).is_none());
        }
        let rate = fps.record(1.0 / 60.0 + 0.001).unwrap();
        assert!((rate - 60.0).abs() < 1.0);
    }
}
