/// Self-contained timers - manage internal state, no Frame dependency
/// Each timer accumulates delta time and decides when to fire

/// Fixed rate timer - fires at specific Hz
#[derive(Debug, Clone, Copy)]
pub struct FixedHz {
    pub interval: f32,
    pub accumulator: f32,
}

impl FixedHz {
    /// Create timer that fires at given frequency
    pub fn new(hz: f32) -> Self {
        Self {
            interval: 1.0 / hz,
            accumulator: 0.0,
        }
    }

    /// Update with delta, returns how many periods elapsed
    ///
    /// A long stall yields several fires at once rather than dropping them.
    pub fn tick(&mut self, delta: f32) -> u32 {
        self.accumulator += delta;

        let mut fired = 0;
        while self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            fired += 1;
        }
        fired
    }
}

/// One-shot delay - fires once after duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delay {
    duration: f32,
    elapsed: f32,
    active: bool,
}

impl Delay {
    /// Create inactive delay
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            elapsed: 0.0,
            active: false,
        }
    }

    /// Create and start immediately
    pub fn started(duration: f32) -> Self {
        let mut delay = Self::new(duration);
        delay.start();
        delay
    }

    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.active = true;
    }

    /// Tick with delta, returns true if completed
    pub fn tick(&mut self, delta: f32) -> bool {
        if !self.active {
            return false;
        }

        self.elapsed += delta;

        if self.elapsed >= self.duration {
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Get progress [0, 1]
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.duration).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_hz_fires_at_rate() {
        let mut timer = FixedHz::new(1.0);

        assert_eq!(timer.tick(0.5), 0);
        assert_eq!(timer.tick(0.6), 1);
        assert_eq!(timer.tick(0.1), 0);
    }

    #[test]
    fn fixed_hz_catches_up_after_stall() {
        let mut timer = FixedHz::new(1.0);
        assert_eq!(timer.tick(3.2), 3);
    }

    #[test]
    fn delay_fires_once() {
        let mut timer = Delay::new(1.0);

        assert!(!timer.tick(0.5)); // Inactive

        timer.start();
        assert!(!timer.tick(0.5)); // In progress
        assert_eq!(timer.progress(), 0.5);

        assert!(timer.tick(0.6)); // Complete
        assert!(!timer.tick(0.1)); // Inactive again
    }

    #[test]
    fn zero_delay_completes_on_first_tick() {
        let mut timer = Delay::started(0.0);
        assert!(timer.tick(0.0));
        assert_eq!(timer.progress(), 1.0);
    }
}
