use crate::core::Delay;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Visible,
    Waiting(Delay),
    Fading(Delay),
    Hidden,
}

/// Loading overlay: visible, then an optional wait, a fade, then gone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadingIndicator {
    phase: Phase,
    fade: f32,
}

impl LoadingIndicator {
    pub fn new(fade_seconds: f32) -> Self {
        Self {
            phase: Phase::Visible,
            fade: fade_seconds,
        }
    }

    /// Start fading after `delay` seconds
    pub fn hide_after(&mut self, delay: f32) {
        if self.phase == Phase::Visible {
            self.phase = Phase::Waiting(Delay::started(delay));
        }
    }

    /// Start fading now
    pub fn hide(&mut self) {
        if matches!(self.phase, Phase::Visible | Phase::Waiting(_)) {
            self.phase = Phase::Fading(Delay::started(self.fade));
        }
    }

    pub fn advance(&mut self, delta: f32) {
        match &mut self.phase {
            Phase::Waiting(delay) => {
                if delay.tick(delta) {
                    self.phase = Phase::Fading(Delay::started(self.fade));
                }
            }
            Phase::Fading(delay) => {
                if delay.tick(delta) {
                    self.phase = Phase::Hidden;
                }
            }
            Phase::Visible | Phase::Hidden => {}
        }
    }

    /// Whether hiding has been requested
    pub fn is_dismissed(&self) -> bool {
        !matches!(self.phase, Phase::Visible)
    }

    pub fn is_hidden(&self) -> bool {
        self.phase == Phase::Hidden
    }

    pub fn opacity(&self) -> f32 {
        match &self.phase {
            Phase::Visible | Phase::Waiting(_) => 1.0,
            Phase::Fading(delay) => 1.0 - delay.progress(),
            Phase::Hidden => 0.0,
        }
    }
}
