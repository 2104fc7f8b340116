use chrono::NaiveDateTime;

use crate::core::FixedHz;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownState {
    Running,
    Expired,
}

/// Reported by a tick that changed state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    Expired,
}

/// The four displayed fields, zero-padded to two digits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownFields {
    pub days: String,
    pub hours: String,
    pub minutes: String,
    pub seconds: String,
}

impl CountdownFields {
    pub fn zero() -> Self {
        Self::from_millis(0)
    }

    /// Splits a non-negative duration into display fields
    pub fn from_millis(remaining: i64) -> Self {
        let remaining = remaining.max(0);
        Self {
            days: format!("{:02}", remaining / MS_PER_DAY),
            hours: format!("{:02}", (remaining % MS_PER_DAY) / MS_PER_HOUR),
            minutes: format!("{:02}", (remaining % MS_PER_HOUR) / MS_PER_MINUTE),
            seconds: format!("{:02}", (remaining % MS_PER_MINUTE) / MS_PER_SECOND),
        }
    }

    pub fn as_array(&self) -> [&str; 4] {
        [&self.days, &self.hours, &self.minutes, &self.seconds]
    }
}

/// Countdown to a fixed local timestamp, refreshed once per second
#[derive(Debug, Clone)]
pub struct CountdownTimer {
    target: NaiveDateTime,
    state: CountdownState,
    fields: CountdownFields,
    ticker: Option<FixedHz>,
}

impl CountdownTimer {
    pub fn new(target: NaiveDateTime) -> Self {
        Self {
            target,
            state: CountdownState::Running,
            fields: CountdownFields::zero(),
            ticker: Some(FixedHz::new(1.0)),
        }
    }

    /// Create and render the first tick immediately
    pub fn start(target: NaiveDateTime, now: NaiveDateTime) -> Self {
        let mut timer = Self::new(target);
        timer.tick(now);
        timer
    }

    pub fn target(&self) -> NaiveDateTime {
        self.target
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn fields(&self) -> &CountdownFields {
        &self.fields
    }

    /// Whether the periodic tick is still armed
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Feed elapsed wall-clock seconds; ticks once per whole second
    pub fn advance(&mut self, delta: f32, now: NaiveDateTime) -> Option<CountdownEvent> {
        let fired = self.ticker.as_mut().map_or(0, |t| t.tick(delta));
        if fired > 0 {
            self.tick(now)
        } else {
            None
        }
    }

    /// Recompute the display from `now`
    pub fn tick(&mut self, now: NaiveDateTime) -> Option<CountdownEvent> {
        if self.state == CountdownState::Expired {
            return None;
        }

        let remaining = (self.target - now).num_milliseconds();
        if remaining < 0 {
            self.state = CountdownState::Expired;
            self.fields = CountdownFields::zero();
            self.ticker = None;
            log::info!("Countdown to {} expired", self.target);
            return Some(CountdownEvent::Expired);
        }

        self.fields = CountdownFields::from_millis(remaining);
        None
    }
}
