use chrono::{Duration, NaiveDateTime};
use model_showcase::config::COUNTDOWN_FORMAT;
use model_showcase::effects::{CountdownEvent, CountdownState, CountdownTimer};

fn target() -> NaiveDateTime {
    NaiveDateTime::parse_from_str("2025-09-05T00:00:00", COUNTDOWN_FORMAT).unwrap()
}

#[cfg(test)]
mod countdown_tests {
    use super::*;

    #[test]
    fn test_fields_split_remaining_time() {
        let now = target() - Duration::days(1) - Duration::hours(2) - Duration::minutes(3) - Duration::seconds(4);
        let timer = CountdownTimer::start(target(), now);

        assert_eq!(timer.state(), CountdownState::Running);
        assert_eq!(timer.fields().as_array(), ["01", "02", "03", "04"]);
    }

    #[test]
    fn test_ticks_once_per_second() {
        let start = target() - Duration::seconds(10);
        let mut timer = CountdownTimer::start(target(), start);
        assert_eq!(timer.fields().seconds, "10");

        // Half a second is not enough for the next tick
        timer.advance(0.5, start + Duration::milliseconds(500));
        assert_eq!(timer.fields().seconds, "10");

        timer.advance(0.5, start + Duration::seconds(1));
        assert_eq!(timer.fields().seconds, "09");
    }

    #[test]
    fn test_expiry_reported_exactly_once() {
        let start = target() - Duration::seconds(2);
        let mut timer = CountdownTimer::start(target(), start);

        let mut events = Vec::new();
        for s in 1..=6 {
            if let Some(event) = timer.advance(1.0, start + Duration::seconds(s)) {
                events.push(event);
            }
        }

        assert_eq!(events, vec![CountdownEvent::Expired]);
        assert_eq!(timer.state(), CountdownState::Expired);
        assert_eq!(timer.fields().as_array(), ["00", "00", "00", "00"]);
        assert!(!timer.is_ticking());
    }

    #[test]
    fn test_already_past_target_expires_on_start() {
        let timer = CountdownTimer::start(target(), target() + Duration::hours(1));
        assert_eq!(timer.state(), CountdownState::Expired);
        assert_eq!(timer.fields().days, "00");
    }

    #[test]
    fn test_exact_target_still_running() {
        let timer = CountdownTimer::start(target(), target());
        assert_eq!(timer.state(), CountdownState::Running);
        assert_eq!(timer.fields().as_array(), ["00", "00", "00", "00"]);
    }

    #[test]
    fn test_long_countdowns_keep_all_day_digits() {
        let timer = CountdownTimer::start(target(), target() - Duration::days(123));
        assert_eq!(timer.fields().days, "123");
    }
}
