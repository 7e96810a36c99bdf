use crate::mode::Mode;
use std::time::Duration;

/// Per-level decay of the advanced-mode word bonus
pub const BONUS_DECAY: f64 = 0.98;

/// Remainders this small after repeated float subtraction count as zero
const EPSILON: f64 = 1e-9;

/// Seconds banked for one correct word at `level`: `0.98^(level-1)`
pub fn word_bonus(level: u32) -> f64 {
    BONUS_DECAY.powi(level.saturating_sub(1) as i32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockStatus {
    Running,
    Expired,
}

impl ClockStatus {
    pub fn is_running(self) -> bool {
        self == ClockStatus::Running
    }
}

/// Countdown for one session, with the pending advanced-mode time bonus
#[derive(Debug, Clone, PartialEq)]
pub struct SessionClock {
    time_left: f64,
    tick: Duration,
    elapsed: Duration,
    pending_bonus: f64,
}

impl SessionClock {
    pub fn new(mode: Mode) -> Self {
        Self::with_budget(mode.initial_secs(), mode.tick())
    }

    pub fn with_budget(secs: f64, tick: Duration) -> Self {
        Self {
            time_left: secs.max(0.0),
            tick,
            elapsed: Duration::ZERO,
            pending_bonus: 0.0,
        }
    }

    pub fn time_left(&self) -> f64 {
        self.time_left
    }

    /// Whole seconds shown on the timer
    pub fn display_secs(&self) -> u32 {
        self.time_left.ceil() as u32
    }

    /// Play time so far; bonus grants do not count
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn pending_bonus(&self) -> f64 {
        self.pending_bonus
    }

    pub fn is_expired(&self) -> bool {
        self.time_left <= 0.0
    }

    pub fn on_tick(&mut self) -> ClockStatus {
        if self.is_expired() {
            return ClockStatus::Expired;
        }

        self.elapsed += self.tick;
        self.time_left = (self.time_left - self.tick.as_secs_f64()).max(0.0);
        if self.time_left < EPSILON {
            self.time_left = 0.0;
        }

        if self.is_expired() {
            ClockStatus::Expired
        } else {
            ClockStatus::Running
        }
    }

    /// Banks the bonus for one correct word at `level`; returns the amount
    pub fn accrue_word_bonus(&mut self, level: u32) -> f64 {
        let bonus = word_bonus(level);
        self.pending_bonus += bonus;
        bonus
    }

    /// Adds the whole pending bonus to the countdown and empties the bank.
    /// Returns the granted seconds.
    pub fn grant_pending_bonus(&mut self) -> f64 {
        let granted = std::mem::take(&mut self.pending_bonus);
        self.time_left += granted;
        granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advanced_budget_takes_exactly_one_hundred_ticks() {
        let mut clock = SessionClock::new(Mode::Advanced);
        let mut ticks = 0;

        loop {
            let before = clock.time_left();
            ticks += 1;
            let status = clock.on_tick();
            assert!((before - clock.time_left() - 0.1).abs() < 1e-9);
            if status == ClockStatus::Expired {
                break;
            }
            assert!(ticks < 100);
        }

        assert_eq!(ticks, 100);
        assert_eq!(clock.time_left(), 0.0);
        assert_eq!(clock.elapsed(), Duration::from_secs(10));
    }

    #[test]
    fn beginner_ticks_whole_seconds() {
        let mut clock = SessionClock::new(Mode::Beginner);
        assert_eq!(clock.display_secs(), 60);
        assert_eq!(clock.on_tick(), ClockStatus::Running);
        assert_eq!(clock.time_left(), 59.0);
    }

    #[test]
    fn time_never_goes_negative() {
        let mut clock = SessionClock::with_budget(0.5, Duration::from_secs(1));
        assert_eq!(clock.on_tick(), ClockStatus::Expired);
        assert_eq!(clock.time_left(), 0.0);
        assert_eq!(clock.on_tick(), ClockStatus::Expired);
        assert_eq!(clock.time_left(), 0.0);
    }

    #[test]
    fn word_bonus_decays_geometrically() {
        assert_eq!(word_bonus(1), 1.0);
        assert!((word_bonus(2) - 0.98).abs() < 1e-12);
        assert!((word_bonus(11) - 0.98f64.powi(10)).abs() < 1e-12);
        assert!(word_bonus(500) > 0.0);
        assert_eq!(word_bonus(0), 1.0);
    }

    #[test]
    fn pending_bonus_accrues_and_resets_on_grant() {
        let mut clock = SessionClock::new(Mode::Advanced);
        let level = 3;
        for _ in 0..4 {
            clock.accrue_word_bonus(level);
        }
        let expected = 4.0 * 0.98f64.powi(2);
        assert!((clock.pending_bonus() - expected).abs() < 1e-12);
        assert_eq!(clock.time_left(), 10.0);

        let granted = clock.grant_pending_bonus();
        assert!((granted - expected).abs() < 1e-12);
        assert_eq!(clock.pending_bonus(), 0.0);
        assert!((clock.time_left() - (10.0 + expected)).abs() < 1e-12);
    }

    #[test]
    fn granting_with_nothing_banked_is_a_no_op() {
        let mut clock = SessionClock::new(Mode::Advanced);
        assert_eq!(clock.grant_pending_bonus(), 0.0);
        assert_eq!(clock.time_left(), 10.0);
    }
}
