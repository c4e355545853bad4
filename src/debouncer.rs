use std::time::Duration;

use crate::sources::Level;

/// Milliseconds elapsed from `earlier` to `now` on a wrapping `u32` clock.
pub fn ticks_diff(now: u32, earlier: u32) -> u32 {
    now.wrapping_sub(earlier)
}

/// Time-window debouncer for a single digital level.
///
/// Every raw change restarts the window. A level is promoted to the steady
/// slots once it has been held for the whole window, and the previous steady
/// level is kept alongside so the caller can see the transition of the
/// latest update.
pub struct Debouncer {
    flicker_level: Level,
    flicker_changed_at: u32,
    previous_steady: Level,
    current_steady: Level,
    debounce_ms: u32,
}

impl Debouncer {
    pub fn new(initial: Level, now_ms: u32) -> Self {
        Self {
            flicker_level: initial,
            flicker_changed_at: now_ms,
            previous_steady: initial,
            current_steady: initial,
            debounce_ms: 0,
        }
    }

    /// Replaces the window; applies from the next update. Windows longer than
    /// `u32::MAX` ms saturate.
    pub fn set_debounce_duration(&mut self, debounce_duration: Duration) {
        self.debounce_ms = u32::try_from(debounce_duration.as_millis()).unwrap_or(u32::MAX);
    }

    pub fn debounce_duration(&self) -> Duration {
        Duration::from_millis(self.debounce_ms.into())
    }

    /// Feeds one raw sample. Returns `(from, to)` when this update promoted a
    /// level different from the previous steady one.
    pub fn update(&mut self, raw: Level, now_ms: u32) -> Option<(Level, Level)> {
        if raw != self.flicker_level {
            self.flicker_changed_at = now_ms;
            self.flicker_level = raw;
        }

        // The previous slot catches up on every update, promoted or not, so a
        // transition is visible for exactly one update.
        self.previous_steady = self.current_steady;
        if ticks_diff(now_ms, self.flicker_changed_at) >= self.debounce_ms {
            self.current_steady = self.flicker_level;
        }

        self.transition()
    }

    /// The transition promoted by the last update, if any.
    pub fn transition(&self) -> Option<(Level, Level)> {
        (self.previous_steady != self.current_steady)
            .then_some((self.previous_steady, self.current_steady))
    }

    pub fn previous_steady(&self) -> Level {
        self.previous_steady
    }

    pub fn current_steady(&self) -> Level {
        self.current_steady
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_diff_handles_rollover() {
        assert_eq!(ticks_diff(10, 4), 6);
        assert_eq!(ticks_diff(5, u32::MAX - 4), 10);
        assert_eq!(ticks_diff(7, 7), 0);
    }

    #[test]
    fn zero_window_follows_every_sample() {
        let mut debouncer = Debouncer::new(Level::High, 0);

        assert_eq!(debouncer.update(Level::Low, 1), Some((Level::High, Level::Low)));
        assert_eq!(debouncer.update(Level::Low, 2), None);
        assert_eq!(debouncer.update(Level::High, 3), Some((Level::Low, Level::High)));
        assert_eq!(debouncer.current_steady(), Level::High);
    }

    #[test]
    fn first_update_reports_no_transition() {
        let mut debouncer = Debouncer::new(Level::Low, 100);
        debouncer.set_debounce_duration(Duration::from_millis(20));

        assert_eq!(debouncer.update(Level::Low, 100), None);
        assert_eq!(debouncer.update(Level::Low, 500), None);
        assert_eq!(debouncer.previous_steady(), Level::Low);
    }

    #[test]
    fn chatter_restarts_the_window() {
        let mut debouncer = Debouncer::new(Level::High, 0);
        debouncer.set_debounce_duration(Duration::from_millis(30));

        for (t, level) in [(5, Level::Low), (20, Level::High), (40, Level::Low), (60, Level::High)] {
            assert_eq!(debouncer.update(level, t), None);
            assert_eq!(debouncer.current_steady(), Level::High);
        }

        assert_eq!(debouncer.update(Level::Low, 70), None);
        assert_eq!(debouncer.update(Level::Low, 99), None);
        assert_eq!(debouncer.update(Level::Low, 100), Some((Level::High, Level::Low)));
        assert_eq!(debouncer.update(Level::Low, 101), None);
    }

    #[test]
    fn transition_lasts_one_update_even_without_promotion() {
        let mut debouncer = Debouncer::new(Level::High, 0);
        debouncer.set_debounce_duration(Duration::from_millis(10));

        debouncer.update(Level::Low, 0);
        assert_eq!(debouncer.update(Level::Low, 10), Some((Level::High, Level::Low)));
        // bounce right after promotion must not re-report the edge
        assert_eq!(debouncer.update(Level::High, 11), None);
        assert_eq!(debouncer.current_steady(), Level::Low);
        assert_eq!(debouncer.previous_steady(), Level::Low);
    }

    #[test]
    fn window_crosses_clock_rollover() {
        let start = u32::MAX - 10;
        let mut debouncer = Debouncer::new(Level::High, start);
        debouncer.set_debounce_duration(Duration::from_millis(25));

        assert_eq!(debouncer.update(Level::Low, start), None);
        assert_eq!(debouncer.update(Level::Low, 5), None);
        assert_eq!(debouncer.update(Level::Low, 14), Some((Level::High, Level::Low)));
    }

    #[test]
    fn oversized_window_saturates() {
        let mut debouncer = Debouncer::new(Level::High, 0);
        debouncer.set_debounce_duration(Duration::from_secs(u64::MAX));
        assert_eq!(
            debouncer.debounce_duration(),
            Duration::from_millis(u32::MAX.into())
        );
    }
}
