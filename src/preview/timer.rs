use std::time::{Duration, Instant};

/// Fixed-period timer polled from the UI loop.
///
/// `poll` fires at most once per call and re-arms from the moment it fired,
/// so a slow frame delays the next tick instead of queueing a burst.
#[derive(Debug)]
pub struct RepeatingTimer {
    period: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl RepeatingTimer {
    /// First tick is due immediately
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now,
            cancelled: false,
        }
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now < self.next_due {
            return false;
        }
        self.next_due = now + self.period;
        true
    }

    /// Time left until the next tick, `None` once cancelled
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        if self.cancelled {
            return None;
        }
        Some(self.next_due.saturating_duration_since(now))
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD: Duration = Duration::from_millis(20);

    #[test]
    fn fires_immediately_then_every_period() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::start(PERIOD, start);

        assert!(timer.poll(start));
        assert!(!timer.poll(start + Duration::from_millis(5)));
        assert!(!timer.poll(start + Duration::from_millis(19)));
        assert!(timer.poll(start + PERIOD));
        assert!(!timer.poll(start + PERIOD));
    }

    #[test]
    fn late_poll_rearms_from_fire_time() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::start(PERIOD, start);
        assert!(timer.poll(start));

        let late = start + Duration::from_millis(95);
        assert!(timer.poll(late));
        assert!(!timer.poll(late + Duration::from_millis(10)));
        assert_eq!(timer.remaining(late), Some(PERIOD));
    }

    #[test]
    fn remaining_counts_down() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::start(PERIOD, start);
        assert_eq!(timer.remaining(start), Some(Duration::ZERO));

        timer.poll(start);
        assert_eq!(
            timer.remaining(start + Duration::from_millis(15)),
            Some(Duration::from_millis(5))
        );
        assert_eq!(
            timer.remaining(start + Duration::from_millis(40)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let start = Instant::now();
        let mut timer = RepeatingTimer::start(PERIOD, start);
        timer.cancel();

        assert!(timer.is_cancelled());
        assert!(!timer.poll(start + Duration::from_secs(1)));
        assert_eq!(timer.remaining(start), None);
    }
}
