use std::time::Duration;

/// Fixed-timestep accumulator that turns frame time into logic ticks
#[derive(Debug, Clone)]
pub struct TickScheduler {
    period: Duration,
    accumulator: Duration,
    max_ticks_per_frame: u32,
}

impl TickScheduler {
    /// Scheduler running `rate_hz` ticks per second, at most `max_ticks_per_frame` per call
    ///
    /// A fresh scheduler is primed: the first call to [`advance`](Self::advance) ticks once.
    pub fn new(rate_hz: u32, max_ticks_per_frame: u32) -> Self {
        let period = Duration::from_secs(1) / rate_hz.max(1);
        Self {
            period,
            accumulator: period,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Add `elapsed` frame time and return how many ticks are due
    ///
    /// Backlog beyond the per-frame cap is discarded rather than replayed.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= self.period && ticks < self.max_ticks_per_frame {
            self.accumulator -= self.period;
            ticks += 1;
        }

        if self.accumulator >= self.period {
            self.accumulator = Duration::ZERO;
        }

        ticks
    }

    /// Make the next call to `advance` tick immediately
    pub fn reset(&mut self) {
        self.accumulator = self.period;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_ticks() {
        let mut scheduler = TickScheduler::new(10, 1);
        assert_eq!(scheduler.period(), Duration::from_millis(100));
        assert_eq!(scheduler.advance(Duration::ZERO), 1);
        assert_eq!(scheduler.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_ticks_once_per_period() {
        let mut scheduler = TickScheduler::new(10, 1);
        scheduler.advance(Duration::ZERO);

        let frame = Duration::from_millis(33);
        let ticks: u32 = (0..30).map(|_| scheduler.advance(frame)).sum();
        // 990ms of frames at a 100ms period
        assert_eq!(ticks, 9);
    }

    #[test]
    fn test_no_tick_before_period() {
        let mut scheduler = TickScheduler::new(10, 1);
        scheduler.advance(Duration::ZERO);
        assert_eq!(scheduler.advance(Duration::from_millis(99)), 0);
        assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
    }

    #[test]
    fn test_backlog_is_capped() {
        let mut scheduler = TickScheduler::new(10, 1);
        scheduler.advance(Duration::ZERO);

        // A long stall still yields a single tick, and the rest is dropped
        assert_eq!(scheduler.advance(Duration::from_secs(2)), 1);
        assert_eq!(scheduler.advance(Duration::from_millis(50)), 0);

        let mut catch_up = TickScheduler::new(10, 3);
        catch_up.advance(Duration::ZERO);
        assert_eq!(catch_up.advance(Duration::from_millis(250)), 2);
        assert_eq!(catch_up.advance(Duration::from_secs(1)), 3);
    }

    #[test]
    fn test_reset_primes_next_tick() {
        let mut scheduler = TickScheduler::new(10, 1);
        scheduler.advance(Duration::ZERO);
        scheduler.advance(Duration::from_millis(40));
        scheduler.reset();
        assert_eq!(scheduler.advance(Duration::ZERO), 1);
    }
}
