use std::time::{Duration, Instant};

/// Timing of one measured run.
#[derive(Debug, Copy, Clone)]
pub struct Timing {
    /// Wall time spent inside the measured section.
    pub total: Duration,

    /// Number of laps recorded.
    pub laps: u64,

    /// Longest single lap.
    pub worst: Duration,
}

impl Timing {
    /// Mean lap duration, zero when no lap was recorded.
    pub fn mean(&self) -> Duration {
        if self.laps == 0 {
            return Duration::ZERO;
        }
        self.total.div_f64(self.laps as f64)
    }
}

/// Monotonic stopwatch measuring repeated calls.
///
/// Call `lap()` once per iteration; `finish()` returns the accumulated timing.
/// Unlike a frame clock, laps are not clamped: a stall is a real measurement.
#[derive(Debug, Clone)]
pub struct Stopwatch {
    started: Instant,
    last: Instant,
    laps: u64,
    worst: Duration,
}

impl Stopwatch {
    pub fn start() -> Self {
        let now = Instant::now();
        Self { started: now, last: now, laps: 0, worst: Duration::ZERO }
    }

    /// Resets the baseline, discarding recorded laps.
    pub fn restart(&mut self) {
        *self = Self::start();
    }

    /// Closes the current lap and returns its duration.
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        self.laps = self.laps.wrapping_add(1);
        self.worst = self.worst.max(dt);
        dt
    }

    pub fn finish(&self) -> Timing {
        Timing {
            total: self.last.saturating_duration_since(self.started),
            laps: self.laps,
            worst: self.worst,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laps_accumulate() {
        let mut sw = Stopwatch::start();
        for _ in 0..3 {
            sw.lap();
        }
        let t = sw.finish();
        assert_eq!(t.laps, 3);
        assert!(t.worst <= t.total);
    }

    #[test]
    fn empty_run_has_zero_mean() {
        let t = Stopwatch::start().finish();
        assert_eq!(t.laps, 0);
        assert_eq!(t.mean(), Duration::ZERO);
    }

    #[test]
    fn restart_discards_laps() {
        let mut sw = Stopwatch::start();
        sw.lap();
        sw.restart();
        assert_eq!(sw.finish().laps, 0);
    }
}
