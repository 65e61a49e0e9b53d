//! Periodic triggers.
//!
//! A `Ticker` accumulates elapsed time and reports how many whole periods
//! have passed. The world owns one for frames and one for enemy spawns, so
//! both cadences run off a single fixed-timestep loop.

use std::time::Duration;

#[derive(Clone, Debug)]
pub struct Ticker {
    period: Duration,
    accumulated: Duration,
    running: bool,
}

impl Ticker {
    /// A stopped ticker with the given period.
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            accumulated: Duration::ZERO,
            running: false,
        }
    }

    /// Arm the ticker; the first tick fires one full period from now.
    pub fn start(&mut self) {
        self.accumulated = Duration::ZERO;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulated = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed elapsed time; returns the number of ticks that fired.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running || self.period.is_zero() {
            return 0;
        }
        self.accumulated += elapsed;
        let mut fired = 0;
        while self.accumulated >= self.period {
            self.accumulated -= self.period;
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn stopped_ticker_never_fires() {
        let mut t = Ticker::new(MS * 10);
        assert_eq!(t.advance(MS * 100), 0);
    }

    #[test]
    fn fires_once_per_period() {
        let mut t = Ticker::new(MS * 10);
        t.start();
        assert_eq!(t.advance(MS * 9), 0);
        assert_eq!(t.advance(MS), 1);
        assert_eq!(t.advance(MS * 25), 2);
        // 5 ms carried over
        assert_eq!(t.advance(MS * 5), 1);
    }

    #[test]
    fn restart_drops_leftover_time() {
        let mut t = Ticker::new(MS * 10);
        t.start();
        t.advance(MS * 9);
        t.stop();
        t.start();
        assert_eq!(t.advance(MS * 9), 0);
    }

    #[test]
    fn zero_period_is_inert() {
        let mut t = Ticker::new(Duration::ZERO);
        t.start();
        assert_eq!(t.advance(MS), 0);
    }
}
