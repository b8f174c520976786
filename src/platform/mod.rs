//! Platform abstraction layer
//!
//! Hosts differ in where frame time comes from:
//! - Native: monotonic wall clock
//! - Web: `requestAnimationFrame` timestamps (see `web`)
//! - Tests/headless: fixed deltas

use std::time::Instant;

/// Source of per-frame time deltas
pub trait FrameClock {
    /// Seconds since the previous call (0 on the first call)
    fn time_since_last_tick(&mut self) -> f64;
}

/// Wall-clock frame timer
#[derive(Debug)]
pub struct SystemClock {
    last: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { last: None }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn time_since_last_tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = self
            .last
            .map(|last| now.duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last = Some(now);
        dt
    }
}

/// Clock that reports a fixed delta every frame
#[derive(Debug, Clone)]
pub struct ManualClock {
    pub dt: f64,
    /// Total time reported so far
    pub elapsed: f64,
}

impl ManualClock {
    pub fn new(dt: f64) -> Self {
        Self { dt, elapsed: 0.0 }
    }
}

impl FrameClock for ManualClock {
    fn time_since_last_tick(&mut self) -> f64 {
        self.elapsed += self.dt;
        self.dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_first_tick_is_zero() {
        let mut clock = SystemClock::new();
        assert_eq!(clock.time_since_last_tick(), 0.0);
        assert!(clock.time_since_last_tick() >= 0.0);
    }

    #[test]
    fn test_manual_clock_accumulates() {
        let mut clock = ManualClock::new(0.25);
        for _ in 0..4 {
            assert_eq!(clock.time_since_last_tick(), 0.25);
        }
        assert_eq!(clock.elapsed, 1.0);
    }
}
