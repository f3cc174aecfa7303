//! Lightweight wall-clock timing utilities.
//!
//! Timing is off unless enabled programmatically or through the `CP_TIMING`
//! environment variable. Disabled timers still measure, they just report
//! `None` so callers can skip printing.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable performance timing globally.
pub fn enable_timing() {
    ENABLED.store(true, Ordering::Relaxed);
}

/// Disable performance timing globally.
pub fn disable_timing() {
    ENABLED.store(false, Ordering::Relaxed);
}

/// Check if timing is enabled.
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed) || std::env::var("CP_TIMING").is_ok()
}

/// A simple timer that measures elapsed time.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Elapsed seconds, regardless of whether timing is enabled.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer and return elapsed time in seconds.
    /// If timing is disabled, returns None.
    pub fn stop(self) -> Option<f64> {
        if is_enabled() {
            Some(self.elapsed_s())
        } else {
            None
        }
    }
}

/// Accumulating timer for tracking total time across multiple calls.
pub struct AccumulatingTimer {
    total_ns: AtomicU64,
    count: AtomicU64,
}

impl Default for AccumulatingTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl AccumulatingTimer {
    pub const fn new() -> Self {
        Self {
            total_ns: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Record a timing measurement.
    pub fn record(&self, duration_s: f64) {
        let nanos = (duration_s * 1e9) as u64;
        self.total_ns.fetch_add(nanos, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total time spent (in seconds).
    pub fn total_seconds(&self) -> f64 {
        self.total_ns.load(Ordering::Relaxed) as f64 / 1e9
    }

    /// Get number of calls.
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    /// Get average time per call (in seconds).
    pub fn average_seconds(&self) -> f64 {
        let count = self.count();
        if count > 0 {
            self.total_seconds() / count as f64
        } else {
            0.0
        }
    }

    pub fn reset(&self) {
        self.total_ns.store(0, Ordering::Relaxed);
        self.count.store(0, Ordering::Relaxed);
    }
}

/// Timers shared by every run in the process.
pub mod run_timing {
    use super::AccumulatingTimer;

    /// Time spent advancing integrators inside the driver loop
    pub static INTEGRATION: AccumulatingTimer = AccumulatingTimer::new();
    /// Time spent rendering and writing outputs
    pub static OUTPUT: AccumulatingTimer = AccumulatingTimer::new();

    pub fn reset_all() {
        INTEGRATION.reset();
        OUTPUT.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulating_timer_averages() {
        let timer = AccumulatingTimer::new();
        assert_eq!(timer.average_seconds(), 0.0);
        timer.record(0.5);
        timer.record(1.5);
        assert_eq!(timer.count(), 2);
        assert!((timer.total_seconds() - 2.0).abs() < 1e-9);
        assert!((timer.average_seconds() - 1.0).abs() < 1e-9);
        timer.reset();
        assert_eq!(timer.count(), 0);
    }

    #[test]
    fn timer_measures_even_when_disabled() {
        let timer = Timer::start("noop");
        assert_eq!(timer.label(), "noop");
        assert!(timer.elapsed_s() >= 0.0);
    }

    #[test]
    fn run_timers_reset_together() {
        run_timing::INTEGRATION.record(0.25);
        run_timing::OUTPUT.record(0.5);
        run_timing::reset_all();
        assert_eq!(run_timing::INTEGRATION.count(), 0);
        assert_eq!(run_timing::OUTPUT.total_seconds(), 0.0);
    }

    #[test]
    fn stop_reports_only_when_enabled() {
        enable_timing();
        assert!(Timer::start("on").stop().is_some());
        disable_timing();
        if std::env::var("CP_TIMING").is_err() {
            assert!(Timer::start("off").stop().is_none());
        }
    }
}
