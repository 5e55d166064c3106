//! Monotonic tick source and tick/second conversions.
//!
//! Ticks are nanoseconds since a process-wide epoch taken on first use. The
//! conversion factor is computed once and shared by every later conversion.

use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Resolution of every [`Clock`] in this crate.
pub const TICKS_PER_SECOND: u64 = 1_000_000_000;

struct TimeBase {
    epoch: Instant,
    seconds_per_tick: f64,
}

static TIME_BASE: OnceLock<TimeBase> = OnceLock::new();

fn time_base() -> &'static TimeBase {
    TIME_BASE.get_or_init(|| TimeBase {
        epoch: Instant::now(),
        seconds_per_tick: 1.0 / TICKS_PER_SECOND as f64,
    })
}

/// Current tick count. Never decreases within a process run.
pub fn now() -> u64 {
    let elapsed = time_base().epoch.elapsed();
    u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX)
}

pub fn ticks_to_seconds(ticks: u64) -> f64 {
    ticks as f64 * time_base().seconds_per_tick
}

pub fn seconds_to_ticks(seconds: f64) -> u64 {
    (seconds.max(0.0) * TICKS_PER_SECOND as f64) as u64
}

/// Source of tick counts for a [`Profiler`](crate::Profiler).
pub trait Clock {
    fn now(&self) -> u64;
}

/// The process-wide monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> u64 {
        now()
    }
}

/// A clock that only moves when told to. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    ticks: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, ticks: u64) {
        self.ticks.store(ticks, Ordering::Relaxed);
    }

    pub fn advance(&self, ticks: u64) {
        self.ticks.fetch_add(ticks, Ordering::Relaxed);
    }

    pub fn advance_seconds(&self, seconds: f64) {
        self.advance(seconds_to_ticks(seconds));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}
