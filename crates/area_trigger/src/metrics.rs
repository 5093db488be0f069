//! Tracker statistics: transition counters and query timings.
//!
//! Feature-gated and runtime-toggled so that nothing is recorded unless the
//! `metrics` feature is enabled and [`COLLECT_METRICS`] is set.
//!
//! ```ignore
//! use std::sync::atomic::Ordering;
//! use area_trigger::metrics::COLLECT_METRICS;
//!
//! // Compile with --features metrics, then toggle at runtime:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! let snapshot = handler.metrics();
//! println!("avg query: {:.1}us", snapshot.query_time_us.average());
//! ```

use std::collections::VecDeque;
use std::sync::atomic::AtomicBool;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;

/// Runtime toggle for metrics collection.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Whether metrics are collected (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Fixed-capacity window of the most recent values.
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a value, evicting the oldest when full.
  pub fn push(&mut self, value: T) {
    if self.capacity == 0 {
      return;
    }
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Oldest to newest.
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl RollingWindow<u64> {
  pub fn sum(&self) -> u64 {
    self.buffer.iter().sum()
  }

  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.sum() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = *self.buffer.iter().min()?;
    let max = *self.buffer.iter().max()?;
    Some((min, max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(128)
  }
}

/// Counters kept by a membership tracker.
#[derive(Debug, Clone, Default)]
pub struct TrackerMetrics {
  /// Update calls processed.
  pub updates: u64,
  /// Not-contained to contained transitions.
  pub enters: u64,
  /// Contained to not-contained transitions found by an update.
  pub exits: u64,
  /// Exits forced by a map change.
  pub forced_exits: u64,
  /// Volumes returned by the most recent index query.
  pub last_candidates: usize,
  /// Recent index query times in microseconds.
  pub query_time_us: RollingWindow<u64>,
}

impl TrackerMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn reset(&mut self) {
    *self = Self::default();
  }

  /// Record one index query. No-op unless collection is enabled.
  #[inline]
  pub fn record_query(&mut self, elapsed_us: u64, candidates: usize) {
    if !is_enabled() {
      return;
    }
    self.updates += 1;
    self.last_candidates = candidates;
    self.query_time_us.push(elapsed_us);
  }

  /// Record a membership transition. No-op unless collection is enabled.
  #[inline]
  pub fn record_transition(&mut self, contained: bool, forced: bool) {
    if !is_enabled() {
      return;
    }
    match (contained, forced) {
      (true, _) => self.enters += 1,
      (false, false) => self.exits += 1,
      (false, true) => self.forced_exits += 1,
    }
  }
}
