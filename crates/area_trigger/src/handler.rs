//! PositionHandler - the public facade over a tracker.
//!
//! Owns a tracker of the configured kind and a subscription to the host's
//! [`MapChangedEvent`]. Map-changed notifications are forwarded to the
//! tracker; dropping the handler drops the subscription.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::error::TrackerError;
use crate::events::{MapChangedEvent, Subscription};
use crate::metrics::TrackerMetrics;
use crate::octree::OctreeConfig;
use crate::tracker::{
  octree::DEFAULT_GROWTH_MARGIN, AreaTracker, LinearTracker, MapId, OctreeTracker, PositionSample,
};
use crate::volume::VolumeHandle;

/// Index backing a [`PositionHandler`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TrackerKind {
  #[default]
  OcTree,
  Linear,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandlerConfig {
  pub kind: TrackerKind,
  /// Only used by [`TrackerKind::OcTree`].
  pub octree: OctreeConfig,
  /// Slack added around an area's bound when a map's tree must grow.
  pub growth_margin: f64,
}

impl HandlerConfig {
  pub const DEFAULT: Self = Self {
    kind: TrackerKind::OcTree,
    octree: OctreeConfig::DEFAULT,
    growth_margin: DEFAULT_GROWTH_MARGIN,
  };

  pub fn linear() -> Self {
    Self {
      kind: TrackerKind::Linear,
      ..Self::DEFAULT
    }
  }

  fn build(&self) -> Box<dyn AreaTracker> {
    match self.kind {
      TrackerKind::OcTree => Box::new(OctreeTracker::new(self.octree, self.growth_margin)),
      TrackerKind::Linear => Box::new(LinearTracker::new()),
    }
  }
}

impl Default for HandlerConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

type Shared = Arc<Mutex<Box<dyn AreaTracker>>>;

/// Tracks one moving point against areas registered per map.
///
/// Callbacks run while the handler's lock is held and must not call back
/// into the same handler.
pub struct PositionHandler {
  tracker: Shared,
  kind: TrackerKind,
  _subscription: Subscription,
}

impl PositionHandler {
  /// Octree-backed handler with default settings.
  pub fn new(map_changed: &MapChangedEvent) -> Self {
    Self::with_config(map_changed, HandlerConfig::default())
  }

  pub fn with_config(map_changed: &MapChangedEvent, config: HandlerConfig) -> Self {
    let tracker: Shared = Arc::new(Mutex::new(config.build()));

    let weak = Arc::downgrade(&tracker);
    let subscription = map_changed.subscribe(move |sample| {
      if let Some(tracker) = weak.upgrade() {
        tracker
          .lock()
          .unwrap_or_else(PoisonError::into_inner)
          .on_map_changed(sample);
      }
    });
    debug!(kind = ?config.kind, "position handler created");

    Self {
      tracker,
      kind: config.kind,
      _subscription: subscription,
    }
  }

  fn lock(&self) -> MutexGuard<'_, Box<dyn AreaTracker>> {
    self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
  }

  pub fn kind(&self) -> TrackerKind {
    self.kind
  }

  /// Registered areas across all maps.
  pub fn count(&self) -> usize {
    self.lock().count()
  }

  /// Evaluate a new position, firing enter/exit callbacks.
  pub fn update(&self, sample: &PositionSample) -> Result<(), TrackerError> {
    self.lock().update(sample)
  }

  /// Register `volume` on `map`. `callback` receives the triggering sample and
  /// the new contained state on every transition.
  pub fn add_area<F>(
    &self,
    map: impl Into<MapId>,
    volume: VolumeHandle,
    callback: F,
  ) -> Result<(), TrackerError>
  where
    F: FnMut(&PositionSample, bool) + Send + 'static,
  {
    self.lock().add_area(map.into(), volume, Box::new(callback))
  }

  pub fn remove_area(&self, map: impl Into<MapId>, volume: &VolumeHandle) -> bool {
    self.lock().remove_area(map.into(), volume)
  }

  pub fn clear(&self) {
    self.lock().clear();
  }

  /// Snapshot of the tracker's counters.
  pub fn metrics(&self) -> TrackerMetrics {
    self.lock().metrics().clone()
  }
}

impl std::fmt::Debug for PositionHandler {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PositionHandler")
      .field("kind", &self.kind)
      .field("count", &self.count())
      .finish_non_exhaustive()
  }
}
