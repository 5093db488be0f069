//! Membership tracking: turns repeated point queries into enter/exit events.
//!
//! Areas are registered per map. On every [`AreaTracker::update`] the index
//! for the sample's map is queried, and each area's stored "contained" flag is
//! compared with the new result. Callbacks fire only when the flag flips.
//!
//! A tracker remembers the map of the last sample it saw. Moving to another
//! map, either through [`AreaTracker::on_map_changed`] or an update carrying
//! a different map id, forces an exit for every area still marked contained
//! on the map being left.
//!
//! # Module Structure
//!
//! - [`record`]: `AreaState` - per-area edge-triggered flag and callback
//! - [`membership`]: `Membership` - record store and transition logic
//! - [`octree`]: `OctreeTracker` - one [`Octree`](crate::octree::Octree) per map
//! - [`linear`]: `LinearTracker` - brute-force scan, for cross-checking

use std::fmt;

use glam::DVec3;

use crate::error::TrackerError;
use crate::metrics::TrackerMetrics;
use crate::volume::VolumeHandle;

pub mod linear;
pub mod membership;
pub mod octree;
pub mod record;

pub use linear::LinearTracker;
pub use membership::Membership;
pub use octree::OctreeTracker;
pub use record::AreaState;

/// Host-defined map identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct MapId(pub i32);

impl MapId {
  #[inline]
  pub fn raw(self) -> i32 {
    self.0
  }
}

impl From<i32> for MapId {
  fn from(id: i32) -> Self {
    Self(id)
  }
}

impl fmt::Display for MapId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "map {}", self.0)
  }
}

/// A position on a map.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PositionSample {
  pub map_id: MapId,
  pub position: DVec3,
}

impl PositionSample {
  pub fn new(map_id: impl Into<MapId>, position: DVec3) -> Self {
    Self {
      map_id: map_id.into(),
      position,
    }
  }
}

/// Invoked with the triggering sample and the new contained state.
pub type AreaCallback = Box<dyn FnMut(&PositionSample, bool) + Send>;

/// Operations shared by every tracker implementation.
pub trait AreaTracker: Send {
  /// Registered areas across all maps.
  fn count(&self) -> usize;

  /// Evaluate `sample` and fire callbacks for every area whose state flips.
  fn update(&mut self, sample: &PositionSample) -> Result<(), TrackerError>;

  /// Force exits for areas on the map being left. No-op when `sample` names
  /// the current map.
  fn on_map_changed(&mut self, sample: &PositionSample);

  /// Register `volume` on `map`. Registering the same handle again replaces
  /// its callback and keeps its state.
  fn add_area(
    &mut self,
    map: MapId,
    volume: VolumeHandle,
    callback: AreaCallback,
  ) -> Result<(), TrackerError>;

  /// Unregister; false if `volume` was not registered on `map`.
  fn remove_area(&mut self, map: MapId, volume: &VolumeHandle) -> bool;

  /// Drop every area on every map.
  fn clear(&mut self);

  fn metrics(&self) -> &TrackerMetrics;
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
