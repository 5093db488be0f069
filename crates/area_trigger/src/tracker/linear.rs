//! LinearTracker - brute-force reference implementation.
//!
//! Tests every registered area of the sample's map on each update. Kept to
//! cross-check [`OctreeTracker`](super::OctreeTracker) and for small area
//! counts where an index does not pay off.

use std::collections::HashMap;

use web_time::Instant;

use super::{AreaCallback, AreaTracker, MapId, Membership, PositionSample};
use crate::error::TrackerError;
use crate::metrics::{self, TrackerMetrics};
use crate::volume::{BoundingVolume, VolumeHandle};

#[derive(Debug, Default)]
pub struct LinearTracker {
  areas: HashMap<MapId, Vec<VolumeHandle>>,
  state: Membership,
}

impl LinearTracker {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn membership(&self) -> &Membership {
    &self.state
  }
}

impl AreaTracker for LinearTracker {
  fn count(&self) -> usize {
    self.state.count()
  }

  #[tracing::instrument(skip_all, name = "tracker::update", fields(kind = "linear", map = sample.map_id.0))]
  fn update(&mut self, sample: &PositionSample) -> Result<(), TrackerError> {
    self.state.enter_map(sample);

    let start = metrics::is_enabled().then(Instant::now);
    let hits: Vec<VolumeHandle> = self
      .areas
      .get(&sample.map_id)
      .map(|areas| {
        areas
          .iter()
          .filter(|v| v.contains_efficient(sample.position))
          .cloned()
          .collect()
      })
      .unwrap_or_default();
    if let Some(start) = start {
      let elapsed = start.elapsed().as_micros() as u64;
      self.state.metrics_mut().record_query(elapsed, hits.len());
    }

    self.state.apply(sample, &hits)
  }

  fn on_map_changed(&mut self, sample: &PositionSample) {
    self.state.enter_map(sample);
  }

  fn add_area(
    &mut self,
    map: MapId,
    volume: VolumeHandle,
    callback: AreaCallback,
  ) -> Result<(), TrackerError> {
    if self.state.register(map, volume.clone(), callback) {
      self.areas.entry(map).or_default().push(volume);
    }
    Ok(())
  }

  fn remove_area(&mut self, map: MapId, volume: &VolumeHandle) -> bool {
    let Some(areas) = self.areas.get_mut(&map) else {
      return false;
    };
    let Some(i) = areas.iter().position(|v| v.ptr_eq(volume)) else {
      return false;
    };
    areas.swap_remove(i);
    if areas.is_empty() {
      self.areas.remove(&map);
    }
    self.state.unregister(map, volume)
  }

  fn clear(&mut self) {
    self.areas.clear();
    self.state.clear();
  }

  fn metrics(&self) -> &TrackerMetrics {
    self.state.metrics()
  }
}
