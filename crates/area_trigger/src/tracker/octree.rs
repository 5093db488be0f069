//! OctreeTracker - membership tracking backed by one octree per map.

use std::collections::HashMap;

use tracing::warn;
use web_time::Instant;

use super::{AreaCallback, AreaTracker, MapId, Membership, PositionSample};
use crate::error::TrackerError;
use crate::metrics::{self, TrackerMetrics};
use crate::octree::{Octree, OctreeConfig};
use crate::volume::{BoundingVolume, VolumeHandle};

/// Default margin added around a new area's bound when growing a map's tree.
pub const DEFAULT_GROWTH_MARGIN: f64 = 1.0;

/// Tracker that indexes each map's areas in an [`Octree`].
///
/// A map's tree is created on its first area, sized to that area, and grown
/// (rebuilt) whenever a later area does not fit.
#[derive(Debug)]
pub struct OctreeTracker {
  config: OctreeConfig,
  growth_margin: f64,
  trees: HashMap<MapId, Octree>,
  state: Membership,
}

impl Default for OctreeTracker {
  fn default() -> Self {
    Self::new(OctreeConfig::default(), DEFAULT_GROWTH_MARGIN)
  }
}

impl OctreeTracker {
  pub fn new(config: OctreeConfig, growth_margin: f64) -> Self {
    Self {
      config,
      growth_margin,
      trees: HashMap::new(),
      state: Membership::new(),
    }
  }

  /// The tree for `map`, if any area was ever registered there.
  pub fn tree(&self, map: MapId) -> Option<&Octree> {
    self.trees.get(&map)
  }

  pub fn membership(&self) -> &Membership {
    &self.state
  }
}

impl AreaTracker for OctreeTracker {
  fn count(&self) -> usize {
    self.state.count()
  }

  #[tracing::instrument(skip_all, name = "tracker::update", fields(kind = "octree", map = sample.map_id.0))]
  fn update(&mut self, sample: &PositionSample) -> Result<(), TrackerError> {
    self.state.enter_map(sample);

    let start = metrics::is_enabled().then(Instant::now);
    let hits = match self.trees.get(&sample.map_id) {
      Some(tree) => tree.containing(sample.position),
      None => Vec::new(),
    };
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
    if self.state.is_registered(map, &volume) {
      self.state.register(map, volume, callback);
      return Ok(());
    }

    let bounds = volume.bounds();
    let config = self.config;
    let tree = self
      .trees
      .entry(map)
      .or_insert_with(|| Octree::new(config, bounds));
    tree.resize_to_include(&bounds.grown(self.growth_margin));

    if !tree.insert(volume.clone()) {
      let tree_bounds = tree.bounds();
      warn!(
        map = map.0,
        tree = ?tree_bounds,
        volume = ?bounds,
        "octree rejected area after growing to fit"
      );
      return Err(TrackerError::IndexInsertion {
        map,
        tree: tree_bounds,
        volume: bounds,
      });
    }

    self.state.register(map, volume, callback);
    Ok(())
  }

  fn remove_area(&mut self, map: MapId, volume: &VolumeHandle) -> bool {
    let Some(tree) = self.trees.get_mut(&map) else {
      return false;
    };
    if !tree.remove(volume) {
      return false;
    }
    self.state.unregister(map, volume)
  }

  fn clear(&mut self) {
    self.trees.clear();
    self.state.clear();
  }

  fn metrics(&self) -> &TrackerMetrics {
    self.state.metrics()
  }
}
