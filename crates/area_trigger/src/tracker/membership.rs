//! Membership - record store and the transition logic shared by all trackers.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use super::{AreaCallback, AreaState, MapId, PositionSample};
use crate::error::TrackerError;
use crate::metrics::TrackerMetrics;
use crate::volume::VolumeHandle;

/// Tracked-object records keyed by map, then by volume identity.
///
/// Trackers own the spatial index; this type owns everything else: the
/// records, the current map and the counters.
#[derive(Debug, Default)]
pub struct Membership {
  maps: HashMap<MapId, HashMap<VolumeHandle, AreaState>>,
  current_map: Option<MapId>,
  metrics: TrackerMetrics,
}

impl Membership {
  pub fn new() -> Self {
    Self::default()
  }

  /// Registered areas across all maps.
  pub fn count(&self) -> usize {
    self.maps.values().map(HashMap::len).sum()
  }

  /// Map of the most recent sample, if any.
  pub fn current_map(&self) -> Option<MapId> {
    self.current_map
  }

  pub fn is_registered(&self, map: MapId, volume: &VolumeHandle) -> bool {
    self
      .maps
      .get(&map)
      .is_some_and(|records| records.contains_key(volume))
  }

  pub fn state(&self, map: MapId, volume: &VolumeHandle) -> Option<&AreaState> {
    self.maps.get(&map)?.get(volume)
  }

  /// Create a fresh record, or swap the callback of an existing one.
  /// Returns true when the record is new.
  pub fn register(&mut self, map: MapId, volume: VolumeHandle, callback: AreaCallback) -> bool {
    let records = self.maps.entry(map).or_default();
    match records.get_mut(&volume) {
      Some(state) => {
        state.replace_callback(callback);
        false
      }
      None => {
        records.insert(volume, AreaState::new(callback));
        true
      }
    }
  }

  /// Drop a record without firing its callback.
  pub fn unregister(&mut self, map: MapId, volume: &VolumeHandle) -> bool {
    let Some(records) = self.maps.get_mut(&map) else {
      return false;
    };
    let removed = records.remove(volume).is_some();
    if records.is_empty() {
      self.maps.remove(&map);
    }
    removed
  }

  /// Make `sample.map_id` the current map. Leaving another map forces an
  /// exit for each of its areas still marked contained.
  pub fn enter_map(&mut self, sample: &PositionSample) {
    let next = sample.map_id;
    match self.current_map.replace(next) {
      Some(previous) if previous != next => self.force_exit(previous, sample),
      _ => {}
    }
  }

  fn force_exit(&mut self, map: MapId, fallback: &PositionSample) {
    let Some(records) = self.maps.get_mut(&map) else {
      return;
    };

    let mut exited = 0usize;
    for (volume, state) in records.iter_mut().filter(|(_, s)| s.is_contained()) {
      let sample = state.last_sample().copied().unwrap_or(*fallback);
      if state.set_state(false, sample) {
        exited += 1;
        trace!(map = map.0, volume = volume.id(), "forced area exit");
        self.metrics.record_transition(false, true);
      }
    }

    if exited > 0 {
      debug!(from = map.0, to = fallback.map_id.0, exited, "map changed");
    }
  }

  /// Diff the index result `hits` against the stored flags of
  /// `sample.map_id`, firing callbacks on every flip.
  ///
  /// Every hit must have a record; otherwise nothing is changed and
  /// [`TrackerError::Untracked`] is returned.
  pub fn apply(&mut self, sample: &PositionSample, hits: &[VolumeHandle]) -> Result<(), TrackerError> {
    let map = sample.map_id;
    let Some(records) = self.maps.get_mut(&map) else {
      if hits.is_empty() {
        return Ok(());
      }
      warn!(map = map.0, hits = hits.len(), "index returned volumes for a map without records");
      return Err(TrackerError::Untracked(map));
    };

    if let Some(stray) = hits.iter().find(|v| !records.contains_key(*v)) {
      warn!(map = map.0, volume = stray.id(), "index returned an untracked volume");
      return Err(TrackerError::Untracked(map));
    }

    // Taken before any hit flips to true.
    let previously: Vec<VolumeHandle> = records
      .iter()
      .filter(|(_, s)| s.is_contained())
      .map(|(v, _)| v.clone())
      .collect();

    for volume in hits {
      if let Some(state) = records.get_mut(volume) {
        if state.set_state(true, *sample) {
          trace!(map = map.0, volume = volume.id(), "area entered");
          self.metrics.record_transition(true, false);
        }
      }
    }

    for volume in previously {
      if hits.iter().any(|h| h.ptr_eq(&volume)) {
        continue;
      }
      if let Some(state) = records.get_mut(&volume) {
        if state.set_state(false, *sample) {
          trace!(map = map.0, volume = volume.id(), "area exited");
          self.metrics.record_transition(false, false);
        }
      }
    }

    Ok(())
  }

  /// Drop every record. The current map is kept.
  pub fn clear(&mut self) {
    self.maps.clear();
  }

  pub fn metrics(&self) -> &TrackerMetrics {
    &self.metrics
  }

  pub fn metrics_mut(&mut self) -> &mut TrackerMetrics {
    &mut self.metrics
  }
}
