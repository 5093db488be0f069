use std::sync::{Arc, Mutex};

use super::*;
use crate::volume::{BoxVolume, SphereVolume};

type Log = Arc<Mutex<Vec<(PositionSample, bool)>>>;

fn recorder() -> (AreaCallback, Log) {
  let log: Log = Arc::default();
  let sink = log.clone();
  let callback: AreaCallback = Box::new(move |sample, contained| {
    sink.lock().unwrap().push((*sample, contained));
  });
  (callback, log)
}

fn states(log: &Log) -> Vec<bool> {
  log.lock().unwrap().iter().map(|(_, c)| *c).collect()
}

fn trackers() -> Vec<(&'static str, Box<dyn AreaTracker>)> {
  vec![
    ("octree", Box::new(OctreeTracker::default())),
    ("linear", Box::new(LinearTracker::new())),
  ]
}

fn ten_box() -> VolumeHandle {
  BoxVolume::new(DVec3::ZERO, DVec3::splat(10.0)).into()
}

fn at(map: i32, v: f64) -> PositionSample {
  PositionSample::new(map, DVec3::splat(v))
}

// =========================================================================
// Transitions
// =========================================================================

/// Box 0..10 on map 1: inside, far outside, then exactly on the corner.
#[test]
fn test_box_scenario() {
  for (kind, mut tracker) in trackers() {
    let (callback, log) = recorder();
    tracker.add_area(MapId(1), ten_box(), callback).unwrap();

    tracker.update(&at(1, 5.0)).unwrap();
    tracker.update(&at(1, 20.0)).unwrap();
    tracker.update(&at(1, 10.0)).unwrap();

    assert_eq!(states(&log), vec![true, false, true], "{}", kind);
    let log = log.lock().unwrap();
    assert_eq!(log[0].0, at(1, 5.0), "{}: callback gets the triggering sample", kind);
    assert_eq!(log[2].0, at(1, 10.0), "{}", kind);
  }
}

#[test]
fn test_callbacks_are_edge_triggered() {
  for (kind, mut tracker) in trackers() {
    let (callback, log) = recorder();
    tracker.add_area(MapId(1), ten_box(), callback).unwrap();

    tracker.update(&at(1, 5.0)).unwrap();
    assert_eq!(states(&log).len(), 1, "{}: first inside fires", kind);
    tracker.update(&at(1, 15.0)).unwrap();
    assert_eq!(states(&log).len(), 2, "{}: outside fires", kind);
    tracker.update(&at(1, 5.0)).unwrap();
    assert_eq!(states(&log).len(), 3, "{}: inside again fires", kind);
    tracker.update(&at(1, 6.0)).unwrap();
    assert_eq!(states(&log).len(), 3, "{}: still inside is silent", kind);
  }
}

#[test]
fn test_never_entered_area_stays_silent() {
  for (kind, mut tracker) in trackers() {
    let (callback, log) = recorder();
    tracker.add_area(MapId(1), ten_box(), callback).unwrap();

    tracker.update(&at(1, 50.0)).unwrap();
    tracker.update(&at(1, -50.0)).unwrap();
    assert!(states(&log).is_empty(), "{}", kind);
  }
}

#[test]
fn test_overlapping_areas_fire_independently() {
  for (kind, mut tracker) in trackers() {
    let (cb_box, log_box) = recorder();
    let (cb_sphere, log_sphere) = recorder();
    tracker.add_area(MapId(1), ten_box(), cb_box).unwrap();
    let sphere: VolumeHandle = SphereVolume::new(DVec3::splat(10.0), 3.0).into();
    tracker.add_area(MapId(1), sphere, cb_sphere).unwrap();

    tracker.update(&at(1, 9.0)).unwrap();
    tracker.update(&at(1, 11.0)).unwrap();
    tracker.update(&at(1, 20.0)).unwrap();

    assert_eq!(states(&log_box), vec![true, false], "{}", kind);
    assert_eq!(states(&log_sphere), vec![true, false], "{}", kind);
    let exit_sample = log_box.lock().unwrap()[1].0;
    assert_eq!(exit_sample, at(1, 11.0), "{}", kind);
  }
}

// =========================================================================
// Maps
// =========================================================================

#[test]
fn test_map_change_forces_exit_with_last_sample() {
  for (kind, mut tracker) in trackers() {
    let (callback, log) = recorder();
    tracker.add_area(MapId(1), ten_box(), callback).unwrap();
    tracker.update(&at(1, 5.0)).unwrap();

    tracker.on_map_changed(&at(2, 0.0));

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 2, "{}", kind);
    assert_eq!(log[1], (at(1, 5.0), false), "{}", kind);
  }
}

#[test]
fn test_map_change_to_current_map_is_a_no_op() {
  for (kind, mut tracker) in trackers() {
    let (callback, log) = recorder();
    tracker.add_area(MapId(1), ten_box(), callback).unwrap();
    tracker.update(&at(1, 5.0)).unwrap();

    tracker.on_map_changed(&at(1, 0.0));
    assert_eq!(states(&log), vec![true], "{}", kind);
  }
}

#[test]
fn test_update_on_other_map_exits_previous_map() {
  for (kind, mut tracker) in trackers() {
    let (callback, log) = recorder();
    tracker.add_area(MapId(1), ten_box(), callback).unwrap();
    tracker.update(&at(1, 5.0)).unwrap();

    // Same coordinates, different map.
    tracker.update(&at(2, 5.0)).unwrap();
    assert_eq!(states(&log), vec![true, false], "{}", kind);
  }
}

#[test]
fn test_same_volume_on_two_maps() {
  for (kind, mut tracker) in trackers() {
    let area = ten_box();
    let (cb1, log1) = recorder();
    let (cb2, log2) = recorder();
    tracker.add_area(MapId(1), area.clone(), cb1).unwrap();
    tracker.add_area(MapId(2), area.clone(), cb2).unwrap();
    assert_eq!(tracker.count(), 2, "{}", kind);

    tracker.update(&at(1, 5.0)).unwrap();
    tracker.update(&at(2, 5.0)).unwrap();

    assert_eq!(states(&log1), vec![true, false], "{}", kind);
    assert_eq!(states(&log2), vec![true], "{}", kind);

    assert!(tracker.remove_area(MapId(1), &area));
    assert_eq!(tracker.count(), 1, "{}", kind);
  }
}

#[test]
fn test_update_for_unknown_map_is_silent() {
  for (kind, mut tracker) in trackers() {
    assert!(tracker.update(&at(7, 0.0)).is_ok(), "{}", kind);
  }
}

// =========================================================================
// Registration
// =========================================================================

#[test]
fn test_re_adding_replaces_callback_and_keeps_state() {
  for (kind, mut tracker) in trackers() {
    let area = ten_box();
    let (first, first_log) = recorder();
    let (second, second_log) = recorder();

    tracker.add_area(MapId(1), area.clone(), first).unwrap();
    tracker.update(&at(1, 5.0)).unwrap();
    tracker.add_area(MapId(1), area, second).unwrap();
    assert_eq!(tracker.count(), 1, "{}", kind);

    tracker.update(&at(1, 6.0)).unwrap();
    assert!(states(&second_log).is_empty(), "{}: state was kept", kind);

    tracker.update(&at(1, 50.0)).unwrap();
    assert_eq!(states(&first_log), vec![true], "{}", kind);
    assert_eq!(states(&second_log), vec![false], "{}", kind);
  }
}

#[test]
fn test_remove_area_is_silent() {
  for (kind, mut tracker) in trackers() {
    let area = ten_box();
    let (callback, log) = recorder();
    tracker.add_area(MapId(1), area.clone(), callback).unwrap();
    tracker.update(&at(1, 5.0)).unwrap();

    assert!(tracker.remove_area(MapId(1), &area), "{}", kind);
    assert!(!tracker.remove_area(MapId(1), &area), "{}", kind);
    tracker.update(&at(1, 50.0)).unwrap();

    assert_eq!(states(&log), vec![true], "{}", kind);
    assert_eq!(tracker.count(), 0, "{}", kind);
  }
}

#[test]
fn test_clear_drops_everything() {
  for (kind, mut tracker) in trackers() {
    let (callback, log) = recorder();
    tracker.add_area(MapId(1), ten_box(), callback).unwrap();
    tracker.add_area(MapId(3), ten_box(), Box::new(|_, _| {})).unwrap();

    tracker.clear();
    assert_eq!(tracker.count(), 0, "{}", kind);

    tracker.update(&at(1, 5.0)).unwrap();
    assert!(states(&log).is_empty(), "{}", kind);
  }
}

// =========================================================================
// Consistency
// =========================================================================

#[test]
fn test_untracked_hit_is_an_error_and_changes_nothing() {
  let mut membership = Membership::new();
  let known = ten_box();
  let stray = ten_box();
  let (callback, log) = recorder();
  membership.register(MapId(1), known.clone(), callback);

  let err = membership
    .apply(&at(1, 5.0), &[known.clone(), stray])
    .unwrap_err();
  assert_eq!(err, TrackerError::Untracked(MapId(1)));
  assert!(states(&log).is_empty());
  assert!(!membership.state(MapId(1), &known).unwrap().is_contained());
}

#[test]
fn test_hits_for_map_without_records_are_an_error() {
  let mut membership = Membership::new();
  let err = membership.apply(&at(4, 0.0), &[ten_box()]).unwrap_err();
  assert_eq!(err, TrackerError::Untracked(MapId(4)));
  assert!(membership.apply(&at(4, 0.0), &[]).is_ok());
}
