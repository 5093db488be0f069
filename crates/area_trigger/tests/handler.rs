//! PositionHandler end to end: volumes built with the builder and codec,
//! transitions through `update`, exits through the map-changed event.

use std::sync::{Arc, Mutex};

use area_trigger::{
  codec, Axis3, HandlerConfig, MapChangedEvent, MapId, PositionHandler, PositionSample,
  VolumeBuilder, VolumeHandle,
};
use glam::{DVec2, DVec3};

type Log = Arc<Mutex<Vec<(MapId, DVec3, bool)>>>;

fn watch(handler: &PositionHandler, map: i32, area: VolumeHandle) -> Log {
  let log: Log = Arc::default();
  let sink = log.clone();
  handler
    .add_area(map, area, move |sample, inside| {
      sink
        .lock()
        .unwrap()
        .push((sample.map_id, sample.position, inside));
    })
    .unwrap();
  log
}

fn configs() -> [HandlerConfig; 2] {
  [HandlerConfig::default(), HandlerConfig::linear()]
}

#[test]
fn test_map_change_fires_exit_without_update() {
  for config in configs() {
    let event = MapChangedEvent::new();
    let handler = PositionHandler::with_config(&event, config);
    let area = VolumeBuilder::new()
      .add_box(DVec3::ZERO, DVec3::splat(10.0))
      .build()
      .unwrap();
    let log = watch(&handler, 1, area);

    handler
      .update(&PositionSample::new(1, DVec3::splat(5.0)))
      .unwrap();
    event.notify(&PositionSample::new(2, DVec3::splat(500.0)));

    assert_eq!(
      *log.lock().unwrap(),
      vec![
        (MapId(1), DVec3::splat(5.0), true),
        (MapId(1), DVec3::splat(5.0), false),
      ],
      "{:?}",
      config.kind
    );
  }
}

#[test]
fn test_dropping_handler_unsubscribes() {
  let event = MapChangedEvent::new();
  let first = PositionHandler::new(&event);
  let second = PositionHandler::with_config(&event, HandlerConfig::linear());
  assert_eq!(event.subscriber_count(), 2);

  drop(first);
  assert_eq!(event.subscriber_count(), 1);
  drop(second);
  assert_eq!(event.subscriber_count(), 0);

  // Nobody left to hear it.
  event.notify(&PositionSample::new(1, DVec3::ZERO));
}

/// A ring-shaped zone: prism footprint minus a sphere, round-tripped
/// through JSON before registration.
#[test]
fn test_decoded_csg_area() {
  let ring = VolumeBuilder::new()
    .add_prism(
      5.0,
      -5.0,
      [
        DVec2::new(-10.0, -10.0),
        DVec2::new(10.0, -10.0),
        DVec2::new(10.0, 10.0),
        DVec2::new(-10.0, 10.0),
      ],
      Axis3::Z,
    )
    .and_then(|b| b.subtract_sphere(DVec3::ZERO, 4.0))
    .and_then(VolumeBuilder::build)
    .unwrap();
  let json = codec::to_string(&ring).unwrap();
  let area = codec::from_str(&json).unwrap();
  assert_eq!(area.kind_name(), "difference");

  for config in configs() {
    let event = MapChangedEvent::new();
    let handler = PositionHandler::with_config(&event, config);
    let log = watch(&handler, 9, area.clone());

    for x in [0.0, 7.0, 8.0, 2.0, 20.0] {
      handler
        .update(&PositionSample::new(9, DVec3::new(x, 0.0, 0.0)))
        .unwrap();
    }

    let states: Vec<bool> = log.lock().unwrap().iter().map(|e| e.2).collect();
    // 0: hole, 7: ring, 8: ring, 2: hole, 20: outside.
    assert_eq!(states, vec![true, false], "{:?}", config.kind);
    assert_eq!(handler.count(), 1);
  }
}

#[test]
fn test_areas_on_several_maps() {
  let event = MapChangedEvent::new();
  let handler = PositionHandler::new(&event);
  let shared = VolumeBuilder::new()
    .add_sphere(DVec3::ZERO, 5.0)
    .build()
    .unwrap();
  let on_one = watch(&handler, 1, shared.clone());
  let on_two = watch(&handler, 2, shared.clone());
  assert_eq!(handler.count(), 2);

  handler.update(&PositionSample::new(1, DVec3::ZERO)).unwrap();
  event.notify(&PositionSample::new(2, DVec3::ZERO));
  handler.update(&PositionSample::new(2, DVec3::ZERO)).unwrap();

  let one: Vec<bool> = on_one.lock().unwrap().iter().map(|e| e.2).collect();
  let two: Vec<bool> = on_two.lock().unwrap().iter().map(|e| e.2).collect();
  assert_eq!(one, vec![true, false]);
  assert_eq!(two, vec![true]);

  assert!(handler.remove_area(2, &shared));
  assert!(!handler.remove_area(2, &shared));
  assert_eq!(handler.count(), 1);
}

#[cfg(feature = "metrics")]
#[test]
fn test_metrics_count_transitions() {
  let event = MapChangedEvent::new();
  let handler = PositionHandler::new(&event);
  let area = VolumeBuilder::new()
    .add_box(DVec3::ZERO, DVec3::ONE)
    .build()
    .unwrap();
  watch(&handler, 1, area);

  handler.update(&PositionSample::new(1, DVec3::splat(0.5))).unwrap();
  event.notify(&PositionSample::new(2, DVec3::ZERO));

  let metrics = handler.metrics();
  assert_eq!(metrics.updates, 1);
  assert_eq!(metrics.enters, 1);
  assert_eq!(metrics.exits, 0);
  assert_eq!(metrics.forced_exits, 1);
}
