use std::collections::HashSet;

use super::*;

fn sample_box() -> BoxVolume {
  BoxVolume::new(DVec3::ZERO, DVec3::ONE)
}

#[test]
fn test_handles_compare_by_identity() {
  let a = VolumeHandle::new(sample_box());
  let a2 = a.clone();
  let b = VolumeHandle::new(sample_box());

  assert_eq!(a, a2);
  assert_ne!(a, b, "equal shapes, different identity");
  assert_eq!(a.id(), a2.id());

  let set: HashSet<VolumeHandle> = [a.clone(), a2, b].into_iter().collect();
  assert_eq!(set.len(), 2);
}

#[test]
fn test_kind_names() {
  let cases: Vec<(Volume, &str)> = vec![
    (sample_box().into(), "box"),
    (SphereVolume::new(DVec3::ZERO, 1.0).into(), "sphere"),
    (Union::default().into(), "union"),
    (Intersection::default().into(), "intersection"),
    (Difference::default().into(), "difference"),
    (SymmetricDifference::default().into(), "symmetricDifference"),
  ];
  for (volume, name) in cases {
    assert_eq!(volume.kind_name(), name);
  }
}

#[test]
fn test_enum_delegates_to_variant() {
  let handle: VolumeHandle = SphereVolume::new(DVec3::ZERO, 2.0).into();

  assert!(handle.contains(DVec3::new(2.0, 0.0, 0.0)));
  assert!(!handle.is_expensive());
  assert_eq!(handle.bounds().max, DVec3::splat(2.0));
  assert!(handle.as_union().is_none());
}

/// Expensive volumes reject via their bound before the exact test.
#[test]
fn test_contains_efficient_rejects_outside_bound() {
  let inner: VolumeHandle = sample_box().into();
  let union = Union::from_content([inner], true);

  let outside = DVec3::splat(3.0);
  assert!(!union.bounds().contains_point(outside));
  assert!(!union.contains_efficient(outside));
  assert!(union.contains_efficient(DVec3::splat(0.5)));
}

#[test]
fn test_debug_shows_kind() {
  let handle: VolumeHandle = sample_box().into();
  let dbg = format!("{:?}", handle);
  assert!(dbg.contains("box"), "{}", dbg);
}
