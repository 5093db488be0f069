use super::*;

fn square(size: f64) -> Vec<DVec2> {
  vec![
    DVec2::new(0.0, 0.0),
    DVec2::new(size, 0.0),
    DVec2::new(size, size),
    DVec2::new(0.0, size),
  ]
}

fn triangle() -> Vec<DVec2> {
  vec![DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0), DVec2::new(0.0, 4.0)]
}

// =========================================================================
// Construction
// =========================================================================

#[test]
fn test_rejects_top_not_above_bottom() {
  assert_eq!(
    Prism::new(1.0, 1.0, square(1.0), Axis3::Z).unwrap_err(),
    VolumeError::InvalidPrismHeight {
      top: 1.0,
      bottom: 1.0
    }
  );
  assert!(Prism::new(0.0, 1.0, square(1.0), Axis3::Z).is_err());
  assert!(Prism::new(f64::NAN, 1.0, square(1.0), Axis3::Z).is_err());
}

#[test]
fn test_rejects_too_few_vertices() {
  let two = vec![DVec2::ZERO, DVec2::ONE];
  assert_eq!(
    Prism::new(1.0, 0.0, two, Axis3::Z).unwrap_err(),
    VolumeError::TooFewVertices(2)
  );
}

#[test]
fn test_rejects_axis_all() {
  assert_eq!(
    Prism::new(1.0, 0.0, square(1.0), Axis3::All).unwrap_err(),
    VolumeError::UnalignedPrism
  );
}

#[test]
fn test_expensive_by_default() {
  let prism = Prism::new(1.0, 0.0, square(1.0), Axis3::Z).unwrap();
  assert!(prism.is_expensive());
  assert!(!prism.with_expensive(false).is_expensive());
}

// =========================================================================
// Polygon
// =========================================================================

#[test]
fn test_polygon_interior_and_boundary() {
  let poly = Polygon::new(triangle()).unwrap();

  assert!(poly.contains(DVec2::new(1.0, 1.0)));
  assert!(poly.contains(DVec2::new(2.0, 2.0)), "on hypotenuse");
  assert!(poly.contains(DVec2::new(0.0, 0.0)), "vertex");
  assert!(poly.contains(DVec2::new(2.0, 0.0)), "bottom edge");
  assert!(!poly.contains(DVec2::new(3.0, 3.0)));
  assert!(!poly.contains(DVec2::new(-0.1, 1.0)));
}

#[test]
fn test_polygon_concave() {
  // U shape opening upwards.
  let poly = Polygon::new([
    DVec2::new(0.0, 0.0),
    DVec2::new(3.0, 0.0),
    DVec2::new(3.0, 3.0),
    DVec2::new(2.0, 3.0),
    DVec2::new(2.0, 1.0),
    DVec2::new(1.0, 1.0),
    DVec2::new(1.0, 3.0),
    DVec2::new(0.0, 3.0),
  ])
  .unwrap();

  assert!(poly.contains(DVec2::new(0.5, 2.0)), "left arm");
  assert!(poly.contains(DVec2::new(2.5, 2.0)), "right arm");
  assert!(!poly.contains(DVec2::new(1.5, 2.0)), "notch");
  assert!(poly.contains(DVec2::new(1.5, 0.5)), "base");
}

// =========================================================================
// Axis mapping, fixed per alignment
// =========================================================================

/// Z: up = z, right = x, front = y.
#[test]
fn test_alignment_z() {
  let prism = Prism::new(5.0, 0.0, square(2.0), Axis3::Z).unwrap();

  assert!(prism.contains(DVec3::new(1.0, 1.0, 3.0)));
  assert!(prism.contains(DVec3::new(2.0, 2.0, 5.0)), "top corner");
  assert!(!prism.contains(DVec3::new(1.0, 1.0, 5.5)), "above top");
  assert!(!prism.contains(DVec3::new(1.0, 1.0, -0.5)), "below bottom");
  assert!(!prism.contains(DVec3::new(-1.0, 1.0, 3.0)));

  assert_eq!(prism.bounds().min, DVec3::new(0.0, 0.0, 0.0));
  assert_eq!(prism.bounds().max, DVec3::new(2.0, 2.0, 5.0));
}

/// X: up = x, right = -z, front = y.
#[test]
fn test_alignment_x() {
  let prism = Prism::new(5.0, 0.0, square(2.0), Axis3::X).unwrap();

  assert!(prism.contains(DVec3::new(3.0, 1.0, -1.0)));
  assert!(!prism.contains(DVec3::new(3.0, 1.0, 1.0)), "right is -z");
  assert!(!prism.contains(DVec3::new(6.0, 1.0, -1.0)), "past top along x");

  assert_eq!(prism.bounds().min, DVec3::new(0.0, 0.0, -2.0));
  assert_eq!(prism.bounds().max, DVec3::new(5.0, 2.0, 0.0));
}

/// Y: up = y, right = x, front = -z.
#[test]
fn test_alignment_y() {
  let prism = Prism::new(5.0, 0.0, square(2.0), Axis3::Y).unwrap();

  assert!(prism.contains(DVec3::new(1.0, 3.0, -1.0)));
  assert!(!prism.contains(DVec3::new(1.0, 3.0, 1.0)), "front is -z");
  assert!(!prism.contains(DVec3::new(1.0, 6.0, -1.0)), "past top along y");

  assert_eq!(prism.bounds().min, DVec3::new(0.0, 0.0, -2.0));
  assert_eq!(prism.bounds().max, DVec3::new(2.0, 5.0, 0.0));
}

/// Every contained sample must lie inside the reported bound.
#[test]
fn test_bounds_are_conservative_for_all_axes() {
  for axis in [Axis3::X, Axis3::Y, Axis3::Z] {
    let prism = Prism::new(3.0, -1.0, triangle(), axis).unwrap();
    let b = prism.bounds().grown(1.0);

    let mut hits = 0;
    for x in -6..=6 {
      for y in -6..=6 {
        for z in -6..=6 {
          let p = DVec3::new(x as f64, y as f64, z as f64) * 0.5;
          if prism.contains(p) {
            hits += 1;
            assert!(prism.bounds().contains_point(p), "{:?}: {} outside bound", axis, p);
          }
          if !b.contains_point(p) {
            assert!(!prism.contains(p));
          }
        }
      }
    }
    assert!(hits > 0, "{:?}: sampling missed the prism", axis);
  }
}
