//! Principal axes and the per-axis coordinate helpers used by oriented shapes.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

/// Principal axis selector.
///
/// `All` addresses every component at once; it is valid for vector helpers
/// but rejected by shapes that need a single orientation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Axis3 {
  X,
  Y,
  Z,
  All,
}

impl Default for Axis3 {
  fn default() -> Self {
    Axis3::Z
  }
}

impl Axis3 {
  /// True for the three single-axis variants.
  #[inline]
  pub fn is_principal(self) -> bool {
    !matches!(self, Axis3::All)
  }

  /// Add `value` to the component(s) selected by this axis.
  #[inline]
  pub fn add_to(self, v: DVec3, value: f64) -> DVec3 {
    match self {
      Axis3::X => DVec3::new(v.x + value, v.y, v.z),
      Axis3::Y => DVec3::new(v.x, v.y + value, v.z),
      Axis3::Z => DVec3::new(v.x, v.y, v.z + value),
      Axis3::All => v + DVec3::splat(value),
    }
  }

  /// Coordinate along the alignment axis ("up").
  ///
  /// Returns `None` for `All`.
  #[inline]
  pub fn up(self, p: DVec3) -> Option<f64> {
    match self {
      Axis3::X => Some(p.x),
      Axis3::Y => Some(p.y),
      Axis3::Z => Some(p.z),
      Axis3::All => None,
    }
  }

  /// Projection onto the plane perpendicular to this axis as (right, front).
  ///
  /// - X: right = -Z, front = Y
  /// - Y: right = X, front = -Z
  /// - Z: right = X, front = Y
  #[inline]
  pub fn project(self, p: DVec3) -> Option<DVec2> {
    match self {
      Axis3::X => Some(DVec2::new(-p.z, p.y)),
      Axis3::Y => Some(DVec2::new(p.x, -p.z)),
      Axis3::Z => Some(DVec2::new(p.x, p.y)),
      Axis3::All => None,
    }
  }

  /// Inverse of [`Axis3::project`] combined with [`Axis3::up`].
  #[inline]
  pub fn unproject(self, planar: DVec2, up: f64) -> Option<DVec3> {
    match self {
      Axis3::X => Some(DVec3::new(up, planar.y, -planar.x)),
      Axis3::Y => Some(DVec3::new(planar.x, up, -planar.y)),
      Axis3::Z => Some(DVec3::new(planar.x, planar.y, up)),
      Axis3::All => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn add_to_single_and_all() {
    let v = DVec3::new(1.0, 2.0, 3.0);
    assert_eq!(Axis3::X.add_to(v, 1.0), DVec3::new(2.0, 2.0, 3.0));
    assert_eq!(Axis3::Y.add_to(v, 1.0), DVec3::new(1.0, 3.0, 3.0));
    assert_eq!(Axis3::Z.add_to(v, 1.0), DVec3::new(1.0, 2.0, 4.0));
    assert_eq!(Axis3::All.add_to(v, -1.0), DVec3::new(0.0, 1.0, 2.0));
  }

  #[test]
  fn projection_per_axis() {
    let p = DVec3::new(1.0, 2.0, 3.0);
    assert_eq!(Axis3::X.project(p), Some(DVec2::new(-3.0, 2.0)));
    assert_eq!(Axis3::Y.project(p), Some(DVec2::new(1.0, -3.0)));
    assert_eq!(Axis3::Z.project(p), Some(DVec2::new(1.0, 2.0)));
    assert_eq!(Axis3::All.project(p), None);

    assert_eq!(Axis3::X.up(p), Some(1.0));
    assert_eq!(Axis3::Y.up(p), Some(2.0));
    assert_eq!(Axis3::Z.up(p), Some(3.0));
    assert_eq!(Axis3::All.up(p), None);
  }

  /// unproject(project(p), up(p)) == p for every principal axis.
  #[test]
  fn project_unproject_roundtrip() {
    let p = DVec3::new(-4.5, 7.25, 0.5);
    for axis in [Axis3::X, Axis3::Y, Axis3::Z] {
      let planar = axis.project(p).unwrap();
      let up = axis.up(p).unwrap();
      assert_eq!(axis.unproject(planar, up), Some(p), "axis {:?}", axis);
    }
  }
}
