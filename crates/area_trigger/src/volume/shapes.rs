//! Box and sphere primitives. Both have cheap, boundary-inclusive tests.

use std::fmt;

use glam::DVec3;

use super::BoundingVolume;
use crate::bounds::Aabb3;

/// Axis-aligned box volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxVolume {
  bounds: Aabb3,
}

impl BoxVolume {
  /// Create a box from two opposite corners.
  pub fn new(min: DVec3, max: DVec3) -> Self {
    Self {
      bounds: Aabb3::new(min, max),
    }
  }

  #[inline]
  pub fn min(&self) -> DVec3 {
    self.bounds.min
  }

  #[inline]
  pub fn max(&self) -> DVec3 {
    self.bounds.max
  }
}

impl From<Aabb3> for BoxVolume {
  fn from(bounds: Aabb3) -> Self {
    Self { bounds }
  }
}

impl BoundingVolume for BoxVolume {
  #[inline]
  fn bounds(&self) -> Aabb3 {
    self.bounds
  }

  #[inline]
  fn is_expensive(&self) -> bool {
    false
  }

  #[inline]
  fn contains(&self, point: DVec3) -> bool {
    self.bounds.contains_point(point)
  }
}

impl fmt::Display for BoxVolume {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Box {{ min: {}, max: {} }}", self.bounds.min, self.bounds.max)
  }
}

/// Sphere volume.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereVolume {
  center: DVec3,
  radius: f64,
}

impl SphereVolume {
  /// Create a sphere. Negative radii are treated as their magnitude.
  pub fn new(center: DVec3, radius: f64) -> Self {
    Self {
      center,
      radius: radius.abs(),
    }
  }

  #[inline]
  pub fn center(&self) -> DVec3 {
    self.center
  }

  #[inline]
  pub fn radius(&self) -> f64 {
    self.radius
  }
}

impl BoundingVolume for SphereVolume {
  #[inline]
  fn bounds(&self) -> Aabb3 {
    Aabb3::from_center_half_extents(self.center, DVec3::splat(self.radius))
  }

  #[inline]
  fn is_expensive(&self) -> bool {
    false
  }

  #[inline]
  fn contains(&self, point: DVec3) -> bool {
    self.center.distance_squared(point) <= self.radius * self.radius
  }
}

impl fmt::Display for SphereVolume {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Sphere {{ center: {}, radius: {} }}", self.center, self.radius)
  }
}
