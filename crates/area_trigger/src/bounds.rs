//! Axis-aligned bounding box with double precision.
//!
//! Every test on [`Aabb3`] is boundary-inclusive: a point lying exactly on a
//! face is contained, and two boxes that only touch still overlap.

use glam::DVec3;
use smallvec::SmallVec;

/// Fraction of a node's normalized extent treated as "on the midplane".
///
/// A point whose relative position along an axis lies within half this
/// distance of 0.5 belongs to both halves along that axis.
pub const MIDPLANE_TOLERANCE: f64 = 1e-2;

/// Double-precision axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb3 {
  /// Minimum corner (inclusive).
  pub min: DVec3,
  /// Maximum corner (inclusive).
  pub max: DVec3,
}

impl Aabb3 {
  /// Degenerate box at the origin; the bound reported by empty combinators.
  pub const ZERO: Self = Self {
    min: DVec3::ZERO,
    max: DVec3::ZERO,
  };

  /// Create a new AABB from min and max corners.
  ///
  /// Corners are reordered per axis, so callers may pass them in any order.
  pub fn new(a: DVec3, b: DVec3) -> Self {
    Self {
      min: a.min(b),
      max: a.max(b),
    }
  }

  /// Create a new AABB from center and half-extents.
  pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
    Self::new(center - half_extents, center + half_extents)
  }

  /// Smallest box enclosing all `points`, or `None` for an empty iterator.
  pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
    let mut iter = points.into_iter();
    let first = iter.next()?;
    Some(iter.fold(Self::new(first, first), |acc, p| Self {
      min: acc.min.min(p),
      max: acc.max.max(p),
    }))
  }

  /// Check if this AABB overlaps with another.
  #[inline]
  pub fn overlaps(&self, other: &Aabb3) -> bool {
    self.min.x <= other.max.x
      && self.max.x >= other.min.x
      && self.min.y <= other.max.y
      && self.max.y >= other.min.y
      && self.min.z <= other.max.z
      && self.max.z >= other.min.z
  }

  /// Check if this AABB contains a point.
  #[inline]
  pub fn contains_point(&self, point: DVec3) -> bool {
    point.x >= self.min.x
      && point.x <= self.max.x
      && point.y >= self.min.y
      && point.y <= self.max.y
      && point.z >= self.min.z
      && point.z <= self.max.z
  }

  /// Check if `other` lies fully inside this AABB (shared faces allowed).
  #[inline]
  pub fn contains_aabb(&self, other: &Aabb3) -> bool {
    other.min.cmpge(self.min).all() && other.max.cmple(self.max).all()
  }

  /// Smallest AABB enclosing both boxes.
  #[inline]
  pub fn merge(&self, other: &Aabb3) -> Aabb3 {
    Aabb3 {
      min: self.min.min(other.min),
      max: self.max.max(other.max),
    }
  }

  /// This AABB grown by `margin` in every direction.
  #[inline]
  pub fn grown(&self, margin: f64) -> Aabb3 {
    Aabb3::new(self.min - DVec3::splat(margin), self.max + DVec3::splat(margin))
  }

  /// Get the size of the AABB (max - min).
  #[inline]
  pub fn size(&self) -> DVec3 {
    self.max - self.min
  }

  /// Get the center of the AABB.
  #[inline]
  pub fn center(&self) -> DVec3 {
    (self.min + self.max) * 0.5
  }

  /// Position of `point` normalized to this box: each component is in
  /// `[0, 1]` when the point is inside.
  ///
  /// Axes with zero extent map to 0.5.
  pub fn relative_position(&self, point: DVec3) -> DVec3 {
    let size = self.size();
    let rel = |p: f64, min: f64, len: f64| if len > 0.0 { (p - min) / len } else { 0.5 };
    DVec3::new(
      rel(point.x, self.min.x, size.x),
      rel(point.y, self.min.y, size.y),
      rel(point.z, self.min.z, size.z),
    )
  }

  /// Bounds of one of the eight equal sub-boxes.
  ///
  /// Octant: 0-7 where bits select the upper half per axis:
  /// - bit 0: X
  /// - bit 1: Y
  /// - bit 2: Z
  pub fn octant_bounds(&self, octant: u8) -> Aabb3 {
    let center = self.center();
    let pick = |bit: u8, lo: f64, mid: f64, hi: f64| {
      if octant & bit == 0 {
        (lo, mid)
      } else {
        (mid, hi)
      }
    };
    let (x0, x1) = pick(1, self.min.x, center.x, self.max.x);
    let (y0, y1) = pick(2, self.min.y, center.y, self.max.y);
    let (z0, z1) = pick(4, self.min.z, center.z, self.max.z);
    Aabb3 {
      min: DVec3::new(x0, y0, z0),
      max: DVec3::new(x1, y1, z1),
    }
  }

  /// Octants whose sub-box `point` falls into.
  ///
  /// Points within [`MIDPLANE_TOLERANCE`] of a midplane are reported for both
  /// adjoining octants along that axis, so up to eight octants come back for a
  /// point at the exact center. Points outside the box yield nothing.
  pub fn child_octants(&self, point: DVec3) -> SmallVec<[u8; 8]> {
    let mut out = SmallVec::new();
    if !self.contains_point(point) {
      return out;
    }

    let rel = self.relative_position(point);
    let xs = halves(rel.x);
    let ys = halves(rel.y);
    let zs = halves(rel.z);

    for &x in xs.iter() {
      for &y in ys.iter() {
        for &z in zs.iter() {
          out.push(x | (y << 1) | (z << 2));
        }
      }
    }
    out
  }
}

/// Which halves (0 = lower, 1 = upper) a normalized coordinate belongs to.
fn halves(value: f64) -> SmallVec<[u8; 2]> {
  let half_error = MIDPLANE_TOLERANCE / 2.0;
  if value < 0.5 - half_error {
    smallvec::smallvec![0]
  } else if value <= 0.5 + half_error {
    smallvec::smallvec![0, 1]
  } else {
    smallvec::smallvec![1]
  }
}

#[cfg(test)]
#[path = "bounds_test.rs"]
mod bounds_test;
