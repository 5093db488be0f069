//! Prism: a 2D polygon extruded between two heights along a principal axis.
//!
//! The alignment axis selects which world coordinate is "up". The remaining
//! two are mapped to a planar (right, front) pair, see [`Axis3::project`]:
//!
//! ```text
//! alignment   up   right   front
//!     X        x    -z       y
//!     Y        y     x      -z
//!     Z        z     x       y
//! ```

use std::fmt;

use glam::{DVec2, DVec3};

use super::BoundingVolume;
use crate::axis::Axis3;
use crate::bounds::Aabb3;
use crate::error::VolumeError;

/// Distance below which a point counts as lying on a polygon edge.
const EDGE_EPSILON: f64 = 1e-9;

/// Simple 2D polygon given by its vertices in order (either winding).
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
  vertices: Vec<DVec2>,
  min: DVec2,
  max: DVec2,
}

impl Polygon {
  /// Create a polygon; needs at least three vertices.
  pub fn new(vertices: impl IntoIterator<Item = DVec2>) -> Result<Self, VolumeError> {
    let vertices: Vec<DVec2> = vertices.into_iter().collect();
    if vertices.len() < 3 {
      return Err(VolumeError::TooFewVertices(vertices.len()));
    }

    let (min, max) = vertices[1..]
      .iter()
      .fold((vertices[0], vertices[0]), |(lo, hi), v| (lo.min(*v), hi.max(*v)));

    Ok(Self { vertices, min, max })
  }

  #[inline]
  pub fn vertices(&self) -> &[DVec2] {
    &self.vertices
  }

  /// Lower-left corner of the polygon's extent.
  #[inline]
  pub fn min(&self) -> DVec2 {
    self.min
  }

  /// Upper-right corner of the polygon's extent.
  #[inline]
  pub fn max(&self) -> DVec2 {
    self.max
  }

  /// Boundary-inclusive point-in-polygon test.
  ///
  /// Points on an edge or vertex are inside; interior points use the
  /// crossing-number rule.
  pub fn contains(&self, p: DVec2) -> bool {
    if p.x < self.min.x || p.x > self.max.x || p.y < self.min.y || p.y > self.max.y {
      return false;
    }

    let n = self.vertices.len();
    let mut inside = false;
    for i in 0..n {
      let a = self.vertices[i];
      let b = self.vertices[(i + 1) % n];

      if on_segment(a, b, p) {
        return true;
      }

      if (a.y > p.y) != (b.y > p.y) {
        let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
        if p.x < x_cross {
          inside = !inside;
        }
      }
    }
    inside
  }
}

fn on_segment(a: DVec2, b: DVec2, p: DVec2) -> bool {
  let ab = b - a;
  let len = ab.length();
  if len <= EDGE_EPSILON {
    return a.distance(p) <= EDGE_EPSILON;
  }
  if ab.perp_dot(p - a).abs() > EDGE_EPSILON * len {
    return false;
  }
  let t = ab.dot(p - a);
  t >= -EDGE_EPSILON && t <= len * len + EDGE_EPSILON
}

/// Polygon extruded along `alignment` between `bottom` and `top`.
#[derive(Clone, Debug)]
pub struct Prism {
  top: f64,
  bottom: f64,
  polygon: Polygon,
  alignment: Axis3,
  expensive: bool,
  bounds: Aabb3,
}

impl Prism {
  /// Create a prism. Fails when `top <= bottom`, the polygon has fewer than
  /// three vertices, or `alignment` is [`Axis3::All`].
  ///
  /// Prisms are marked expensive; see [`Prism::with_expensive`].
  pub fn new(
    top: f64,
    bottom: f64,
    polygon: impl IntoIterator<Item = DVec2>,
    alignment: Axis3,
  ) -> Result<Self, VolumeError> {
    Self::from_polygon(top, bottom, Polygon::new(polygon)?, alignment)
  }

  /// Create a prism from an already validated polygon.
  pub fn from_polygon(
    top: f64,
    bottom: f64,
    polygon: Polygon,
    alignment: Axis3,
  ) -> Result<Self, VolumeError> {
    // Negated form also rejects NaN heights.
    if !(top > bottom) {
      return Err(VolumeError::InvalidPrismHeight { top, bottom });
    }
    if !alignment.is_principal() {
      return Err(VolumeError::UnalignedPrism);
    }

    let bounds = prism_bounds(&polygon, top, bottom, alignment);
    Ok(Self {
      top,
      bottom,
      polygon,
      alignment,
      expensive: true,
      bounds,
    })
  }

  /// Override the expensive flag.
  pub fn with_expensive(mut self, expensive: bool) -> Self {
    self.expensive = expensive;
    self
  }

  #[inline]
  pub fn top(&self) -> f64 {
    self.top
  }

  #[inline]
  pub fn bottom(&self) -> f64 {
    self.bottom
  }

  #[inline]
  pub fn polygon(&self) -> &Polygon {
    &self.polygon
  }

  #[inline]
  pub fn alignment(&self) -> Axis3 {
    self.alignment
  }
}

/// World-space bound: the planar extent mapped back through the alignment.
fn prism_bounds(polygon: &Polygon, top: f64, bottom: f64, alignment: Axis3) -> Aabb3 {
  let a = alignment.unproject(polygon.min(), bottom);
  let b = alignment.unproject(polygon.max(), top);
  match (a, b) {
    (Some(a), Some(b)) => Aabb3::new(a, b),
    _ => Aabb3::ZERO,
  }
}

impl BoundingVolume for Prism {
  #[inline]
  fn bounds(&self) -> Aabb3 {
    self.bounds
  }

  #[inline]
  fn is_expensive(&self) -> bool {
    self.expensive
  }

  fn contains(&self, point: DVec3) -> bool {
    let (Some(up), Some(planar)) = (self.alignment.up(point), self.alignment.project(point)) else {
      return false;
    };
    if up < self.bottom || up > self.top {
      return false;
    }
    self.polygon.contains(planar)
  }
}

impl fmt::Display for Prism {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "Prism {{ top: {}, bottom: {}, alignment: {:?}, polygon: [",
      self.top, self.bottom, self.alignment
    )?;
    for (i, v) in self.polygon.vertices().iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", v)?;
    }
    write!(f, "] }}")
  }
}

#[cfg(test)]
#[path = "prism_test.rs"]
mod prism_test;
