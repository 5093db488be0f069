//! Bounding volumes: primitive shapes and CSG combinators.
//!
//! Every volume answers three questions: its conservative axis-aligned
//! [`bounds`](BoundingVolume::bounds), whether its exact test
//! [`is_expensive`](BoundingVolume::is_expensive), and whether it
//! [`contains`](BoundingVolume::contains) a point. Callers should go through
//! [`contains_efficient`](BoundingVolume::contains_efficient), which rejects
//! via the bound first when the exact test is costly.
//!
//! # Module Structure
//!
//! - [`shapes`]: `BoxVolume`, `SphereVolume`
//! - [`prism`]: `Polygon`, `Prism` (extruded polygon along one axis)
//! - [`group`]: `Union`, `Intersection`, `SymmetricDifference`, `Difference`
//!
//! Combinators hold [`VolumeHandle`]s. Handles compare by identity, never by
//! value: adding the same handle twice is a no-op, while two structurally
//! equal shapes built separately are distinct members.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use glam::DVec3;

use crate::bounds::Aabb3;

pub mod group;
pub mod prism;
pub mod shapes;

pub use group::{Difference, Intersection, SymmetricDifference, Union};
pub use prism::{Polygon, Prism};
pub use shapes::{BoxVolume, SphereVolume};

/// Point-containment capability shared by every shape and combinator.
pub trait BoundingVolume {
  /// Conservative axis-aligned bound. Never smaller than the shape, but not
  /// necessarily minimal.
  fn bounds(&self) -> Aabb3;

  /// Whether [`BoundingVolume::contains`] is costly enough that the bound
  /// should be checked first.
  fn is_expensive(&self) -> bool;

  /// Exact, boundary-inclusive containment test.
  fn contains(&self, point: DVec3) -> bool;

  /// Two-phase containment: bound rejection for expensive volumes, then the
  /// exact test.
  #[inline]
  fn contains_efficient(&self, point: DVec3) -> bool {
    if self.is_expensive() && !self.bounds().contains_point(point) {
      return false;
    }
    self.contains(point)
  }
}

/// Closed set of volume kinds.
#[derive(Clone, Debug)]
pub enum Volume {
  Box(BoxVolume),
  Sphere(SphereVolume),
  Prism(Prism),
  Union(Union),
  Intersection(Intersection),
  Difference(Difference),
  SymmetricDifference(SymmetricDifference),
}

impl Volume {
  /// Registry tag of this kind, as used by the tagged JSON records.
  pub fn kind_name(&self) -> &'static str {
    match self {
      Volume::Box(_) => "box",
      Volume::Sphere(_) => "sphere",
      Volume::Prism(_) => "prism",
      Volume::Union(_) => "union",
      Volume::Intersection(_) => "intersection",
      Volume::Difference(_) => "difference",
      Volume::SymmetricDifference(_) => "symmetricDifference",
    }
  }

  pub fn as_union(&self) -> Option<&Union> {
    match self {
      Volume::Union(u) => Some(u),
      _ => None,
    }
  }

  pub fn as_intersection(&self) -> Option<&Intersection> {
    match self {
      Volume::Intersection(i) => Some(i),
      _ => None,
    }
  }

  pub fn as_difference(&self) -> Option<&Difference> {
    match self {
      Volume::Difference(d) => Some(d),
      _ => None,
    }
  }

  pub fn as_symmetric_difference(&self) -> Option<&SymmetricDifference> {
    match self {
      Volume::SymmetricDifference(s) => Some(s),
      _ => None,
    }
  }
}

impl BoundingVolume for Volume {
  fn bounds(&self) -> Aabb3 {
    match self {
      Volume::Box(v) => v.bounds(),
      Volume::Sphere(v) => v.bounds(),
      Volume::Prism(v) => v.bounds(),
      Volume::Union(v) => v.bounds(),
      Volume::Intersection(v) => v.bounds(),
      Volume::Difference(v) => v.bounds(),
      Volume::SymmetricDifference(v) => v.bounds(),
    }
  }

  fn is_expensive(&self) -> bool {
    match self {
      Volume::Box(v) => v.is_expensive(),
      Volume::Sphere(v) => v.is_expensive(),
      Volume::Prism(v) => v.is_expensive(),
      Volume::Union(v) => v.is_expensive(),
      Volume::Intersection(v) => v.is_expensive(),
      Volume::Difference(v) => v.is_expensive(),
      Volume::SymmetricDifference(v) => v.is_expensive(),
    }
  }

  fn contains(&self, point: DVec3) -> bool {
    match self {
      Volume::Box(v) => v.contains(point),
      Volume::Sphere(v) => v.contains(point),
      Volume::Prism(v) => v.contains(point),
      Volume::Union(v) => v.contains(point),
      Volume::Intersection(v) => v.contains(point),
      Volume::Difference(v) => v.contains(point),
      Volume::SymmetricDifference(v) => v.contains(point),
    }
  }
}

macro_rules! impl_into_volume {
  ($($variant:ident => $ty:ty),* $(,)?) => {
    $(
      impl From<$ty> for Volume {
        fn from(v: $ty) -> Self {
          Volume::$variant(v)
        }
      }

      impl From<$ty> for VolumeHandle {
        fn from(v: $ty) -> Self {
          VolumeHandle::new(Volume::$variant(v))
        }
      }
    )*
  };
}

impl_into_volume! {
  Box => BoxVolume,
  Sphere => SphereVolume,
  Prism => Prism,
  Union => Union,
  Intersection => Intersection,
  Difference => Difference,
  SymmetricDifference => SymmetricDifference,
}

/// Shared, immutable reference to a [`Volume`] with identity semantics.
///
/// Equality and hashing use the allocation address, so clones of one handle
/// are equal while independently built handles never are.
#[derive(Clone)]
pub struct VolumeHandle(Arc<Volume>);

impl VolumeHandle {
  /// Wrap a volume in a fresh identity.
  pub fn new(volume: impl Into<Volume>) -> Self {
    Self(Arc::new(volume.into()))
  }

  /// Borrow the underlying volume.
  #[inline]
  pub fn volume(&self) -> &Volume {
    &self.0
  }

  /// Identity comparison.
  #[inline]
  pub fn ptr_eq(&self, other: &VolumeHandle) -> bool {
    Arc::ptr_eq(&self.0, &other.0)
  }

  /// Opaque identity value, stable for the lifetime of the handle.
  #[inline]
  pub fn id(&self) -> usize {
    Arc::as_ptr(&self.0) as usize
  }
}

impl From<Volume> for VolumeHandle {
  fn from(volume: Volume) -> Self {
    Self::new(volume)
  }
}

impl Deref for VolumeHandle {
  type Target = Volume;

  fn deref(&self) -> &Volume {
    &self.0
  }
}

impl PartialEq for VolumeHandle {
  fn eq(&self, other: &Self) -> bool {
    self.ptr_eq(other)
  }
}

impl Eq for VolumeHandle {}

impl Hash for VolumeHandle {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id().hash(state);
  }
}

impl fmt::Debug for VolumeHandle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("VolumeHandle")
      .field("id", &format_args!("{:#x}", self.id()))
      .field("kind", &self.kind_name())
      .finish()
  }
}

impl BoundingVolume for VolumeHandle {
  #[inline]
  fn bounds(&self) -> Aabb3 {
    self.0.bounds()
  }

  #[inline]
  fn is_expensive(&self) -> bool {
    self.0.is_expensive()
  }

  #[inline]
  fn contains(&self, point: DVec3) -> bool {
    self.0.contains(point)
  }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;
