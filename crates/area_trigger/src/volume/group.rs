//! CSG combinators. Each is itself a volume composed of child handles.
//!
//! Bounds are coarse. `Union` and `SymmetricDifference` report
//! the merged bound of all children; `Intersection` reports its first
//! child's bound and `Difference` its positive's bound. Empty groups report
//! [`Aabb3::ZERO`]. All of these are over-approximations used only to prune
//! expensive exact tests.
//!
//! Every mutation recomputes the bound. `add` ignores handles that are
//! already members (by identity).

use glam::DVec3;

use super::{BoundingVolume, VolumeHandle};
use crate::bounds::Aabb3;

/// Ordered, identity-deduplicated child list shared by the n-ary groups.
#[derive(Clone, Debug, Default)]
struct Content {
  items: Vec<VolumeHandle>,
}

impl Content {
  fn contains(&self, v: &VolumeHandle) -> bool {
    self.items.iter().any(|c| c.ptr_eq(v))
  }

  /// Returns false when `v` was already present.
  fn add(&mut self, v: VolumeHandle) -> bool {
    if self.contains(&v) {
      return false;
    }
    self.items.push(v);
    true
  }

  fn remove(&mut self, v: &VolumeHandle) -> bool {
    match self.items.iter().position(|c| c.ptr_eq(v)) {
      Some(i) => {
        self.items.remove(i);
        true
      }
      None => false,
    }
  }

  fn merged_bounds(&self) -> Aabb3 {
    let mut iter = self.items.iter();
    match iter.next() {
      Some(first) => iter.fold(first.bounds(), |acc, v| acc.merge(&v.bounds())),
      None => Aabb3::ZERO,
    }
  }

  fn first_bounds(&self) -> Aabb3 {
    self.items.first().map_or(Aabb3::ZERO, |v| v.bounds())
  }
}

// =============================================================================
// Union
// =============================================================================

/// Contains a point if any child does.
#[derive(Clone, Debug)]
pub struct Union {
  content: Content,
  expensive: bool,
  bounds: Aabb3,
}

impl Default for Union {
  fn default() -> Self {
    Self::new(true)
  }
}

impl Union {
  /// Empty union.
  pub fn new(expensive: bool) -> Self {
    Self {
      content: Content::default(),
      expensive,
      bounds: Aabb3::ZERO,
    }
  }

  /// Union of `content`, in order, duplicates dropped.
  pub fn from_content(content: impl IntoIterator<Item = VolumeHandle>, expensive: bool) -> Self {
    let mut union = Self::new(expensive);
    union.add_range(content);
    union
  }

  pub fn contents(&self) -> &[VolumeHandle] {
    &self.content.items
  }

  pub fn len(&self) -> usize {
    self.content.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.content.items.is_empty()
  }

  pub fn add(&mut self, v: VolumeHandle) {
    self.content.add(v);
    self.recalculate_bounds();
  }

  pub fn add_range(&mut self, vs: impl IntoIterator<Item = VolumeHandle>) {
    for v in vs {
      self.content.add(v);
    }
    self.recalculate_bounds();
  }

  pub fn remove(&mut self, v: &VolumeHandle) -> bool {
    let removed = self.content.remove(v);
    self.recalculate_bounds();
    removed
  }

  pub fn clear(&mut self) {
    self.content.items.clear();
    self.recalculate_bounds();
  }

  fn recalculate_bounds(&mut self) {
    self.bounds = self.content.merged_bounds();
  }
}

impl BoundingVolume for Union {
  fn bounds(&self) -> Aabb3 {
    self.bounds
  }

  fn is_expensive(&self) -> bool {
    self.expensive
  }

  fn contains(&self, point: DVec3) -> bool {
    self.content.items.iter().any(|v| v.contains_efficient(point))
  }
}

// =============================================================================
// Intersection
// =============================================================================

/// Contains a point if every child does. An empty intersection contains
/// nothing.
#[derive(Clone, Debug)]
pub struct Intersection {
  content: Content,
  expensive: bool,
  bounds: Aabb3,
}

impl Default for Intersection {
  fn default() -> Self {
    Self::new(true)
  }
}

impl Intersection {
  pub fn new(expensive: bool) -> Self {
    Self {
      content: Content::default(),
      expensive,
      bounds: Aabb3::ZERO,
    }
  }

  pub fn from_content(content: impl IntoIterator<Item = VolumeHandle>, expensive: bool) -> Self {
    let mut intersection = Self::new(expensive);
    intersection.add_range(content);
    intersection
  }

  pub fn contents(&self) -> &[VolumeHandle] {
    &self.content.items
  }

  pub fn len(&self) -> usize {
    self.content.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.content.items.is_empty()
  }

  pub fn add(&mut self, v: VolumeHandle) {
    self.content.add(v);
    self.recalculate_bounds();
  }

  pub fn add_range(&mut self, vs: impl IntoIterator<Item = VolumeHandle>) {
    for v in vs {
      self.content.add(v);
    }
    self.recalculate_bounds();
  }

  pub fn remove(&mut self, v: &VolumeHandle) -> bool {
    let removed = self.content.remove(v);
    self.recalculate_bounds();
    removed
  }

  pub fn clear(&mut self) {
    self.content.items.clear();
    self.recalculate_bounds();
  }

  fn recalculate_bounds(&mut self) {
    self.bounds = self.content.first_bounds();
  }
}

impl BoundingVolume for Intersection {
  fn bounds(&self) -> Aabb3 {
    self.bounds
  }

  fn is_expensive(&self) -> bool {
    self.expensive
  }

  fn contains(&self, point: DVec3) -> bool {
    !self.content.items.is_empty() && self.content.items.iter().all(|v| v.contains_efficient(point))
  }
}

// =============================================================================
// SymmetricDifference
// =============================================================================

/// n-ary symmetric difference: contains a point that lies in an odd number of
/// children.
#[derive(Clone, Debug)]
pub struct SymmetricDifference {
  content: Content,
  expensive: bool,
  bounds: Aabb3,
}

impl Default for SymmetricDifference {
  fn default() -> Self {
    Self::new(true)
  }
}

impl SymmetricDifference {
  pub fn new(expensive: bool) -> Self {
    Self {
      content: Content::default(),
      expensive,
      bounds: Aabb3::ZERO,
    }
  }

  pub fn from_content(content: impl IntoIterator<Item = VolumeHandle>, expensive: bool) -> Self {
    let mut sym = Self::new(expensive);
    sym.add_range(content);
    sym
  }

  pub fn contents(&self) -> &[VolumeHandle] {
    &self.content.items
  }

  pub fn len(&self) -> usize {
    self.content.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.content.items.is_empty()
  }

  pub fn add(&mut self, v: VolumeHandle) {
    self.content.add(v);
    self.recalculate_bounds();
  }

  pub fn add_range(&mut self, vs: impl IntoIterator<Item = VolumeHandle>) {
    for v in vs {
      self.content.add(v);
    }
    self.recalculate_bounds();
  }

  pub fn remove(&mut self, v: &VolumeHandle) -> bool {
    let removed = self.content.remove(v);
    self.recalculate_bounds();
    removed
  }

  pub fn clear(&mut self) {
    self.content.items.clear();
    self.recalculate_bounds();
  }

  fn recalculate_bounds(&mut self) {
    self.bounds = self.content.merged_bounds();
  }
}

impl BoundingVolume for SymmetricDifference {
  fn bounds(&self) -> Aabb3 {
    self.bounds
  }

  fn is_expensive(&self) -> bool {
    self.expensive
  }

  fn contains(&self, point: DVec3) -> bool {
    let count = self
      .content
      .items
      .iter()
      .filter(|v| v.contains_efficient(point))
      .count();
    count % 2 == 1
  }
}

// =============================================================================
// Difference
// =============================================================================

/// Positive volume minus a set of negative volumes.
///
/// Without a positive the difference contains nothing.
#[derive(Clone, Debug)]
pub struct Difference {
  positive: Option<VolumeHandle>,
  negatives: Content,
  expensive: bool,
  bounds: Aabb3,
}

impl Default for Difference {
  fn default() -> Self {
    Self::new(true)
  }
}

impl Difference {
  pub fn new(expensive: bool) -> Self {
    Self {
      positive: None,
      negatives: Content::default(),
      expensive,
      bounds: Aabb3::ZERO,
    }
  }

  /// First element becomes the positive, the rest negatives.
  pub fn from_content(content: impl IntoIterator<Item = VolumeHandle>, expensive: bool) -> Self {
    let mut difference = Self::new(expensive);
    difference.add_range(content);
    difference
  }

  pub fn from_parts(
    positive: Option<VolumeHandle>,
    negatives: impl IntoIterator<Item = VolumeHandle>,
    expensive: bool,
  ) -> Self {
    let mut difference = Self::new(expensive);
    difference.positive = positive;
    difference.add_negative_range(negatives);
    difference
  }

  pub fn positive(&self) -> Option<&VolumeHandle> {
    self.positive.as_ref()
  }

  pub fn negatives(&self) -> &[VolumeHandle] {
    &self.negatives.items
  }

  /// Positive first (if set), then negatives.
  pub fn contents(&self) -> Vec<VolumeHandle> {
    self
      .positive
      .iter()
      .chain(self.negatives.items.iter())
      .cloned()
      .collect()
  }

  pub fn len(&self) -> usize {
    self.negatives.items.len() + usize::from(self.positive.is_some())
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn is_member(&self, v: &VolumeHandle) -> bool {
    self.positive.as_ref().is_some_and(|p| p.ptr_eq(v)) || self.negatives.contains(v)
  }

  fn add_without_recalculating(&mut self, v: VolumeHandle) {
    if self.is_member(&v) {
      return;
    }
    if self.positive.is_none() {
      self.positive = Some(v);
    } else {
      self.negatives.add(v);
    }
  }

  fn add_negative_without_recalculating(&mut self, v: VolumeHandle) {
    if self.is_member(&v) {
      return;
    }
    self.negatives.add(v);
  }

  /// Sets the positive if unset, otherwise adds a negative.
  pub fn add(&mut self, v: VolumeHandle) {
    self.add_without_recalculating(v);
    self.recalculate_bounds();
  }

  pub fn add_range(&mut self, vs: impl IntoIterator<Item = VolumeHandle>) {
    for v in vs {
      self.add_without_recalculating(v);
    }
    self.recalculate_bounds();
  }

  pub fn add_negative(&mut self, v: VolumeHandle) {
    self.add_negative_without_recalculating(v);
    self.recalculate_bounds();
  }

  pub fn add_negative_range(&mut self, vs: impl IntoIterator<Item = VolumeHandle>) {
    for v in vs {
      self.add_negative_without_recalculating(v);
    }
    self.recalculate_bounds();
  }

  /// Removing the positive leaves the negatives in place.
  pub fn remove(&mut self, v: &VolumeHandle) -> bool {
    let removed = if self.positive.as_ref().is_some_and(|p| p.ptr_eq(v)) {
      self.positive = None;
      true
    } else {
      self.negatives.remove(v)
    };
    self.recalculate_bounds();
    removed
  }

  pub fn clear(&mut self) {
    self.positive = None;
    self.negatives.items.clear();
    self.recalculate_bounds();
  }

  fn recalculate_bounds(&mut self) {
    self.bounds = self.positive.as_ref().map_or(Aabb3::ZERO, |p| p.bounds());
  }
}

impl BoundingVolume for Difference {
  fn bounds(&self) -> Aabb3 {
    self.bounds
  }

  fn is_expensive(&self) -> bool {
    self.expensive
  }

  fn contains(&self, point: DVec3) -> bool {
    let Some(positive) = &self.positive else {
      return false;
    };
    positive.contains_efficient(point)
      && !self.negatives.items.iter().any(|v| v.contains_efficient(point))
  }
}

#[cfg(test)]
#[path = "group_test.rs"]
mod group_test;
