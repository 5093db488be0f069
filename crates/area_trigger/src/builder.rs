//! Fluent builder over the [`csg`](crate::csg) helpers.
//!
//! ```
//! use area_trigger::VolumeBuilder;
//! use glam::DVec3;
//!
//! let area = VolumeBuilder::new()
//!   .add_box(DVec3::ZERO, DVec3::splat(10.0))
//!   .subtract_sphere(DVec3::splat(5.0), 2.0)
//!   .and_then(VolumeBuilder::build)
//!   .unwrap();
//! assert_eq!(area.kind_name(), "difference");
//! ```

use glam::{DVec2, DVec3};

use crate::axis::Axis3;
use crate::csg;
use crate::error::VolumeError;
use crate::volume::{BoxVolume, Prism, SphereVolume, VolumeHandle};

/// Accumulates a volume expression: `add` unions, `subtract` differences,
/// `intersect` intersects.
///
/// Intermediate combinators are created with the builder's `expensive` flag
/// (default `true`).
#[derive(Clone, Debug)]
pub struct VolumeBuilder {
  current: Option<VolumeHandle>,
  expensive: bool,
}

impl Default for VolumeBuilder {
  fn default() -> Self {
    Self::new()
  }
}

impl VolumeBuilder {
  pub fn new() -> Self {
    Self {
      current: None,
      expensive: true,
    }
  }

  /// Flag passed to every combinator the builder creates.
  pub fn expensive(mut self, expensive: bool) -> Self {
    self.expensive = expensive;
    self
  }

  /// Sets the first volume, then unions each later one.
  pub fn add(mut self, volume: impl Into<VolumeHandle>) -> Self {
    let volume = volume.into();
    self.current = Some(match self.current.take() {
      Some(current) => csg::union(&current, &volume, self.expensive).into(),
      None => volume,
    });
    self
  }

  pub fn add_box(self, min: DVec3, max: DVec3) -> Self {
    self.add(BoxVolume::new(min, max))
  }

  pub fn add_sphere(self, center: DVec3, radius: f64) -> Self {
    self.add(SphereVolume::new(center, radius))
  }

  pub fn add_prism(
    self,
    top: f64,
    bottom: f64,
    polygon: impl IntoIterator<Item = DVec2>,
    alignment: Axis3,
  ) -> Result<Self, VolumeError> {
    let prism = Prism::new(top, bottom, polygon, alignment)?;
    Ok(self.add(prism))
  }

  /// Fails with [`VolumeError::EmptyBuilder`] before the first `add`.
  pub fn subtract(mut self, volume: impl Into<VolumeHandle>) -> Result<Self, VolumeError> {
    let current = self.current.take().ok_or(VolumeError::EmptyBuilder)?;
    self.current = Some(csg::difference(&current, &volume.into(), self.expensive).into());
    Ok(self)
  }

  pub fn subtract_box(self, min: DVec3, max: DVec3) -> Result<Self, VolumeError> {
    self.subtract(BoxVolume::new(min, max))
  }

  pub fn subtract_sphere(self, center: DVec3, radius: f64) -> Result<Self, VolumeError> {
    self.subtract(SphereVolume::new(center, radius))
  }

  pub fn subtract_prism(
    self,
    top: f64,
    bottom: f64,
    polygon: impl IntoIterator<Item = DVec2>,
    alignment: Axis3,
  ) -> Result<Self, VolumeError> {
    let prism = Prism::new(top, bottom, polygon, alignment)?;
    self.subtract(prism)
  }

  /// Fails with [`VolumeError::EmptyBuilder`] before the first `add`.
  pub fn intersect(mut self, volume: impl Into<VolumeHandle>) -> Result<Self, VolumeError> {
    let current = self.current.take().ok_or(VolumeError::EmptyBuilder)?;
    self.current = Some(csg::intersection(&current, &volume.into(), self.expensive).into());
    Ok(self)
  }

  pub fn intersect_box(self, min: DVec3, max: DVec3) -> Result<Self, VolumeError> {
    self.intersect(BoxVolume::new(min, max))
  }

  pub fn intersect_sphere(self, center: DVec3, radius: f64) -> Result<Self, VolumeError> {
    self.intersect(SphereVolume::new(center, radius))
  }

  pub fn intersect_prism(
    self,
    top: f64,
    bottom: f64,
    polygon: impl IntoIterator<Item = DVec2>,
    alignment: Axis3,
  ) -> Result<Self, VolumeError> {
    let prism = Prism::new(top, bottom, polygon, alignment)?;
    self.intersect(prism)
  }

  /// The accumulated volume.
  pub fn build(self) -> Result<VolumeHandle, VolumeError> {
    self.current.ok_or(VolumeError::EmptyBuilder)
  }
}
