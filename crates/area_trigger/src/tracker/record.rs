//! AreaState - the tracked-object record of one registered area.

use std::fmt;

use super::{AreaCallback, PositionSample};

/// Edge-triggered contained flag plus the callback to fire on flips.
pub struct AreaState {
  callback: AreaCallback,
  contained: bool,
  last_sample: Option<PositionSample>,
}

impl AreaState {
  /// Fresh record: not contained, no sample seen yet.
  pub fn new(callback: AreaCallback) -> Self {
    Self {
      callback,
      contained: false,
      last_sample: None,
    }
  }

  #[inline]
  pub fn is_contained(&self) -> bool {
    self.contained
  }

  /// Sample stored by the most recent [`AreaState::set_state`].
  #[inline]
  pub fn last_sample(&self) -> Option<&PositionSample> {
    self.last_sample.as_ref()
  }

  pub fn replace_callback(&mut self, callback: AreaCallback) {
    self.callback = callback;
  }

  /// Store `sample` and the new state; invoke the callback only when the
  /// state actually changes. Returns whether it did.
  pub fn set_state(&mut self, contained: bool, sample: PositionSample) -> bool {
    self.last_sample = Some(sample);
    if self.contained == contained {
      return false;
    }
    self.contained = contained;
    (self.callback)(&sample, contained);
    true
  }
}

impl fmt::Debug for AreaState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AreaState")
      .field("contained", &self.contained)
      .field("last_sample", &self.last_sample)
      .finish_non_exhaustive()
  }
}
