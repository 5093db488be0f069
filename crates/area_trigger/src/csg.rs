//! Combination helpers that keep CSG expressions flat.
//!
//! Combining two volumes with an operator splices in the children of any
//! operand that already is that operator instead of nesting a new wrapper, so
//! `union(union(a, b), c)` yields one union of `[a, b, c]`. Membership is
//! identity-deduplicated, exactly as with [`Union::add`].
//!
//! [`difference`] has extra rules:
//!
//! - a `Difference` on the left contributes its positive and its negatives;
//! - a `Union` on the right contributes its children as negatives;
//! - a `Difference` on the right has its positive unioned with the left
//!   positive, and its negatives appended.
//!
//! The last rule means subtracting a difference is *not* the same as
//! subtracting its positive. It is kept for compatibility with existing area
//! definitions.

use crate::error::VolumeError;
use crate::volume::{Difference, Intersection, SymmetricDifference, Union, Volume, VolumeHandle};

/// Children of `v` if it is the operator selected by `unwrap`, else `v` itself.
fn splice<'a, T: 'a>(
  v: &'a VolumeHandle,
  unwrap: impl Fn(&'a Volume) -> Option<&'a T>,
  children: impl Fn(&'a T) -> &'a [VolumeHandle],
) -> Vec<VolumeHandle> {
  match unwrap(v.volume()) {
    Some(group) => children(group).to_vec(),
    None => vec![v.clone()],
  }
}

/// Flat union of `a` and `b`.
pub fn union(a: &VolumeHandle, b: &VolumeHandle, expensive: bool) -> Union {
  let mut content = splice(a, Volume::as_union, Union::contents);
  content.extend(splice(b, Volume::as_union, Union::contents));
  Union::from_content(content, expensive)
}

/// Flat intersection of `a` and `b`.
pub fn intersection(a: &VolumeHandle, b: &VolumeHandle, expensive: bool) -> Intersection {
  let mut content = splice(a, Volume::as_intersection, Intersection::contents);
  content.extend(splice(b, Volume::as_intersection, Intersection::contents));
  Intersection::from_content(content, expensive)
}

/// Flat symmetric difference of `a` and `b`.
pub fn symmetric_difference(
  a: &VolumeHandle,
  b: &VolumeHandle,
  expensive: bool,
) -> SymmetricDifference {
  let mut content = splice(
    a,
    Volume::as_symmetric_difference,
    SymmetricDifference::contents,
  );
  content.extend(splice(
    b,
    Volume::as_symmetric_difference,
    SymmetricDifference::contents,
  ));
  SymmetricDifference::from_content(content, expensive)
}

/// `a` minus `b`, see the module docs for the reduction rules.
pub fn difference(a: &VolumeHandle, b: &VolumeHandle, expensive: bool) -> Difference {
  let (mut positive, mut negatives) = match a.as_difference() {
    Some(d) => (d.positive().cloned(), d.negatives().to_vec()),
    None => (Some(a.clone()), Vec::new()),
  };

  match b.volume() {
    Volume::Union(u) => negatives.extend_from_slice(u.contents()),
    Volume::Difference(d) => {
      positive = match (positive, d.positive()) {
        (Some(lhs), Some(rhs)) => Some(VolumeHandle::new(union(&lhs, rhs, expensive))),
        (lhs, rhs) => lhs.or_else(|| rhs.cloned()),
      };
      negatives.extend_from_slice(d.negatives());
    }
    _ => negatives.push(b.clone()),
  }

  Difference::from_parts(positive, negatives, expensive)
}

/// Left fold of `op` over `others`; fails when `others` is empty.
fn fold_all<T>(
  first: &VolumeHandle,
  others: &[VolumeHandle],
  expensive: bool,
  op: impl Fn(&VolumeHandle, &VolumeHandle, bool) -> T,
) -> Result<T, VolumeError>
where
  T: Into<VolumeHandle>,
{
  let (head, tail) = others.split_first().ok_or(VolumeError::EmptyOperands)?;
  let mut result = op(first, head, expensive);
  for other in tail {
    let acc: VolumeHandle = result.into();
    result = op(&acc, other, expensive);
  }
  Ok(result)
}

/// Flat union of `first` and every volume in `others`.
pub fn union_all(
  first: &VolumeHandle,
  others: &[VolumeHandle],
  expensive: bool,
) -> Result<Union, VolumeError> {
  fold_all(first, others, expensive, union)
}

pub fn intersection_all(
  first: &VolumeHandle,
  others: &[VolumeHandle],
  expensive: bool,
) -> Result<Intersection, VolumeError> {
  fold_all(first, others, expensive, intersection)
}

pub fn symmetric_difference_all(
  first: &VolumeHandle,
  others: &[VolumeHandle],
  expensive: bool,
) -> Result<SymmetricDifference, VolumeError> {
  fold_all(first, others, expensive, symmetric_difference)
}

/// `first` minus each of `others` in turn.
pub fn difference_all(
  first: &VolumeHandle,
  others: &[VolumeHandle],
  expensive: bool,
) -> Result<Difference, VolumeError> {
  fold_all(first, others, expensive, difference)
}

#[cfg(test)]
#[path = "csg_test.rs"]
mod csg_test;
