//! Error types shared across the crate.

use thiserror::Error;

use crate::tracker::MapId;

/// Malformed geometry or combinator input, rejected at construction time.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum VolumeError {
  /// Prism `top` must be strictly greater than `bottom`.
  #[error("prism top ({top}) must be greater than bottom ({bottom})")]
  InvalidPrismHeight { top: f64, bottom: f64 },

  /// Prism base polygon needs at least three vertices.
  #[error("prism polygon must have at least 3 vertices, got {0}")]
  TooFewVertices(usize),

  /// Oriented shapes need a single principal axis.
  #[error("prism must be aligned with a specific axis, not Axis3::All")]
  UnalignedPrism,

  /// An n-ary combination helper was called with no other operands.
  #[error("combination needs at least one other volume")]
  EmptyOperands,

  /// The builder was used before anything was added to it.
  #[error("volume builder is empty; add a volume first")]
  EmptyBuilder,
}

/// Failures while encoding or decoding tagged volume records.
#[derive(Debug, Error)]
pub enum CodecError {
  /// The record is not an object or has no discriminator field.
  #[error("volume record has no \"{0}\" discriminator")]
  MissingType(&'static str),

  /// The discriminator names a shape outside the registry.
  #[error("unsupported volume type \"{0}\"")]
  UnsupportedType(String),

  /// Field-level JSON decoding failed.
  #[error(transparent)]
  Json(#[from] serde_json::Error),

  /// The decoded fields describe an invalid shape.
  #[error(transparent)]
  Volume(#[from] VolumeError),
}

/// Consistency violations inside a membership tracker.
///
/// Both variants indicate a defect: the index and the record map are kept in
/// lock-step by `add_area`/`remove_area`, so neither should occur in practice.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
  /// The index returned a volume that has no tracked-object record.
  #[error("volume returned by the index for map {0:?} has no tracked record")]
  Untracked(MapId),

  /// Insertion into the octree failed even after growing it to fit.
  #[error("octree for map {map:?} could not take volume after resize (tree {tree:?}, volume {volume:?})")]
  IndexInsertion {
    map: MapId,
    tree: crate::bounds::Aabb3,
    volume: crate::bounds::Aabb3,
  },
}
