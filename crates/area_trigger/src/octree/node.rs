//! Arena entries of the octree.

use crate::bounds::Aabb3;
use crate::volume::VolumeHandle;

/// Index of a node inside its tree's arena.
///
/// Only meaningful for the tree that produced it, and only until the next
/// resize, clear, or merge that frees the slot.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
  #[inline]
  pub(crate) fn index(self) -> usize {
    self.0 as usize
  }
}

/// One octree node: a bound, the volumes stored at this level, and either no
/// children or exactly eight.
#[derive(Clone, Debug)]
pub struct Node {
  pub bounds: Aabb3,
  /// Distance from the root (root = 0).
  pub depth: u32,
  /// Volumes that fit this node but no single child.
  pub objects: Vec<VolumeHandle>,
  /// Children indexed by octant, present only when split.
  pub children: Option<[NodeId; 8]>,
}

impl Node {
  pub fn new(bounds: Aabb3, depth: u32) -> Self {
    Self {
      bounds,
      depth,
      objects: Vec::new(),
      children: None,
    }
  }

  #[inline]
  pub fn is_leaf(&self) -> bool {
    self.children.is_none()
  }

  /// Whether `v` is stored locally (by identity).
  pub fn holds(&self, v: &VolumeHandle) -> bool {
    self.objects.iter().any(|o| o.ptr_eq(v))
  }

  /// Drop `v` from local storage; false if it was not here.
  pub fn take(&mut self, v: &VolumeHandle) -> bool {
    match self.objects.iter().position(|o| o.ptr_eq(v)) {
      Some(i) => {
        self.objects.swap_remove(i);
        true
      }
      None => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use glam::DVec3;

  use super::*;
  use crate::volume::BoxVolume;

  #[test]
  fn new_node_is_an_empty_leaf() {
    let node = Node::new(Aabb3::new(DVec3::ZERO, DVec3::ONE), 2);
    assert!(node.is_leaf());
    assert!(node.objects.is_empty());
    assert_eq!(node.depth, 2);
  }

  #[test]
  fn take_uses_identity() {
    let a: VolumeHandle = BoxVolume::new(DVec3::ZERO, DVec3::ONE).into();
    let twin: VolumeHandle = BoxVolume::new(DVec3::ZERO, DVec3::ONE).into();
    let mut node = Node::new(Aabb3::new(DVec3::ZERO, DVec3::ONE), 0);
    node.objects.push(a.clone());

    assert!(node.holds(&a));
    assert!(!node.holds(&twin));
    assert!(!node.take(&twin));
    assert!(node.take(&a));
    assert!(node.objects.is_empty());
  }
}
