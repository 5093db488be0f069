//! OctreeConfig - split threshold and depth cap shared by every node.

/// Configuration shared by all nodes of one [`Octree`](super::Octree).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OctreeConfig {
  /// A leaf splits once it holds more than this many volumes.
  pub max_objects_per_node: usize,

  /// Nodes at this depth never split. The root is depth 0.
  ///
  /// Stops runaway subdivision when many volumes share a tiny bound.
  pub max_depth: u32,
}

impl OctreeConfig {
  pub const DEFAULT: Self = Self {
    max_objects_per_node: 8,
    max_depth: 24,
  };

  /// Whether a leaf at `depth` holding `count` volumes should split.
  #[inline]
  pub fn should_split(&self, count: usize, depth: u32) -> bool {
    count > self.max_objects_per_node && depth < self.max_depth
  }

  /// Whether a subtree holding `total` volumes may collapse into one node.
  #[inline]
  pub fn can_merge(&self, total: usize) -> bool {
    total <= self.max_objects_per_node
  }
}

impl Default for OctreeConfig {
  fn default() -> Self {
    Self::DEFAULT
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
