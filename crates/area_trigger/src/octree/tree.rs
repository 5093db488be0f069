//! Octree - arena-backed tree wrapper with insert, remove, query, resize.

use glam::DVec3;
use smallvec::SmallVec;
use tracing::debug;

use super::{Node, NodeId, OctreeConfig};
use crate::bounds::Aabb3;
use crate::volume::{BoundingVolume, VolumeHandle};

/// Spatial index of volumes by their bounds.
#[derive(Clone, Debug)]
pub struct Octree {
  config: OctreeConfig,
  nodes: Vec<Node>,
  free: Vec<NodeId>,
  root: NodeId,
  len: usize,
}

impl Octree {
  /// Empty tree covering `bounds`.
  pub fn new(config: OctreeConfig, bounds: Aabb3) -> Self {
    Self {
      config,
      nodes: vec![Node::new(bounds, 0)],
      free: Vec::new(),
      root: NodeId(0),
      len: 0,
    }
  }

  #[inline]
  pub fn config(&self) -> &OctreeConfig {
    &self.config
  }

  /// Bound of the root node.
  #[inline]
  pub fn bounds(&self) -> Aabb3 {
    self.node(self.root).bounds
  }

  /// Number of stored volumes.
  #[inline]
  pub fn len(&self) -> usize {
    self.len
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// Number of live nodes, the root included.
  pub fn node_count(&self) -> usize {
    self.nodes.len() - self.free.len()
  }

  /// Depth of the deepest live node (0 for a lone root).
  pub fn depth(&self) -> u32 {
    self.walk().map(|id| self.node(id).depth).max().unwrap_or(0)
  }

  pub fn root(&self) -> NodeId {
    self.root
  }

  pub fn root_is_split(&self) -> bool {
    !self.node(self.root).is_leaf()
  }

  /// Node lookup for inspection.
  #[inline]
  pub fn node(&self, id: NodeId) -> &Node {
    &self.nodes[id.index()]
  }

  #[inline]
  fn node_mut(&mut self, id: NodeId) -> &mut Node {
    &mut self.nodes[id.index()]
  }

  fn alloc(&mut self, node: Node) -> NodeId {
    match self.free.pop() {
      Some(id) => {
        self.nodes[id.index()] = node;
        id
      }
      None => {
        self.nodes.push(node);
        NodeId((self.nodes.len() - 1) as u32)
      }
    }
  }

  fn release(&mut self, id: NodeId) {
    let node = self.node_mut(id);
    node.objects.clear();
    node.children = None;
    self.free.push(id);
  }

  /// Every live node id, depth first from the root.
  fn walk(&self) -> impl Iterator<Item = NodeId> + '_ {
    let mut stack = vec![self.root];
    std::iter::from_fn(move || {
      let id = stack.pop()?;
      if let Some(children) = self.node(id).children {
        stack.extend(children.iter().rev());
      }
      Some(id)
    })
  }

  // ===========================================================================
  // Insert
  // ===========================================================================

  /// Store `v` in the deepest node that fully contains its bound.
  ///
  /// Returns false when the tree's bound does not contain `v`'s bound, or
  /// when `v` is already stored.
  pub fn insert(&mut self, v: VolumeHandle) -> bool {
    let bounds = v.bounds();
    if !self.bounds().contains_aabb(&bounds) {
      return false;
    }
    let inserted = self.place(self.root, v, &bounds);
    if inserted {
      self.len += 1;
    }
    inserted
  }

  /// Descend from `start` to the deepest fitting node and store `v` there,
  /// splitting that node if it overflows.
  fn place(&mut self, start: NodeId, v: VolumeHandle, bounds: &Aabb3) -> bool {
    let mut id = start;
    while let Some(children) = self.node(id).children {
      match children
        .iter()
        .find(|&&child| self.node(child).bounds.contains_aabb(bounds))
      {
        Some(&child) => id = child,
        None => break,
      }
    }

    let node = self.node_mut(id);
    if node.holds(&v) {
      return false;
    }
    node.objects.push(v);

    let node = self.node(id);
    if node.is_leaf() && self.config.should_split(node.objects.len(), node.depth) {
      self.split(id);
    }
    true
  }

  /// Create eight children and push down every local volume that fits one.
  fn split(&mut self, id: NodeId) {
    let bounds = self.node(id).bounds;
    let depth = self.node(id).depth + 1;
    let children: [NodeId; 8] =
      std::array::from_fn(|octant| self.alloc(Node::new(bounds.octant_bounds(octant as u8), depth)));

    let objects = std::mem::take(&mut self.node_mut(id).objects);
    self.node_mut(id).children = Some(children);

    let total = objects.len();
    for v in objects {
      let b = v.bounds();
      match children
        .iter()
        .find(|&&child| self.node(child).bounds.contains_aabb(&b))
      {
        Some(&child) => {
          self.place(child, v, &b);
        }
        None => self.node_mut(id).objects.push(v),
      }
    }

    debug!(
      depth = depth - 1,
      objects = total,
      kept = self.node(id).objects.len(),
      "split octree node"
    );
  }

  // ===========================================================================
  // Remove
  // ===========================================================================

  /// Remove `v` (by identity). Collapses subtrees that fall back under the
  /// split threshold.
  pub fn remove(&mut self, v: &VolumeHandle) -> bool {
    let bounds = v.bounds();
    if !self.bounds().contains_aabb(&bounds) {
      return false;
    }
    let removed = self.remove_from(self.root, v, &bounds);
    if removed {
      self.len -= 1;
    }
    removed
  }

  fn remove_from(&mut self, id: NodeId, v: &VolumeHandle, bounds: &Aabb3) -> bool {
    let mut removed = false;
    if let Some(children) = self.node(id).children {
      for child in children {
        if self.node(child).bounds.contains_aabb(bounds) && self.remove_from(child, v, bounds) {
          removed = true;
          break;
        }
      }
    }
    if !removed {
      removed = self.node_mut(id).take(v);
    }
    if removed {
      self.try_merge(id);
    }
    removed
  }

  /// Total volumes in the subtree rooted at `id`.
  fn subtree_len(&self, id: NodeId) -> usize {
    let node = self.node(id);
    let local = node.objects.len();
    match node.children {
      Some(children) => local + children.iter().map(|&c| self.subtree_len(c)).sum::<usize>(),
      None => local,
    }
  }

  /// Collapse `id`'s children into it when none of them is split and the
  /// whole subtree fits in one node.
  fn try_merge(&mut self, id: NodeId) {
    let Some(children) = self.node(id).children else {
      return;
    };
    if children.iter().any(|&c| !self.node(c).is_leaf()) {
      return;
    }
    let total = self.subtree_len(id);
    if !self.config.can_merge(total) {
      return;
    }

    for child in children {
      let objects = std::mem::take(&mut self.node_mut(child).objects);
      self.node_mut(id).objects.extend(objects);
      self.release(child);
    }
    self.node_mut(id).children = None;

    debug!(depth = self.node(id).depth, objects = total, "merged octree node");
  }

  // ===========================================================================
  // Query
  // ===========================================================================

  /// Every stored volume that contains `point`, using the two-phase test.
  ///
  /// Points within the midplane tolerance of a node's center descend into all
  /// adjoining children.
  pub fn containing(&self, point: DVec3) -> Vec<VolumeHandle> {
    let mut out = Vec::new();
    let mut stack: SmallVec<[NodeId; 32]> = SmallVec::new();
    stack.push(self.root);

    while let Some(id) = stack.pop() {
      let node = self.node(id);
      if !node.bounds.contains_point(point) {
        continue;
      }
      out.extend(
        node
          .objects
          .iter()
          .filter(|v| v.contains_efficient(point))
          .cloned(),
      );
      if let Some(children) = node.children {
        for octant in node.bounds.child_octants(point) {
          stack.push(children[octant as usize]);
        }
      }
    }
    out
  }

  // ===========================================================================
  // Resize
  // ===========================================================================

  /// Every stored volume, depth first.
  pub fn flatten(&self) -> Vec<VolumeHandle> {
    let mut out = Vec::with_capacity(self.len);
    for id in self.walk() {
      out.extend(self.node(id).objects.iter().cloned());
    }
    out
  }

  /// Rebuild the tree over `bounds`, reinserting every volume.
  ///
  /// Returns the volumes that no longer fit and were dropped.
  #[tracing::instrument(skip_all, name = "octree::resize")]
  pub fn resize(&mut self, bounds: Aabb3) -> Vec<VolumeHandle> {
    let objects = self.flatten();
    self.reset(bounds);

    let mut evicted = Vec::new();
    for v in objects {
      if !self.insert(v.clone()) {
        evicted.push(v);
      }
    }

    debug!(
      min = ?bounds.min,
      max = ?bounds.max,
      objects = self.len,
      evicted = evicted.len(),
      nodes = self.node_count(),
      "resized octree"
    );
    evicted
  }

  /// Grow the tree so it also covers `bounds`; no-op if it already does.
  pub fn resize_to_include(&mut self, bounds: &Aabb3) {
    if self.bounds().contains_aabb(bounds) {
      return;
    }
    let merged = self.bounds().merge(bounds);
    self.resize(merged);
  }

  /// Drop every volume, keeping the current bound.
  pub fn clear(&mut self) {
    let bounds = self.bounds();
    self.reset(bounds);
  }

  fn reset(&mut self, bounds: Aabb3) {
    self.nodes.clear();
    self.free.clear();
    self.nodes.push(Node::new(bounds, 0));
    self.root = NodeId(0);
    self.len = 0;
  }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
