//! Loose octree over volume bounds.
//!
//! Each volume lives in the deepest node whose bound fully contains the
//! volume's bound. A split node holds only the volumes that straddle its
//! children; everything else sits further down.
//!
//! Nodes are stored in an index arena owned by [`Octree`]; a split node
//! addresses its eight children by [`NodeId`]. Octant `i` uses the bit
//! convention of [`Aabb3::octant_bounds`](crate::bounds::Aabb3::octant_bounds):
//!
//! ```text
//! bit 0 = +X half, bit 1 = +Y half, bit 2 = +Z half
//! ```
//!
//! # Module Structure
//!
//! - [`config`]: `OctreeConfig` - split threshold and depth cap
//! - [`node`]: `Node`, `NodeId` - arena entries
//! - [`tree`]: `Octree` - insert, remove, point query, resize

pub mod config;
pub mod node;
pub mod tree;

pub use config::OctreeConfig;
pub use node::{Node, NodeId};
pub use tree::Octree;
