//! area_trigger - Point-in-volume membership tracking
//!
//! Registers bounding volumes ("areas") per map and reports, for a single
//! moving point, when it enters or leaves each of them. Volumes are
//! axis-aligned boxes, spheres and extruded polygons (prisms), combined into
//! CSG expressions. A loose octree per map narrows each query to the areas
//! whose bounds can contain the point.
//!
//! # Features
//!
//! - **Volumes**: box, sphere and prism primitives plus union,
//!   intersection, difference and symmetric-difference combinators
//! - **CSG helpers**: flattening combination rules and a fluent builder
//! - **Octree index**: split/merge on insert/remove, resize on growth
//! - **Edge-triggered tracking**: callbacks fire only when a contained flag
//!   flips, including forced exits on map change
//! - **Tagged JSON codec**: `"$typeString"`-discriminated records
//!
//! # Example
//!
//! ```
//! use area_trigger::{MapChangedEvent, PositionHandler, PositionSample, VolumeBuilder};
//! use glam::DVec3;
//!
//! let map_changed = MapChangedEvent::new();
//! let handler = PositionHandler::new(&map_changed);
//!
//! let area = VolumeBuilder::new()
//!   .add_box(DVec3::ZERO, DVec3::splat(10.0))
//!   .build()
//!   .unwrap();
//! handler
//!   .add_area(1, area, |sample, inside| {
//!     println!("{} at {}: inside = {}", sample.map_id, sample.position, inside);
//!   })
//!   .unwrap();
//!
//! handler.update(&PositionSample::new(1, DVec3::splat(5.0))).unwrap();
//! map_changed.notify(&PositionSample::new(2, DVec3::ZERO));
//! ```

pub mod axis;
pub mod bounds;
pub mod error;

// Volumes and combinators
pub mod volume;
pub use volume::{
  BoundingVolume, BoxVolume, Difference, Intersection, Polygon, Prism, SphereVolume,
  SymmetricDifference, Union, Volume, VolumeHandle,
};

// CSG composition
pub mod builder;
pub mod csg;
pub use builder::VolumeBuilder;

// Tagged JSON records
pub mod codec;

// Spatial index
pub mod octree;
pub use octree::{Octree, OctreeConfig};

// Membership tracking
pub mod events;
pub mod handler;
pub mod metrics;
pub mod tracker;
pub use events::{MapChangedEvent, Subscription};
pub use handler::{HandlerConfig, PositionHandler, TrackerKind};
pub use tracker::{AreaTracker, LinearTracker, MapId, OctreeTracker, PositionSample};

pub use axis::Axis3;
pub use bounds::Aabb3;
pub use error::{CodecError, TrackerError, VolumeError};
