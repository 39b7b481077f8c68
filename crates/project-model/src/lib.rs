//! Autocam Project Model
//!
//! Defines the data contracts shared by the planner, the composition
//! builder, and their callers:
//! - **Events:** Timestamped input events (cursor moves, button presses) and
//!   the versioned event log they are persisted in
//! - **Geometry:** Points, sizes, and 2D affine transforms in pixel space
//! - **Timeline:** Camera keyframes and the camera plan produced per clip
//!
//! Unlike normalized editor coordinates, everything here is expressed in
//! capture-pixel space; the planner owns the geometry constraints.

pub mod event;
pub mod geometry;
pub mod timeline;

pub use event::*;
pub use geometry::*;
pub use timeline::*;
