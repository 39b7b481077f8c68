//! Autocam Render Engine
//!
//! Maps a camera plan and the source track's geometry onto the transform
//! timeline a platform video compositor consumes.
//!
//! # Pipeline Architecture
//!
//! ```text
//! events.json ── planner ── plan.json ──┐
//!                                        ├── Composition Builder ── transform ramps
//! track metadata (size, orientation) ───┘                                │
//!                                                                        ▼
//!                                                           external compositor/encoder
//! ```

pub mod compositor;

pub use compositor::{build_composition, TrackInfo, TransformSegment, VideoComposition};
