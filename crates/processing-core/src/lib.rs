//! Autocam Processing Core: the virtual camera planner.
//!
//! Turns a recorded input event stream into a camera plan:
//! - **Attention:** Classify cursor activity into weighted click/dwell/motion samples
//! - **Constraints:** Zoom limits and viewport/target clamping geometry
//! - **Planner:** Anchor, debounce, synthesize, and physics-limit keyframes
//! - **Preview:** Sample a plan into CSS-like transforms for UI previews
//!
//! This crate is pure computation with no I/O and no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod attention;
pub mod camera_preview;
pub mod constraints;
pub mod planner;

pub use attention::{AttentionExtractor, AttentionSample};
pub use constraints::ZoomConstraints;
pub use planner::{plan_fingerprint, CameraPlanner};
