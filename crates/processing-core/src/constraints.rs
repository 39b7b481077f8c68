//! Zoom and pan constraints.
//!
//! A plain configuration record plus the pure geometry the planner uses to
//! keep every keyframe inside the source frame.

use autocam_common::config::AutoZoomSettings;
use autocam_project_model::geometry::{clamp_between, Point2D, Size2D};
use serde::{Deserialize, Serialize};

/// Largest safe-margin fraction honored on each side of a frame.
const MAX_SAFE_MARGIN_FRACTION: f64 = 0.25;

/// Zoom ceiling reached at auto-zoom intensity 1.0.
const FULL_INTENSITY_MAX_ZOOM: f64 = 3.0;

/// Configuration for camera planning.
///
/// Distances are in source pixels, times in seconds, speeds in pixels per
/// second. See [`ZoomConstraints::default`] for the stock values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomConstraints {
    /// Upper bound on magnification.
    pub max_zoom: f64,

    /// Minimum fraction of the frame that stays visible; caps zoom at
    /// `1 / fraction`. Clamped to `[0.01, 1]`.
    pub min_visible_area_fraction: f64,

    /// Inset applied to focus targets and inside the viewport, as a fraction
    /// of the respective size. Clamped to `[0, 0.25]`.
    pub safe_margin_fraction: f64,

    /// How long the cursor must stay slow to count as a dwell.
    pub dwell_duration: f64,

    /// Smoothed cursor speed below which motion counts as dwelling.
    pub dwell_speed_threshold: f64,

    /// Exponential smoothing factor for cursor speed (weight of the newest reading).
    pub velocity_smoothing_alpha: f64,

    /// Maximum camera pan speed.
    pub max_pan_speed: f64,

    /// Maximum change in camera pan velocity per second.
    pub max_pan_acceleration: f64,

    /// Zoom used when there is no activity at all.
    pub idle_zoom: f64,

    /// Zoom for a zero-intensity focus target.
    pub base_zoom: f64,

    /// Debounce window: targets closer than this collapse into one keyframe.
    pub minimum_keyframe_interval: f64,

    /// Intensity assigned to rapid cursor motion.
    pub motion_intensity: f64,

    /// Intensity assigned to dwells.
    pub dwell_intensity: f64,

    /// Intensity assigned to clicks.
    pub click_intensity: f64,
}

impl Default for ZoomConstraints {
    /// Stock constraints:
    ///
    /// | field | value |
    /// |---|---|
    /// | `max_zoom` | 2.2 |
    /// | `min_visible_area_fraction` | 0.4 (zoom cap 2.5) |
    /// | `safe_margin_fraction` | 0.12 |
    /// | `dwell_duration` | 0.45 s |
    /// | `dwell_speed_threshold` | 90 px/s |
    /// | `velocity_smoothing_alpha` | 0.35 |
    /// | `max_pan_speed` | 1400 px/s |
    /// | `max_pan_acceleration` | 3200 px/s² |
    /// | `idle_zoom` | 1.05 |
    /// | `base_zoom` | 1.1 |
    /// | `minimum_keyframe_interval` | 1/30 s |
    /// | `motion_intensity` | 0.25 |
    /// | `dwell_intensity` | 0.65 |
    /// | `click_intensity` | 1.0 |
    fn default() -> Self {
        Self {
            max_zoom: 2.2,
            min_visible_area_fraction: 0.4,
            safe_margin_fraction: 0.12,
            dwell_duration: 0.45,
            dwell_speed_threshold: 90.0,
            velocity_smoothing_alpha: 0.35,
            max_pan_speed: 1400.0,
            max_pan_acceleration: 3200.0,
            idle_zoom: 1.05,
            base_zoom: 1.1,
            minimum_keyframe_interval: 1.0 / 30.0,
            motion_intensity: 0.25,
            dwell_intensity: 0.65,
            click_intensity: 1.0,
        }
    }
}

impl ZoomConstraints {
    /// Derive constraints from persisted project settings.
    ///
    /// Intensity scales the zoom ceiling linearly from 1.0 (no zoom) to
    /// [`FULL_INTENSITY_MAX_ZOOM`]; the visible-area cap still applies on top.
    pub fn from_settings(settings: &AutoZoomSettings) -> Self {
        let settings = settings.sanitized();
        Self {
            max_zoom: 1.0 + (FULL_INTENSITY_MAX_ZOOM - 1.0) * settings.intensity,
            minimum_keyframe_interval: settings.minimum_keyframe_interval,
            ..Self::default()
        }
    }

    /// Highest zoom any keyframe may use.
    pub fn zoom_ceiling(&self) -> f64 {
        let area = clamp_between(self.min_visible_area_fraction, 0.01, 1.0);
        self.max_zoom.min(1.0 / area).max(1.0)
    }

    /// Clamp a zoom level to `[1, min(max_zoom, 1 / min_visible_area_fraction)]`.
    pub fn clamped_zoom(&self, zoom: f64) -> f64 {
        clamp_between(zoom, 1.0, self.zoom_ceiling()).max(1.0)
    }

    /// Pull a raw focus point inside the frame's safe-margin rectangle.
    pub fn clamped_target(&self, point: Point2D, source_size: Size2D) -> Point2D {
        let size = source_size.sanitized();
        let fraction = self.margin_fraction();
        let margin_x = size.width * fraction;
        let margin_y = size.height * fraction;
        Point2D::new(
            clamp_between(point.x, margin_x, size.width - margin_x),
            clamp_between(point.y, margin_y, size.height - margin_y),
        )
    }

    /// Clamp a view center so the `source_size / zoom` viewport stays
    /// entirely inside the frame.
    pub fn clamp_view_center(&self, center: Point2D, source_size: Size2D, zoom: f64) -> Point2D {
        let size = source_size.sanitized();
        let zoom = sanitize_zoom(zoom);
        let half_w = size.width / zoom / 2.0;
        let half_h = size.height / zoom / 2.0;
        Point2D::new(
            clamp_between(center.x, half_w, size.width - half_w),
            clamp_between(center.y, half_h, size.height - half_h),
        )
    }

    /// Choose a view center for `target` at `zoom`.
    ///
    /// Starts from the frame midpoint and moves only as far as needed to
    /// keep `target` inside the viewport's inner safe-margin window, while
    /// the viewport itself stays inside the frame. When both cannot hold
    /// (target too close to an edge for the margin), falls back to
    /// [`clamp_view_center`](Self::clamp_view_center) on the target.
    pub fn bias_view_center_toward_target(
        &self,
        target: Point2D,
        source_size: Size2D,
        zoom: f64,
    ) -> Point2D {
        let size = source_size.sanitized();
        let zoom = sanitize_zoom(zoom);
        let fraction = self.margin_fraction();
        let midpoint = size.midpoint();

        let axis = |target: f64, extent: f64, preferred: f64| -> Option<f64> {
            let half = extent / zoom / 2.0;
            let inner_margin = extent / zoom * fraction;
            let lo = half.max(target - half + inner_margin);
            let hi = (extent - half).min(target + half - inner_margin);
            (target.is_finite() && lo <= hi).then(|| preferred.max(lo).min(hi))
        };

        match (
            axis(target.x, size.width, midpoint.x),
            axis(target.y, size.height, midpoint.y),
        ) {
            (Some(x), Some(y)) => Point2D::new(x, y),
            _ => self.clamp_view_center(target, size, zoom),
        }
    }

    fn margin_fraction(&self) -> f64 {
        clamp_between(self.safe_margin_fraction, 0.0, MAX_SAFE_MARGIN_FRACTION)
    }
}

fn sanitize_zoom(zoom: f64) -> f64 {
    if zoom.is_finite() {
        zoom.max(1.0)
    } else {
        1.0
    }
}
