//! Camera keyframes and the per-clip camera plan.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point2D, Size2D};

/// One virtual camera pose at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraKeyframe {
    /// Seconds since clip start.
    pub time: f64,
    /// View center in source pixels.
    pub center: Point2D,
    /// Magnification, `>= 1.0` (1.0 shows the whole frame).
    pub zoom: f64,
}

impl CameraKeyframe {
    pub fn new(time: f64, center: Point2D, zoom: f64) -> Self {
        Self { time, center, zoom }
    }
}

/// Interpolated camera state between keyframes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub center: Point2D,
    pub zoom: f64,
}

/// Ordered keyframes describing virtual pan/zoom across a whole clip.
///
/// Produced once per planning call. Keyframe times are nondecreasing
/// with no duplicates, start at `0.0` and end at `duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraPlan {
    /// Dimensions of the capture the keyframes refer to.
    pub source_size: Size2D,
    pub keyframes: Vec<CameraKeyframe>,
    /// Effective clip duration in seconds.
    pub duration: f64,
}

impl CameraPlan {
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Whether keyframe times strictly increase.
    pub fn is_strictly_ordered(&self) -> bool {
        self.keyframes.windows(2).all(|w| w[0].time < w[1].time)
    }

    /// Camera pose at `time_secs`, linearly interpolating center and zoom.
    ///
    /// Holds the first pose before the first keyframe and the last pose
    /// after the last one. Returns `None` for an empty plan.
    pub fn state_at(&self, time_secs: f64) -> Option<CameraPose> {
        let first = self.keyframes.first()?;
        let last = self.keyframes.last()?;

        if time_secs <= first.time {
            return Some(CameraPose {
                center: first.center,
                zoom: first.zoom,
            });
        }
        if time_secs >= last.time {
            return Some(CameraPose {
                center: last.center,
                zoom: last.zoom,
            });
        }

        let idx = self
            .keyframes
            .partition_point(|kf| kf.time <= time_secs)
            .saturating_sub(1);
        let from = &self.keyframes[idx];
        let to = self.keyframes.get(idx + 1).unwrap_or(from);

        let span = to.time - from.time;
        if span <= 0.0 {
            return Some(CameraPose {
                center: from.center,
                zoom: from.zoom,
            });
        }

        let t = (time_secs - from.time) / span;
        Some(CameraPose {
            center: Point2D::lerp(&from.center, &to.center, t),
            zoom: from.zoom + (to.zoom - from.zoom) * t.clamp(0.0, 1.0),
        })
    }
}
