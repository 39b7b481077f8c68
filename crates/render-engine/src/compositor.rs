//! Composition builder: maps a camera plan onto compositor transform ramps.
//!
//! The output is what a platform video compositor consumes: a fixed
//! transform at `t = 0` followed by ascending, gapless segments, each a
//! linear ramp between two affine transforms.

use autocam_project_model::geometry::{clamp_between, AffineTransform, Point2D, Size2D};
use autocam_project_model::timeline::{CameraKeyframe, CameraPlan};
use serde::{Deserialize, Serialize};

/// Frame rate used when the caller passes an unusable one.
pub const FALLBACK_FRAME_RATE: f64 = 30.0;

/// Geometry of the source video track, as loaded by the asset layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackInfo {
    /// Pixel size of the encoded frames.
    pub natural_size: Size2D,
    /// Orientation transform stored with the track.
    pub preferred_transform: AffineTransform,
    /// Track duration in seconds.
    pub duration: f64,
}

impl TrackInfo {
    pub fn new(natural_size: Size2D, duration: f64) -> Self {
        Self {
            natural_size,
            preferred_transform: AffineTransform::IDENTITY,
            duration,
        }
    }

    pub fn with_transform(mut self, preferred_transform: AffineTransform) -> Self {
        self.preferred_transform = preferred_transform;
        self
    }
}

/// A linear transform ramp over `[start_time, end_time]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformSegment {
    pub start_time: f64,
    pub end_time: f64,
    pub start_transform: AffineTransform,
    pub end_transform: AffineTransform,
}

impl TransformSegment {
    fn hold(start_time: f64, end_time: f64, transform: AffineTransform) -> Self {
        Self {
            start_time,
            end_time,
            start_transform: transform,
            end_transform: transform,
        }
    }

    pub fn is_static(&self) -> bool {
        self.start_transform == self.end_transform
    }
}

/// Transform timeline for one video track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoComposition {
    pub render_size: Size2D,
    /// Seconds per output frame.
    pub frame_duration: f64,
    pub duration: f64,
    /// Transform in effect at `t = 0`.
    pub initial_transform: AffineTransform,
    pub segments: Vec<TransformSegment>,
}

impl VideoComposition {
    /// Transform at `time_secs`, interpolating within the active segment.
    pub fn transform_at(&self, time_secs: f64) -> AffineTransform {
        let Some(last) = self.segments.last() else {
            return self.initial_transform;
        };
        if time_secs >= last.end_time {
            return last.end_transform;
        }

        let idx = self.segments.partition_point(|s| s.end_time <= time_secs);
        let Some(segment) = self.segments.get(idx) else {
            return last.end_transform;
        };
        if time_secs <= segment.start_time {
            return segment.start_transform;
        }
        let span = segment.end_time - segment.start_time;
        let t = (time_secs - segment.start_time) / span;
        AffineTransform::lerp(&segment.start_transform, &segment.end_transform, t)
    }

    /// Whether segments are ascending, non-overlapping, and gapless from zero.
    pub fn is_contiguous(&self) -> bool {
        let mut cursor = 0.0;
        for segment in &self.segments {
            if segment.start_time != cursor || segment.end_time <= segment.start_time {
                return false;
            }
            cursor = segment.end_time;
        }
        true
    }
}

/// Build the composition for `track` rendered at `render_size`.
///
/// Returns `None` when there is nothing to do: a non-positive render size,
/// a degenerate track, or a track that already matches the render geometry
/// with no camera plan.
pub fn build_composition(
    track: &TrackInfo,
    render_size: Size2D,
    frame_rate: f64,
    plan: Option<&CameraPlan>,
) -> Option<VideoComposition> {
    if render_size.is_degenerate() {
        tracing::debug!(
            width = render_size.width,
            height = render_size.height,
            "Render size is degenerate; skipping composition"
        );
        return None;
    }
    if track.natural_size.is_degenerate() {
        tracing::debug!("Track has no pixels; skipping composition");
        return None;
    }

    let frame_rate = if frame_rate.is_finite() && frame_rate > 0.0 {
        frame_rate
    } else {
        FALLBACK_FRAME_RATE
    };
    let duration = if track.duration.is_finite() {
        track.duration.max(0.0)
    } else {
        0.0
    };
    let base = base_transform(track.natural_size, track.preferred_transform, render_size);

    let keyframes = plan.map(|p| sorted_keyframes(p, track.natural_size));
    let (initial_transform, segments) = match keyframes.as_deref() {
        Some(keyframes @ [first, ..]) => {
            let transforms: Vec<(f64, AffineTransform)> = keyframes
                .iter()
                .map(|kf| (kf.time, camera_transform(kf, track.natural_size).then(&base)))
                .collect();
            let first_transform = camera_transform(first, track.natural_size).then(&base);
            ramp_segments(&transforms, first_transform, duration)
        }
        _ => {
            let passthrough = track.natural_size == render_size
                && track.preferred_transform.approx_identity(1e-9);
            if passthrough {
                return None;
            }
            let segments = if duration > 0.0 {
                vec![TransformSegment::hold(0.0, duration, base)]
            } else {
                Vec::new()
            };
            (base, segments)
        }
    };

    tracing::debug!(
        segments = segments.len(),
        duration,
        frame_rate,
        "Built video composition"
    );

    Some(VideoComposition {
        render_size,
        frame_duration: 1.0 / frame_rate,
        duration,
        initial_transform,
        segments,
    })
}

/// Orientation normalized into the positive quadrant, then aspect-fit and
/// centered inside `render_size`.
pub fn base_transform(
    natural_size: Size2D,
    preferred_transform: AffineTransform,
    render_size: Size2D,
) -> AffineTransform {
    let bounds = preferred_transform.bounds_of(natural_size);
    let oriented = preferred_transform
        .then(&AffineTransform::translation(-bounds.origin.x, -bounds.origin.y));
    let size = bounds.size;
    if size.is_degenerate() {
        return oriented;
    }

    let scale = (render_size.width / size.width).min(render_size.height / size.height);
    let offset_x = (render_size.width - size.width * scale) / 2.0;
    let offset_y = (render_size.height - size.height * scale) / 2.0;
    oriented
        .then(&AffineTransform::scale(scale, scale))
        .then(&AffineTransform::translation(offset_x, offset_y))
}

/// Source-space transform that frames `keyframe`: its center lands on the
/// frame center, magnified by its zoom.
pub fn camera_transform(keyframe: &CameraKeyframe, natural_size: Size2D) -> AffineTransform {
    let source_center = natural_size.midpoint();
    AffineTransform::translation(-keyframe.center.x, -keyframe.center.y)
        .then(&AffineTransform::scale(keyframe.zoom, keyframe.zoom))
        .then(&AffineTransform::translation(source_center.x, source_center.y))
}

/// Plan keyframes sorted by time, rescaled into the track's pixel space.
fn sorted_keyframes(plan: &CameraPlan, natural_size: Size2D) -> Vec<CameraKeyframe> {
    let source = plan.source_size;
    let (sx, sy) = if source.is_degenerate() || source == natural_size {
        (1.0, 1.0)
    } else {
        (
            natural_size.width / source.width,
            natural_size.height / source.height,
        )
    };

    let mut keyframes: Vec<CameraKeyframe> = plan
        .keyframes
        .iter()
        .map(|kf| CameraKeyframe {
            center: Point2D::new(kf.center.x * sx, kf.center.y * sy),
            ..*kf
        })
        .collect();
    keyframes.sort_by(|a, b| a.time.total_cmp(&b.time));
    keyframes
}

/// One ramp per consecutive keyframe pair, with holds filling any gap at
/// either end of `[0, duration]`.
fn ramp_segments(
    transforms: &[(f64, AffineTransform)],
    first_transform: AffineTransform,
    duration: f64,
) -> (AffineTransform, Vec<TransformSegment>) {
    let mut segments: Vec<TransformSegment> = transforms
        .windows(2)
        .filter_map(|pair| {
            let (prev_time, prev_transform) = pair[0];
            let (next_time, next_transform) = pair[1];
            let start_time = clamp_between(prev_time, 0.0, duration);
            let end_time = clamp_between(next_time, 0.0, duration);
            (end_time > start_time).then_some(TransformSegment {
                start_time,
                end_time,
                start_transform: prev_transform,
                end_transform: next_transform,
            })
        })
        .collect();

    let Some(first) = segments.first().copied() else {
        let holds = if duration > 0.0 {
            vec![TransformSegment::hold(0.0, duration, first_transform)]
        } else {
            Vec::new()
        };
        return (first_transform, holds);
    };
    if first.start_time > 0.0 {
        segments.insert(0, TransformSegment::hold(0.0, first.start_time, first.start_transform));
    }
    if let Some(last) = segments.last().copied() {
        if last.end_time < duration {
            segments.push(TransformSegment::hold(last.end_time, duration, last.end_transform));
        }
    }

    (first.start_transform, segments)
}
