//! Camera motion preview helpers.
//!
//! Samples a camera plan into CSS-like transforms so UI clients can preview
//! camera movement without building a video composition.

use autocam_project_model::timeline::CameraPlan;

/// Upper bound on preview frames per call (one hour at 60 fps).
pub const MAX_PREVIEW_FRAMES: usize = 216_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMotionFrame {
    pub time_secs: f64,
    pub translate_x_percent: f64,
    pub translate_y_percent: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl CameraMotionFrame {
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.3}%, {:.3}%) scale({:.4}, {:.4})",
            self.translate_x_percent, self.translate_y_percent, self.scale_x, self.scale_y
        )
    }
}

/// Simulate frame-by-frame camera transforms from a plan.
///
/// Translation is the negated top-left corner of the visible window as a
/// percentage of the source size; scale is the zoom factor. Output stops
/// after [`MAX_PREVIEW_FRAMES`] frames.
pub fn simulate_camera_motion(
    plan: &CameraPlan,
    sample_rate_fps: f64,
) -> Vec<CameraMotionFrame> {
    let sample_rate_fps = if sample_rate_fps.is_finite() {
        sample_rate_fps.max(1.0)
    } else {
        1.0
    };
    let step = 1.0 / sample_rate_fps;
    let duration_secs = if plan.duration.is_finite() {
        plan.duration.max(0.0)
    } else {
        0.0
    };
    let width = plan.source_size.width.max(1.0);
    let height = plan.source_size.height.max(1.0);

    let frame_count = preview_frame_count(duration_secs, sample_rate_fps);
    if frame_count == MAX_PREVIEW_FRAMES {
        tracing::warn!(
            duration_secs,
            sample_rate_fps,
            max_frames = MAX_PREVIEW_FRAMES,
            "Preview truncated"
        );
    }
    let mut frames = Vec::new();

    for index in 0..frame_count {
        let t = index as f64 * step;
        let Some(pose) = plan.state_at(t) else {
            break;
        };
        let zoom = pose.zoom.max(0.01);
        let visible = 1.0 / zoom;
        let left = pose.center.x / width - visible / 2.0;
        let top = pose.center.y / height - visible / 2.0;

        frames.push(CameraMotionFrame {
            time_secs: t,
            translate_x_percent: -left * 100.0,
            translate_y_percent: -top * 100.0,
            scale_x: zoom,
            scale_y: zoom,
        });
    }

    frames
}

/// Frames covering `[0, duration_secs]`, capped at [`MAX_PREVIEW_FRAMES`].
fn preview_frame_count(duration_secs: f64, sample_rate_fps: f64) -> usize {
    let intervals = (duration_secs * sample_rate_fps + 1e-9).floor();
    if intervals.is_finite() && intervals < (MAX_PREVIEW_FRAMES - 1) as f64 {
        intervals as usize + 1
    } else {
        MAX_PREVIEW_FRAMES
    }
}

#[cfg(test)]
mod tests {
    use autocam_project_model::geometry::{Point2D, Size2D};
    use autocam_project_model::timeline::CameraKeyframe;

    use super::*;

    fn plan() -> CameraPlan {
        CameraPlan {
            source_size: Size2D::new(1920.0, 1080.0),
            keyframes: vec![
                CameraKeyframe::new(0.0, Point2D::new(960.0, 540.0), 1.0),
                CameraKeyframe::new(2.0, Point2D::new(960.0, 540.0), 2.0),
            ],
            duration: 2.0,
        }
    }

    #[test]
    fn preview_generates_frames() {
        let frames = simulate_camera_motion(&plan(), 10.0);
        assert_eq!(frames.len(), 21);
        assert_eq!(frames[0].scale_x, 1.0);
        assert!(frames[0].translate_x_percent.abs() < 1e-9);

        let last = frames.last().unwrap();
        assert!((last.time_secs - 2.0).abs() < 1e-9);
        assert!((last.scale_x - 2.0).abs() < 1e-9);
        // Centered 2x window starts a quarter of the way in.
        assert!((last.translate_x_percent + 25.0).abs() < 1e-9);
        assert!((last.translate_y_percent + 25.0).abs() < 1e-9);
    }

    #[test]
    fn css_transform_formats_values() {
        let frame = CameraMotionFrame {
            time_secs: 0.0,
            translate_x_percent: -25.0,
            translate_y_percent: -12.5,
            scale_x: 2.0,
            scale_y: 2.0,
        };
        assert_eq!(
            frame.css_transform(),
            "translate(-25.000%, -12.500%) scale(2.0000, 2.0000)"
        );
    }

    #[test]
    fn huge_duration_is_capped() {
        let mut far = plan();
        far.keyframes[1].time = 1e300;
        far.duration = 1e300;
        let frames = simulate_camera_motion(&far, 30.0);
        assert_eq!(frames.len(), MAX_PREVIEW_FRAMES);
        assert_eq!(frames[0].scale_x, 1.0);

        assert_eq!(preview_frame_count(1e9, 60.0), MAX_PREVIEW_FRAMES);
        assert_eq!(preview_frame_count(2.0, 10.0), 21);
    }

    #[test]
    fn empty_plan_has_no_frames() {
        let empty = CameraPlan {
            source_size: Size2D::new(100.0, 100.0),
            keyframes: vec![],
            duration: 1.0,
        };
        assert!(simulate_camera_motion(&empty, 30.0).is_empty());
    }
}
