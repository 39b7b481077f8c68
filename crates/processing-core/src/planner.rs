//! Virtual camera planning.
//!
//! Turns attention samples into a camera plan covering the whole clip.
//!
//! # Algorithm
//!
//! 1. **Extract** attention samples from the event stream.
//! 2. **Anchor** the timeline: force focus targets at `t = 0` and at the
//!    effective duration.
//! 3. **Debounce** targets closer than the minimum keyframe interval, keeping
//!    the most important one per bucket (anchor > click > dwell > motion).
//! 4. **Synthesize** a zoom and view center for each surviving target.
//! 5. **Limit** pan speed and acceleration in a single left-to-right fold.
//!
//! With no samples at all the plan is a static, slightly zoomed idle shot.

use autocam_project_model::event::InputEvent;
use autocam_project_model::geometry::{clamp_between, Point2D, Size2D};
use autocam_project_model::timeline::{CameraKeyframe, CameraPlan};

use crate::attention::{AttentionExtractor, AttentionSample};
use crate::constraints::ZoomConstraints;

/// Smallest time step used by the pan limiter (seconds).
const MIN_PAN_STEP_SECS: f64 = 0.0001;

/// A candidate keyframe before geometry is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTarget {
    pub time: f64,
    pub position: Point2D,
    pub intensity: f64,
    pub is_click: bool,
    pub is_dwell: bool,
    /// Synthetic start/end-of-timeline target.
    pub is_anchor: bool,
}

impl FocusTarget {
    fn from_sample(sample: &AttentionSample) -> Self {
        Self {
            time: sample.time,
            position: sample.position,
            intensity: sample.intensity,
            is_click: sample.is_click,
            is_dwell: sample.is_dwell,
            is_anchor: false,
        }
    }

    /// Anchor with no focus information, framing the whole source.
    fn neutral_anchor(time: f64, source_size: Size2D) -> Self {
        Self {
            time,
            position: source_size.midpoint(),
            intensity: 0.0,
            is_click: false,
            is_dwell: false,
            is_anchor: true,
        }
    }

    /// Debounce rank: anchor (3) > click (2) > dwell (1) > motion (0).
    pub fn priority(&self) -> u8 {
        if self.is_anchor {
            3
        } else if self.is_click {
            2
        } else if self.is_dwell {
            1
        } else {
            0
        }
    }

    /// Whether `self` should replace `other` when both compete for one slot.
    /// Exact ties go to `self`, the later-encountered target.
    fn supersedes(&self, other: &FocusTarget) -> bool {
        (self.priority(), self.intensity) >= (other.priority(), other.intensity)
    }
}

/// Pan limiter accumulator: the last emitted keyframe and its pan velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanState {
    pub previous: CameraKeyframe,
    /// Pixels per second.
    pub velocity: Point2D,
}

impl PanState {
    /// Seed the fold with the first keyframe, re-clamped, at rest.
    pub fn start(
        first: &CameraKeyframe,
        source_size: Size2D,
        constraints: &ZoomConstraints,
    ) -> Self {
        let center = constraints.clamp_view_center(first.center, source_size, first.zoom);
        Self {
            previous: CameraKeyframe::new(first.time, center, first.zoom),
            velocity: Point2D::ORIGIN,
        }
    }

    /// Advance toward `raw`, honoring pan speed and acceleration limits.
    pub fn step(
        &self,
        raw: &CameraKeyframe,
        source_size: Size2D,
        constraints: &ZoomConstraints,
    ) -> Self {
        let dt = (raw.time - self.previous.time).max(MIN_PAN_STEP_SECS);

        let mut delta = raw.center - self.previous.center;
        let max_step = constraints.max_pan_speed.max(0.0) * dt;
        let distance = delta.length();
        if distance > max_step {
            delta = delta * (max_step / distance);
        }

        let mut velocity = delta * (1.0 / dt);
        let change = velocity - self.velocity;
        let max_change = constraints.max_pan_acceleration.max(0.0) * dt;
        let change_len = change.length();
        if change_len > max_change {
            velocity = self.velocity + change * (max_change / change_len);
        }

        let desired = self.previous.center + velocity * dt;
        let center = constraints.clamp_view_center(desired, source_size, raw.zoom);
        Self {
            previous: CameraKeyframe::new(raw.time, center, raw.zoom),
            velocity,
        }
    }
}

/// Plans virtual camera motion for a whole clip.
///
/// Stateless apart from the extractor thresholds; `plan` is a pure function
/// of its arguments, so one planner may serve concurrent callers.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraPlanner {
    extractor: AttentionExtractor,
}

impl CameraPlanner {
    /// Create a planner with the given attention extractor.
    pub fn new(extractor: AttentionExtractor) -> Self {
        Self { extractor }
    }

    /// Create a planner with default extractor thresholds.
    pub fn with_defaults() -> Self {
        Self::new(AttentionExtractor::default())
    }

    pub fn extractor(&self) -> &AttentionExtractor {
        &self.extractor
    }

    /// Compute the camera plan for `events` over a clip of `duration` seconds.
    ///
    /// Never fails: empty input yields an idle plan and degenerate sizes
    /// yield clamped geometry.
    pub fn plan(
        &self,
        events: &[InputEvent],
        source_size: Size2D,
        duration: f64,
        constraints: &ZoomConstraints,
    ) -> CameraPlan {
        let source_size = source_size.sanitized();
        let effective_duration = effective_duration(events, duration);
        let samples = self.extractor.samples(events, constraints);

        let keyframes = if samples.is_empty() {
            idle_keyframes(source_size, effective_duration, constraints)
        } else {
            let interval = constraints.minimum_keyframe_interval;
            let targets = samples.iter().map(FocusTarget::from_sample).collect();
            let anchored = insert_anchors(targets, source_size, effective_duration, interval);
            let reduced = coalesce_exact_times(reduce_targets(&anchored, interval));
            let raw: Vec<CameraKeyframe> = reduced
                .iter()
                .map(|target| synthesize_keyframe(target, source_size, constraints))
                .collect();

            tracing::debug!(
                samples = samples.len(),
                targets = anchored.len(),
                keyframes = raw.len(),
                "Reduced focus targets"
            );
            limit_pan_motion(&raw, source_size, constraints)
        };

        CameraPlan {
            source_size,
            keyframes,
            duration: effective_duration,
        }
    }

    /// Deterministic hash of every planning input, for memoizing plans.
    ///
    /// Identical inputs (bit-for-bit, including floats) give identical
    /// fingerprints; any change to events, size, duration, constraints, or
    /// extractor thresholds changes it.
    pub fn fingerprint(
        &self,
        events: &[InputEvent],
        source_size: Size2D,
        duration: f64,
        constraints: &ZoomConstraints,
    ) -> u64 {
        let mut hash = Fnv1a::new();

        hash.write_f64(self.extractor.click_max_travel);
        hash.write_f64(self.extractor.click_max_duration);
        hash.write_f64(self.extractor.motion_sample_interval);

        hash.write_u64(events.len() as u64);
        for event in events {
            hash.write_u8(event.kind as u8);
            hash.write_f64(event.timestamp);
            hash.write_f64(event.position.x);
            hash.write_f64(event.position.y);
            hash.write_u8(event.button.map_or(0, |b| b as u8 + 1));
        }

        hash.write_f64(source_size.width);
        hash.write_f64(source_size.height);
        hash.write_f64(duration);

        for value in [
            constraints.max_zoom,
            constraints.min_visible_area_fraction,
            constraints.safe_margin_fraction,
            constraints.dwell_duration,
            constraints.dwell_speed_threshold,
            constraints.velocity_smoothing_alpha,
            constraints.max_pan_speed,
            constraints.max_pan_acceleration,
            constraints.idle_zoom,
            constraints.base_zoom,
            constraints.minimum_keyframe_interval,
            constraints.motion_intensity,
            constraints.dwell_intensity,
            constraints.click_intensity,
        ] {
            hash.write_f64(value);
        }

        hash.finish()
    }
}

/// Fingerprint of planning inputs using the default planner.
pub fn plan_fingerprint(
    events: &[InputEvent],
    source_size: Size2D,
    duration: f64,
    constraints: &ZoomConstraints,
) -> u64 {
    CameraPlanner::with_defaults().fingerprint(events, source_size, duration, constraints)
}

/// `max(duration, latest event timestamp, 0)`, ignoring non-finite values.
pub fn effective_duration(events: &[InputEvent], duration: f64) -> f64 {
    let latest = events
        .iter()
        .map(|e| e.timestamp)
        .filter(|t| t.is_finite())
        .fold(0.0_f64, f64::max);
    let duration = if duration.is_finite() { duration } else { 0.0 };
    duration.max(latest)
}

/// Static idle shot: the source midpoint at the idle zoom.
fn idle_keyframes(
    source_size: Size2D,
    effective_duration: f64,
    constraints: &ZoomConstraints,
) -> Vec<CameraKeyframe> {
    let zoom = constraints.clamped_zoom(constraints.idle_zoom);
    let center = source_size.midpoint();
    let mut keyframes = vec![CameraKeyframe::new(0.0, center, zoom)];
    if effective_duration > 0.0 {
        keyframes.push(CameraKeyframe::new(effective_duration, center, zoom));
    }
    keyframes
}

/// Force anchors at `t = 0` and `t = effective_duration`.
///
/// The end anchor always inherits the last target's position and
/// intensity, but its click/dwell flags only when the last target lies
/// within `interval` of the end. The start anchor has no such split.
pub fn insert_anchors(
    mut targets: Vec<FocusTarget>,
    source_size: Size2D,
    effective_duration: f64,
    interval: f64,
) -> Vec<FocusTarget> {
    let Some(first) = targets.first_mut() else {
        return targets;
    };
    if first.time == 0.0 {
        first.is_anchor = true;
    } else if first.time <= interval {
        let anchor = FocusTarget {
            time: 0.0,
            is_anchor: true,
            ..*first
        };
        targets.insert(0, anchor);
    } else {
        targets.insert(0, FocusTarget::neutral_anchor(0.0, source_size));
    }

    let Some(last) = targets.last_mut() else {
        return targets;
    };
    if last.time == effective_duration {
        last.is_anchor = true;
    } else {
        let inherit_flags = effective_duration - last.time <= interval;
        let anchor = FocusTarget {
            time: effective_duration,
            position: last.position,
            intensity: last.intensity,
            is_click: inherit_flags && last.is_click,
            is_dwell: inherit_flags && last.is_dwell,
            is_anchor: true,
        };
        targets.push(anchor);
    }
    targets
}

/// Debounce time-ordered targets into buckets spanning less than `interval`,
/// keeping the highest-ranked target of each bucket.
///
/// Two anchors never share a bucket, so the start and end of a very short
/// clip both survive.
pub fn reduce_targets(targets: &[FocusTarget], interval: f64) -> Vec<FocusTarget> {
    let mut kept: Vec<FocusTarget> = Vec::with_capacity(targets.len());
    let mut bucket_start = 0.0;

    for target in targets {
        match kept.last_mut() {
            Some(current)
                if target.time - bucket_start < interval
                    && !(target.is_anchor && current.is_anchor) =>
            {
                if target.supersedes(current) {
                    *current = *target;
                }
            }
            _ => {
                bucket_start = target.time;
                kept.push(*target);
            }
        }
    }
    kept
}

/// Merge targets with identical timestamps using the debounce ranking.
pub fn coalesce_exact_times(targets: Vec<FocusTarget>) -> Vec<FocusTarget> {
    let mut merged: Vec<FocusTarget> = Vec::with_capacity(targets.len());
    for target in targets {
        match merged.last_mut() {
            Some(current) if current.time == target.time => {
                if target.supersedes(current) {
                    *current = target;
                }
            }
            _ => merged.push(target),
        }
    }
    merged
}

/// Zoom and frame a single focus target.
pub fn synthesize_keyframe(
    target: &FocusTarget,
    source_size: Size2D,
    constraints: &ZoomConstraints,
) -> CameraKeyframe {
    let ceiling = constraints.clamped_zoom(constraints.max_zoom);
    let weight = clamp_between(target.intensity, 0.0, 1.0);
    let zoom = constraints
        .clamped_zoom(constraints.base_zoom + (ceiling - constraints.base_zoom) * weight);
    let focus = constraints.clamped_target(target.position, source_size);
    let center = constraints.bias_view_center_toward_target(focus, source_size, zoom);
    CameraKeyframe::new(target.time, center, zoom)
}

/// Apply pan speed/acceleration limits as a fold over [`PanState`].
pub fn limit_pan_motion(
    raw: &[CameraKeyframe],
    source_size: Size2D,
    constraints: &ZoomConstraints,
) -> Vec<CameraKeyframe> {
    let Some((first, rest)) = raw.split_first() else {
        return Vec::new();
    };
    let start = PanState::start(first, source_size, constraints);

    std::iter::once(start.previous)
        .chain(rest.iter().scan(start, |state, keyframe| {
            *state = state.step(keyframe, source_size, constraints);
            Some(state.previous)
        }))
        .collect()
}

/// 64-bit FNV-1a.
struct Fnv1a(u64);

impl Fnv1a {
    fn new() -> Self {
        Self(0xcbf29ce484222325)
    }

    fn write_u8(&mut self, byte: u8) {
        self.0 ^= byte as u64;
        self.0 = self.0.wrapping_mul(0x100000001b3);
    }

    fn write_u64(&mut self, value: u64) {
        for byte in value.to_le_bytes() {
            self.write_u8(byte);
        }
    }

    fn write_f64(&mut self, value: f64) {
        self.write_u64(value.to_bits());
    }

    fn finish(&self) -> u64 {
        self.0
    }
}
