//! Attention extraction: from raw input events to weighted focus samples.
//!
//! # Heuristic
//!
//! A single pass over the (time-ordered) events:
//!
//! 1. **Clicks:** a `mouseDown` followed by a `mouseUp` of the same button
//!    within [`AttentionExtractor::click_max_duration`] and
//!    [`AttentionExtractor::click_max_travel`] emits one sample at the press.
//!    Drags and unmatched presses emit nothing.
//! 2. **Dwells:** cursor speed between consecutive `cursorMoved` events is
//!    exponentially smoothed. A run of readings below the dwell threshold
//!    lasting at least `dwell_duration` emits one sample at the run's start
//!    time and mean position. A gap between moves of at least
//!    `dwell_duration` means the cursor was parked, which also closes a dwell.
//! 3. **Motion:** fast readings emit down-weighted samples, at most one per
//!    [`AttentionExtractor::motion_sample_interval`].
//!
//! Samples sharing a timestamp are merged by click > dwell > motion, then
//! higher intensity, so the output has strictly increasing times.

use autocam_project_model::event::{InputEvent, InputEventKind, MouseButton};
use autocam_project_model::geometry::{clamp_between, Point2D};

use crate::constraints::ZoomConstraints;

/// A weighted focus point derived from input activity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttentionSample {
    /// Seconds since recording start.
    pub time: f64,
    /// Focus position in capture pixels.
    pub position: Point2D,
    /// Weight in `[0.0, 1.0]`.
    pub intensity: f64,
    pub is_click: bool,
    pub is_dwell: bool,
}

impl AttentionSample {
    /// Merge rank: click (2) > dwell (1) > motion (0).
    pub fn priority(&self) -> u8 {
        if self.is_click {
            2
        } else if self.is_dwell {
            1
        } else {
            0
        }
    }

    fn outranks(&self, other: &AttentionSample) -> bool {
        (self.priority(), self.intensity) > (other.priority(), other.intensity)
    }
}

/// Classifies cursor activity into click, dwell, and motion samples.
///
/// Holds only thresholds; a single instance may be shared across threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttentionExtractor {
    /// Maximum press-to-release distance for a click (pixels).
    pub click_max_travel: f64,

    /// Maximum press-to-release time for a click (seconds).
    pub click_max_duration: f64,

    /// Minimum spacing between motion samples (seconds).
    pub motion_sample_interval: f64,
}

impl Default for AttentionExtractor {
    fn default() -> Self {
        Self {
            click_max_travel: 12.0,
            click_max_duration: 0.6,
            motion_sample_interval: 0.25,
        }
    }
}

impl AttentionExtractor {
    /// Create an extractor with the given thresholds.
    pub fn new(
        click_max_travel: f64,
        click_max_duration: f64,
        motion_sample_interval: f64,
    ) -> Self {
        Self {
            click_max_travel,
            click_max_duration,
            motion_sample_interval,
        }
    }

    /// Extract attention samples from time-ordered events.
    ///
    /// The result is sorted by time with no duplicate timestamps and every
    /// intensity in `[0, 1]`. Events with non-finite values are skipped.
    pub fn samples(
        &self,
        events: &[InputEvent],
        constraints: &ZoomConstraints,
    ) -> Vec<AttentionSample> {
        let mut raw = Vec::new();
        let mut pending_press: Option<(f64, Point2D, Option<MouseButton>)> = None;
        let mut cursor = CursorTracker::new(self, constraints);
        let mut skipped = 0usize;

        for event in events {
            if !event.is_finite() {
                skipped += 1;
                continue;
            }
            let time = event.timestamp.max(0.0);

            match event.kind {
                InputEventKind::CursorMoved => cursor.observe(time, event.position, &mut raw),
                InputEventKind::MouseDown => {
                    pending_press = Some((time, event.position, event.button));
                }
                InputEventKind::MouseUp => {
                    let Some((press_time, press_position, press_button)) = pending_press.take()
                    else {
                        continue;
                    };
                    let same_button = match (press_button, event.button) {
                        (Some(down), Some(up)) => down == up,
                        _ => true,
                    };
                    if same_button
                        && time - press_time <= self.click_max_duration
                        && press_position.distance_to(&event.position) <= self.click_max_travel
                    {
                        raw.push(AttentionSample {
                            time: press_time,
                            position: press_position,
                            intensity: unit_intensity(constraints.click_intensity),
                            is_click: true,
                            is_dwell: false,
                        });
                    }
                }
            }
        }
        cursor.finish(&mut raw);

        if skipped > 0 {
            tracing::warn!(skipped, "Ignored input events with non-finite values");
        }

        coalesce_by_time(raw)
    }
}

/// An open run of slow cursor readings.
#[derive(Debug, Clone, Copy)]
struct DwellRun {
    start: f64,
    end: f64,
    sum: Point2D,
    count: usize,
}

impl DwellRun {
    fn begin(time: f64, position: Point2D) -> Self {
        Self {
            start: time,
            end: time,
            sum: position,
            count: 1,
        }
    }

    fn extend(&mut self, time: f64, position: Point2D) {
        self.end = time;
        self.sum = self.sum + position;
        self.count += 1;
    }

    fn mean(&self) -> Point2D {
        self.sum * (1.0 / self.count as f64)
    }
}

/// Per-call cursor state for dwell and motion classification.
struct CursorTracker<'a> {
    extractor: &'a AttentionExtractor,
    constraints: &'a ZoomConstraints,
    alpha: f64,
    last: Option<(f64, Point2D)>,
    smoothed_speed: f64,
    run: Option<DwellRun>,
    last_motion_time: Option<f64>,
}

impl<'a> CursorTracker<'a> {
    fn new(extractor: &'a AttentionExtractor, constraints: &'a ZoomConstraints) -> Self {
        Self {
            extractor,
            constraints,
            alpha: clamp_between(constraints.velocity_smoothing_alpha, 0.0, 1.0),
            last: None,
            smoothed_speed: 0.0,
            run: None,
            last_motion_time: None,
        }
    }

    fn observe(&mut self, time: f64, position: Point2D, out: &mut Vec<AttentionSample>) {
        let Some((prev_time, prev_position)) = self.last.replace((time, position)) else {
            self.run = Some(DwellRun::begin(time, position));
            return;
        };

        let dt = time - prev_time;
        if dt > 0.0 && dt >= self.constraints.dwell_duration {
            // Parked at the previous position for the whole gap.
            let mut run = self
                .run
                .take()
                .unwrap_or_else(|| DwellRun::begin(prev_time, prev_position));
            run.end = time;
            self.run = Some(run);
            self.close_run(out);
            self.smoothed_speed = 0.0;
            self.run = Some(DwellRun::begin(time, position));
            return;
        }

        if dt > 0.0 {
            let speed = prev_position.distance_to(&position) / dt;
            self.smoothed_speed = self.alpha * speed + (1.0 - self.alpha) * self.smoothed_speed;
        }

        if self.smoothed_speed < self.constraints.dwell_speed_threshold {
            match self.run.as_mut() {
                Some(run) => run.extend(time, position),
                None => {
                    let mut run = DwellRun::begin(prev_time, prev_position);
                    run.extend(time, position);
                    self.run = Some(run);
                }
            }
            return;
        }

        self.close_run(out);
        let due = self
            .last_motion_time
            .map_or(true, |last| time - last >= self.extractor.motion_sample_interval);
        if due {
            out.push(AttentionSample {
                time,
                position,
                intensity: unit_intensity(self.constraints.motion_intensity),
                is_click: false,
                is_dwell: false,
            });
            self.last_motion_time = Some(time);
        }
    }

    fn close_run(&mut self, out: &mut Vec<AttentionSample>) {
        let Some(run) = self.run.take() else {
            return;
        };
        if run.end - run.start >= self.constraints.dwell_duration {
            out.push(AttentionSample {
                time: run.start,
                position: run.mean(),
                intensity: unit_intensity(self.constraints.dwell_intensity),
                is_click: false,
                is_dwell: true,
            });
        }
    }

    fn finish(mut self, out: &mut Vec<AttentionSample>) {
        self.close_run(out);
    }
}

/// Sort by time and merge samples that share a timestamp.
fn coalesce_by_time(mut samples: Vec<AttentionSample>) -> Vec<AttentionSample> {
    samples.sort_by(|a, b| a.time.total_cmp(&b.time));

    let mut merged: Vec<AttentionSample> = Vec::with_capacity(samples.len());
    for sample in samples {
        match merged.last_mut() {
            Some(kept) if kept.time == sample.time => {
                if sample.outranks(kept) {
                    *kept = sample;
                }
            }
            _ => merged.push(sample),
        }
    }
    merged
}

fn unit_intensity(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(events: &[InputEvent]) -> Vec<AttentionSample> {
        AttentionExtractor::default().samples(events, &ZoomConstraints::default())
    }

    fn assert_contract(samples: &[AttentionSample]) {
        for pair in samples.windows(2) {
            assert!(pair[0].time < pair[1].time, "times must strictly increase");
        }
        for s in samples {
            assert!((0.0..=1.0).contains(&s.intensity));
            assert!(!(s.is_click && s.is_dwell));
        }
    }

    #[test]
    fn test_empty_events() {
        assert!(extract(&[]).is_empty());
    }

    #[test]
    fn test_click_pair_emits_click_sample() {
        let events = vec![
            InputEvent::mouse_down(1.0, 400.0, 300.0, MouseButton::Left),
            InputEvent::mouse_up(1.1, 403.0, 301.0, MouseButton::Left),
        ];
        let samples = extract(&events);
        assert_eq!(samples.len(), 1);
        let click = samples[0];
        assert!(click.is_click);
        assert_eq!(click.time, 1.0);
        assert_eq!(click.position, Point2D::new(400.0, 300.0));
        assert_eq!(click.intensity, 1.0);
    }

    #[test]
    fn test_drag_and_slow_press_are_not_clicks() {
        let drag = vec![
            InputEvent::mouse_down(1.0, 100.0, 100.0, MouseButton::Left),
            InputEvent::mouse_up(1.2, 600.0, 100.0, MouseButton::Left),
        ];
        assert!(extract(&drag).is_empty());

        let long_press = vec![
            InputEvent::mouse_down(1.0, 100.0, 100.0, MouseButton::Left),
            InputEvent::mouse_up(3.0, 100.0, 100.0, MouseButton::Left),
        ];
        assert!(extract(&long_press).is_empty());

        let mismatched = vec![
            InputEvent::mouse_down(1.0, 100.0, 100.0, MouseButton::Left),
            InputEvent::mouse_up(1.1, 100.0, 100.0, MouseButton::Right),
        ];
        assert!(extract(&mismatched).is_empty());
    }

    #[test]
    fn test_slow_hover_emits_single_dwell() {
        let events: Vec<InputEvent> = (0..=60)
            .map(|i| {
                let jitter = if i % 2 == 0 { 0.5 } else { -0.5 };
                InputEvent::cursor_moved(i as f64 / 60.0, 500.0 + jitter, 500.0)
            })
            .collect();

        let samples = extract(&events);
        assert_contract(&samples);
        let dwells: Vec<_> = samples.iter().filter(|s| s.is_dwell).collect();
        assert_eq!(dwells.len(), 1);
        assert_eq!(dwells[0].time, 0.0);
        assert!((dwells[0].position.x - 500.0).abs() < 1.0);
        assert!((dwells[0].intensity - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_parked_cursor_counts_as_dwell() {
        let mut events: Vec<InputEvent> = (0..=30)
            .map(|i| {
                let t = i as f64 / 60.0;
                InputEvent::cursor_moved(t, 100.0 + 1500.0 * t, 400.0)
            })
            .collect();
        // Cursor rests at (850, 400) until it moves again two seconds later.
        events.push(InputEvent::cursor_moved(2.5, 870.0, 400.0));

        let samples = extract(&events);
        assert_contract(&samples);
        let dwell = samples
            .iter()
            .find(|s| s.is_dwell)
            .expect("parked cursor should dwell");
        assert!((dwell.time - 0.5).abs() < 1e-9);
        assert!((dwell.position.x - 850.0).abs() < 1e-6);
    }

    #[test]
    fn test_fast_motion_is_subsampled_and_down_weighted() {
        let events: Vec<InputEvent> = (0..=60)
            .map(|i| {
                let t = i as f64 / 60.0;
                InputEvent::cursor_moved(t, 100.0 + 1000.0 * t, 300.0)
            })
            .collect();

        let samples = extract(&events);
        assert_contract(&samples);
        assert!(samples.len() >= 3 && samples.len() <= 5, "got {}", samples.len());
        for s in &samples {
            assert!(!s.is_click && !s.is_dwell);
            assert!((s.intensity - 0.25).abs() < 1e-12);
        }
    }

    #[test]
    fn test_click_wins_timestamp_collision() {
        let events = vec![
            InputEvent::cursor_moved(0.0, 0.0, 0.0),
            InputEvent::cursor_moved(0.1, 300.0, 0.0),
            InputEvent::mouse_down(0.1, 300.0, 0.0, MouseButton::Left),
            InputEvent::mouse_up(0.15, 300.0, 0.0, MouseButton::Left),
        ];
        let samples = extract(&events);
        assert_contract(&samples);
        let at_collision: Vec<_> = samples.iter().filter(|s| s.time == 0.1).collect();
        assert_eq!(at_collision.len(), 1);
        assert!(at_collision[0].is_click);
    }

    #[test]
    fn test_non_finite_events_are_skipped() {
        let events = vec![
            InputEvent::mouse_down(f64::NAN, 1.0, 1.0, MouseButton::Left),
            InputEvent::mouse_down(1.0, 1.0, 1.0, MouseButton::Left),
            InputEvent::mouse_up(1.05, f64::INFINITY, 1.0, MouseButton::Left),
            InputEvent::mouse_up(1.1, 1.0, 1.0, MouseButton::Left),
        ];
        let samples = extract(&events);
        assert_eq!(samples.len(), 1);
        assert!(samples[0].is_click);
    }

    #[test]
    fn test_intensities_are_clamped() {
        let constraints = ZoomConstraints {
            click_intensity: 4.0,
            ..Default::default()
        };
        let events = vec![
            InputEvent::mouse_down(1.0, 10.0, 10.0, MouseButton::Left),
            InputEvent::mouse_up(1.1, 10.0, 10.0, MouseButton::Left),
        ];
        let samples = AttentionExtractor::default().samples(&events, &constraints);
        assert_eq!(samples[0].intensity, 1.0);
    }

    #[test]
    fn test_coalesce_prefers_higher_intensity_on_equal_priority() {
        let low = AttentionSample {
            time: 2.0,
            position: Point2D::new(1.0, 1.0),
            intensity: 0.2,
            is_click: false,
            is_dwell: false,
        };
        let high = AttentionSample {
            intensity: 0.9,
            position: Point2D::new(2.0, 2.0),
            ..low
        };
        let merged = coalesce_by_time(vec![high, low]);
        assert_eq!(merged, vec![high]);
    }
}
