//! Plan virtual camera keyframes for a recorded event log.

use std::path::PathBuf;

use autocam_common::config::AutoZoomSettings;
use autocam_common::error::AutocamError;
use autocam_processing_core::{plan_fingerprint, CameraPlanner, ZoomConstraints};
use autocam_project_model::event::parse_event_log;
use autocam_project_model::geometry::Size2D;

pub struct PlanArgs {
    pub events: PathBuf,
    pub width: f64,
    pub height: f64,
    pub duration: f64,
    pub intensity: Option<f64>,
    pub min_interval: Option<f64>,
    pub output: Option<PathBuf>,
    pub settings: AutoZoomSettings,
}

pub fn run(args: PlanArgs) -> anyhow::Result<()> {
    let source_size = Size2D::new(args.width, args.height);
    if source_size.is_degenerate() || !args.width.is_finite() || !args.height.is_finite() {
        return Err(AutocamError::processing(format!(
            "Capture size must be positive, got {}x{}",
            args.width, args.height
        ))
        .into());
    }

    let content = super::read_input(&args.events)
        .map_err(|e| anyhow::anyhow!("Failed to read events: {e}"))?;
    let mut log =
        parse_event_log(&content).map_err(|e| anyhow::anyhow!("Failed to parse events: {e}"))?;

    if !log.is_time_ordered() {
        tracing::warn!("Event log is not time-ordered; sorting by timestamp");
        log.sort_by_time();
    }
    eprintln!("Loaded {} events", log.events.len());

    if !args.settings.is_enabled {
        tracing::info!("Auto zoom is disabled in config; planning on explicit request");
    }
    let settings = AutoZoomSettings {
        intensity: args.intensity.unwrap_or(args.settings.intensity),
        minimum_keyframe_interval: args
            .min_interval
            .unwrap_or(args.settings.minimum_keyframe_interval),
        ..args.settings
    };
    let constraints = ZoomConstraints::from_settings(&settings);

    let planner = CameraPlanner::with_defaults();
    let plan = planner.plan(&log.events, source_size, args.duration, &constraints);
    let fingerprint = plan_fingerprint(&log.events, source_size, args.duration, &constraints);

    tracing::debug!(fingerprint = %format!("{fingerprint:016x}"), "Plan inputs");
    eprintln!(
        "Planned {} keyframes over {:.2}s (max zoom {:.2})",
        plan.keyframes.len(),
        plan.duration,
        constraints.zoom_ceiling()
    );

    super::write_json(&plan, args.output.as_ref())
        .map_err(|e| anyhow::anyhow!("Failed to write plan: {e}"))?;
    Ok(())
}
