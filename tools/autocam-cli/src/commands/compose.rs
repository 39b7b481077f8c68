//! Build a compositor transform timeline from a camera plan.

use std::path::PathBuf;

use autocam_common::error::AutocamError;
use autocam_project_model::geometry::Size2D;
use autocam_render_engine::{build_composition, TrackInfo};

pub struct ComposeArgs {
    pub plan: Option<PathBuf>,
    pub natural_width: f64,
    pub natural_height: f64,
    pub render_width: Option<f64>,
    pub render_height: Option<f64>,
    pub fps: f64,
    pub duration: Option<f64>,
    pub output: Option<PathBuf>,
}

pub fn run(args: ComposeArgs) -> anyhow::Result<()> {
    let plan = args
        .plan
        .as_deref()
        .map(super::load_plan)
        .transpose()
        .map_err(|e| anyhow::anyhow!("Failed to load plan: {e}"))?;

    let natural_size = Size2D::new(args.natural_width, args.natural_height);
    let render_size = Size2D::new(
        args.render_width.unwrap_or(args.natural_width),
        args.render_height.unwrap_or(args.natural_height),
    );
    if render_size.is_degenerate() {
        return Err(AutocamError::render(format!(
            "Render size must be positive, got {}x{}",
            render_size.width, render_size.height
        ))
        .into());
    }

    let duration = args
        .duration
        .or_else(|| plan.as_ref().map(|p| p.duration))
        .ok_or_else(|| AutocamError::config("--duration is required without a plan"))?;
    let track = TrackInfo::new(natural_size, duration);

    match build_composition(&track, render_size, args.fps, plan.as_ref()) {
        Some(composition) => {
            eprintln!(
                "Built {} segments over {:.2}s at {}x{}",
                composition.segments.len(),
                composition.duration,
                render_size.width,
                render_size.height
            );
            super::write_json(&composition, args.output.as_ref())
                .map_err(|e| anyhow::anyhow!("Failed to write composition: {e}"))?;
        }
        None => eprintln!("Nothing to compose: track plays through unchanged."),
    }
    Ok(())
}
