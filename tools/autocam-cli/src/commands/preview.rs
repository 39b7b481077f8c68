//! Print CSS-like preview frames for a camera plan.

use std::path::PathBuf;

use autocam_processing_core::camera_preview::simulate_camera_motion;

pub fn run(plan_path: PathBuf, fps: f64) -> anyhow::Result<()> {
    let plan = super::load_plan(&plan_path)
        .map_err(|e| anyhow::anyhow!("Failed to load plan: {e}"))?;

    let frames = simulate_camera_motion(&plan, fps);
    tracing::debug!(frames = frames.len(), "Simulated camera motion");

    for frame in &frames {
        println!("{:>8.3}s  {}", frame.time_secs, frame.css_transform());
    }
    Ok(())
}
