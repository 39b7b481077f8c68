pub mod compose;
pub mod config;
pub mod plan;
pub mod preview;

use std::path::{Path, PathBuf};

use autocam_common::error::{AutocamError, AutocamResult};
use autocam_project_model::timeline::CameraPlan;
use serde::Serialize;

/// Read a UTF-8 input file, reporting a missing file distinctly.
pub fn read_input(path: &Path) -> AutocamResult<String> {
    if !path.exists() {
        return Err(AutocamError::file_not_found(path));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Load a camera plan written by `autocam plan`.
pub fn load_plan(path: &Path) -> AutocamResult<CameraPlan> {
    let content = read_input(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Pretty-print `value` as JSON to `output`, or to stdout.
pub fn write_json<T: Serialize>(value: &T, output: Option<&PathBuf>) -> AutocamResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            tracing::info!(path = %path.display(), "Wrote output");
        }
        None => println!("{json}"),
    }
    Ok(())
}
