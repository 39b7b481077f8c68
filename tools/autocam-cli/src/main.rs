//! Autocam CLI: plan virtual camera motion from recorded input events.
//!
//! Usage:
//!   autocam plan <EVENTS>        Plan camera keyframes for an event log
//!   autocam compose <PLAN>       Build a compositor transform timeline
//!   autocam preview <PLAN>       Print CSS-like preview frames for a plan
//!   autocam config               Show or initialize the config file

use std::path::PathBuf;

use autocam_common::config::{config_file_path, AppConfig};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "autocam",
    about = "Automatic virtual camera for screen recordings",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan camera keyframes for a recorded event log
    Plan {
        /// Path to the event log (JSON)
        events: PathBuf,

        /// Capture width in pixels
        #[arg(long)]
        width: f64,

        /// Capture height in pixels
        #[arg(long)]
        height: f64,

        /// Clip duration in seconds (extended to the last event)
        #[arg(long, default_value = "0.0")]
        duration: f64,

        /// Auto zoom intensity [0.0, 1.0] (overrides config)
        #[arg(long)]
        intensity: Option<f64>,

        /// Minimum spacing between keyframes in seconds (overrides config)
        #[arg(long)]
        min_interval: Option<f64>,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Build a compositor transform timeline from a plan
    Compose {
        /// Path to a camera plan (JSON); omit for a static composition
        plan: Option<PathBuf>,

        /// Track natural width in pixels
        #[arg(long)]
        natural_width: f64,

        /// Track natural height in pixels
        #[arg(long)]
        natural_height: f64,

        /// Render width (defaults to natural width)
        #[arg(long)]
        render_width: Option<f64>,

        /// Render height (defaults to natural height)
        #[arg(long)]
        render_height: Option<f64>,

        /// Output frame rate
        #[arg(long, default_value = "30")]
        fps: f64,

        /// Track duration in seconds (defaults to the plan duration)
        #[arg(long)]
        duration: Option<f64>,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print CSS-like preview frames for a plan
    Preview {
        /// Path to a camera plan (JSON)
        plan: PathBuf,

        /// Preview sample rate
        #[arg(long, default_value = "10")]
        fps: f64,
    },

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging depends on the config, so a load failure is reported once
    // the subscriber exists.
    let (config, config_error) = match AppConfig::try_load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    autocam_common::logging::init_logging(&logging)?;
    if let Some(e) = config_error {
        tracing::warn!(
            "Failed to load config at {:?}: {}; using defaults",
            config_file_path(),
            e
        );
    }

    match cli.command {
        Commands::Plan {
            events,
            width,
            height,
            duration,
            intensity,
            min_interval,
            output,
        } => commands::plan::run(commands::plan::PlanArgs {
            events,
            width,
            height,
            duration,
            intensity,
            min_interval,
            output,
            settings: config.auto_zoom,
        }),
        Commands::Compose {
            plan,
            natural_width,
            natural_height,
            render_width,
            render_height,
            fps,
            duration,
            output,
        } => commands::compose::run(commands::compose::ComposeArgs {
            plan,
            natural_width,
            natural_height,
            render_width,
            render_height,
            fps,
            duration,
            output,
        }),
        Commands::Preview { plan, fps } => commands::preview::run(plan, fps),
        Commands::Config { init } => commands::config::run(&config, init),
    }
}
