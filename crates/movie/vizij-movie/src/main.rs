//! vizij-movie
//!
//! Reads a camera script and a viewer snapshot, runs the movie pipeline and
//! writes the dense per-frame track (or the keyframes) as JSON. Rendering the
//! frames is left to the host viewer.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;
use vizij_movie_core::{
    export_track_json, MovieConfig, ScriptSession, StepPolicy, ViewerSnapshot, ViewerState,
    VisibilityMode,
};

/// Bake a Vizij camera script into a per-frame viewer track
#[derive(Parser, Debug)]
#[command(name = "vizij-movie")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Camera script to interpret
    script: PathBuf,

    /// Viewer snapshot JSON seeding frame 0 (defaults to an identity camera)
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Number of layers for the default snapshot
    #[arg(long, default_value_t = 1)]
    layers: usize,

    /// Initial time index for the default snapshot (enables the time axis)
    #[arg(long)]
    time: Option<i64>,

    /// Baking config JSON
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Intermediate frames per segment when using fixed steps
    #[arg(long)]
    inter_steps: Option<usize>,

    /// Use a fixed step count per segment instead of the script's frame gaps
    #[arg(long)]
    fixed_steps: bool,

    /// Hold layer visibility between keyframes instead of thresholding
    #[arg(long)]
    hold_visibility: bool,

    /// Write keyframes instead of the dense track
    #[arg(long)]
    keyframes: bool,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<MovieConfig> {
    let mut cfg = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => MovieConfig::default(),
    };
    if let Some(steps) = args.inter_steps {
        cfg.inter_steps = steps;
    }
    if args.fixed_steps {
        cfg.step_policy = StepPolicy::Fixed;
    }
    if args.hold_visibility {
        cfg.visibility_mode = VisibilityMode::Hold;
    }
    Ok(cfg)
}

fn load_snapshot(args: &Args) -> Result<ViewerSnapshot> {
    match &args.snapshot {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read snapshot {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse snapshot {}", path.display()))
        }
        None => Ok(ViewerState {
            visibility: vec![true; args.layers],
            time: args.time,
            ..ViewerState::default()
        }),
    }
}

fn write_output(out: Option<&Path>, value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    match out {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = load_config(&args)?;
    let snapshot = load_snapshot(&args)?;
    info!(
        layers = snapshot.layer_count(),
        timed = snapshot.has_time_axis(),
        "loaded viewer snapshot"
    );

    let text = fs::read_to_string(&args.script)
        .with_context(|| format!("failed to read script {}", args.script.display()))?;
    let session = ScriptSession::from_text(&text)
        .with_context(|| format!("failed to compile {}", args.script.display()))?;

    let output = if args.keyframes {
        let keyframes = session.keyframes(&snapshot)?;
        info!(keyframes = keyframes.len(), "extracted keyframes");
        serde_json::to_value(&keyframes)?
    } else {
        let track = session.track(&snapshot, &cfg)?;
        info!(
            frames = track.len(),
            end_frame = session.end_frame(),
            "baked track"
        );
        export_track_json(&track)
    };

    write_output(args.out.as_deref(), &output)
}
