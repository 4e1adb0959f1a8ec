//! Voxel Sculptor Headless Simulator
//!
//! Runs a sculpting session without a window. Input comes from a JSON script,
//! the sculpture can be loaded from and saved to a binary snapshot.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p sculptor-sim -- [OPTIONS]
//! ```
//!
//! ## Script format
//!
//! ```json
//! { "steps": [
//!     { "frames": 30, "hold": [{ "Key": "KeyW" }] },
//!     { "aim": [0.0, -1.2] },
//!     { "tap": [{ "Mouse": "Left" }] },
//!     { "frames": 60, "look": [4.0, 0.0] }
//! ] }
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod script;
mod sink;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use sculptor_app::{init_logging, Runner, Sculptor, SculptorConfig, SculptureSnapshot};
use sculptor_input::CursorMode;

use crate::script::Script;
use crate::sink::LogSink;

#[derive(Parser, Debug)]
#[command(name = "sculptor-sim")]
#[command(about = "Run a voxel sculpting session from scripted input")]
struct Cli {
    /// Session config (JSON); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input script (JSON)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Snapshot to start from
    #[arg(long)]
    load: Option<PathBuf>,

    /// Where to write the final snapshot
    #[arg(long)]
    save: Option<PathBuf>,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Idle frames to run after the script
    #[arg(short, long, default_value_t = 0)]
    frames: u32,

    /// Start with the cursor released, so mouse look is ignored
    #[arg(long)]
    unlocked: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SculptorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SculptorConfig::default(),
    };
    let script = match &cli.script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };

    let mut sculptor = Sculptor::new(config)?;
    if !cli.unlocked {
        sculptor.input_mut().set_cursor_mode(CursorMode::Locked);
    }
    if let Some(path) = &cli.load {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let snapshot = SculptureSnapshot::decode(&bytes)?;
        sculptor.load_snapshot(&snapshot);
    }

    info!(
        script_frames = script.frame_count(),
        idle_frames = cli.frames,
        dt = cli.dt,
        "running session"
    );

    let mut runner = Runner::new(sculptor, LogSink::default());
    script.play(&mut runner, cli.dt, |_| {})?;
    for _ in 0..cli.frames {
        runner.step(cli.dt)?;
    }
    let (sculptor, sink) = runner.finish();

    if let Some(path) = &cli.save {
        let bytes = sculptor.sculpture().snapshot().encode()?;
        fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), voxels = sculptor.sculpture().len(), "snapshot saved");
    }

    let controller = sculptor.controller();
    let position = controller.position();
    println!("frames:   {}", sink.frames);
    println!("voxels:   {}", sculptor.sculpture().len());
    println!(
        "edits:    {} placed, {} removed, {} rejected",
        sink.placed, sink.removed, sink.rejected
    );
    println!(
        "camera:   ({:.2}, {:.2}, {:.2}) {:?}",
        position.x,
        position.y,
        position.z,
        controller.mode()
    );
    println!(
        "tool:     {:?} {:?} grid {}",
        sculptor.tools().action,
        sculptor.tools().kind,
        sculptor.tools().grid_size.get()
    );

    Ok(())
}
