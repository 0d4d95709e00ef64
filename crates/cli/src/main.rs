#![deny(unsafe_code)]
//! CLI binary for the flowmesh animated mesh.
//!
//! Subcommands:
//! - `render` — run a scene N ticks at a fixed fps, write a PNG frame
//! - `defaults` — print the default parameters and style as JSON
//!
//! The render loop is an offline stand-in for the host clock: tick `i`
//! gets the timestamp `i * 1000 / fps` milliseconds.

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use flowmesh_core::{FlowParams, Scene, SceneConfig, Style};
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "flowmesh", about = "Animated mesh background renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scene for N ticks and write the final frame as a PNG.
    Render {
        /// Viewport width.
        #[arg(short = 'W', long, default_value_t = 800.0)]
        width: f64,

        /// Viewport height.
        #[arg(short = 'H', long, default_value_t = 600.0)]
        height: f64,

        /// Number of simulation ticks.
        #[arg(short, long, default_value_t = 300)]
        ticks: usize,

        /// Simulated frame rate driving the tick timestamps.
        #[arg(long, default_value_t = 60.0)]
        fps: f64,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Parameter overrides as a JSON object (see `defaults`).
        #[arg(long, default_value = "{}")]
        params: String,

        /// Style overrides as a JSON object (see `defaults`).
        #[arg(long, default_value = "{}")]
        style: String,

        /// Anchor spacing of the generated grid mesh.
        #[arg(long, default_value_t = 120.0)]
        spacing: f64,

        /// Scene description file; replaces the geometry and seed flags.
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Held pointer position "X,Y", re-applied before every tick.
        #[arg(long)]
        pointer: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,
    },
    /// Print the default parameters and style as JSON.
    Defaults,
}

fn parse_pointer(spec: &str) -> Result<(f64, f64), CliError> {
    let bad = || CliError::Input(format!("invalid --pointer '{spec}', expected X,Y"));
    let (x, y) = spec.split_once(',').ok_or_else(bad)?;
    Ok((
        x.trim().parse().map_err(|_| bad())?,
        y.trim().parse().map_err(|_| bad())?,
    ))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Defaults => {
            let info = serde_json::json!({
                "params": FlowParams::default(),
                "style": Style::default(),
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
        Command::Render {
            width,
            height,
            ticks,
            fps,
            seed,
            params,
            style,
            spacing,
            scene,
            pointer,
            output,
        } => {
            if !(fps > 0.0) {
                return Err(CliError::Input(format!("invalid --fps {fps}, must be positive")));
            }
            let pointer = pointer.as_deref().map(parse_pointer).transpose()?;

            let style: Style = serde_json::from_str(&style)
                .map_err(|e| CliError::Input(format!("invalid --style JSON: {e}")))?;

            let config = match &scene {
                Some(path) => {
                    let text = std::fs::read_to_string(path)
                        .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
                    serde_json::from_str(&text)
                        .map_err(|e| CliError::Input(format!("invalid scene JSON: {e}")))?
                }
                None => {
                    let params: serde_json::Value = serde_json::from_str(&params)
                        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
                    SceneConfig {
                        width,
                        height,
                        seed,
                        params,
                        mesh: None,
                        mesh_spacing: Some(spacing),
                    }
                }
            };

            let mut sim = Scene::from_config(&config)?;
            let frame_ms = 1000.0 / fps;
            for i in 0..ticks {
                if let Some((px, py)) = pointer {
                    sim.pointer_moved(px, py);
                }
                sim.tick(i as f64 * frame_ms);
            }

            flowmesh_render::snapshot::render_png(&sim, &style, &output)?;

            if cli.json {
                let info = serde_json::json!({
                    "width": config.width,
                    "height": config.height,
                    "ticks": ticks,
                    "fps": fps,
                    "seed": config.seed,
                    "points": sim.points().len(),
                    "triangles": sim.triangles().len(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {}x{} ({} points, {} ticks, seed {}) -> {}",
                    config.width,
                    config.height,
                    sim.points().len(),
                    ticks,
                    config.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
