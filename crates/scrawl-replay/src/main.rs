//! Replay a pointer script and print the resulting drawing as SVG.

use clap::Parser;
use scrawl_core::DrawingConfig;
use scrawl_replay::{ReplayResult, Script, replay, to_svg};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "scrawl-replay",
    about = "Replay a recorded pointer script through a Scrawl canvas and write SVG"
)]
struct Cli {
    /// Pointer script (JSON).
    script: PathBuf,

    /// Drawing configuration (JSON); defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the SVG here instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,
}

fn run(cli: &Cli) -> ReplayResult<()> {
    let config = match &cli.config {
        Some(path) => DrawingConfig::load(path)?,
        None => DrawingConfig::default(),
    };
    let script = Script::load(&cli.script)?;
    let canvas = replay(&script, config)?;
    let svg = to_svg(&canvas)?;

    match &cli.output {
        Some(path) => std::fs::write(path, svg)?,
        None => std::io::stdout().lock().write_all(svg.as_bytes())?,
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Replaying {}", cli.script.display());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("Replay failed: {err}");
            eprintln!("scrawl-replay: {err}");
            ExitCode::FAILURE
        }
    }
}
