//! Robot Commander entry point
//!
//! Parses the command line, loads settings and the world, then runs either
//! the desktop window (feature `gui`) or a headless scripted session.

use std::path::PathBuf;

use clap::Parser;

use robot_commander::platform::{Script, ScriptedPlatform};
use robot_commander::{AppMode, Commander, Result, Settings};
#[cfg(not(feature = "gui"))]
use robot_commander::Error;

#[derive(Parser, Debug)]
#[command(name = "robot-commander", version, about = "Place and drive a simulated robot")]
struct Cli {
    /// creator: place entities, manual: drive the robot
    #[arg(short, long, default_value_t = AppMode::Creator)]
    mode: AppMode,

    /// Settings file (JSON)
    #[arg(short, long, default_value = "settings.json")]
    config: PathBuf,

    /// World document to load at start and save on quit
    #[arg(short, long)]
    world: Option<PathBuf>,

    /// Replay this input script headless instead of opening a window
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Quit a headless session after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Pace headless sessions at the configured frame rate
    #[arg(long)]
    realtime: bool,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    write_config: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    log::info!("Robot Commander starting...");

    let settings = Settings::load(&cli.config)?;
    if cli.write_config {
        return settings.save(&cli.config);
    }

    let mut commander = Commander::new(&settings, cli.mode)?;

    if let Some(world) = &cli.world {
        if world.exists() {
            commander.load_world(world)?;
        } else {
            log::info!("{} does not exist yet, starting empty", world.display());
        }
        commander = commander.with_world_file(world);
    }

    if cli.script.is_some() || cli.frames.is_some() {
        return run_headless(commander, &cli);
    }

    run_window(commander, &cli)
}

fn run_headless(mut commander: Commander, cli: &Cli) -> Result<()> {
    let mut script = match &cli.script {
        Some(path) => Script::load(path)?,
        None => Script::default(),
    };
    if let Some(frames) = cli.frames {
        script = script.quit_after(frames);
    }

    let mut platform = ScriptedPlatform::new(script);
    if cli.realtime {
        platform = platform.realtime();
    }

    commander.run(&mut platform)?;
    log::info!("Headless session ran {} frames", platform.frames_presented());

    let document = commander.to_document()?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

#[cfg(feature = "gui")]
fn run_window(commander: Commander, _cli: &Cli) -> Result<()> {
    robot_commander::platform::egui::run(commander, "Robot Commander")
}

#[cfg(not(feature = "gui"))]
fn run_window(_commander: Commander, _cli: &Cli) -> Result<()> {
    Err(Error::Platform(
        "built without the gui feature; pass --script or --frames".to_string(),
    ))
}
