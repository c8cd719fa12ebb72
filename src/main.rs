use log::info;
use rover_pilot::camera::{CommandCamera, FrameSource, ReplaySource};
use rover_pilot::config::{load_config, RobotConfig};
use rover_pilot::motion::DryRunActuator;
use rover_pilot::{FollowController, LineTracker, WalkController, WalkDecisionEngine};
use std::env;
use std::path::Path;

const DEFAULT_CYCLES: usize = 100;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let config_path = args.next().ok_or_else(usage)?;
    let mode = args.next().ok_or_else(usage)?;
    let cycles = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|e| format!("invalid cycle count {raw:?}: {e}"))?,
        None => DEFAULT_CYCLES,
    };

    let config = load_config(Path::new(&config_path)).map_err(|e| e.to_string())?;
    let source = open_source(&config)?;
    // Motor drivers are board specific; this binary drives the dry-run actuator.
    let actuator = DryRunActuator::new();

    match mode.as_str() {
        "follow" => {
            let tracker = LineTracker::new(config.track);
            let mut controller = FollowController::new(actuator, source, tracker, config.follow);
            let outcome = controller.run(cycles).map_err(|e| e.to_string())?;
            info!("follow outcome: {outcome:?}");
            println!("{outcome:?}");
        }
        "walk" => {
            let engine = WalkDecisionEngine::from_params(config.walk).map_err(|e| e.to_string())?;
            let mut controller = WalkController::new(actuator, source, engine, config.walker);
            if let Some(baseline) = config.baseline {
                controller = controller.with_baseline(baseline);
            }
            if !controller.prepare_action().map_err(|e| e.to_string())? {
                return Err("walk calibration failed".to_string());
            }
            let outcome = controller.run(cycles).map_err(|e| e.to_string())?;
            info!("walk outcome: {outcome:?}");
            println!("{outcome:?}");
        }
        other => return Err(format!("unknown mode {other:?}\n{}", usage())),
    }
    Ok(())
}

fn open_source(config: &RobotConfig) -> Result<Box<dyn FrameSource>, String> {
    match &config.replay_dir {
        Some(dir) => {
            let replay = ReplaySource::open(dir, true).map_err(|e| e.to_string())?;
            info!("replaying {} photos from {}", replay.len(), dir.display());
            Ok(Box::new(replay))
        }
        None => Ok(Box::new(CommandCamera::new(config.camera.clone()))),
    }
}

fn usage() -> String {
    "Usage: rover_pilot <config.json> <follow|walk> [cycles]".to_string()
}
