use rover_pilot::config::demo::load_track_demo;
use rover_pilot::image::io::{load_rgb_frame, write_json_file};
use rover_pilot::track::LineTracker;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_track_demo(Path::new(&config_path)).map_err(|e| e.to_string())?;

    let frame = load_rgb_frame(&config.input).map_err(|e| e.to_string())?;
    let tracker = LineTracker::new(config.track);
    let report = tracker.extract_with_report(&frame.to_gray());

    write_json_file(&config.output.result_json, &report).map_err(|e| e.to_string())?;
    println!("{}", report.summary());
    println!(
        "Saved report to {} ({:.2} ms)",
        config.output.result_json.display(),
        report.timings.total_ms
    );
    Ok(())
}

fn usage() -> String {
    "Usage: track_demo <config.json>".to_string()
}
