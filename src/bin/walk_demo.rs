use rover_pilot::config::demo::load_walk_demo;
use rover_pilot::diagnostics::WalkReport;
use rover_pilot::image::io::{load_rgb_frame, save_gray_frame, write_json_file};
use rover_pilot::image::resample::downsample_area;
use rover_pilot::image::intensity_stats;
use rover_pilot::walk::WalkDecisionEngine;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_walk_demo(Path::new(&config_path)).map_err(|e| e.to_string())?;
    let engine = WalkDecisionEngine::from_params(config.walk).map_err(|e| e.to_string())?;

    let start = Instant::now();
    let gray = load_rgb_frame(&config.input)
        .map_err(|e| e.to_string())?
        .to_gray();
    let baseline = config
        .baseline
        .unwrap_or_else(|| intensity_stats(&gray.as_view()).mean);
    let (w, h) = engine.patch_size();
    let patch = downsample_area(&gray, w, h);
    save_gray_frame(&patch, &config.output.patch_image).map_err(|e| e.to_string())?;

    let t = Instant::now();
    let eval = engine.evaluate(&patch, baseline);
    let mut report = WalkReport::new(0, config.input.clone(), baseline);
    report.timings.lap("classify", t);
    report.patch = Some(config.output.patch_image.clone());
    report.patch_mean = eval.stats.mean;
    report.patch_std = eval.stats.std_dev;
    report.signal = eval.signal;
    report.confidence = eval.scored.map(|s| s.confidence);
    report.set_action(eval.decision);
    report.timings.finish(start);

    write_json_file(&config.output.result_json, &report).map_err(|e| e.to_string())?;
    println!("[{}] {}", engine.classifier_name(), report.summary());
    Ok(())
}

fn usage() -> String {
    "Usage: walk_demo <config.json>".to_string()
}
