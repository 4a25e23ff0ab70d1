use fringe_unwrap::config::unwrap_demo::{self, UnwrapToolConfig};
use fringe_unwrap::image::io::{
    load_grayscale_image, save_float_image, save_float_map, save_image_preview, save_map_preview,
    write_json_file,
};
use fringe_unwrap::image::{GrayImageU8, ImageU8};
use fringe_unwrap::stack::FrameStack;
use fringe_unwrap::{FringeUnwrapper, UnwrapReport};
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args()
        .nth(1)
        .ok_or_else(|| "usage: unwrap_demo <config.json>".to_string())?;
    let config = unwrap_demo::load_config(Path::new(&config_path))?;

    let frames = load_frames(&config)?;
    let views: Vec<ImageU8<'_>> = frames.iter().map(|f| f.as_view()).collect();
    let stack = FrameStack::from_gray_frames(&views).map_err(|e| e.to_string())?;

    let unwrapper = FringeUnwrapper::new(config.params.clone());
    let report = unwrapper
        .process_with_diagnostics(&stack)
        .map_err(|e| e.to_string())?;

    print_text_summary(&report);
    save_artifacts(&config, &report)?;

    Ok(())
}

fn load_frames(config: &UnwrapToolConfig) -> Result<Vec<GrayImageU8>, String> {
    let dir = &config.frames_dir;
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to list {}: {e}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file())
        .collect();
    paths.sort();

    let mut frames = Vec::with_capacity(paths.len());
    for path in &paths {
        frames.push(load_grayscale_image(path)?);
    }
    println!(
        "loaded {} frames from {}",
        frames.len(),
        dir.display()
    );
    Ok(frames)
}

fn print_text_summary(report: &UnwrapReport) {
    let diag = &report.diagnostics;
    println!("Unwrap summary ({}x{})", diag.width, diag.height);
    for axis in [&diag.x, &diag.y] {
        println!(
            "  {} axis: valid={}/{} masked={} orders={}..{} mean_modulation={:.2}",
            axis.axis,
            axis.valid_pixels,
            axis.total_pixels,
            axis.masked_pixels,
            axis.order_min,
            axis.order_max,
            axis.mean_modulation
        );
        let stages: Vec<String> = axis
            .timing
            .stages
            .iter()
            .map(|s| format!("{}={:.3}", s.label, s.elapsed_ms))
            .collect();
        println!(
            "    timings (ms): {} total={:.3}",
            stages.join(" "),
            axis.timing.total_ms
        );
    }
    println!("  total_ms={:.3}", diag.total_ms);
}

fn save_artifacts(config: &UnwrapToolConfig, report: &UnwrapReport) -> Result<(), String> {
    let dir = &config.output.dir;
    std::fs::create_dir_all(dir)
        .map_err(|e| format!("Failed to create output dir {}: {e}", dir.display()))?;

    let result = &report.result;
    save_float_map(&dir.join("phi_unwrapped.big"), &result.x.phase)?;
    save_float_image(&dir.join("phi_modulation.big"), &result.x.modulation)?;
    save_float_map(&dir.join("eta_unwrapped.big"), &result.y.phase)?;
    save_float_image(&dir.join("eta_modulation.big"), &result.y.modulation)?;

    if config.output.previews {
        save_map_preview(&result.x.phase, &dir.join("phi_unwrapped.png"))?;
        save_image_preview(&result.x.modulation, &dir.join("phi_modulation.png"))?;
        save_map_preview(&result.y.phase, &dir.join("eta_unwrapped.png"))?;
        save_image_preview(&result.y.modulation, &dir.join("eta_modulation.png"))?;
    }

    if let Some(path) = &config.output.diagnostics_json {
        write_json_file(path, &report.diagnostics)?;
        println!("diagnostics written to {}", path.display());
    }

    println!("float maps written to {}", dir.display());
    Ok(())
}
