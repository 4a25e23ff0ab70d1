use fringe_unwrap::config::flatness_demo::{self, FlatnessToolConfig};
use fringe_unwrap::image::io::{load_float_map, save_float_map, save_map_preview, write_json_file};
use fringe_unwrap::types::MaskedMap;
use fringe_unwrap::{deviation_map, fit_surface};
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
        .ok_or_else(|| "usage: flatness_demo <config.json>".to_string())?;
    let config = flatness_demo::load_config(Path::new(&config_path))?;

    let phase = load_float_map(&config.phase_map)?;
    println!(
        "loaded {}x{} phase map, {} valid pixels",
        phase.w,
        phase.h,
        phase.valid_count()
    );

    let surface = fit_surface(&phase, config.degree).map_err(|e| e.to_string())?;
    let deviation = deviation_map(&phase, &surface);
    print_deviation_stats(&deviation, config.degree);

    save_artifacts(&config, &surface, &deviation)?;
    Ok(())
}

fn print_deviation_stats(deviation: &MaskedMap, degree: usize) {
    let mut count = 0usize;
    let mut sum = 0.0f64;
    let mut sum_sq = 0.0f64;
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for (&d, &ok) in deviation.data.iter().zip(&deviation.valid) {
        if ok {
            count += 1;
            sum += d;
            sum_sq += d * d;
            lo = lo.min(d);
            hi = hi.max(d);
        }
    }
    if count == 0 {
        println!("degree-{degree} fit: no valid pixels in deviation map");
        return;
    }
    let mean = sum / count as f64;
    let rms = (sum_sq / count as f64).sqrt();
    println!(
        "degree-{degree} deviation: mean={mean:.6} rms={rms:.6} min={lo:.6} max={hi:.6} over {count} px"
    );
}

fn save_artifacts(
    config: &FlatnessToolConfig,
    surface: &fringe_unwrap::PolySurface,
    deviation: &MaskedMap,
) -> Result<(), String> {
    save_float_map(&config.output.deviation_out, deviation)?;
    println!(
        "deviation map written to {}",
        config.output.deviation_out.display()
    );

    if let Some(path) = &config.output.coefficients_json {
        write_json_file(path, surface)?;
        println!("fit coefficients written to {}", path.display());
    }
    if let Some(path) = &config.output.preview {
        save_map_preview(deviation, path)?;
    }
    Ok(())
}
