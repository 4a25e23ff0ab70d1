//! I/O helpers for camera frames and computed maps.
//!
//! - `load_grayscale_image`: read a PNG/TIFF/etc. into an owned 8-bit gray buffer.
//! - `save_float_map` / `save_float_image` / `load_float_map`: compact binary
//!   float-map format used for phase, modulation and deviation artifacts.
//! - `save_map_preview` / `save_image_preview`: normalized grayscale PNG dumps.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{GrayImageU8, ImageF64};
use crate::types::MaskedMap;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Type code for 32-bit float samples in the float-map header.
const FLOAT_TYPE_CODE: u16 = 0x14;

/// Sentinel written in place of invalid samples so consumers without
/// NaN-aware tooling can still parse the file.
const UNDEFINED: f32 = 3.402823466e38;

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<GrayImageU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    Ok(GrayImageU8::new(width, height, data))
}

/// Write a map to the binary float format: a little-endian header
/// `[width, height, 0x14, 0, 0]` of five u16 values followed by row-major
/// f32 samples. Invalid pixels are stored as the `UNDEFINED` sentinel.
pub fn save_float_map(path: &Path, map: &MaskedMap) -> Result<(), String> {
    let samples = map
        .data
        .iter()
        .zip(&map.valid)
        .map(|(&v, &ok)| if ok && v.is_finite() { v as f32 } else { UNDEFINED });
    write_float_file(path, map.w, map.h, samples)
}

/// Write an always-valid map (e.g. modulation) to the binary float format.
pub fn save_float_image(path: &Path, image: &ImageF64) -> Result<(), String> {
    let samples = image
        .data
        .iter()
        .map(|&v| if v.is_finite() { v as f32 } else { UNDEFINED });
    write_float_file(path, image.w, image.h, samples)
}

fn write_float_file(
    path: &Path,
    w: usize,
    h: usize,
    samples: impl Iterator<Item = f32>,
) -> Result<(), String> {
    if w > u16::MAX as usize || h > u16::MAX as usize {
        return Err(format!(
            "map {}x{} exceeds the u16 header range of {}",
            w,
            h,
            path.display()
        ));
    }
    ensure_parent_dir(path)?;
    let mut buffer = Vec::with_capacity(10 + 4 * w * h);
    for field in [w as u16, h as u16, FLOAT_TYPE_CODE, 0, 0] {
        buffer.extend_from_slice(&field.to_le_bytes());
    }
    for v in samples {
        buffer.extend_from_slice(&v.to_le_bytes());
    }
    fs::write(path, buffer).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

/// Read a binary float map back into a `MaskedMap`. Sentinel and non-finite
/// samples become invalid pixels.
pub fn load_float_map(path: &Path) -> Result<MaskedMap, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    if bytes.len() < 10 {
        return Err(format!("{}: truncated header", path.display()));
    }
    let field = |i: usize| u16::from_le_bytes([bytes[2 * i], bytes[2 * i + 1]]);
    let (w, h) = (field(0) as usize, field(1) as usize);
    let type_code = field(2);
    if type_code != FLOAT_TYPE_CODE {
        return Err(format!(
            "{}: unsupported sample type 0x{type_code:02x}, expected 0x{FLOAT_TYPE_CODE:02x}",
            path.display()
        ));
    }
    let payload = &bytes[10..];
    if payload.len() != 4 * w * h {
        return Err(format!(
            "{}: payload holds {} bytes, expected {} for {w}x{h}",
            path.display(),
            payload.len(),
            4 * w * h
        ));
    }
    let mut data = Vec::with_capacity(w * h);
    let mut valid = Vec::with_capacity(w * h);
    for chunk in payload.chunks_exact(4) {
        let v = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        if v.is_finite() && v < UNDEFINED {
            data.push(v as f64);
            valid.push(true);
        } else {
            data.push(0.0);
            valid.push(false);
        }
    }
    Ok(MaskedMap::from_parts(w, h, data, valid))
}

/// Save a masked map as a grayscale PNG, min/max normalized over the valid
/// pixels; invalid pixels render black.
pub fn save_map_preview(map: &MaskedMap, path: &Path) -> Result<(), String> {
    let (lo, hi) = value_range(
        map.data
            .iter()
            .zip(&map.valid)
            .filter_map(|(&v, &ok)| (ok && v.is_finite()).then_some(v)),
    );
    save_preview_png(path, map.w, map.h, lo, hi, |i| {
        map.valid[i].then_some(map.data[i])
    })
}

/// Save an always-valid map as a grayscale PNG, min/max normalized.
pub fn save_image_preview(image: &ImageF64, path: &Path) -> Result<(), String> {
    let (lo, hi) = value_range(image.data.iter().copied().filter(|v| v.is_finite()));
    save_preview_png(path, image.w, image.h, lo, hi, |i| {
        image.data[i].is_finite().then_some(image.data[i])
    })
}

fn value_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    (lo, hi)
}

fn save_preview_png(
    path: &Path,
    w: usize,
    h: usize,
    lo: f64,
    hi: f64,
    sample: impl Fn(usize) -> Option<f64>,
) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let span = if hi > lo { hi - lo } else { 1.0 };
    let mut out = GrayImage::new(w as u32, h as u32);
    for y in 0..h {
        for x in 0..w {
            let px = match sample(y * w + x) {
                Some(v) => (((v - lo) / span) * 255.0).clamp(0.0, 255.0) as u8,
                None => 0,
            };
            out.put_pixel(x as u32, y as u32, Luma([px]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
