use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct FlatnessToolConfig {
    /// Unwrapped phase map in the binary float format.
    pub phase_map: PathBuf,
    /// Total degree of the fitted polynomial.
    #[serde(default = "default_degree")]
    pub degree: usize,
    pub output: FlatnessOutputConfig,
}

fn default_degree() -> usize {
    6
}

#[derive(Debug, Deserialize)]
pub struct FlatnessOutputConfig {
    /// Destination of the deviation map.
    pub deviation_out: PathBuf,
    /// Optional JSON dump of the fitted coefficients.
    #[serde(default)]
    pub coefficients_json: Option<PathBuf>,
    /// Optional normalized PNG preview of the deviation map.
    #[serde(default)]
    pub preview: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<FlatnessToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: FlatnessToolConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}
