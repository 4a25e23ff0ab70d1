use crate::unwrap::UnwrapParams;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct UnwrapToolConfig {
    /// Directory holding the frame stack as individually numbered images,
    /// ordered by filename.
    pub frames_dir: PathBuf,
    #[serde(default)]
    pub params: UnwrapParams,
    pub output: UnwrapOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct UnwrapOutputConfig {
    /// Directory receiving the float-map artifacts.
    pub dir: PathBuf,
    /// Also dump normalized PNG previews of each map.
    #[serde(default)]
    pub previews: bool,
    /// Optional JSON diagnostics report.
    #[serde(default)]
    pub diagnostics_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<UnwrapToolConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    let config: UnwrapToolConfig = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))?;
    Ok(config)
}
