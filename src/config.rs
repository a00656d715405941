//! Pipeline configuration: `revmap.toml` on disk, overridable by CLI flags.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default = "default_include")]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
    #[serde(default)]
    pub compute_metrics: bool,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_include() -> Vec<String> {
    vec!["**/*".to_string()]
}

fn default_max_depth() -> u32 {
    64
}

fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("revmap-out")
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            include: default_include(),
            exclude: Vec::new(),
            max_depth: default_max_depth(),
            max_file_bytes: default_max_file_bytes(),
            compute_metrics: true,
            output_dir: default_output_dir(),
        }
    }
}

impl PipelineConfig {
    /// Loads `revmap.toml` from `root` if present; falls back to defaults
    /// when absent. A malformed file is a hard `InvalidInput`-style error,
    /// not absorbed, since config problems should surface before any work
    /// starts.
    pub fn load(root: &Path) -> anyhow::Result<Self> {
        let path = root.join("revmap.toml");
        if !path.exists() {
            return Ok(PipelineConfig::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config: PipelineConfig = toml::from_str(&content)?;
        Ok(config)
    }
}
