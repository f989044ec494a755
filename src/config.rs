use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::bands::{default_bands, DifficultyBand};
use crate::record::BenchmarkRecord;

/// Everything the rendering entry point needs besides the records:
/// band overlay, threshold filters, overlay toggle. Passed explicitly so
/// plot variants share one code path instead of module-level state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotConfig {
    pub bands: Vec<DifficultyBand>,
    pub max_score: Option<u32>,
    pub max_time_ms: Option<f64>,
    pub show_bands: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            bands: default_bands(),
            max_score: Some(10000),
            max_time_ms: None,
            show_bands: true,
        }
    }
}

impl PlotConfig {
    /// Threshold predicate for the generation-time plots. Bounds are
    /// exclusive, matching the upstream filters.
    pub fn keeps(&self, record: &BenchmarkRecord) -> bool {
        if let Some(max_score) = self.max_score {
            if record.difficulty_score >= max_score {
                return false;
            }
        }
        if let Some(max_time) = self.max_time_ms {
            if record.generation_time_ms >= max_time {
                return false;
            }
        }
        true
    }
}

pub trait ConfigStore {
    fn load(&self) -> PlotConfig;
    fn save(&self, cfg: &PlotConfig) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        Self {
            path: crate::app_dirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> PlotConfig {
        if let Ok(bytes) = fs::read(&self.path) {
            if let Ok(cfg) = serde_json::from_slice::<PlotConfig>(&bytes) {
                return cfg;
            }
        }
        PlotConfig::default()
    }

    fn save(&self, cfg: &PlotConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}

/// Load a band list from a standalone JSON band file.
pub fn load_bands<P: AsRef<Path>>(
    path: P,
) -> Result<Vec<DifficultyBand>, crate::error::AnalysisError> {
    let bytes = fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}
