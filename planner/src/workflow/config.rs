use anyhow::Context;
use mixcore::prelude::StageConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub weeks: usize,
    pub shift_weeks: usize,
    pub scale_span: f64,
    pub baseline: f64,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            weeks: 36,
            shift_weeks: 2,
            scale_span: 0.05,
            baseline: 0.65,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(weeks: usize, shift_weeks: usize, scale_span: f64, baseline: f64) -> Self {
        Self {
            weeks,
            shift_weeks,
            scale_span,
            baseline,
        }
    }

    pub fn to_stage_config(&self) -> StageConfig {
        StageConfig {
            weeks: self.weeks,
            shift_weeks: self.shift_weeks,
            scale_span: self.scale_span,
            baseline: self.baseline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn config_from_args_produces_stage_config() {
        let cfg = WorkflowConfig::from_args(18, 3, 0.1, 0.5);
        let stage = cfg.to_stage_config();
        assert_eq!(stage.weeks, 18);
        assert_eq!(stage.shift_weeks, 3);
    }

    #[test]
    fn zero_week_config_passes_through() {
        let cfg = WorkflowConfig::from_args(0, 2, 0.05, 0.65);
        assert_eq!(cfg.to_stage_config().weeks, 0);
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"weeks: 24\nshift_weeks: 1\nscale_span: 0.05\nbaseline: 0.65\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.weeks, 24);
        assert_eq!(cfg.shift_weeks, 1);
    }

    #[test]
    fn partial_yaml_falls_back_to_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"weeks: 18\n").unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.weeks, 18);
        assert_eq!(cfg.shift_weeks, 2);
        assert!((cfg.baseline - 0.65).abs() < 1e-12);
    }
}
