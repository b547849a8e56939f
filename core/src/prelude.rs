use serde::{Deserialize, Serialize};

use crate::plan::{ChannelParams, ChannelSpend, FlightingMatrix};

/// Shared configuration for each model stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageConfig {
    /// Planning horizon in weeks.
    pub weeks: usize,
    /// Weeks of lag applied before contribution shows up in the display band.
    pub shift_weeks: usize,
    /// Width of the normalised display band above the baseline.
    pub scale_span: f64,
    /// Awareness level shown when no contribution lands in a week.
    pub baseline: f64,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            weeks: 36,
            shift_weeks: 2,
            scale_span: 0.05,
            baseline: 0.65,
        }
    }
}

/// Input payload for a model stage: the plan tables plus whatever series the
/// previous stage produced.
#[derive(Debug, Clone)]
pub struct StageInput {
    pub channels: Vec<ChannelParams>,
    pub flighting: FlightingMatrix,
    pub series: Vec<f64>,
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub series: Vec<f64>,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and telemetry.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub spend_rows: Option<Vec<ChannelSpend>>,
    pub weekly_totals: Option<Vec<f64>>,
    pub notes: Vec<String>,
}

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug)]
pub enum StageError {
    #[error("buffer exhaustion: {0}")]
    BufferExhaustion(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type StageResult<T> = Result<T, StageError>;

/// Trait describing the object-oriented model stages.
pub trait ModelStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()>;
    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput>;
    fn cleanup(&mut self);
}
