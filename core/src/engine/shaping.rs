use crate::engine::buffer_pool::BufferPool;
use crate::math::series::SeriesHelper;
use crate::math::stats::StatsHelper;
use crate::prelude::{
    ModelStage, StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult,
};
use crate::telemetry::log::LogManager;

/// Shaping stage that lags the raw contribution series, normalises it into
/// the display span and lifts it onto the awareness baseline.
pub struct ShapingStage {
    pool: BufferPool,
    config: Option<StageConfig>,
    logger: LogManager,
}

impl ShapingStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            config: None,
            logger: LogManager::scoped("shaping"),
        }
    }
}

impl ModelStage for ShapingStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        if input.series.is_empty() {
            return Err(StageError::InvalidInput("no series to shape".into()));
        }

        let lagged = SeriesHelper::shift_right(&input.series, config.shift_weeks);
        let scaled = StatsHelper::scale_to_span(&lagged, config.scale_span);

        let mut shaped = self.pool.checkout(scaled.len())?;
        for (slot, value) in shaped.iter_mut().zip(&scaled) {
            *slot = config.baseline + value;
        }

        let (low, high) =
            StatsHelper::min_max(&shaped).unwrap_or((config.baseline, config.baseline));
        self.logger.record(&format!(
            "shaped series into [{:.3}, {:.3}] after a {}-week lag",
            low, high, config.shift_weeks
        ));

        let metadata = StageMetadata {
            notes: vec![
                format!("Display band [{:.3}, {:.3}]", low, high),
                format!("Contribution lag {} weeks", config.shift_weeks),
            ],
            ..Default::default()
        };

        Ok(StageOutput {
            series: shaped,
            metadata,
        })
    }

    fn cleanup(&mut self) {
        self.pool.reset();
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::FlightingMatrix;

    fn config_for(weeks: usize) -> StageConfig {
        StageConfig {
            weeks,
            ..StageConfig::default()
        }
    }

    fn shape(series: Vec<f64>, weeks: usize) -> Vec<f64> {
        let mut stage = ShapingStage::new(2);
        stage.initialize(&config_for(weeks)).unwrap();
        let output = stage
            .execute(StageInput {
                channels: Vec::new(),
                flighting: FlightingMatrix::new(weeks, Vec::new()),
                series,
            })
            .unwrap();
        stage.cleanup();
        output.series
    }

    #[test]
    fn lagged_weeks_sit_on_the_baseline() {
        let shaped = shape(vec![5.0, 5.0, 10.0, 5.0], 4);
        assert!((shaped[0] - 0.65).abs() < 1e-12);
        assert!((shaped[1] - 0.65).abs() < 1e-12);
    }

    #[test]
    fn flat_series_collapses_to_baseline() {
        // An all-dark plan produces a zero raw series, which stays flat
        // through the lag and has no spread to normalise.
        let shaped = shape(vec![0.0; 6], 6);
        assert!(shaped.iter().all(|&v| (v - 0.65).abs() < 1e-12));
    }

    #[test]
    fn shaped_series_stays_inside_display_band() {
        let shaped = shape(vec![1.0, 9.0, 4.0, 2.0, 8.0], 5);
        assert!(shaped
            .iter()
            .all(|&v| v >= 0.65 - 1e-12 && v <= 0.70 + 1e-12));
    }

    #[test]
    fn peak_lands_at_span_top() {
        let shaped = shape(vec![5.0, 5.0, 10.0], 3);
        assert!((shaped[2] - 0.70).abs() < 1e-12);
    }

    #[test]
    fn empty_series_is_rejected() {
        let mut stage = ShapingStage::new(2);
        stage.initialize(&config_for(3)).unwrap();
        let result = stage.execute(StageInput {
            channels: Vec::new(),
            flighting: FlightingMatrix::new(3, Vec::new()),
            series: Vec::new(),
        });
        assert!(matches!(result, Err(StageError::InvalidInput(_))));
    }
}
