use crate::engine::buffer_pool::BufferPool;
use crate::math::matrix::MatrixHelper;
use crate::plan::ChannelSpend;
use crate::prelude::{
    ModelStage, StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult,
};
use crate::telemetry::log::LogManager;

/// Allocation stage that expands the channel table into a weekly spend grid
/// and collapses it into weekly totals.
pub struct AllocationStage {
    pool: BufferPool,
    config: Option<StageConfig>,
    logger: LogManager,
}

impl AllocationStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            config: None,
            logger: LogManager::scoped("allocation"),
        }
    }
}

impl ModelStage for AllocationStage {
    fn initialize(&mut self, config: &StageConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput) -> StageResult<StageOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        if input.channels.is_empty() {
            return Err(StageError::InvalidInput("no channels provided".into()));
        }
        if config.weeks == 0 {
            return Err(StageError::InvalidInput("zero-week horizon".into()));
        }
        if input.flighting.channel_rows() != input.channels.len() {
            return Err(StageError::InvalidInput(format!(
                "expected {} flighting rows, got {}",
                input.channels.len(),
                input.flighting.channel_rows()
            )));
        }
        if input.flighting.weeks != config.weeks {
            return Err(StageError::InvalidInput(format!(
                "expected a {}-week horizon, got {}",
                config.weeks, input.flighting.weeks
            )));
        }
        for (idx, row) in input.flighting.rows.iter().enumerate() {
            if row.len() != config.weeks {
                return Err(StageError::InvalidInput(format!(
                    "flighting row {} spans {} weeks",
                    idx,
                    row.len()
                )));
            }
        }

        let mut rows: Vec<Vec<f64>> = Vec::with_capacity(input.channels.len());
        for (idx, channel) in input.channels.iter().enumerate() {
            let mut weekly = self.pool.checkout(config.weeks)?;
            for (week, slot) in weekly.iter_mut().enumerate() {
                // The divisor is the flag value at this single week, so an
                // active week carries the channel's full budget.
                let activations = f64::from(input.flighting.flag(idx, week));
                if activations > 0.0 {
                    *slot = channel.budget / activations;
                }
            }
            rows.push(weekly);
        }

        let table = MatrixHelper::from_rows(&rows)
            .ok_or_else(|| StageError::Internal("ragged spend table".into()))?;
        let totals = MatrixHelper::column_sums(table.view());

        let spend_rows: Vec<ChannelSpend> = input
            .channels
            .iter()
            .zip(rows)
            .map(|(channel, weekly)| ChannelSpend::new(channel.name.clone(), weekly))
            .collect();

        let peak = totals.iter().cloned().fold(0.0_f64, f64::max);
        self.logger.record(&format!(
            "allocated {} channels across {} weeks, peak weekly spend {:.0}",
            spend_rows.len(),
            config.weeks,
            peak
        ));

        let metadata = StageMetadata {
            spend_rows: Some(spend_rows),
            weekly_totals: Some(totals.clone()),
            notes: vec![format!("Peak weekly spend {:.0}", peak)],
        };

        Ok(StageOutput {
            series: totals,
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
    use crate::plan::{ChannelParams, FlightingMatrix};

    fn three_week_config() -> StageConfig {
        StageConfig {
            weeks: 3,
            ..StageConfig::default()
        }
    }

    #[test]
    fn active_weeks_carry_full_budget() {
        let mut stage = AllocationStage::new(4);
        stage.initialize(&three_week_config()).unwrap();

        let input = StageInput {
            channels: vec![ChannelParams::new("SEM", 120.0, 0.2, 0.25)],
            flighting: FlightingMatrix::new(3, vec![vec![1, 1, 1]]),
            series: Vec::new(),
        };

        let output = stage.execute(input).unwrap();
        let rows = output.metadata.spend_rows.unwrap();
        assert_eq!(rows[0].weekly, vec![120.0, 120.0, 120.0]);
        assert_eq!(output.series, vec![120.0, 120.0, 120.0]);
        stage.cleanup();
    }

    #[test]
    fn dark_weeks_spend_nothing() {
        let mut stage = AllocationStage::new(4);
        stage.initialize(&three_week_config()).unwrap();

        let input = StageInput {
            channels: vec![ChannelParams::new("Display", 50.0, 0.45, 0.35)],
            flighting: FlightingMatrix::new(3, vec![vec![0, 1, 0]]),
            series: Vec::new(),
        };

        let output = stage.execute(input).unwrap();
        assert_eq!(output.series, vec![0.0, 50.0, 0.0]);
        stage.cleanup();
    }

    #[test]
    fn mismatched_flighting_rows_are_rejected() {
        let mut stage = AllocationStage::new(4);
        stage.initialize(&three_week_config()).unwrap();

        let input = StageInput {
            channels: vec![
                ChannelParams::new("A", 10.0, 0.5, 0.5),
                ChannelParams::new("B", 10.0, 0.5, 0.5),
            ],
            flighting: FlightingMatrix::new(3, vec![vec![1, 1, 1]]),
            series: Vec::new(),
        };

        assert!(matches!(
            stage.execute(input),
            Err(StageError::InvalidInput(_))
        ));
    }

    #[test]
    fn short_flighting_rows_are_rejected() {
        let mut stage = AllocationStage::new(4);
        stage.initialize(&three_week_config()).unwrap();

        let input = StageInput {
            channels: vec![ChannelParams::new("A", 10.0, 0.5, 0.5)],
            flighting: FlightingMatrix::new(3, vec![vec![1, 1]]),
            series: Vec::new(),
        };

        assert!(matches!(
            stage.execute(input),
            Err(StageError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_week_horizon_is_rejected() {
        let mut stage = AllocationStage::new(4);
        let config = StageConfig {
            weeks: 0,
            ..StageConfig::default()
        };
        stage.initialize(&config).unwrap();

        let input = StageInput {
            channels: vec![ChannelParams::new("A", 10.0, 0.5, 0.5)],
            flighting: FlightingMatrix::new(0, vec![Vec::new()]),
            series: Vec::new(),
        };

        assert!(matches!(
            stage.execute(input),
            Err(StageError::InvalidInput(_))
        ));
    }

    #[test]
    fn uninitialized_stage_fails_internally() {
        let mut stage = AllocationStage::new(4);
        let input = StageInput {
            channels: vec![ChannelParams::new("A", 10.0, 0.5, 0.5)],
            flighting: FlightingMatrix::new(3, vec![vec![1, 1, 1]]),
            series: Vec::new(),
        };
        assert!(matches!(stage.execute(input), Err(StageError::Internal(_))));
    }
}
