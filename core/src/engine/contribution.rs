use crate::engine::buffer_pool::BufferPool;
use crate::prelude::{
    ModelStage, StageConfig, StageError, StageInput, StageMetadata, StageOutput, StageResult,
};
use crate::telemetry::log::LogManager;

/// Contribution stage that folds spend, effectiveness and awareness weight
/// into one raw weekly series.
pub struct ContributionStage {
    pool: BufferPool,
    config: Option<StageConfig>,
    logger: LogManager,
}

impl ContributionStage {
    pub fn new(pool_size: usize) -> Self {
        Self {
            pool: BufferPool::with_capacity(pool_size),
            config: None,
            logger: LogManager::scoped("contribution"),
        }
    }
}

impl ModelStage for ContributionStage {
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

        let mut series = self.pool.checkout(config.weeks)?;
        for (week, slot) in series.iter_mut().enumerate() {
            let mut week_contribution = 0.0;
            for (idx, channel) in input.channels.iter().enumerate() {
                let activations = f64::from(input.flighting.flag(idx, week));
                if activations > 0.0 {
                    let budget_per_activation = channel.budget / activations;
                    week_contribution +=
                        budget_per_activation * channel.effectiveness * channel.awareness_weight;
                }
            }
            *slot = week_contribution;
        }

        let (peak_week, peak) = series
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |acc, (week, &value)| {
                if value > acc.1 {
                    (week, value)
                } else {
                    acc
                }
            });
        self.logger.record(&format!(
            "raw contribution peak {:.2} at week {}",
            peak,
            peak_week + 1
        ));

        let metadata = StageMetadata {
            notes: vec![format!(
                "Raw contribution peak {:.2} at week {}",
                peak,
                peak_week + 1
            )],
            ..Default::default()
        };

        Ok(StageOutput {
            series,
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
    fn contribution_multiplies_budget_by_weights() {
        let mut stage = ContributionStage::new(2);
        stage.initialize(&three_week_config()).unwrap();

        let input = StageInput {
            channels: vec![ChannelParams::new("SEM", 100.0, 0.2, 0.25)],
            flighting: FlightingMatrix::new(3, vec![vec![1, 1, 1]]),
            series: Vec::new(),
        };

        let output = stage.execute(input).unwrap();
        assert_eq!(output.series, vec![5.0, 5.0, 5.0]);
        stage.cleanup();
    }

    #[test]
    fn dark_channels_add_nothing() {
        let mut stage = ContributionStage::new(2);
        stage.initialize(&three_week_config()).unwrap();

        let input = StageInput {
            channels: vec![
                ChannelParams::new("SEM", 100.0, 0.2, 0.25),
                ChannelParams::new("Social", 900.0, 0.7, 0.45),
            ],
            flighting: FlightingMatrix::new(3, vec![vec![1, 1, 1], vec![0, 0, 0]]),
            series: Vec::new(),
        };

        let output = stage.execute(input).unwrap();
        assert_eq!(output.series, vec![5.0, 5.0, 5.0]);
    }
}
