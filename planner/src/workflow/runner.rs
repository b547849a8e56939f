use crate::workflow::config::WorkflowConfig;
use anyhow::Context;
use mixcore::engine::{forecast_table, AllocationStage, ContributionStage, ShapingStage};
use mixcore::plan::{BudgetShare, ChannelSpend, PlanPayload, ScenarioForecast, ScenarioTable};
use mixcore::prelude::{ModelStage, StageInput};

pub struct WorkflowResult {
    pub spend_rows: Vec<ChannelSpend>,
    pub weekly_totals: Vec<f64>,
    pub contribution: Vec<f64>,
    pub budget_shares: Vec<BudgetShare>,
    pub notes: Vec<String>,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, payload: &PlanPayload) -> anyhow::Result<WorkflowResult> {
        let stage_config = self.config.to_stage_config();

        let mut allocation_stage = AllocationStage::new(payload.channels.len().max(1));
        allocation_stage
            .initialize(&stage_config)
            .context("initializing allocation stage")?;
        let allocation_output = allocation_stage
            .execute(StageInput {
                channels: payload.channels.clone(),
                flighting: payload.flighting.clone(),
                series: Vec::new(),
            })
            .context("executing allocation stage")?;
        allocation_stage.cleanup();

        let mut contribution_stage = ContributionStage::new(2);
        contribution_stage
            .initialize(&stage_config)
            .context("initializing contribution stage")?;
        let contribution_output = contribution_stage
            .execute(StageInput {
                channels: payload.channels.clone(),
                flighting: payload.flighting.clone(),
                series: allocation_output.series.clone(),
            })
            .context("executing contribution stage")?;
        contribution_stage.cleanup();

        let mut shaping_stage = ShapingStage::new(2);
        shaping_stage
            .initialize(&stage_config)
            .context("initializing shaping stage")?;
        let shaping_output = shaping_stage
            .execute(StageInput {
                channels: payload.channels.clone(),
                flighting: payload.flighting.clone(),
                series: contribution_output.series.clone(),
            })
            .context("executing shaping stage")?;
        shaping_stage.cleanup();

        let spend_rows = allocation_output
            .metadata
            .spend_rows
            .clone()
            .unwrap_or_default();
        let weekly_totals = allocation_output
            .metadata
            .weekly_totals
            .clone()
            .unwrap_or_default();
        let mut notes = allocation_output.metadata.notes.clone();
        notes.extend(contribution_output.metadata.notes.clone());
        notes.extend(shaping_output.metadata.notes.clone());

        Ok(WorkflowResult {
            spend_rows,
            weekly_totals,
            contribution: shaping_output.series,
            budget_shares: payload.budget_shares(),
            notes,
        })
    }

    /// Scenario forecasting sits outside the stage chain; spends go straight
    /// through the weighted sum.
    pub fn forecast(&self, table: &ScenarioTable) -> Vec<ScenarioForecast> {
        forecast_table(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::{build_plan_payload, default_scenario_table};
    use mixcore::plan::{ChannelParams, FlightingMatrix};

    #[test]
    fn runner_executes_workflow() {
        let cfg = WorkflowConfig::default();
        let runner = Runner::new(cfg.clone());
        let payload = build_plan_payload(cfg.weeks);
        let result = runner.execute(&payload).unwrap();
        assert_eq!(result.spend_rows.len(), 5);
        assert_eq!(result.weekly_totals.len(), 36);
        assert_eq!(result.contribution.len(), 36);
        assert!(result
            .contribution
            .iter()
            .all(|&v| v >= 0.65 - 1e-12 && v <= 0.70 + 1e-12));
    }

    #[test]
    fn runner_forecasts_default_scenarios() {
        let runner = Runner::new(WorkflowConfig::default());
        let forecasts = runner.forecast(&default_scenario_table());
        assert_eq!(forecasts.len(), 3);
        assert_eq!(forecasts[0].outcome, 8800.0);
    }

    #[test]
    fn single_channel_plan_shapes_as_expected() {
        let cfg = WorkflowConfig::from_args(3, 2, 0.05, 0.65);
        let runner = Runner::new(cfg);
        let payload = PlanPayload::new(
            vec![ChannelParams::new("SEM", 100.0, 0.2, 0.25)],
            FlightingMatrix::new(3, vec![vec![1, 1, 1]]),
        );

        let result = runner.execute(&payload).unwrap();
        assert_eq!(result.spend_rows[0].weekly, vec![100.0, 100.0, 100.0]);
        assert!((result.contribution[0] - 0.65).abs() < 1e-12);
        assert!((result.contribution[1] - 0.65).abs() < 1e-12);
        assert!((result.contribution[2] - 0.70).abs() < 1e-12);
    }

    #[test]
    fn pulsed_plan_lags_and_normalises() {
        let cfg = WorkflowConfig::from_args(6, 2, 0.05, 0.65);
        let runner = Runner::new(cfg);
        let payload = PlanPayload::new(
            vec![ChannelParams::new("SEM", 100.0, 0.2, 0.25)],
            FlightingMatrix::new(6, vec![vec![1, 0, 1, 0, 1, 0]]),
        );

        // Raw contribution alternates 5 and 0; the two lag pads join the dark
        // weeks at the floor and the active weeks land at the top of the band.
        let result = runner.execute(&payload).unwrap();
        let expected = [0.65, 0.65, 0.70, 0.65, 0.70, 0.65];
        for (value, want) in result.contribution.iter().zip(expected) {
            assert!((value - want).abs() < 1e-12);
        }
    }

    #[test]
    fn zero_week_config_surfaces_horizon_diagnostic() {
        let runner = Runner::new(WorkflowConfig::from_args(0, 2, 0.05, 0.65));
        let payload = PlanPayload::new(
            vec![ChannelParams::new("SEM", 100.0, 0.2, 0.25)],
            FlightingMatrix::new(0, vec![Vec::new()]),
        );

        match runner.execute(&payload) {
            Ok(_) => panic!("zero-week plan was accepted"),
            Err(err) => assert!(format!("{:#}", err).contains("zero-week horizon")),
        }
    }
}
