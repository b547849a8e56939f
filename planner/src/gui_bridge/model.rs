use mixcore::plan::{BudgetShare, ChannelSpend, PlanMetadata, ScenarioForecast};
use serde::{Deserialize, Serialize};

/// Everything the dashboard polls for: the latest plan results, scenario
/// forecasts and session counters.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardModel {
    pub weekly_totals: Vec<f64>,
    pub spend_rows: Vec<ChannelSpend>,
    pub contribution: Vec<f64>,
    pub budget_shares: Vec<BudgetShare>,
    pub forecasts: Vec<ScenarioForecast>,
    pub notes: Vec<String>,
    pub metadata: Option<PlanMetadata>,
    pub recomputes: usize,
}
