use serde::{Deserialize, Serialize};

use crate::plan::channel::ChannelParams;
use crate::plan::flighting::FlightingMatrix;
use crate::plan::spend::BudgetShare;

/// Business context attached to a submitted plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub name: String,
    pub currency: String,
    pub description: Option<String>,
    pub owner: Option<String>,
}

/// Data payload consumed by the allocation engine: the editable channel table
/// plus the flighting grid it is aligned with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanPayload {
    pub channels: Vec<ChannelParams>,
    pub flighting: FlightingMatrix,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PlanMetadata>,
}

impl PlanPayload {
    pub fn new(channels: Vec<ChannelParams>, flighting: FlightingMatrix) -> Self {
        Self {
            channels,
            flighting,
            metadata: None,
        }
    }

    pub fn with_metadata(
        channels: Vec<ChannelParams>,
        flighting: FlightingMatrix,
        metadata: PlanMetadata,
    ) -> Self {
        Self {
            channels,
            flighting,
            metadata: Some(metadata),
        }
    }

    pub fn total_budget(&self) -> f64 {
        self.channels.iter().map(|channel| channel.budget).sum()
    }

    /// Per-channel share of the total budget; all shares are zero when the
    /// plan carries no budget at all.
    pub fn budget_shares(&self) -> Vec<BudgetShare> {
        let total = self.total_budget();
        self.channels
            .iter()
            .map(|channel| BudgetShare {
                channel: channel.name.clone(),
                budget: channel.budget,
                share: if total > 0.0 {
                    channel.budget / total
                } else {
                    0.0
                },
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_shares_sum_to_one_for_default_plan() {
        let payload = PlanPayload::new(ChannelParams::default_set(), FlightingMatrix::baseline(36));
        let shares = payload.budget_shares();
        assert_eq!(shares.len(), 5);
        let sum: f64 = shares.iter().map(|s| s.share).sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_budget_plan_yields_zero_shares() {
        let channels = vec![
            ChannelParams::new("A", 0.0, 0.5, 0.5),
            ChannelParams::new("B", 0.0, 0.5, 0.5),
        ];
        let payload = PlanPayload::new(channels, FlightingMatrix::new(4, vec![vec![1; 4]; 2]));
        assert!(payload.budget_shares().iter().all(|s| s.share == 0.0));
    }
}
