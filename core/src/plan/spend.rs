use serde::{Deserialize, Serialize};

/// One channel's weekly spend row from the allocation table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSpend {
    pub channel: String,
    pub weekly: Vec<f64>,
}

impl ChannelSpend {
    pub fn new(channel: impl Into<String>, weekly: Vec<f64>) -> Self {
        Self {
            channel: channel.into(),
            weekly,
        }
    }

    pub fn total(&self) -> f64 {
        self.weekly.iter().sum()
    }
}

/// One slice of the budget-mix breakdown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetShare {
    pub channel: String,
    pub budget: f64,
    pub share: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spend_total_sums_weeks() {
        let row = ChannelSpend::new("SEM", vec![10.0, 0.0, 10.0]);
        assert!((row.total() - 20.0).abs() < 1e-12);
    }
}
