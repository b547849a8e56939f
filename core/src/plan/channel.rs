use serde::{Deserialize, Serialize};

/// Per-channel parameters edited in the planning table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelParams {
    pub name: String,
    pub budget: f64,
    pub effectiveness: f64,
    pub awareness_weight: f64,
}

impl ChannelParams {
    pub fn new(name: &str, budget: f64, effectiveness: f64, awareness_weight: f64) -> Self {
        Self {
            name: name.to_string(),
            budget,
            effectiveness,
            awareness_weight,
        }
    }

    /// The five channels every plan starts from.
    pub fn default_set() -> Vec<ChannelParams> {
        vec![
            ChannelParams::new("SEM", 145_000_000.0, 0.2, 0.25),
            ChannelParams::new("Social", 675_000_000.0, 0.7, 0.45),
            ChannelParams::new("Display", 30_000_000.0, 0.45, 0.35),
            ChannelParams::new("Linear/CTV", 186_000_000.0, 0.6, 0.65),
            ChannelParams::new("Retail Media", 8_300_000.0, 0.35, 0.2),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_holds_five_distinct_channels() {
        let channels = ChannelParams::default_set();
        assert_eq!(channels.len(), 5);
        let mut names: Vec<&str> = channels.iter().map(|c| c.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn default_budgets_sum_to_plan_total() {
        let total: f64 = ChannelParams::default_set().iter().map(|c| c.budget).sum();
        assert_eq!(total, 1_044_300_000.0);
    }
}
