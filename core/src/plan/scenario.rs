use serde::{Deserialize, Serialize};

/// Media types recognised by the scenario forecaster, in formula order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    DisplayProspecting,
    DisplayRetargeting,
    DisplayRetail,
    Native,
    OnlineVideo,
    ConnectedTv,
}

impl MediaType {
    pub const ALL: [MediaType; 6] = [
        MediaType::DisplayProspecting,
        MediaType::DisplayRetargeting,
        MediaType::DisplayRetail,
        MediaType::Native,
        MediaType::OnlineVideo,
        MediaType::ConnectedTv,
    ];

    /// Outcome weight for a unit of spend in this media type.
    pub fn weight(&self) -> f64 {
        match self {
            MediaType::DisplayProspecting => 1.5,
            MediaType::DisplayRetargeting => 1.3,
            MediaType::DisplayRetail => 1.2,
            MediaType::Native => 1.1,
            MediaType::OnlineVideo => 1.4,
            MediaType::ConnectedTv => 1.6,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MediaType::DisplayProspecting => "Display Prospecting",
            MediaType::DisplayRetargeting => "Display Retargeting",
            MediaType::DisplayRetail => "Display Retail",
            MediaType::Native => "Native",
            MediaType::OnlineVideo => "OLV",
            MediaType::ConnectedTv => "CTV",
        }
    }
}

/// Spend assigned to one media type within a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaAllocation {
    pub media: MediaType,
    pub spend: f64,
}

/// A named what-if spend mix across all media types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioAllocation {
    pub name: String,
    pub allocations: Vec<MediaAllocation>,
}

impl ScenarioAllocation {
    pub fn total_spend(&self) -> f64 {
        self.allocations.iter().map(|a| a.spend).sum()
    }
}

/// The set of scenarios compared side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioTable {
    pub scenarios: Vec<ScenarioAllocation>,
}

impl ScenarioTable {
    /// Starter scenarios loaded before the user edits anything.
    pub fn default_set() -> Self {
        Self {
            scenarios: vec![
                scenario("Base", [1000.0, 2000.0, 500.0, 1000.0, 1000.0, 1000.0]),
                scenario("Video Heavy", [500.0, 1200.0, 400.0, 800.0, 2200.0, 2600.0]),
                scenario(
                    "Balanced",
                    [1100.0, 1100.0, 1100.0, 1100.0, 1100.0, 1100.0],
                ),
            ],
        }
    }
}

fn scenario(name: &str, spends: [f64; 6]) -> ScenarioAllocation {
    ScenarioAllocation {
        name: name.to_string(),
        allocations: MediaType::ALL
            .iter()
            .zip(spends)
            .map(|(media, spend)| MediaAllocation {
                media: *media,
                spend,
            })
            .collect(),
    }
}

/// A scenario's spends together with its computed outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioForecast {
    pub scenario: String,
    pub allocations: Vec<MediaAllocation>,
    pub outcome: f64,
}

impl ScenarioForecast {
    pub fn new(scenario: String, allocations: Vec<MediaAllocation>, outcome: f64) -> Self {
        Self {
            scenario,
            allocations,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_has_three_full_scenarios() {
        let table = ScenarioTable::default_set();
        assert_eq!(table.scenarios.len(), 3);
        for scenario in &table.scenarios {
            assert_eq!(scenario.allocations.len(), 6);
        }
    }

    #[test]
    fn media_order_matches_weights() {
        let weights: Vec<f64> = MediaType::ALL.iter().map(|m| m.weight()).collect();
        assert_eq!(weights, vec![1.5, 1.3, 1.2, 1.1, 1.4, 1.6]);
    }

    #[test]
    fn total_spend_sums_allocations() {
        let table = ScenarioTable::default_set();
        assert!((table.scenarios[0].total_spend() - 6500.0).abs() < 1e-9);
    }
}
