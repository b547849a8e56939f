use crate::plan::{ScenarioAllocation, ScenarioForecast, ScenarioTable};

/// Weighted-sum outcome for one scenario. Spends are taken as entered;
/// rounding is left to the presentation layer.
pub fn forecast_scenario(scenario: &ScenarioAllocation) -> f64 {
    scenario
        .allocations
        .iter()
        .map(|allocation| allocation.spend * allocation.media.weight())
        .sum()
}

/// Forecasts every scenario in the table, preserving order.
pub fn forecast_table(table: &ScenarioTable) -> Vec<ScenarioForecast> {
    table
        .scenarios
        .iter()
        .map(|scenario| {
            ScenarioForecast::new(
                scenario.name.clone(),
                scenario.allocations.clone(),
                forecast_scenario(scenario),
            )
        })
        .collect()
}
