use mixcore::plan::{ChannelParams, FlightingMatrix, PlanMetadata, PlanPayload, ScenarioTable};

/// Seed plan loaded before the dashboard sends its first edit: the standard
/// five-channel table on the baseline flighting pattern.
pub fn build_plan_payload(weeks: usize) -> PlanPayload {
    PlanPayload::with_metadata(
        ChannelParams::default_set(),
        FlightingMatrix::baseline(weeks),
        PlanMetadata {
            name: "Awareness baseline".into(),
            currency: "USD".into(),
            description: Some("Seed plan loaded at startup".into()),
            owner: None,
        },
    )
}

/// Starter what-if scenarios shown before the user edits any spend cell.
pub fn default_scenario_table() -> ScenarioTable {
    ScenarioTable::default_set()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_plan_covers_standard_channels() {
        let payload = build_plan_payload(36);
        assert_eq!(payload.channels.len(), 5);
        assert_eq!(payload.flighting.channel_rows(), 5);
        assert!(payload.flighting.rows.iter().all(|row| row.len() == 36));
        assert!(payload.metadata.is_some());
    }

    #[test]
    fn default_scenarios_are_fully_populated() {
        let table = default_scenario_table();
        assert_eq!(table.scenarios.len(), 3);
        assert!(table
            .scenarios
            .iter()
            .all(|scenario| scenario.allocations.len() == 6));
    }
}
