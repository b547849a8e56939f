use serde::{Deserialize, Serialize};

/// Six-week burst template cycled by the pulsed default channels.
const BURST_TEMPLATE: [u8; 6] = [1, 1, 0, 0, 0, 1];

/// Activation grid indexed by (channel row, week). Rows are aligned by index
/// with the channel list they were built against; cells hold the raw 0/1
/// flag the engine divides by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightingMatrix {
    pub weeks: usize,
    pub rows: Vec<Vec<u8>>,
}

impl FlightingMatrix {
    pub fn new(weeks: usize, rows: Vec<Vec<u8>>) -> Self {
        Self { weeks, rows }
    }

    /// Row that is active every week of the horizon.
    pub fn always_on(weeks: usize) -> Vec<u8> {
        vec![1; weeks]
    }

    /// Row cycling the six-week burst template across the horizon.
    pub fn pulsed(weeks: usize) -> Vec<u8> {
        BURST_TEMPLATE.iter().copied().cycle().take(weeks).collect()
    }

    /// Default pattern for the standard five-channel set: SEM, Linear/CTV and
    /// Retail Media run every week, Social and Display follow the burst
    /// template.
    pub fn baseline(weeks: usize) -> Self {
        Self::new(
            weeks,
            vec![
                Self::always_on(weeks),
                Self::pulsed(weeks),
                Self::pulsed(weeks),
                Self::always_on(weeks),
                Self::always_on(weeks),
            ],
        )
    }

    pub fn channel_rows(&self) -> usize {
        self.rows.len()
    }

    /// Raw flag at one cell; out-of-range cells read as inactive.
    pub fn flag(&self, row: usize, week: usize) -> u8 {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(week))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_active(&self, row: usize, week: usize) -> bool {
        self.flag(row, week) > 0
    }

    pub fn set(&mut self, row: usize, week: usize, active: bool) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|cells| cells.get_mut(week)) {
            *cell = u8::from(active);
        }
    }
}
