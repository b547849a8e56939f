pub mod channel;
pub mod flighting;
pub mod payload;
pub mod scenario;
pub mod spend;

pub use channel::ChannelParams;
pub use flighting::FlightingMatrix;
pub use payload::{PlanMetadata, PlanPayload};
pub use scenario::{
    MediaAllocation, MediaType, ScenarioAllocation, ScenarioForecast, ScenarioTable,
};
pub use spend::{BudgetShare, ChannelSpend};
