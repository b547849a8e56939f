pub mod allocation;
pub mod buffer_pool;
pub mod contribution;
pub mod forecast;
pub mod shaping;

pub use allocation::AllocationStage;
pub use buffer_pool::BufferPool;
pub use contribution::ContributionStage;
pub use forecast::{forecast_scenario, forecast_table};
pub use shaping::ShapingStage;
