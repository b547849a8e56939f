//! Allocation engine and scenario-forecast core for the media-mix planner.
//!
//! The modules take an editable channel plan plus a flighting grid and turn
//! them into weekly spend tables and a shaped awareness series, with a
//! standalone weighted forecaster for what-if spend scenarios.

pub mod engine;
pub mod math;
pub mod plan;
pub mod prelude;
pub mod telemetry;

pub use prelude::{ModelStage, StageInput, StageOutput};
