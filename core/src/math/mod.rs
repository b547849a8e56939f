pub mod matrix;
pub mod series;
pub mod stats;

pub use matrix::MatrixHelper;
pub use series::SeriesHelper;
pub use stats::StatsHelper;
