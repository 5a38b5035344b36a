pub mod equity;
pub mod metrics;
