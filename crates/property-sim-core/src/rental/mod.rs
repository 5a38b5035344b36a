pub mod income;
pub mod running_costs;
