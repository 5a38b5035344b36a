pub mod error;
pub mod time_value;
pub mod types;

pub mod mortgage;
pub mod rental;
pub mod returns;
pub mod tax;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use error::PropertySimError;
pub use types::*;

/// Standard result type for all property-sim operations
pub type PropertySimResult<T> = Result<T, PropertySimError>;
