pub mod mortgage;
pub mod simulate;
pub mod stamp_duty;
