pub mod stamp_duty;
