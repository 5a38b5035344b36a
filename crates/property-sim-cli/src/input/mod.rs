pub mod file;
pub mod rate;
pub mod stdin;
