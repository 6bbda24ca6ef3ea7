pub mod analytics;
pub mod backup;
pub mod core;
pub mod exchange;
pub mod students;
