//! Rend Cache background jobs.
pub mod maintenance;
pub mod runner;

pub use maintenance::{CacheMaintenanceJob, MaintenanceReport};
pub use runner::JobRunner;
