pub mod config;
pub mod error;
pub mod funnel;
pub mod harvest;
pub mod telemetry;
