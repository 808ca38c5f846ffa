pub mod config;
pub mod error;
pub mod mcda;
pub mod telemetry;
