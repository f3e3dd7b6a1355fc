pub mod config;
pub mod error;
pub mod games;
pub mod settings;
pub mod telemetry;
