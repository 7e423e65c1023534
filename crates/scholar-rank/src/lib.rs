//! Multi-factor scholarship ranking: the scoring engine plus the configuration, telemetry
//! and HTTP plumbing the service binary builds on.

pub mod config;
pub mod error;
pub mod ranking;
pub mod telemetry;
