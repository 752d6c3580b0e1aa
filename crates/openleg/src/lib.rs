pub mod config;
pub mod daybreak;
pub mod entity;
pub mod error;
pub mod spotcheck;
pub mod telemetry;
