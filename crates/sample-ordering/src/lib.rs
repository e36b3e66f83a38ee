//! Sample ordering: configurable, weighted ranking of tasting samples.

pub mod config;
pub mod error;
pub mod ordering;
pub mod telemetry;
