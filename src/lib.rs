#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod calendar;
pub mod classify;
pub mod config;
pub mod digest;
pub mod directory;
pub mod error;
pub mod mapping;
pub mod redmine;
pub mod report;
pub mod resolve;
pub mod slack;
pub mod telemetry;
pub mod types;

pub type Result<T> = std::result::Result<T, error::Error>;
