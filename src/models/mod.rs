// src/models/mod.rs

//! Domain models for the watcher.

mod config;
mod job;

// Re-export all public types
pub use config::{Config, Credentials, MailConfig, Policy, SourceConfig, StateConfig, WatchConfig};
pub use job::{JobRow, NewRows, TrackedRow};
