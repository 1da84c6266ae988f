//! Time Attendance Engine
//!
//! This crate turns raw punch-in/punch-out events into worked hours. It provides
//! the weekly hours aggregator, per-user punch status, team weekly summaries,
//! punch and work update source abstractions and an HTTP API exposing all of
//! them.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
pub mod telemetry;
