//! mytemp - Hourly temperature dashboard for a battery-powered sensor
//!
//! This library exposes the core modules for testing and reuse.

pub mod common;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod source;
