//! folio - backend for a personal portfolio and blog site
//!
//! # Architecture
//! - `api`: HTTP services and middleware
//! - `services`: blog loader, rewrite gateway, background generator, client IP info
//! - `interfaces`: command-line interface
//! - `config`: Configuration management
//! - `runtime`: Application lifecycle and execution modes
//! - `system`: Logging initialization

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod system;
pub mod utils;
