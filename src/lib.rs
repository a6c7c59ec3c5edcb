//! Wingman Library
//!
//! Core modules for the Wingman voice command assistant.

pub mod commands;
pub mod config;
pub mod core;
pub mod error;
pub mod executor;
pub mod input;
pub mod services;
pub mod speech;
pub mod utils;
