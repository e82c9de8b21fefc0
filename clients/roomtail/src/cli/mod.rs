//! CLI module
//!
//! Runtime configuration for the roomtail binary.

pub mod config;
