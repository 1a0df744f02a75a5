//! Utility modules for common functionality
//!
//! This module provides logging, progress reporting, configuration,
//! argument parsing and output helpers used throughout the application.

pub mod logger;
pub mod progress;
pub mod config;
pub mod output_utils;
pub mod window_utils;
