//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the engine:
//! - Math types and operations
//! - Game time and time scaling
//! - Cooperative timer scheduling
//! - Logging utilities

pub mod math;
pub mod time;
pub mod scheduler;
pub mod logging;
