//! Common types and constants shared by the transmitter model and its harness.
//!
//! This module provides:
//! 1. **Constants:** Frame geometry and line levels.
//! 2. **Error Handling:** Configuration and simulation error types.

/// Frame geometry and line-level constants.
pub mod constants;

/// Error types for configuration and simulation.
pub mod error;

pub use constants::{DATA_BITS, FRAME_WIDTH, IDLE_LEVEL, START_BIT, STOP_BIT};
pub use error::{ConfigError, SimError};
