//! Configuration and simulation error definitions.
//!
//! The transmitter itself is open-loop and never fails at runtime. Errors only
//! exist at the edges of the model:
//! 1. **Configuration:** Rejected clock/baud combinations and malformed JSON.
//! 2. **Simulation:** Cycle budget exhaustion and waveform export failures.

use thiserror::Error;

/// Reasons a configuration cannot produce a working transmitter.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The clock frequency was zero.
    #[error("clock frequency must be non-zero")]
    ZeroClock,

    /// The baud rate was zero.
    #[error("baud rate must be non-zero")]
    ZeroBaud,

    /// The baud rate is faster than the clock, so a bit period would be shorter than one edge.
    #[error("baud rate {baud} exceeds clock frequency {clock_hz} Hz")]
    BaudExceedsClock {
        /// Requested clock frequency in Hz.
        clock_hz: u64,
        /// Requested baud rate.
        baud: u64,
    },

    /// The divider threshold does not fit the 32-bit counter.
    #[error("divider threshold {0} does not fit a 32-bit counter")]
    DividerOverflow(u64),

    /// The JSON document could not be parsed.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures raised by the simulation harness.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The byte queue did not drain within the cycle budget.
    #[error("cycle limit of {limit} reached with {pending} byte(s) still queued")]
    CycleLimit {
        /// Cycle budget that was exhausted.
        limit: u64,
        /// Bytes that never left the queue.
        pending: usize,
    },

    /// Writing the waveform failed.
    #[error("waveform I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
