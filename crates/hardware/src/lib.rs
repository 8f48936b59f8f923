//! Serial transmitter simulator library.
//!
//! This crate implements a clock-edge-accurate model of a start/stop-framed
//! asynchronous serial transmitter built from shift registers:
//! 1. **Transmitter:** Bit-rate divider, frame and busy shift registers, load modes.
//! 2. **Simulation:** Byte feeder, waveform capture, frame sampling and VCD export.
//! 3. **Support:** Configuration, error types and run statistics.
//!
//! # Example
//!
//! ```
//! use uartsim_core::{Config, Simulator};
//!
//! let mut config = Config::default();
//! config.clock.frequency_hz = 96_000; // 10 edges per bit at 9600 baud
//!
//! let mut sim = Simulator::new(&config).unwrap();
//! sim.transmit(b"hi").unwrap();
//! assert_eq!(sim.captured_bytes(), b"hi");
//! ```

/// Frame constants and error types.
pub mod common;
/// Transmitter configuration (defaults, enums, validation).
pub mod config;
/// Byte feeder, waveform capture and VCD export.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;
/// Synchronous component trait.
pub mod traits;
/// Divider, frame encoding, shift registers and the transmitter.
pub mod tx;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Simulation driver; construct with `Simulator::new`.
pub use crate::sim::Simulator;
/// Clocked component trait.
pub use crate::traits::Clocked;
/// The transmitter model.
pub use crate::tx::Transmitter;
