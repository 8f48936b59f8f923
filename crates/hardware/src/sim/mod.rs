//! Simulation harness.
//!
//! Drives the transmitter with a byte feeder and observes the line:
//! 1. **Simulator:** Transmitter plus queue, statistics and capture.
//! 2. **Waveform:** Run-length encoded line capture with frame sampling.
//! 3. **VCD:** Export of captures for waveform viewers.

/// Transmitter driver with byte feeder.
pub mod simulator;

/// Value Change Dump export.
pub mod vcd;

/// Line capture and sampling.
pub mod waveform;

pub use simulator::Simulator;
pub use vcd::{VcdOptions, write_vcd};
pub use waveform::{CapturedFrame, Segment, Waveform};
