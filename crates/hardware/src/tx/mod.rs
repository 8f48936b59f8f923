//! Serial transmit path.
//!
//! This module contains the building blocks of the transmitter:
//! 1. **Divider:** Clock-to-bit-rate counter.
//! 2. **Frame:** Start/data/stop bit pattern encoding.
//! 3. **Shift:** Fixed-width shift register used for the frame and busy buffers.
//! 4. **Transmitter:** The clocked component tying them together.

/// Bit-rate divider.
pub mod divider;

/// 8N1 frame encoding.
pub mod frame;

/// Fixed-width shift register.
pub mod shift;

/// Clocked serial transmitter.
pub mod transmitter;

pub use divider::BitRateDivider;
pub use frame::Frame;
pub use shift::ShiftRegister;
pub use transmitter::{Transmitter, TxInput, TxOutput};
