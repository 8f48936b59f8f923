//! Frame and Line Constants.
//!
//! This module defines the fixed geometry of an 8N1 frame and the logical
//! levels used on the serial line. It includes:
//! 1. **Line Levels:** Idle (mark), start and stop bit values.
//! 2. **Frame Geometry:** Data width, total frame width and derived masks.

/// Logical level of the line between transmissions (mark).
pub const IDLE_LEVEL: bool = true;

/// Logical level of the start bit (space). Must differ from `IDLE_LEVEL`.
pub const START_BIT: bool = false;

/// Logical level of the stop bit. Equal to `IDLE_LEVEL` so the line rests after a frame.
pub const STOP_BIT: bool = IDLE_LEVEL;

/// Number of data bits carried by one frame.
pub const DATA_BITS: u32 = 8;

/// Total bits per frame: start + data + stop.
pub const FRAME_WIDTH: u32 = 1 + DATA_BITS + 1;

/// Mask covering every bit position of a frame.
pub const FRAME_MASK: u16 = (1 << FRAME_WIDTH) - 1;

/// Bit position of the stop bit inside a frame buffer.
pub const STOP_BIT_POS: u32 = FRAME_WIDTH - 1;

/// Clock frequency of the reference development board (50 MHz).
pub const REFERENCE_CLOCK_HZ: u64 = 50_000_000;

/// Baud rate used by the reference tutorial projects.
pub const REFERENCE_BAUD: u64 = 9600;
