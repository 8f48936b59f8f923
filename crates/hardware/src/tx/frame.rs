//! 8N1 frame encoding.
//!
//! A frame is held as a 10-bit pattern in transmission order: bit 0 is the
//! start bit, bits 1-8 carry the data in the configured order and bit 9 is
//! the stop bit. Shifting the pattern right one position per bit period puts
//! the bits on the line in sequence.

use std::fmt;

use crate::common::constants::{
    DATA_BITS, FRAME_MASK, FRAME_WIDTH, START_BIT, STOP_BIT, STOP_BIT_POS,
};
use crate::config::BitOrder;

/// One start/data/stop frame in transmission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frame(u16);

impl Frame {
    /// Frames a byte for transmission in the given bit order.
    pub const fn encode(byte: u8, order: BitOrder) -> Self {
        let data = match order {
            BitOrder::Lsb => byte,
            BitOrder::Msb => byte.reverse_bits(),
        };
        let start = START_BIT as u16;
        let stop = (STOP_BIT as u16) << STOP_BIT_POS;
        Self(stop | ((data as u16) << 1) | start)
    }

    /// Wraps a raw 10-bit pattern. Bits above the frame width are discarded.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits & FRAME_MASK)
    }

    /// Builds a frame from line levels in transmission order.
    ///
    /// Returns `None` unless exactly `FRAME_WIDTH` levels are given.
    pub fn from_levels(levels: &[bool]) -> Option<Self> {
        if levels.len() != FRAME_WIDTH as usize {
            return None;
        }
        let bits = levels
            .iter()
            .enumerate()
            .fold(0u16, |acc, (i, &level)| acc | (u16::from(level) << i));
        Some(Self(bits))
    }

    /// Raw pattern; bit 0 is sent first.
    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Level of the `index`-th bit on the line (0 = start bit).
    pub const fn bit(self, index: u32) -> bool {
        index < FRAME_WIDTH && (self.0 >> index) & 1 != 0
    }

    /// All line levels in transmission order.
    pub fn levels(self) -> [bool; FRAME_WIDTH as usize] {
        let mut out = [STOP_BIT; FRAME_WIDTH as usize];
        for (i, level) in out.iter_mut().enumerate() {
            *level = self.bit(i as u32);
        }
        out
    }

    /// True when the start and stop bits hold their framing levels.
    pub const fn is_well_formed(self) -> bool {
        self.bit(0) == START_BIT && self.bit(STOP_BIT_POS) == STOP_BIT
    }

    /// Recovers the data byte, or `None` on a framing error.
    pub const fn data(self, order: BitOrder) -> Option<u8> {
        if !self.is_well_formed() {
            return None;
        }
        let field = ((self.0 >> 1) & ((1 << DATA_BITS) - 1)) as u8;
        Some(match order {
            BitOrder::Lsb => field,
            BitOrder::Msb => field.reverse_bits(),
        })
    }
}

impl fmt::Display for Frame {
    /// Formats the frame as line levels in transmission order, e.g. `0 00101101 1`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let levels = self.levels();
        let digit = |b: bool| if b { '1' } else { '0' };
        write!(f, "{} ", digit(levels[0]))?;
        for &level in &levels[1..=DATA_BITS as usize] {
            write!(f, "{}", digit(level))?;
        }
        write!(f, " {}", digit(levels[STOP_BIT_POS as usize]))
    }
}
