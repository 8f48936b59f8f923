//! Fixed-width shift register.
//!
//! Models a right-shifting register of up to 16 bits. Bit 0 is the output
//! tap; each shift drops it and refills the top position with a constant
//! fill value. Both the frame buffer and the busy-tracking buffer are built
//! from this.

/// Right-shifting register with a constant refill bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRegister {
    value: u16,
    width: u32,
    fill: bool,
}

impl ShiftRegister {
    /// Maximum supported width in bits.
    pub const MAX_WIDTH: u32 = u16::BITS;

    /// Creates a register of `width` bits with every position set to `fill`.
    ///
    /// Widths are clamped to `1..=MAX_WIDTH`.
    pub const fn new(width: u32, fill: bool) -> Self {
        let width = if width > Self::MAX_WIDTH {
            Self::MAX_WIDTH
        } else if width == 0 {
            1
        } else {
            width
        };
        let mut reg = Self {
            value: 0,
            width,
            fill,
        };
        reg.value = reg.filled();
        reg
    }

    /// Mask covering the register's bit positions.
    const fn mask(&self) -> u16 {
        if self.width >= u16::BITS {
            u16::MAX
        } else {
            (1u16 << self.width) - 1
        }
    }

    /// The value of a register holding only fill bits.
    const fn filled(&self) -> u16 {
        if self.fill { self.mask() } else { 0 }
    }

    /// Parallel-loads a new value, truncated to the register width.
    pub const fn load(&mut self, value: u16) {
        self.value = value & self.mask();
    }

    /// Shifts one position toward bit 0 and returns the bit that fell out.
    pub const fn shift(&mut self) -> bool {
        let out = self.value & 1 != 0;
        self.value >>= 1;
        if self.fill {
            self.value |= 1 << (self.width - 1);
        }
        out
    }

    /// Current output tap (bit 0).
    pub const fn lsb(&self) -> bool {
        self.value & 1 != 0
    }

    /// Raw register contents.
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Register width in bits.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// True once every position holds the fill value.
    pub const fn is_drained(&self) -> bool {
        self.value == self.filled()
    }

    /// Refills every position with the fill value.
    pub const fn clear(&mut self) {
        self.value = self.filled();
    }
}
