//! Bit-rate divider.
//!
//! Scales the system clock down to the serial bit rate. The counter advances
//! on every active edge; when it reaches the threshold it wraps to zero and
//! signals the end of a bit period. A threshold of `T` therefore produces one
//! strobe every `T` edges.

use crate::common::ConfigError;
use crate::config::SerialConfig;

/// Clock-edge counter producing one strobe per serial bit period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitRateDivider {
    /// Edges per bit period (never zero).
    threshold: u32,
    /// Edges counted since the last wrap.
    count: u32,
}

impl BitRateDivider {
    /// Creates a divider with the given threshold.
    ///
    /// A threshold of zero is treated as one (a strobe on every edge).
    pub const fn new(threshold: u32) -> Self {
        Self {
            threshold: if threshold == 0 { 1 } else { threshold },
            count: 0,
        }
    }

    /// Creates a divider for `clock_hz` from the serial settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the clock/baud pair yields no usable threshold.
    pub fn for_clock(clock_hz: u64, serial: &SerialConfig) -> Result<Self, ConfigError> {
        serial.divider_threshold(clock_hz).map(Self::new)
    }

    /// Counts one edge. Returns `true` on the edge that completes a bit period.
    pub const fn tick(&mut self) -> bool {
        self.count += 1;
        if self.count >= self.threshold {
            self.count = 0;
            true
        } else {
            false
        }
    }

    /// Restarts the current bit period from zero.
    pub const fn reset(&mut self) {
        self.count = 0;
    }

    /// Edges counted since the last wrap or reset.
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Edges per bit period.
    pub const fn threshold(&self) -> u32 {
        self.threshold
    }
}
