//! Serial bit transmitter.
//!
//! Serializes one byte at a time onto a single output line using 8N1
//! framing. The model is fully synchronous: every state element updates on
//! each active clock edge.
//!
//! # Structure
//!
//! * **Frame buffer:** 10-bit shift register; bit 0 drives `serial_out`,
//!   shifts refill with the idle level.
//! * **Busy buffer:** 10-bit shift register loaded all-ones with the frame and
//!   shifted in lockstep; bit 0 drives `busy`.
//! * **Divider:** counts edges per bit period and gates the shifts.
//!
//! A frame runs to completion once loaded; there is no abort path.

use tracing::{debug, trace, warn};

use crate::common::ConfigError;
use crate::common::constants::{FRAME_MASK, FRAME_WIDTH, IDLE_LEVEL};
use crate::config::{BitOrder, Config, LoadMode};
use crate::traits::Clocked;
use crate::tx::divider::BitRateDivider;
use crate::tx::frame::Frame;
use crate::tx::shift::ShiftRegister;

/// Input signals sampled at each clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TxInput {
    /// Byte presented for transmission.
    pub data: u8,
    /// Load strobe; meaningful in [`LoadMode::Strobe`] only.
    pub load: bool,
}

impl TxInput {
    /// Input with the load strobe raised.
    pub const fn load(data: u8) -> Self {
        Self { data, load: true }
    }

    /// Input holding `data` without requesting a load.
    pub const fn hold(data: u8) -> Self {
        Self { data, load: false }
    }
}

/// Output signals and events produced by one clock edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxOutput {
    /// Serial line level.
    pub serial_out: bool,
    /// High while a frame is shifting out.
    pub busy: bool,
    /// A new frame was loaded on this edge.
    pub loaded: bool,
    /// A bit period ended on this edge.
    pub bit_edge: bool,
    /// The load strobe was raised while busy and ignored.
    pub strobe_ignored: bool,
}

/// Shift-register serial transmitter.
#[derive(Debug, Clone)]
pub struct Transmitter {
    /// Bit-period divider.
    divider: BitRateDivider,
    /// Remaining bits of the current frame; bit 0 is on the line.
    frame: ShiftRegister,
    /// In-progress tracking, shifted in lockstep with `frame`.
    busy: ShiftRegister,
    /// Data bit order.
    order: BitOrder,
    /// Load trigger.
    mode: LoadMode,
    /// Restart the divider on every load.
    reset_divider_on_load: bool,
    /// Log every bit transition.
    trace_line: bool,
    /// Byte latched by the most recent load.
    last_loaded: Option<u8>,
}

impl Transmitter {
    /// Creates an idle transmitter.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Clock edges per bit period.
    /// * `order` - Data bit order on the line.
    /// * `mode` - Load trigger.
    pub const fn new(threshold: u32, order: BitOrder, mode: LoadMode) -> Self {
        Self {
            divider: BitRateDivider::new(threshold),
            frame: ShiftRegister::new(FRAME_WIDTH, IDLE_LEVEL),
            busy: ShiftRegister::new(FRAME_WIDTH, false),
            order,
            mode,
            reset_divider_on_load: true,
            trace_line: false,
            last_loaded: None,
        }
    }

    /// Creates a transmitter from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the clock/baud pair is unusable.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let threshold = config.divider_threshold()?;
        let mut tx = Self::new(threshold, config.serial.bit_order, config.serial.load_mode);
        tx.reset_divider_on_load = config.serial.reset_divider_on_load;
        tx.trace_line = config.general.trace_line;
        Ok(tx)
    }

    /// Sets whether a load restarts the bit-period divider.
    #[must_use]
    pub const fn with_divider_reset(mut self, enabled: bool) -> Self {
        self.reset_divider_on_load = enabled;
        self
    }

    /// Current serial line level.
    pub const fn serial_out(&self) -> bool {
        self.frame.lsb()
    }

    /// True while a frame is shifting out.
    pub const fn busy(&self) -> bool {
        self.busy.lsb()
    }

    /// Edges counted in the current bit period.
    pub const fn divider_count(&self) -> u32 {
        self.divider.count()
    }

    /// Edges per bit period.
    pub const fn threshold(&self) -> u32 {
        self.divider.threshold()
    }

    /// Data bit order.
    pub const fn bit_order(&self) -> BitOrder {
        self.order
    }

    /// Load trigger.
    pub const fn load_mode(&self) -> LoadMode {
        self.mode
    }

    /// Byte latched by the most recent load, if any.
    pub const fn last_loaded(&self) -> Option<u8> {
        self.last_loaded
    }

    /// Bits of the current frame still to be shifted, including the one on the line.
    pub const fn remaining_bits(&self) -> u32 {
        self.busy.value().count_ones()
    }

    /// Whether this edge should load a new frame, ignoring busy state.
    const fn wants_load(&self, input: TxInput) -> bool {
        match self.mode {
            LoadMode::Strobe => input.load,
            LoadMode::Implicit => true,
            LoadMode::OnChange => match self.last_loaded {
                Some(prev) => prev != input.data,
                None => true,
            },
        }
    }

    /// Latches `data` into the frame buffer and marks every position pending.
    fn load_frame(&mut self, data: u8) {
        let frame = Frame::encode(data, self.order);
        self.frame.load(frame.bits());
        self.busy.load(FRAME_MASK);
        self.last_loaded = Some(data);
        // Without the reset the divider holds its phase, so the start bit
        // ends at the next free-running wrap instead of a full period later.
        if self.reset_divider_on_load {
            self.divider.reset();
        }
        debug!(byte = data, frame = %frame, "frame loaded");
    }
}

impl Clocked for Transmitter {
    type Input = TxInput;
    type Output = TxOutput;

    /// Applies one clock edge.
    ///
    /// Busy state is sampled before the edge, so a load is honoured on the
    /// first edge after `busy` has dropped, never on the edge that drops it.
    fn tick(&mut self, input: TxInput) -> TxOutput {
        let was_busy = self.busy();
        let wants_load = self.wants_load(input);

        let mut loaded = false;
        let mut bit_edge = false;
        let mut strobe_ignored = false;

        if wants_load && !was_busy {
            self.load_frame(input.data);
            loaded = true;
        } else {
            if was_busy && input.load && self.mode == LoadMode::Strobe {
                strobe_ignored = true;
                warn!(byte = input.data, "load strobe ignored while busy");
            }
            if self.divider.tick() {
                bit_edge = true;
                let _ = self.frame.shift();
                let _ = self.busy.shift();
                if self.trace_line && was_busy {
                    trace!(
                        line = u8::from(self.serial_out()),
                        remaining = self.remaining_bits(),
                        "bit"
                    );
                }
                if was_busy && !self.busy() {
                    debug!("frame complete");
                }
            }
        }

        TxOutput {
            serial_out: self.serial_out(),
            busy: self.busy(),
            loaded,
            bit_edge,
            strobe_ignored,
        }
    }

    /// Returns to idle: line at mark, busy low, divider and history cleared.
    fn reset(&mut self) {
        self.divider.reset();
        self.frame.clear();
        self.busy.clear();
        self.last_loaded = None;
    }
}
