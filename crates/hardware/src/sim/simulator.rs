//! Simulator: owns the transmitter together with its byte feeder and probes.
//!
//! The feeder plays the role of the circuit that presents bytes to the
//! transmitter: it watches `busy` and, when the transmitter is idle and a
//! byte is queued, presents that byte with a one-edge load strobe. Every edge
//! is recorded in the [`Waveform`] and counted in [`TxStats`].

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::common::{ConfigError, SimError};
use crate::config::Config;
use crate::sim::waveform::{CapturedFrame, Waveform};
use crate::stats::TxStats;
use crate::traits::Clocked;
use crate::tx::{Transmitter, TxInput, TxOutput};

/// Top-level simulator: transmitter, byte queue and probes.
#[derive(Debug)]
pub struct Simulator {
    /// The device under test.
    pub tx: Transmitter,
    /// Captured line and busy levels.
    pub waveform: Waveform,
    /// Counters for the run.
    pub stats: TxStats,
    /// Bytes waiting to be presented.
    queue: VecDeque<u8>,
    /// Byte currently held on the data input.
    held: u8,
    /// Bytes latched by the transmitter, in order.
    sent: Vec<u8>,
    /// Clock frequency, for reporting.
    clock_hz: u64,
    /// Budget for `run_until_idle`.
    max_cycles: u64,
    /// Record edges into the waveform.
    capture: bool,
}

impl Simulator {
    /// Creates a simulator from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the clock/baud pair is unusable.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let tx = Transmitter::from_config(config)?;
        Ok(Self {
            tx,
            waveform: Waveform::new(),
            stats: TxStats::default(),
            queue: VecDeque::new(),
            held: 0,
            sent: Vec::new(),
            clock_hz: config.clock.frequency_hz,
            max_cycles: config.general.max_cycles,
            capture: true,
        })
    }

    /// Disables or enables waveform capture for subsequent edges.
    pub const fn set_capture(&mut self, enabled: bool) {
        self.capture = enabled;
    }

    /// Appends bytes to the transmit queue.
    pub fn queue(&mut self, bytes: &[u8]) {
        self.queue.extend(bytes);
    }

    /// Bytes still waiting to be presented.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Bytes latched by the transmitter so far.
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }

    /// Clock frequency in Hz.
    pub const fn clock_hz(&self) -> u64 {
        self.clock_hz
    }

    /// True when nothing is queued and no frame is in flight.
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && !self.tx.busy()
    }

    /// Applies one edge with explicit inputs, bypassing the feeder.
    pub fn step(&mut self, input: TxInput) -> TxOutput {
        let was_busy = self.tx.busy();
        self.held = input.data;
        let out = self.tx.tick(input);
        if out.loaded {
            self.sent.push(input.data);
        }
        self.observe(was_busy, out);
        out
    }

    /// Applies one edge driven by the feeder.
    pub fn tick(&mut self) -> TxOutput {
        let was_busy = self.tx.busy();
        let next = if was_busy {
            None
        } else {
            self.queue.front().copied()
        };
        let input = match next {
            Some(byte) => TxInput::load(byte),
            None => TxInput::hold(self.held),
        };

        let out = self.tx.tick(input);
        if let Some(byte) = next {
            let _ = self.queue.pop_front();
            self.held = byte;
            if out.loaded {
                self.sent.push(byte);
            } else {
                self.stats.bytes_dropped += 1;
                warn!(byte, "queued byte not loaded by transmitter");
            }
        } else if out.loaded {
            // Implicit reload of the held byte.
            self.sent.push(self.held);
        }
        self.observe(was_busy, out);
        out
    }

    /// Updates statistics and the capture for one edge.
    fn observe(&mut self, was_busy: bool, out: TxOutput) {
        let stats = &mut self.stats;
        stats.cycles += 1;
        if out.busy {
            stats.busy_cycles += 1;
        } else {
            stats.idle_cycles += 1;
        }
        if out.loaded {
            stats.frames_loaded += 1;
        }
        if was_busy && out.bit_edge {
            stats.bit_periods += 1;
            if !out.busy {
                stats.frames_completed += 1;
            }
        }
        if out.strobe_ignored {
            stats.strobes_ignored += 1;
        }
        if self.capture {
            self.waveform.record(out.serial_out, out.busy);
        }
    }

    /// Applies `cycles` feeder-driven edges.
    pub fn run_for(&mut self, cycles: u64) {
        for _ in 0..cycles {
            let _ = self.tick();
        }
    }

    /// Runs until the queue is empty and the last frame has finished.
    ///
    /// Returns the number of edges applied.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::CycleLimit`] if the configured cycle budget runs
    /// out first.
    pub fn run_until_idle(&mut self) -> Result<u64, SimError> {
        let mut elapsed = 0;
        while !self.is_idle() {
            if elapsed >= self.max_cycles {
                return Err(SimError::CycleLimit {
                    limit: self.max_cycles,
                    pending: self.queue.len(),
                });
            }
            let _ = self.tick();
            elapsed += 1;
        }
        debug!(cycles = elapsed, frames = self.sent.len(), "queue drained");
        Ok(elapsed)
    }

    /// Queues `bytes` and runs until they have all been sent.
    ///
    /// # Errors
    ///
    /// Same as [`Simulator::run_until_idle`].
    pub fn transmit(&mut self, bytes: &[u8]) -> Result<u64, SimError> {
        self.queue(bytes);
        self.run_until_idle()
    }

    /// Frames recovered from the captured line.
    pub fn captured_frames(&self) -> Vec<CapturedFrame> {
        self.waveform.sample_frames(self.tx.threshold())
    }

    /// Data bytes recovered from the captured line; framing errors are skipped.
    pub fn captured_bytes(&self) -> Vec<u8> {
        let order = self.tx.bit_order();
        self.captured_frames()
            .iter()
            .filter_map(|c| c.frame.data(order))
            .collect()
    }
}
