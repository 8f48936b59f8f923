//! Transmitter statistics collection and reporting.
//!
//! This module tracks what happened on the line during a simulation. It provides:
//! 1. **Cycles:** Total clock edges, split into busy and idle.
//! 2. **Frames:** Frames loaded and completed, bit periods shifted.
//! 3. **Caller contract:** Load strobes ignored while busy, bytes dropped by change detection.
//! 4. **Throughput:** Simulated line time and effective bytes per second.

use std::time::Instant;

/// Statistics gathered over one simulation run.
#[derive(Debug, Clone)]
pub struct TxStats {
    start_time: Instant,
    /// Clock edges applied.
    pub cycles: u64,
    /// Edges on which `busy` was high afterwards.
    pub busy_cycles: u64,
    /// Edges on which `busy` was low afterwards.
    pub idle_cycles: u64,
    /// Bit periods completed while a frame was in flight.
    pub bit_periods: u64,
    /// Frames latched into the shift register.
    pub frames_loaded: u64,
    /// Frames whose stop bit finished.
    pub frames_completed: u64,
    /// Load strobes raised while busy.
    pub strobes_ignored: u64,
    /// Queued bytes the transmitter declined to load.
    pub bytes_dropped: u64,
}

impl Default for TxStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            busy_cycles: 0,
            idle_cycles: 0,
            bit_periods: 0,
            frames_loaded: 0,
            frames_completed: 0,
            strobes_ignored: 0,
            bytes_dropped: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"line"`, `"contract"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "line", "contract"];

impl TxStats {
    /// Fraction of edges spent transmitting, in percent.
    pub fn utilization(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.busy_cycles as f64 / self.cycles as f64 * 100.0
        }
    }

    /// Simulated wall time covered by the run, in seconds.
    pub fn line_seconds(&self, clock_hz: u64) -> f64 {
        if clock_hz == 0 {
            0.0
        } else {
            self.cycles as f64 / clock_hz as f64
        }
    }

    /// Completed frames per simulated second.
    pub fn bytes_per_second(&self, clock_hz: u64) -> f64 {
        let seconds = self.line_seconds(clock_hz);
        if seconds > 0.0 {
            self.frames_completed as f64 / seconds
        } else {
            0.0
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"line"` or
    /// `"contract"`. Pass an empty slice to print all sections.
    pub fn print_sections(&self, sections: &[String], clock_hz: u64) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let host_seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;

        if want("summary") {
            let khz = if host_seconds > 0.0 {
                (self.cycles as f64 / host_seconds) / 1000.0
            } else {
                0.0
            };
            println!("\n==========================================================");
            println!("SERIAL TRANSMITTER SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {host_seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_freq                 {khz:.2} kHz");
            println!("line_seconds             {:.6} s", self.line_seconds(clock_hz));
            println!("----------------------------------------------------------");
        }
        if want("line") {
            println!("LINE ACTIVITY");
            println!(
                "  cycles.busy            {} ({:.2}%)",
                self.busy_cycles,
                self.utilization()
            );
            println!(
                "  cycles.idle            {} ({:.2}%)",
                self.idle_cycles,
                (self.idle_cycles as f64 / cyc) * 100.0
            );
            println!("  bits.shifted           {}", self.bit_periods);
            println!("  frames.loaded          {}", self.frames_loaded);
            println!("  frames.completed       {}", self.frames_completed);
            println!(
                "  throughput             {:.2} B/s",
                self.bytes_per_second(clock_hz)
            );
            println!("----------------------------------------------------------");
        }
        if want("contract") {
            println!("CALLER CONTRACT");
            println!("  strobes.ignored        {}", self.strobes_ignored);
            println!("  bytes.dropped          {}", self.bytes_dropped);
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    pub fn print(&self, clock_hz: u64) {
        self.print_sections(&[], clock_hz);
    }
}
