//! Value Change Dump export.
//!
//! Writes a captured [`Waveform`] as an IEEE 1364 VCD file so the serial line
//! can be inspected in a waveform viewer. Time is expressed in picoseconds;
//! edge `n` of the capture lands at `n * period`.

use std::io::{self, Write};

use crate::sim::waveform::Waveform;

/// Identifier codes for the dumped signals.
const ID_CLK: char = '!';
const ID_LINE: char = '"';
const ID_BUSY: char = '#';

/// Scope name under which the signals appear.
const SCOPE: &str = "uart_tx";

/// Options controlling VCD output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VcdOptions {
    /// Emit the clock signal as well (two changes per edge).
    pub include_clock: bool,
}

/// Clock period in picoseconds, rounded to the nearest integer and never zero.
pub fn period_ps(clock_hz: u64) -> u64 {
    if clock_hz == 0 {
        return 1;
    }
    ((1_000_000_000_000 + clock_hz / 2) / clock_hz).max(1)
}

/// Formats a one-bit value change.
fn bit(value: bool, id: char) -> String {
    format!("{}{id}", u8::from(value))
}

/// Writes `wave` as VCD.
///
/// # Errors
///
/// Propagates any I/O error from `out`.
pub fn write_vcd<W: Write>(
    wave: &Waveform,
    clock_hz: u64,
    options: VcdOptions,
    out: &mut W,
) -> io::Result<()> {
    let period = period_ps(clock_hz);

    writeln!(out, "$version uartsim {} $end", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "$timescale 1ps $end")?;
    writeln!(out, "$scope module {SCOPE} $end")?;
    if options.include_clock {
        writeln!(out, "$var wire 1 {ID_CLK} clk $end")?;
    }
    writeln!(out, "$var wire 1 {ID_LINE} serial_out $end")?;
    writeln!(out, "$var wire 1 {ID_BUSY} busy $end")?;
    writeln!(out, "$upscope $end")?;
    writeln!(out, "$enddefinitions $end")?;

    writeln!(out, "$dumpvars")?;
    if options.include_clock {
        writeln!(out, "{}", bit(false, ID_CLK))?;
    }
    writeln!(out, "{}", bit(true, ID_LINE))?;
    writeln!(out, "{}", bit(false, ID_BUSY))?;
    writeln!(out, "$end")?;

    let mut line = true;
    let mut busy = false;

    if options.include_clock {
        for cycle in 0..wave.len() {
            let t = cycle * period;
            writeln!(out, "#{t}")?;
            writeln!(out, "{}", bit(true, ID_CLK))?;
            emit_changes(wave, cycle, &mut line, &mut busy, out)?;
            writeln!(out, "#{}", t + period / 2)?;
            writeln!(out, "{}", bit(false, ID_CLK))?;
        }
    } else {
        for seg in wave.segments() {
            if seg.line == line && seg.busy == busy {
                continue;
            }
            writeln!(out, "#{}", seg.start * period)?;
            emit_changes(wave, seg.start, &mut line, &mut busy, out)?;
        }
    }
    writeln!(out, "#{}", wave.len() * period)?;
    Ok(())
}

/// Writes value changes for edge `cycle` relative to the last emitted levels.
fn emit_changes<W: Write>(
    wave: &Waveform,
    cycle: u64,
    line: &mut bool,
    busy: &mut bool,
    out: &mut W,
) -> io::Result<()> {
    let next_line = wave.line_at(cycle);
    let next_busy = wave.busy_at(cycle);
    if next_line != *line {
        writeln!(out, "{}", bit(next_line, ID_LINE))?;
        *line = next_line;
    }
    if next_busy != *busy {
        writeln!(out, "{}", bit(next_busy, ID_BUSY))?;
        *busy = next_busy;
    }
    Ok(())
}
