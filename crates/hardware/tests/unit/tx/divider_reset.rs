//! # Divider Reset-on-Load Tests
//!
//! A load always restarts the bit period. With the reset disabled the divider
//! keeps its free-running phase and the first start bit after an idle gap is
//! shortened.

use rstest::rstest;
use uartsim_core::config::{BitOrder, LoadMode};
use uartsim_core::tx::Transmitter;

use crate::common::Bench;

const T: usize = 8;

#[rstest]
#[case(0)]
#[case(1)]
#[case(3)]
#[case(7)]
#[case(8)]
#[case(13)]
fn load_resets_divider_regardless_of_phase(#[case] idle: usize) {
    let mut bench = Bench::strobe(T as u32);
    bench.hold(0xFF, idle);
    let start = bench.line.len();
    let _ = bench.load(0xFF);
    assert_eq!(bench.tx.divider_count(), 0);
    bench.drain(0xFF, 20 * T);
    assert_eq!(bench.low_run(start), T);
}

#[rstest]
#[case(0, T)]
#[case(1, T - 1)]
#[case(3, T - 3)]
#[case(7, 1)]
#[case(8, T)]
#[case(13, T - 5)]
fn free_running_divider_mistimes_first_start_bit(#[case] idle: usize, #[case] expected: usize) {
    let tx = Transmitter::new(T as u32, BitOrder::Lsb, LoadMode::Strobe).with_divider_reset(false);
    let mut bench = Bench::with(tx);
    bench.hold(0xFF, idle);
    let start = bench.line.len();
    let _ = bench.load(0xFF);
    bench.drain(0xFF, 20 * T);
    assert_eq!(bench.low_run(start), expected);
}

#[test]
fn free_running_divider_keeps_burst_frames_aligned() {
    let tx = Transmitter::new(T as u32, BitOrder::Lsb, LoadMode::Strobe).with_divider_reset(false);
    let mut bench = Bench::with(tx);
    bench.hold(0xFF, 3);
    let _ = bench.load(0xFF);
    bench.drain(0xFF, 20 * T);
    // Loaded on the edge right after the wrap that ended the previous frame,
    // so the held phase is zero and the start bit is a full period.
    let second = bench.line.len();
    let _ = bench.load(0xFF);
    bench.drain(0xFF, 20 * T);
    assert_eq!(bench.low_run(second), T);
}
