//! # Transmitter Timing Tests
//!
//! Frame shape on the line, busy duration, strobe gating and the
//! mid-frame data hold.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use uartsim_core::config::{BitOrder, LoadMode};

use crate::common::Bench;
use crate::common::harness::expected_levels;

#[test]
fn idle_line_is_mark_and_not_busy() {
    let mut bench = Bench::strobe(4);
    bench.hold(0x00, 20);
    assert!(bench.line.iter().all(|&l| l));
    assert!(bench.busy.iter().all(|&b| !b));
}

#[test]
fn frame_0x5a_lsb_first_line_sequence() {
    let t = 6;
    let mut bench = Bench::strobe(t as u32);
    bench.hold(0x00, 3);
    let start = bench.line.len();
    assert!(bench.load(0x5A).loaded);
    bench.drain(0x5A, 20 * t);
    bench.hold(0x5A, 2 * t);

    let levels: Vec<u8> = bench
        .frame_levels(start, t)
        .iter()
        .map(|&l| u8::from(l))
        .collect();
    assert_eq!(levels, vec![0, 0, 1, 0, 1, 1, 0, 1, 0, 1]);
    assert!(bench.line[start + 10 * t..].iter().all(|&l| l));
}

#[rstest]
#[case(1)]
#[case(3)]
#[case(10)]
fn busy_spans_exactly_ten_bit_periods(#[case] t: usize) {
    let mut bench = Bench::strobe(t as u32);
    let _ = bench.load(0xC3);
    bench.drain(0xC3, 20 * t);
    let busy_edges = bench.busy.iter().filter(|&&b| b).count();
    assert_eq!(busy_edges, 10 * t);
    // Busy drops on the edge that ends the stop bit.
    assert_eq!(bench.now(), 10 * t);
    assert!(!bench.busy[10 * t]);
    assert!(bench.busy[10 * t - 1]);
}

#[test]
fn bit_transitions_are_threshold_edges_apart() {
    // 0x55 alternates every bit, so each run is one bit period.
    let t = 7;
    let mut bench = Bench::strobe(t as u32);
    let _ = bench.load(0x55);
    bench.drain(0x55, 20 * t);
    let mut runs = Vec::new();
    let mut len = 1;
    for w in bench.line.windows(2) {
        if w[0] == w[1] {
            len += 1;
        } else {
            runs.push(len);
            len = 1;
        }
    }
    runs.push(len);
    // Ten alternating bits; the stop bit merges with the trailing idle edge.
    assert_eq!(runs, vec![t, t, t, t, t, t, t, t, t, t + 1]);
}

#[test]
fn strobe_while_busy_is_ignored() {
    let t = 4;
    let mut bench = Bench::strobe(t as u32);
    let _ = bench.load(0x0F);
    bench.hold(0x0F, 5);
    let out = bench.load(0xF0);
    assert!(out.strobe_ignored);
    assert!(!out.loaded);
    assert_eq!(bench.tx.last_loaded(), Some(0x0F));
    bench.drain(0xF0, 20 * t);
    assert_eq!(bench.frame_levels(0, t), expected_levels(0x0F, BitOrder::Lsb));
}

#[test]
fn strobe_on_the_edge_busy_drops_is_ignored() {
    let t = 2;
    let mut bench = Bench::strobe(t as u32);
    let _ = bench.load(0x11);
    bench.hold(0x11, 10 * t - 1);
    // This edge ends the stop bit; busy was still high when it was sampled.
    let out = bench.load(0x22);
    assert!(!out.busy);
    assert!(out.strobe_ignored);
    let out = bench.load(0x22);
    assert!(out.loaded);
    assert_eq!(bench.now(), 10 * t + 1);
}

#[test]
fn data_change_while_busy_does_not_corrupt_frame() {
    let t = 3;
    let mut bench = Bench::strobe(t as u32);
    let _ = bench.load(0x00);
    bench.hold(0xFF, 4 * t);
    bench.drain(0xAA, 20 * t);
    assert_eq!(bench.frame_levels(0, t), expected_levels(0x00, BitOrder::Lsb));
}

#[test]
fn back_to_back_identical_frames_are_identical() {
    let t = 5;
    let mut bench = Bench::strobe(t as u32);
    let _ = bench.load(0x5A);
    bench.drain(0x5A, 20 * t);
    let second = bench.line.len();
    assert!(bench.load(0x5A).loaded);
    bench.drain(0x5A, 20 * t);

    assert_eq!(bench.frame_levels(0, t), bench.frame_levels(second, t));
    // Stop bit plus the idle edge separate the frames at mark level.
    assert!(bench.line[9 * t..second].iter().all(|&l| l));
    assert!(second - 9 * t > t);
}

#[test]
fn msb_first_frame_on_line() {
    let t = 2;
    let mut bench = Bench::new(t as u32, BitOrder::Msb, LoadMode::Strobe);
    let _ = bench.load(0x01);
    bench.drain(0x01, 20 * t);
    let levels: Vec<u8> = bench.frame_levels(0, t).iter().map(|&l| u8::from(l)).collect();
    assert_eq!(levels, vec![0, 0, 0, 0, 0, 0, 0, 0, 1, 1]);
}

#[test]
fn remaining_bits_counts_down() {
    let t = 2;
    let mut bench = Bench::strobe(t as u32);
    let _ = bench.load(0x00);
    assert_eq!(bench.tx.remaining_bits(), 10);
    bench.hold(0x00, t);
    assert_eq!(bench.tx.remaining_bits(), 9);
    bench.hold(0x00, 9 * t);
    assert_eq!(bench.tx.remaining_bits(), 0);
}

proptest! {
    #[test]
    fn any_byte_any_threshold_produces_framed_line(
        byte in any::<u8>(),
        msb in any::<bool>(),
        t in 1usize..6,
    ) {
        let order = if msb { BitOrder::Msb } else { BitOrder::Lsb };
        let mut bench = Bench::new(t as u32, order, LoadMode::Strobe);
        let _ = bench.load(byte);
        bench.drain(byte, 20 * t);
        prop_assert_eq!(bench.frame_levels(0, t), expected_levels(byte, order));
        prop_assert_eq!(bench.busy.iter().filter(|&&b| b).count(), 10 * t);
        prop_assert!(bench.line[10 * t]);
    }
}
