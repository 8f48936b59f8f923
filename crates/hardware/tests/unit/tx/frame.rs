//! # Frame Encoding Tests

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use uartsim_core::config::BitOrder;
use uartsim_core::tx::Frame;

use crate::common::harness::expected_levels;

#[test]
fn frame_0x5a_lsb_first() {
    let frame = Frame::encode(0x5A, BitOrder::Lsb);
    let levels: Vec<u8> = frame.levels().iter().map(|&l| u8::from(l)).collect();
    assert_eq!(levels, vec![0, 0, 1, 0, 1, 1, 0, 1, 0, 1]);
}

#[test]
fn frame_0x01_in_both_orders() {
    let lsb: Vec<u8> = Frame::encode(0x01, BitOrder::Lsb)
        .levels()
        .iter()
        .map(|&l| u8::from(l))
        .collect();
    let msb: Vec<u8> = Frame::encode(0x01, BitOrder::Msb)
        .levels()
        .iter()
        .map(|&l| u8::from(l))
        .collect();
    assert_eq!(lsb, vec![0, 1, 0, 0, 0, 0, 0, 0, 0, 1]);
    assert_eq!(msb, vec![0, 0, 0, 0, 0, 0, 0, 0, 1, 1]);
}

#[test]
fn palindromic_byte_is_order_independent() {
    for byte in [0x81u8, 0x3C, 0x5A, 0x00, 0xFF, 0xA5] {
        assert_eq!(
            Frame::encode(byte, BitOrder::Lsb),
            Frame::encode(byte, BitOrder::Msb)
        );
    }
}

#[test]
fn from_levels_requires_ten_bits() {
    assert_eq!(Frame::from_levels(&[false; 9]), None);
    assert_eq!(Frame::from_levels(&[false; 11]), None);
    let frame = Frame::from_levels(&Frame::encode(0x42, BitOrder::Lsb).levels()).unwrap();
    assert_eq!(frame.data(BitOrder::Lsb), Some(0x42));
}

#[test]
fn missing_start_bit_is_framing_error() {
    let frame = Frame::from_bits(0x3FF);
    assert!(!frame.is_well_formed());
    assert_eq!(frame.data(BitOrder::Lsb), None);
}

#[test]
fn bit_index_out_of_range_reads_low() {
    let frame = Frame::encode(0xFF, BitOrder::Lsb);
    assert!(frame.bit(9));
    assert!(!frame.bit(10));
}

proptest! {
    #[test]
    fn every_byte_frames_as_start_data_stop(byte in any::<u8>(), msb in any::<bool>()) {
        let order = if msb { BitOrder::Msb } else { BitOrder::Lsb };
        let frame = Frame::encode(byte, order);
        prop_assert_eq!(frame.levels().to_vec(), expected_levels(byte, order));
        prop_assert!(frame.is_well_formed());
        prop_assert_eq!(frame.data(order), Some(byte));
    }
}
