//! # Waveform Capture Tests

use uartsim_core::config::BitOrder;
use uartsim_core::sim::Waveform;
use uartsim_core::tx::Frame;

/// Builds a capture of `frames` at `t` edges per bit, separated by `gap` idle edges.
fn line_of(frames: &[Frame], t: u64, gap: u64) -> Waveform {
    let mut wave = Waveform::new();
    for _ in 0..gap {
        wave.record(true, false);
    }
    for frame in frames {
        for level in frame.levels() {
            for _ in 0..t {
                wave.record(level, true);
            }
        }
        for _ in 0..gap {
            wave.record(true, false);
        }
    }
    wave
}

#[test]
fn samples_frames_separated_by_idle() {
    let frames = [
        Frame::encode(0x48, BitOrder::Lsb),
        Frame::encode(0x69, BitOrder::Lsb),
    ];
    let wave = line_of(&frames, 5, 3);
    let captured = wave.sample_frames(5);
    assert_eq!(captured.len(), 2);
    assert_eq!(captured[0].start, 3);
    assert_eq!(captured[0].frame, frames[0]);
    assert_eq!(captured[1].start, 3 + 50 + 3);
    assert_eq!(captured[1].frame, frames[1]);
}

#[test]
fn samples_back_to_back_frames_without_gap() {
    let frames = [
        Frame::encode(0x00, BitOrder::Lsb),
        Frame::encode(0xFF, BitOrder::Lsb),
        Frame::encode(0x80, BitOrder::Lsb),
    ];
    let wave = line_of(&frames, 4, 0);
    let bytes: Vec<u8> = wave
        .sample_frames(4)
        .iter()
        .filter_map(|c| c.frame.data(BitOrder::Lsb))
        .collect();
    assert_eq!(bytes, vec![0x00, 0xFF, 0x80]);
}

#[test]
fn truncated_frame_is_not_reported() {
    let frame = Frame::encode(0x12, BitOrder::Lsb);
    let mut wave = Waveform::new();
    for level in frame.levels().iter().take(6) {
        for _ in 0..4 {
            wave.record(*level, true);
        }
    }
    assert!(wave.sample_frames(4).is_empty());
}

#[test]
fn runs_merge_busy_changes() {
    let mut wave = Waveform::new();
    wave.record(true, true);
    wave.record(true, false);
    wave.record(false, false);
    assert_eq!(wave.segments().len(), 3);
    assert_eq!(wave.runs(), vec![(true, 2), (false, 1)]);
    assert_eq!(wave.line(), vec![true, true, false]);
}

#[test]
fn clear_empties_capture() {
    let mut wave = line_of(&[Frame::encode(1, BitOrder::Lsb)], 2, 1);
    assert!(!wave.is_empty());
    wave.clear();
    assert!(wave.is_empty());
    assert_eq!(wave.len(), 0);
    assert!(wave.segments().is_empty());
}
