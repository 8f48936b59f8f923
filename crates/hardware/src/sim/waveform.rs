//! Line waveform capture.
//!
//! Records the transmitter's outputs after every clock edge, run-length
//! encoded, and offers a logic-analyzer style view of the result: runs,
//! point sampling, and frame extraction by mid-bit sampling after each
//! falling start edge.

use crate::common::constants::{FRAME_WIDTH, IDLE_LEVEL};
use crate::tx::Frame;

/// A stretch of consecutive edges with identical outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Index of the first edge in the run.
    pub start: u64,
    /// Number of edges in the run.
    pub len: u64,
    /// Serial line level.
    pub line: bool,
    /// Busy level.
    pub busy: bool,
}

impl Segment {
    /// Index one past the last edge in the run.
    pub const fn end(&self) -> u64 {
        self.start + self.len
    }
}

/// A frame recovered from the captured line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapturedFrame {
    /// Edge at which the start bit began.
    pub start: u64,
    /// Sampled bit pattern.
    pub frame: Frame,
}

/// Run-length encoded record of `serial_out` and `busy`.
#[derive(Debug, Clone, Default)]
pub struct Waveform {
    segments: Vec<Segment>,
    len: u64,
}

impl Waveform {
    /// Creates an empty capture.
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
            len: 0,
        }
    }

    /// Appends the outputs observed after one edge.
    pub fn record(&mut self, line: bool, busy: bool) {
        self.len += 1;
        if let Some(seg) = self.segments.last_mut()
            && seg.line == line
            && seg.busy == busy
        {
            seg.len += 1;
            return;
        }
        self.segments.push(Segment {
            start: self.len - 1,
            len: 1,
            line,
            busy,
        });
    }

    /// Number of edges recorded.
    pub const fn len(&self) -> u64 {
        self.len
    }

    /// True when nothing has been recorded.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discards the capture.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.len = 0;
    }

    /// All recorded segments in order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Runs of constant line level as `(level, edges)`, merging busy changes.
    pub fn runs(&self) -> Vec<(bool, u64)> {
        let mut runs: Vec<(bool, u64)> = Vec::new();
        for seg in &self.segments {
            if let Some((level, len)) = runs.last_mut()
                && *level == seg.line
            {
                *len += seg.len;
                continue;
            }
            runs.push((seg.line, seg.len));
        }
        runs
    }

    /// Segment containing edge `cycle`, if recorded.
    fn segment_at(&self, cycle: u64) -> Option<&Segment> {
        if cycle >= self.len {
            return None;
        }
        let idx = self.segments.partition_point(|s| s.end() <= cycle);
        self.segments.get(idx)
    }

    /// Line level after edge `cycle`. Idle before any recorded edge or past the end.
    pub fn line_at(&self, cycle: u64) -> bool {
        self.segment_at(cycle).map_or(IDLE_LEVEL, |s| s.line)
    }

    /// Busy level after edge `cycle`. Low outside the capture.
    pub fn busy_at(&self, cycle: u64) -> bool {
        self.segment_at(cycle).is_some_and(|s| s.busy)
    }

    /// Line levels for every recorded edge. Intended for short captures.
    pub fn line(&self) -> Vec<bool> {
        self.segments
            .iter()
            .flat_map(|s| std::iter::repeat_n(s.line, s.len as usize))
            .collect()
    }

    /// Edges at which the line fell from idle to the start level, at or after `from`.
    fn next_falling_edge(&self, from: u64) -> Option<u64> {
        let first = self.segments.partition_point(|s| s.end() <= from);
        for (i, seg) in self.segments.iter().enumerate().skip(first) {
            if seg.line == IDLE_LEVEL || seg.start < from {
                continue;
            }
            let prev = if i == 0 {
                IDLE_LEVEL
            } else {
                self.segments[i - 1].line
            };
            if prev == IDLE_LEVEL {
                return Some(seg.start);
            }
        }
        None
    }

    /// Recovers every complete frame on the line.
    ///
    /// Each falling edge from idle is taken as a start bit; the ten bits are
    /// sampled in the middle of their periods, `threshold` edges apart. The
    /// search for the next start bit resumes at the stop-bit sample point.
    /// A frame whose stop bit lies past the end of the capture is skipped.
    pub fn sample_frames(&self, threshold: u32) -> Vec<CapturedFrame> {
        let period = u64::from(threshold.max(1));
        let half = period / 2;
        let last_offset = half + u64::from(FRAME_WIDTH - 1) * period;

        let mut frames = Vec::new();
        let mut cursor = 0;
        while let Some(start) = self.next_falling_edge(cursor) {
            if start + last_offset >= self.len {
                break;
            }
            let levels: Vec<bool> = (0..u64::from(FRAME_WIDTH))
                .map(|k| self.line_at(start + half + k * period))
                .collect();
            if let Some(frame) = Frame::from_levels(&levels) {
                frames.push(CapturedFrame { start, frame });
            }
            cursor = start + last_offset;
        }
        frames
    }
}
