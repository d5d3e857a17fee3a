use std::collections::VecDeque;

use tcp_cc_abstract::{Segment, SimError};

/// Bounded store of out-of-order segments, kept in ascending sequence order.
#[derive(Debug, Clone)]
pub struct ReorderBuffer {
    segments: VecDeque<Segment>,
    capacity: usize,
}

/// Result of releasing buffered segments into the in-order stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Drained {
    /// Next byte expected after the release.
    pub next_expected: i64,
    /// Bytes of buffer space given back.
    pub released_bytes: i64,
    pub segments: usize,
}

impl ReorderBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            segments: VecDeque::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Store a segment in sequence order.
    ///
    /// Returns `Ok(false)` without storing anything when a segment with the same
    /// sequence number is already held.
    pub fn insert(&mut self, segment: Segment) -> Result<bool, SimError> {
        let pos = match self
            .segments
            .binary_search_by_key(&segment.seq_num(), Segment::seq_num)
        {
            Ok(_) => return Ok(false),
            Err(pos) => pos,
        };
        if self.segments.len() >= self.capacity {
            return Err(SimError::ReorderBufferFull {
                capacity: self.capacity,
            });
        }
        self.segments.insert(pos, segment);
        Ok(true)
    }

    /// Release every head segment that the in-order stream now reaches.
    ///
    /// A head starting at or below `next_expected` is removed and the stream
    /// advances to its end. Heads already covered by a longer segment are
    /// removed too, without moving the stream backwards.
    pub fn drain_contiguous(&mut self, next_expected: i64) -> Drained {
        let mut drained = Drained {
            next_expected,
            ..Default::default()
        };
        while let Some(head) = self.segments.front() {
            if head.seq_num() > drained.next_expected {
                break;
            }
            drained.next_expected = drained.next_expected.max(head.end());
            drained.released_bytes += head.len();
            drained.segments += 1;
            self.segments.pop_front();
        }
        drained
    }
}
