use serde::{Deserialize, Serialize};

/// One unit of transmission: either a data segment or an acknowledgement.
///
/// Segments carry no payload, only the byte range they describe. For an ACK
/// the sequence number is the cumulative "next byte expected" offset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Segment {
    seq_num: i64,
    length: i64,
    ack: bool,
    /// Reserved for fault injection; nothing in the base protocol sets it.
    corrupted: bool,
}

impl Segment {
    /// Create a data segment covering `[seq_num, seq_num + length)`.
    pub fn data(seq_num: i64, length: i64) -> Self {
        debug_assert!(seq_num >= 0, "negative sequence number {seq_num}");
        Self {
            seq_num,
            length,
            ack: false,
            corrupted: false,
        }
    }

    /// Create a cumulative acknowledgement for everything below `next_expected`.
    pub fn new_ack(next_expected: i64) -> Self {
        debug_assert!(next_expected >= 0, "negative ack number {next_expected}");
        Self {
            seq_num: next_expected,
            // Length of an ACK is irrelevant
            length: 1,
            ack: true,
            corrupted: false,
        }
    }

    pub fn seq_num(&self) -> i64 {
        self.seq_num
    }

    pub fn len(&self) -> i64 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// First byte offset past this segment.
    pub fn end(&self) -> i64 {
        self.seq_num + self.length
    }

    pub fn is_ack(&self) -> bool {
        self.ack
    }

    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }

    /// Mark the segment as damaged in transit.
    pub fn corrupt(mut self) -> Self {
        self.corrupted = true;
        self
    }

    /// One-based display index of the segment for a given MSS.
    ///
    /// Informational only: 1-byte keep-alive segments shift later offsets, so
    /// this is not a reliable segment count.
    pub fn ordinal(&self, max_segment_size: i64) -> i64 {
        self.seq_num / max_segment_size + 1
    }
}
