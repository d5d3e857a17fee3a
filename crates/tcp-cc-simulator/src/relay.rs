//! Bottleneck router between sender and receiver.
//!
//! The relay's output link is `mismatch_ratio` times slower than its input
//! link, and it can queue `buffer_packets` segments. Per round it lets the
//! first `buffer_packets` segments through, drops the rest of the first group
//! of `mismatch_ratio`, and from then on admits only the second segment of
//! every further group. Given segments 1..=16 with a 10:1 mismatch and a
//! 7-packet queue, only 1..=7 and 12 get through.
//!
//! ACKs never pass through the relay.

use tcp_cc_abstract::{Batch, SimError};
use tracing::debug;

/// Position within each later group that is admitted.
const ADMITTED_SLOT: usize = 1;

#[derive(Debug, Clone)]
pub struct Relay {
    mismatch_ratio: usize,
    buffer_packets: usize,
    requested_buffer_packets: usize,
}

impl Relay {
    /// Create a relay. A `buffer_packets` that would not make the relay a
    /// bottleneck is clamped to `mismatch_ratio - 1`.
    pub fn new(mismatch_ratio: usize, buffer_packets: usize) -> Result<Self, SimError> {
        if mismatch_ratio < 2 {
            return Err(SimError::InvalidConfig(format!(
                "mismatch_ratio must be greater than 1, got {mismatch_ratio}"
            )));
        }
        let clamped = buffer_packets.min(mismatch_ratio - 1);
        if clamped != buffer_packets {
            debug!(
                "Relay buffer clamped from {} to {} packets (mismatch ratio {})",
                buffer_packets, clamped, mismatch_ratio
            );
        }
        Ok(Self {
            mismatch_ratio,
            buffer_packets: clamped,
            requested_buffer_packets: buffer_packets,
        })
    }

    pub fn mismatch_ratio(&self) -> usize {
        self.mismatch_ratio
    }

    /// Effective queue size, after clamping.
    pub fn buffer_packets(&self) -> usize {
        self.buffer_packets
    }

    /// Queue size as configured, before clamping.
    pub fn requested_buffer_packets(&self) -> usize {
        self.requested_buffer_packets
    }

    pub fn was_clamped(&self) -> bool {
        self.buffer_packets != self.requested_buffer_packets
    }

    /// Bytes the relay can forward per round: one segment in transmission
    /// plus a full queue.
    pub fn bottleneck_capacity(&self, max_segment_size: i64) -> i64 {
        (self.buffer_packets as i64 + 1) * max_segment_size
    }

    /// Drop the segments that exceed the bottleneck, in place.
    ///
    /// Returns the slots that held a segment and were emptied.
    pub fn relay(&self, batch: &mut Batch) -> Vec<usize> {
        let mut dropped = Vec::new();
        for idx in 0..batch.capacity() {
            if self.admits(idx) {
                continue;
            }
            if batch.take(idx).is_some() {
                dropped.push(idx);
            }
        }
        dropped
    }

    fn admits(&self, idx: usize) -> bool {
        if idx < self.mismatch_ratio {
            idx < self.buffer_packets
        } else {
            idx % self.mismatch_ratio == ADMITTED_SLOT
        }
    }
}
