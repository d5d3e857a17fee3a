//! Receiving host: reassembles the byte stream and answers with cumulative ACKs.

use tcp_cc_abstract::{Batch, Segment, SimError, Tuning};

use crate::reorder::ReorderBuffer;

/// What happened to one arriving data segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrival {
    /// Arrived in sequence; `drained` buffered segments followed it.
    InOrder { drained: usize },
    /// Arrived ahead of a gap and was buffered.
    Buffered,
    /// Already delivered or already buffered; nothing stored.
    Duplicate,
}

#[derive(Debug, Clone)]
pub struct Receiver {
    next_byte_expected: i64,
    last_byte_received: i64,
    receive_window: i64,
    buffer: ReorderBuffer,
}

impl Receiver {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            next_byte_expected: 0,
            last_byte_received: -1,
            receive_window: tuning.receive_window,
            buffer: ReorderBuffer::new(tuning.reorder_slots),
        }
    }

    pub fn next_byte_expected(&self) -> i64 {
        self.next_byte_expected
    }

    pub fn last_byte_received(&self) -> i64 {
        self.last_byte_received
    }

    /// Free buffer space in bytes, advertised to the sender.
    pub fn receive_window(&self) -> i64 {
        self.receive_window
    }

    /// Out-of-order segments currently held.
    pub fn buffered(&self) -> &ReorderBuffer {
        &self.buffer
    }

    /// Consume one round of data segments and fill `acks` with the replies.
    ///
    /// Slot `i` of `acks` answers slot `i` of `segments`; empty input slots
    /// (lost or never sent) leave the matching ACK slot empty. Returns the
    /// receive window to advertise for the next round.
    pub fn receive(&mut self, segments: &Batch, acks: &mut Batch) -> Result<i64, SimError> {
        acks.clear();
        for (idx, segment) in segments.iter() {
            self.on_segment(segment)?;
            // Cumulative: may also cover segments drained from the buffer.
            acks.set(idx, Segment::new_ack(self.next_byte_expected))?;
        }
        Ok(self.receive_window)
    }

    /// Process a single arriving data segment.
    pub fn on_segment(&mut self, segment: &Segment) -> Result<Arrival, SimError> {
        let seq = segment.seq_num();
        if seq == self.next_byte_expected {
            self.next_byte_expected = segment.end();
            self.last_byte_received = self.last_byte_received.max(segment.end() - 1);

            if self.buffer.is_empty() {
                return Ok(Arrival::InOrder { drained: 0 });
            }
            let drained = self.buffer.drain_contiguous(self.next_byte_expected);
            self.next_byte_expected = drained.next_expected;
            self.receive_window += drained.released_bytes;
            return Ok(Arrival::InOrder {
                drained: drained.segments,
            });
        }

        if seq < self.next_byte_expected {
            return Ok(Arrival::Duplicate);
        }

        if !self.buffer.insert(*segment)? {
            return Ok(Arrival::Duplicate);
        }
        self.receive_window -= segment.len();
        self.last_byte_received = self.last_byte_received.max(segment.end() - 1);
        Ok(Arrival::Buffered)
    }
}
