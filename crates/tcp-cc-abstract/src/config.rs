use serde::{Deserialize, Serialize};

use crate::control::Variant;
use crate::error::SimError;

/// Protocol constants. The defaults reproduce the classic textbook setup.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Tuning {
    /// Bytes per full segment (MSS).
    pub max_segment_size: i64,
    /// Slots per round batch; the upper bound on segments sent in one round.
    pub max_window_segments: usize,
    /// Rounds the retransmission timer counts down from.
    pub timer_default: i32,
    pub initial_slow_start_threshold: i64,
    /// Receiver buffer space in bytes, advertised as the initial receive window.
    pub receive_window: i64,
    /// Maximum number of out-of-order segments the receiver will hold.
    pub reorder_slots: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_segment_size: 1024,
            max_window_segments: 100,
            timer_default: 3,
            initial_slow_start_threshold: 65535,
            receive_window: 65536,
            reorder_slots: 50_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Input:output link speed ratio at the relay.
    pub mismatch_ratio: usize,
    /// Relay queue size in packets. Clamped below `mismatch_ratio`.
    pub buffer_packets: usize,
    pub variant: Variant,
    /// Give Reno the same round-counter timeout Tahoe has.
    pub reno_timeout: bool,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            mismatch_ratio: 10,
            buffer_packets: 7,
            variant: Variant::Tahoe,
            reno_timeout: false,
            tuning: Tuning::default(),
        }
    }
}

impl SimConfig {
    pub fn new(mismatch_ratio: usize, buffer_packets: usize, variant: Variant) -> Self {
        Self {
            mismatch_ratio,
            buffer_packets,
            variant,
            ..Default::default()
        }
    }

    /// Reject configurations the core cannot run.
    ///
    /// An oversized `buffer_packets` is accepted here; the relay clamps it.
    pub fn validate(&self) -> Result<(), SimError> {
        let t = &self.tuning;
        let invalid = |msg: String| -> Result<(), SimError> { Err(SimError::InvalidConfig(msg)) };

        if self.mismatch_ratio < 2 {
            return invalid(format!(
                "mismatch_ratio must be greater than 1, got {}",
                self.mismatch_ratio
            ));
        }
        if t.max_segment_size < 1 {
            return invalid(format!(
                "max_segment_size must be positive, got {}",
                t.max_segment_size
            ));
        }
        if t.max_window_segments < 1 {
            return invalid("max_window_segments must be positive".to_string());
        }
        if t.reorder_slots < 1 {
            return invalid("reorder_slots must be positive".to_string());
        }
        if t.timer_default < 0 {
            return invalid(format!(
                "timer_default must not be negative, got {}",
                t.timer_default
            ));
        }
        if t.receive_window < t.max_segment_size {
            return invalid(format!(
                "receive_window ({}) is smaller than one segment ({})",
                t.receive_window, t.max_segment_size
            ));
        }
        // The burst is capped by the receive window, so this keeps every
        // round inside the batch.
        let batch_bytes = t.max_window_segments as i64 * t.max_segment_size;
        if t.receive_window > batch_bytes {
            return invalid(format!(
                "receive_window ({}) exceeds {} slots of {} bytes",
                t.receive_window, t.max_window_segments, t.max_segment_size
            ));
        }
        Ok(())
    }
}

/// Which simulator events are reported through `tracing`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportingConfig {
    /// Loss detection, mode changes and relay drops.
    pub congestion_events: bool,
    /// Every segment created.
    pub segment_trace: bool,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            congestion_events: true,
            segment_trace: true,
        }
    }
}

impl ReportingConfig {
    pub fn silent() -> Self {
        Self {
            congestion_events: false,
            segment_trace: false,
        }
    }
}
