use crate::config::SimConfig;
use crate::control::{Mode, Outcome, Variant};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Number of rounds to run. Must be positive.
    pub rounds: usize,
    #[serde(default)]
    pub config: SimConfigOverride,
    #[serde(default)]
    pub assertions: Vec<ScenarioAssertion>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct SimConfigOverride {
    pub mismatch_ratio: Option<usize>,
    pub buffer_packets: Option<usize>,
    pub variant: Option<Variant>,
    pub reno_timeout: Option<bool>,
    pub max_segment_size: Option<i64>,
    pub max_window_segments: Option<usize>,
    pub timer_default: Option<i32>,
    pub receive_window: Option<i64>,
}

impl SimConfigOverride {
    pub fn apply_to(&self, config: &mut SimConfig) {
        if let Some(v) = self.mismatch_ratio {
            config.mismatch_ratio = v;
        }
        if let Some(v) = self.buffer_packets {
            config.buffer_packets = v;
        }
        if let Some(v) = self.variant {
            config.variant = v;
        }
        if let Some(v) = self.reno_timeout {
            config.reno_timeout = v;
        }
        if let Some(v) = self.max_segment_size {
            config.tuning.max_segment_size = v;
        }
        if let Some(v) = self.max_window_segments {
            config.tuning.max_window_segments = v;
        }
        if let Some(v) = self.timer_default {
            config.tuning.timer_default = v;
        }
        if let Some(v) = self.receive_window {
            config.tuning.receive_window = v;
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioAssertion {
    /// Sender utilization over the whole run is at least `min`.
    UtilizationAtLeast { min: f64 },
    /// Sender utilization over the whole run is at most `max`.
    UtilizationAtMost { max: f64 },
    /// The number of rounds that reported `outcome` is within range.
    OutcomeCount {
        outcome: Outcome,
        min: u32,
        max: Option<u32>,
    },
    /// The largest congestion window seen in any round is within range.
    CongestionWindowMax { min: i64, max: Option<i64> },
    /// The sender was in `mode` during at least one round.
    ModeReached { mode: Mode },
}
