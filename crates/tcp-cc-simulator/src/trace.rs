use serde::Serialize;
use tcp_cc_abstract::{Mode, Outcome, SimConfig};

/// Congestion-control state of one round, as seen when the round was sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoundRecord {
    /// Zero-based round index.
    pub round: usize,
    pub congestion_window: i64,
    pub effective_window: i64,
    pub flight_size: i64,
    pub slow_start_threshold: i64,
    /// Outcome of the previous round's ACKs, which shaped this round.
    pub outcome: Outcome,
    /// Sender mode after sending.
    pub mode: Mode,
    pub segments_sent: usize,
    pub segments_dropped: usize,
    pub acks_returned: usize,
    /// Window the receiver advertised at the end of the round.
    pub receive_window: i64,
}

/// A compact textual summary of important link-layer events for visualization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinkEventSummary {
    pub round: usize,
    pub description: String,
}

/// Records of one `run_rounds` call.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub rounds: Vec<RoundRecord>,
    /// Utilization over every round the session has run.
    pub utilization: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub config: SimConfig,
    pub rounds: Vec<RoundRecord>,
    pub total_bytes_acked: i64,
    /// Bytes the relay can forward per round.
    pub bottleneck_capacity: i64,
    pub utilization: f64,
    pub link_events: Vec<LinkEventSummary>,
}

impl SimulationReport {
    pub fn count_outcome(&self, outcome: Outcome) -> usize {
        self.rounds.iter().filter(|r| r.outcome == outcome).count()
    }

    pub fn max_congestion_window(&self) -> Option<i64> {
        self.rounds.iter().map(|r| r.congestion_window).max()
    }
}
