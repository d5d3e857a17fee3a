use crate::receiver::Receiver;
use crate::relay::Relay;
use crate::sender::Sender;
use crate::trace::{LinkEventSummary, RoundRecord, RunSummary, SimulationReport};
use tcp_cc_abstract::{Batch, Mode, Outcome, ReportingConfig, SimConfig, SimError};
use tracing::{debug, info, trace, warn};

/// Round-driven simulation of one sender, one bottleneck relay and one receiver.
///
/// Each round the sender first reads the ACKs of the previous round, then
/// sends a burst sized by its window; the relay drops what exceeds the
/// bottleneck and the receiver answers what got through. ACKs bypass the
/// relay.
pub struct Simulator {
    config: SimConfig,
    reporting: ReportingConfig,

    sender: Sender,
    receiver: Receiver,
    relay: Relay,

    segments: Batch,
    acks: Batch,
    /// Window the receiver advertised at the end of the last round.
    receive_window: i64,

    rounds: Vec<RoundRecord>,
    /// Set once a round fails; the session cannot continue after that.
    fault: Option<SimError>,

    /// Timeline of drops, loss detections and mode changes.
    pub link_events: Vec<LinkEventSummary>,
}

impl Simulator {
    pub fn new(config: SimConfig, reporting: ReportingConfig) -> Result<Self, SimError> {
        config.validate()?;
        let tuning = config.tuning;
        let relay = Relay::new(config.mismatch_ratio, config.buffer_packets)?;
        let receiver = Receiver::new(&tuning);

        Ok(Self {
            sender: Sender::new(&config),
            receive_window: receiver.receive_window(),
            receiver,
            relay,
            segments: Batch::new(tuning.max_window_segments),
            acks: Batch::new(tuning.max_window_segments),
            rounds: Vec::new(),
            fault: None,
            link_events: Vec::new(),
            config,
            reporting,
        })
    }

    /// Expose current simulation config (for diagnostics)
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn sender(&self) -> &Sender {
        &self.sender
    }

    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }

    pub fn relay(&self) -> &Relay {
        &self.relay
    }

    pub fn rounds(&self) -> &[RoundRecord] {
        &self.rounds
    }

    pub fn bottleneck_capacity(&self) -> i64 {
        self.relay
            .bottleneck_capacity(self.config.tuning.max_segment_size)
    }

    /// Bytes acknowledged over the bytes the bottleneck could have carried in
    /// the rounds run so far.
    pub fn utilization(&self) -> f64 {
        if self.rounds.is_empty() {
            return 0.0;
        }
        let potential = self.bottleneck_capacity() * self.rounds.len() as i64;
        self.sender.total_bytes_acked() as f64 / potential as f64
    }

    /// Run `count` more rounds.
    pub fn run_rounds(&mut self, count: usize) -> Result<RunSummary, SimError> {
        if count == 0 {
            return Err(SimError::InvalidRoundCount(count));
        }
        let mut rounds = Vec::with_capacity(count);
        for _ in 0..count {
            rounds.push(self.step()?);
        }
        let utilization = self.utilization();
        info!(
            "Ran {} rounds, sender utilization {:.0}%",
            count,
            utilization * 100.0
        );
        Ok(RunSummary {
            rounds,
            utilization,
        })
    }

    /// Run a single round.
    ///
    /// A failed round may already have moved the sender and relay forward, so
    /// it halts the session: this and every later call return the same error
    /// and no record is kept for the failed round.
    pub fn step(&mut self) -> Result<RoundRecord, SimError> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        match self.advance() {
            Ok(record) => Ok(record),
            Err(err) => {
                warn!("round {}: {}, session halted", self.rounds.len(), err);
                self.fault = Some(err.clone());
                Err(err)
            }
        }
    }

    fn advance(&mut self) -> Result<RoundRecord, SimError> {
        let round = self.rounds.len();
        let mode_before = self.sender.mode();

        // Nothing has been sent before the first round.
        let outcome = if round == 0 {
            Outcome::Success
        } else {
            self.sender.process_acks(&self.acks)
        };
        self.note_outcome(round, outcome);

        let snapshot = self
            .sender
            .send(&mut self.segments, self.receive_window, outcome)?;
        self.note_mode_change(round, mode_before);
        self.trace_segments(&self.segments);
        let segments_sent = self.segments.count();

        let dropped = self.relay.relay(&mut self.segments);
        self.note_drops(round, &dropped);

        self.receive_window = self.receiver.receive(&self.segments, &mut self.acks)?;
        self.trace_segments(&self.acks);

        let record = RoundRecord {
            round,
            congestion_window: snapshot.congestion_window,
            effective_window: snapshot.effective_window,
            flight_size: snapshot.flight_size,
            slow_start_threshold: snapshot.slow_start_threshold,
            outcome,
            mode: self.sender.mode(),
            segments_sent,
            segments_dropped: dropped.len(),
            acks_returned: self.acks.count(),
            receive_window: self.receive_window,
        };
        debug!(
            "round {}: cwnd={} effwnd={} flight={} ssthresh={} rwnd={}",
            round,
            record.congestion_window,
            record.effective_window,
            record.flight_size,
            record.slow_start_threshold,
            record.receive_window
        );
        self.rounds.push(record.clone());
        Ok(record)
    }

    /// Produce a serializable snapshot of the current simulation state.
    pub fn export_report(&self) -> SimulationReport {
        SimulationReport {
            config: self.config.clone(),
            rounds: self.rounds.clone(),
            total_bytes_acked: self.sender.total_bytes_acked(),
            bottleneck_capacity: self.bottleneck_capacity(),
            utilization: self.utilization(),
            link_events: self.link_events.clone(),
        }
    }

    fn note_outcome(&mut self, round: usize, outcome: Outcome) {
        let description = match outcome {
            Outcome::Success => return,
            Outcome::TripleDuplicateAck => "Three (or more) duplicate ACKs received",
            Outcome::Timeout => "Timeout occurred",
        };
        if self.reporting.congestion_events {
            info!("round {}: {}", round, description);
        }
        self.link_events.push(LinkEventSummary {
            round,
            description: format!("[Sender] {description}"),
        });
    }

    fn note_mode_change(&mut self, round: usize, before: Mode) {
        let after = self.sender.mode();
        if after == before {
            return;
        }
        if self.reporting.congestion_events {
            info!("round {}: sender entering {}", round, after);
        }
        self.link_events.push(LinkEventSummary {
            round,
            description: format!("[Sender] {before} -> {after}"),
        });
    }

    fn note_drops(&mut self, round: usize, dropped: &[usize]) {
        if dropped.is_empty() {
            return;
        }
        if self.reporting.congestion_events {
            info!(
                "round {}: relay dropped {} segments at slots {:?}",
                round,
                dropped.len(),
                dropped
            );
        }
        self.link_events.push(LinkEventSummary {
            round,
            description: format!(
                "[Sender->Receiver] DROP {} segments (bottleneck)",
                dropped.len()
            ),
        });
    }

    fn trace_segments(&self, batch: &Batch) {
        if !self.reporting.segment_trace {
            return;
        }
        let mss = self.config.tuning.max_segment_size;
        for (_, segment) in batch.iter() {
            let kind = if segment.is_ack() {
                " ack"
            } else if segment.len() == 1 {
                " (1-byte)"
            } else {
                ""
            };
            trace!("# {}{}", segment.ordinal(mss), kind);
        }
    }
}
