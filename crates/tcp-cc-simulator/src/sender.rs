//! Sending host: congestion control for TCP Tahoe and TCP Reno.
//!
//! Both variants share the same bookkeeping ([`SenderState`]) and differ in
//! how they react to ACKs and loss, so [`Sender`] is a closed enum and each
//! operation matches on the variant and the current [`Mode`].
//!
//! The retransmission timer counts rounds, not time. It is restarted by every
//! ACK that acknowledges new data and stopped once nothing is outstanding;
//! otherwise each round decrements it and it expires once it drops below zero.

use serde::Serialize;
use tcp_cc_abstract::{Batch, Mode, Outcome, Segment, SimConfig, SimError, Variant};

/// Duplicate ACKs beyond this count signal a loss.
const DUP_ACK_THRESHOLD: u32 = 2;

/// Congestion-control parameters at the moment a round is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowSnapshot {
    pub congestion_window: i64,
    pub effective_window: i64,
    pub flight_size: i64,
    pub slow_start_threshold: i64,
}

/// How a single ACK relates to what has already been acknowledged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AckKind {
    /// Acknowledges new data.
    New,
    /// Repeats the current cumulative ACK.
    Duplicate,
    /// Already covered by an earlier cumulative ACK; not counted.
    Stale,
}

/// Bookkeeping shared by every variant.
#[derive(Debug, Clone)]
pub struct SenderState {
    last_byte_sent: i64,
    last_byte_acked: i64,
    congestion_window: i64,
    slow_start_threshold: i64,
    mode: Mode,
    timeout_counter: i32,
    /// Counted across rounds until new data is acknowledged.
    duplicate_ack_count: u32,
    max_segment_size: i64,
    timer_default: i32,
}

impl SenderState {
    fn new(config: &SimConfig) -> Self {
        let tuning = &config.tuning;
        Self {
            last_byte_sent: -1,
            last_byte_acked: -1,
            congestion_window: tuning.max_segment_size,
            slow_start_threshold: tuning.initial_slow_start_threshold,
            mode: Mode::SlowStart,
            timeout_counter: tuning.timer_default,
            duplicate_ack_count: 0,
            max_segment_size: tuning.max_segment_size,
            timer_default: tuning.timer_default,
        }
    }

    pub fn last_byte_sent(&self) -> i64 {
        self.last_byte_sent
    }

    pub fn last_byte_acked(&self) -> i64 {
        self.last_byte_acked
    }

    pub fn congestion_window(&self) -> i64 {
        self.congestion_window
    }

    pub fn slow_start_threshold(&self) -> i64 {
        self.slow_start_threshold
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn timeout_counter(&self) -> i32 {
        self.timeout_counter
    }

    pub fn duplicate_ack_count(&self) -> u32 {
        self.duplicate_ack_count
    }

    /// Bytes sent but not yet acknowledged.
    pub fn flight_size(&self) -> i64 {
        self.last_byte_sent - self.last_byte_acked
    }

    fn all_acked(&self) -> bool {
        self.last_byte_sent == self.last_byte_acked
    }

    fn classify(&self, ack: &Segment) -> AckKind {
        let expected = self.last_byte_acked + 1;
        match ack.seq_num() {
            s if s > expected => AckKind::New,
            s if s == expected => AckKind::Duplicate,
            _ => AckKind::Stale,
        }
    }

    /// Restart the retransmission timer and forget duplicate ACKs.
    fn reset_monitoring(&mut self) {
        self.duplicate_ack_count = 0;
        self.timeout_counter = self.timer_default;
    }

    /// Count one round down with data outstanding; true once the timer expired.
    fn timer_expired(&mut self) -> bool {
        self.timeout_counter -= 1;
        // Expiry is strictly below zero; a counter of zero still waits a round.
        self.timeout_counter < 0
    }

    fn grow_slow_start(&mut self) {
        self.congestion_window += self.max_segment_size;
        if self.mode == Mode::SlowStart && self.congestion_window > self.slow_start_threshold {
            self.mode = Mode::CongestionAvoidance;
        }
    }

    fn additive_increase(&self) -> i64 {
        self.max_segment_size * self.max_segment_size / self.congestion_window
    }

    fn floor_threshold(&self, bytes: i64) -> i64 {
        bytes.max(2 * self.max_segment_size)
    }

    /// Shared loss response: threshold from `basis`, window back to one
    /// segment, slow start.
    fn restart_slow_start(&mut self, basis: i64) {
        self.slow_start_threshold = self.floor_threshold(basis / 2);
        self.congestion_window = self.max_segment_size;
        self.mode = Mode::SlowStart;
        self.reset_monitoring();
    }

    fn push_retransmission(&self, out: &mut Batch) -> Result<(), SimError> {
        out.push(Segment::data(self.last_byte_acked + 1, self.max_segment_size))?;
        Ok(())
    }

    /// Send as many full segments as the window allows, or a 1-byte probe
    /// when it does not allow even one.
    fn push_burst(&mut self, out: &mut Batch, effective_window: i64) -> Result<(), SimError> {
        let burst = effective_window / self.max_segment_size;
        if burst == 0 {
            out.push(Segment::data(self.last_byte_sent + 1, 1))?;
            self.last_byte_sent += 1;
            return Ok(());
        }
        for _ in 0..burst {
            out.push(Segment::data(self.last_byte_sent + 1, self.max_segment_size))?;
            self.last_byte_sent += self.max_segment_size;
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub enum Sender {
    Tahoe(SenderState),
    Reno {
        state: SenderState,
        /// Run the round-counter timeout, which Reno skips by default.
        timeout: bool,
    },
}

impl Sender {
    pub fn new(config: &SimConfig) -> Self {
        let state = SenderState::new(config);
        match config.variant {
            Variant::Tahoe => Sender::Tahoe(state),
            Variant::Reno => Sender::Reno {
                state,
                timeout: config.reno_timeout,
            },
        }
    }

    pub fn variant(&self) -> Variant {
        match self {
            Sender::Tahoe(_) => Variant::Tahoe,
            Sender::Reno { .. } => Variant::Reno,
        }
    }

    pub fn state(&self) -> &SenderState {
        match self {
            Sender::Tahoe(state) | Sender::Reno { state, .. } => state,
        }
    }

    pub fn mode(&self) -> Mode {
        self.state().mode
    }

    /// Bytes delivered so far, assuming the stream started at offset zero.
    pub fn total_bytes_acked(&self) -> i64 {
        self.state().last_byte_acked + 1
    }

    /// Interpret the ACKs returned for the previous round.
    pub fn process_acks(&mut self, acks: &Batch) -> Outcome {
        match self {
            Sender::Tahoe(state) => Self::tahoe_process_acks(state, acks),
            Sender::Reno { state, timeout } => Self::reno_process_acks(state, acks, *timeout),
        }
    }

    /// Fill `out` with this round's segments.
    ///
    /// `outcome` is what [`Sender::process_acks`] reported for the previous
    /// round; a loss makes the sender retransmit the oldest unacknowledged
    /// segment instead of sending new data.
    pub fn send(
        &mut self,
        out: &mut Batch,
        receive_window: i64,
        outcome: Outcome,
    ) -> Result<WindowSnapshot, SimError> {
        out.clear();

        let retransmit = match self {
            Sender::Tahoe(_) => outcome.is_loss(),
            Sender::Reno { timeout, .. } => match outcome {
                Outcome::TripleDuplicateAck => true,
                Outcome::Timeout => *timeout,
                Outcome::Success => false,
            },
        };
        let is_reno = matches!(self, Sender::Reno { .. });

        let state = self.state_mut();
        let flight_size = state.flight_size();
        let effective_window = (state.congestion_window.min(receive_window) - flight_size).max(1);
        let snapshot = WindowSnapshot {
            congestion_window: state.congestion_window,
            effective_window,
            flight_size,
            slow_start_threshold: state.slow_start_threshold,
        };

        if retransmit {
            state.push_retransmission(out)?;
            if is_reno && outcome == Outcome::TripleDuplicateAck {
                state.mode = Mode::FastRecovery;
            }
            return Ok(snapshot);
        }

        state.push_burst(out, effective_window)?;
        Ok(snapshot)
    }

    fn state_mut(&mut self) -> &mut SenderState {
        match self {
            Sender::Tahoe(state) | Sender::Reno { state, .. } => state,
        }
    }

    fn tahoe_process_acks(state: &mut SenderState, acks: &Batch) -> Outcome {
        for (_, ack) in acks.iter() {
            if Self::tahoe_on_ack(state, ack) {
                state.duplicate_ack_count += 1;
            }
            if state.duplicate_ack_count > DUP_ACK_THRESHOLD {
                // Remaining ACKs of this round are ignored.
                let window = state.congestion_window;
                state.restart_slow_start(window);
                return Outcome::TripleDuplicateAck;
            }
        }

        if state.all_acked() {
            state.reset_monitoring();
        } else if state.timer_expired() {
            let window = state.congestion_window;
            state.restart_slow_start(window);
            return Outcome::Timeout;
        }
        Outcome::Success
    }

    /// Returns whether the ACK was a duplicate.
    fn tahoe_on_ack(state: &mut SenderState, ack: &Segment) -> bool {
        match state.classify(ack) {
            AckKind::New => {
                state.last_byte_acked = ack.seq_num() - 1;
                match state.mode {
                    Mode::CongestionAvoidance => {
                        state.congestion_window += state.additive_increase();
                    }
                    Mode::SlowStart => state.grow_slow_start(),
                    // Tahoe never enters fast recovery.
                    Mode::FastRecovery => {}
                }
                state.reset_monitoring();
                false
            }
            AckKind::Duplicate => true,
            AckKind::Stale => false,
        }
    }

    fn reno_process_acks(state: &mut SenderState, acks: &Batch, timeout: bool) -> Outcome {
        for (_, ack) in acks.iter() {
            if Self::reno_on_ack(state, ack) {
                state.duplicate_ack_count += 1;
            }
        }

        let mss = state.max_segment_size;
        let mut outcome = Outcome::Success;
        if state.mode != Mode::FastRecovery && state.duplicate_ack_count > DUP_ACK_THRESHOLD {
            state.slow_start_threshold = state.floor_threshold(state.flight_size() / 2);
            // Inflate by the segments the duplicates say have left the network.
            state.congestion_window =
                state.slow_start_threshold + i64::from(state.duplicate_ack_count) * mss;
            state.duplicate_ack_count = 0;
            state.mode = Mode::FastRecovery;
            outcome = Outcome::TripleDuplicateAck;
        } else if state.mode == Mode::FastRecovery && state.duplicate_ack_count > 0 {
            state.congestion_window += i64::from(state.duplicate_ack_count) * mss;
            state.duplicate_ack_count = 0;
        }

        if state.all_acked() {
            state.reset_monitoring();
        } else if timeout && outcome == Outcome::Success && state.timer_expired() {
            let flight_size = state.flight_size();
            state.restart_slow_start(flight_size);
            outcome = Outcome::Timeout;
        }
        outcome
    }

    /// Returns whether the ACK was a duplicate.
    fn reno_on_ack(state: &mut SenderState, ack: &Segment) -> bool {
        match state.classify(ack) {
            AckKind::New => {
                state.last_byte_acked = ack.seq_num() - 1;
                match state.mode {
                    Mode::SlowStart => state.grow_slow_start(),
                    Mode::CongestionAvoidance => {
                        state.congestion_window +=
                            state.additive_increase() + state.max_segment_size / 8;
                    }
                    Mode::FastRecovery => {
                        // Deflate the window inflated by duplicate ACKs.
                        state.congestion_window = state.slow_start_threshold;
                        state.mode = Mode::SlowStart;
                    }
                }
                state.reset_monitoring();
                false
            }
            AckKind::Duplicate => true,
            AckKind::Stale => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MSS: i64 = 1024;

    fn sender(variant: Variant) -> Sender {
        Sender::new(&SimConfig::new(10, 7, variant))
    }

    fn reno_with_timeout() -> Sender {
        let config = SimConfig {
            reno_timeout: true,
            ..SimConfig::new(10, 7, Variant::Reno)
        };
        Sender::new(&config)
    }

    /// Pretend `segments` full segments are out and `acked` of them acknowledged.
    fn with_flight(mut tx: Sender, segments: i64, acked: i64, cwnd: i64) -> Sender {
        let state = tx.state_mut();
        state.last_byte_sent = segments * MSS - 1;
        state.last_byte_acked = acked * MSS - 1;
        state.congestion_window = cwnd;
        tx
    }

    fn acks(values: &[i64]) -> Batch {
        let mut batch = Batch::new(100);
        for v in values {
            batch.push(Segment::new_ack(*v)).unwrap();
        }
        batch
    }

    #[test]
    fn first_send_is_one_segment() {
        let mut tx = sender(Variant::Tahoe);
        let mut out = Batch::new(100);

        let snap = tx.send(&mut out, 65536, Outcome::Success).unwrap();

        assert_eq!(
            snap,
            WindowSnapshot {
                congestion_window: MSS,
                effective_window: MSS,
                flight_size: 0,
                slow_start_threshold: 65535,
            }
        );
        assert_eq!(out.count(), 1);
        assert_eq!(out.get(0), Some(&Segment::data(0, MSS)));
        assert_eq!(tx.state().last_byte_sent(), MSS - 1);
    }

    #[test]
    fn slow_start_adds_one_segment_per_ack() {
        let mut tx = with_flight(sender(Variant::Tahoe), 2, 0, 2 * MSS);

        let outcome = tx.process_acks(&acks(&[MSS, 2 * MSS]));

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(tx.state().congestion_window(), 4 * MSS);
        assert_eq!(tx.total_bytes_acked(), 2 * MSS);
        assert_eq!(tx.state().timeout_counter(), 3);
    }

    #[test]
    fn tahoe_enters_congestion_avoidance_above_threshold() {
        let mut tx = with_flight(sender(Variant::Tahoe), 3, 0, 2 * MSS);
        tx.state_mut().slow_start_threshold = 2 * MSS;

        tx.process_acks(&acks(&[MSS]));
        assert_eq!(tx.mode(), Mode::CongestionAvoidance);
        assert_eq!(tx.state().congestion_window(), 3 * MSS);

        tx.process_acks(&acks(&[2 * MSS]));
        assert_eq!(tx.state().congestion_window(), 3 * MSS + MSS * MSS / (3 * MSS));
    }

    #[test]
    fn tahoe_triple_duplicate_stops_mid_batch() {
        let mut tx = with_flight(sender(Variant::Tahoe), 8, 1, 8 * MSS);

        let outcome = tx.process_acks(&acks(&[MSS, MSS, MSS, 5 * MSS]));

        assert_eq!(outcome, Outcome::TripleDuplicateAck);
        // The fourth ACK was never looked at.
        assert_eq!(tx.state().last_byte_acked(), MSS - 1);
        assert_eq!(tx.state().slow_start_threshold(), 4 * MSS);
        assert_eq!(tx.state().congestion_window(), MSS);
        assert_eq!(tx.mode(), Mode::SlowStart);
        assert_eq!(tx.state().duplicate_ack_count(), 0);
    }

    #[test]
    fn tahoe_threshold_never_below_two_segments() {
        let mut tx = with_flight(sender(Variant::Tahoe), 4, 1, 2 * MSS);
        tx.process_acks(&acks(&[MSS, MSS, MSS]));
        assert_eq!(tx.state().slow_start_threshold(), 2 * MSS);
    }

    #[test]
    fn duplicates_accumulate_across_rounds() {
        let mut tx = with_flight(sender(Variant::Tahoe), 8, 1, 8 * MSS);

        assert_eq!(tx.process_acks(&acks(&[MSS, MSS])), Outcome::Success);
        assert_eq!(tx.state().duplicate_ack_count(), 2);
        assert_eq!(tx.process_acks(&acks(&[MSS])), Outcome::TripleDuplicateAck);
    }

    #[test]
    fn stale_ack_is_not_a_duplicate() {
        let mut tx = with_flight(sender(Variant::Tahoe), 8, 4, 8 * MSS);
        tx.process_acks(&acks(&[2 * MSS, 3 * MSS, MSS]));
        assert_eq!(tx.state().duplicate_ack_count(), 0);
        assert_eq!(tx.state().last_byte_acked(), 4 * MSS - 1);
    }

    /// ACKs with empty slots where the relay dropped the matching segments.
    fn sparse_duplicates() -> Batch {
        let dup = Some(Segment::new_ack(MSS));
        Batch::from_slots(vec![None, dup, None, dup, dup])
    }

    #[test]
    fn tahoe_scans_past_empty_ack_slots() {
        let mut tx = with_flight(sender(Variant::Tahoe), 8, 1, 8 * MSS);

        assert_eq!(tx.process_acks(&sparse_duplicates()), Outcome::TripleDuplicateAck);
        assert_eq!(tx.state().congestion_window(), MSS);
        assert_eq!(tx.mode(), Mode::SlowStart);
    }

    #[test]
    fn reno_counts_duplicates_across_empty_ack_slots() {
        let mut tx = with_flight(sender(Variant::Reno), 8, 1, 8 * MSS);

        assert_eq!(tx.process_acks(&sparse_duplicates()), Outcome::TripleDuplicateAck);
        assert_eq!(tx.mode(), Mode::FastRecovery);
        assert_eq!(tx.state().slow_start_threshold(), 7 * MSS / 2);
        assert_eq!(tx.state().congestion_window(), 7 * MSS / 2 + 3 * MSS);
    }

    #[test]
    fn tahoe_times_out_when_counter_drops_below_zero() {
        let mut tx = with_flight(sender(Variant::Tahoe), 1, 0, MSS);
        let empty = Batch::new(100);

        for _ in 0..3 {
            assert_eq!(tx.process_acks(&empty), Outcome::Success);
        }
        assert_eq!(tx.state().timeout_counter(), 0);
        assert_eq!(tx.process_acks(&empty), Outcome::Timeout);
        assert_eq!(tx.state().congestion_window(), MSS);
        assert_eq!(tx.state().slow_start_threshold(), 2 * MSS);
        assert_eq!(tx.state().timeout_counter(), 3);
    }

    #[test]
    fn idle_sender_never_times_out() {
        let mut tx = sender(Variant::Tahoe);
        let empty = Batch::new(100);
        for _ in 0..10 {
            assert_eq!(tx.process_acks(&empty), Outcome::Success);
        }
    }

    #[test]
    fn loss_retransmits_oldest_segment_only() {
        let mut tx = with_flight(sender(Variant::Tahoe), 8, 3, MSS);
        let mut out = Batch::new(100);

        tx.send(&mut out, 65536, Outcome::Timeout).unwrap();

        assert_eq!(out.count(), 1);
        assert_eq!(out.get(0), Some(&Segment::data(3 * MSS, MSS)));
        assert_eq!(tx.state().last_byte_sent(), 8 * MSS - 1);
    }

    #[test]
    fn closed_window_sends_one_byte_probe() {
        let mut tx = with_flight(sender(Variant::Tahoe), 4, 0, 2 * MSS);
        let mut out = Batch::new(100);

        let snap = tx.send(&mut out, 65536, Outcome::Success).unwrap();

        assert_eq!(snap.effective_window, 1);
        assert_eq!(snap.flight_size, 4 * MSS);
        assert_eq!(out.get(0), Some(&Segment::data(4 * MSS, 1)));
        assert_eq!(tx.state().last_byte_sent(), 4 * MSS);
        assert!(tx.state().congestion_window() >= MSS);
    }

    #[test]
    fn receive_window_caps_burst() {
        let mut tx = with_flight(sender(Variant::Tahoe), 0, 0, 8 * MSS);
        let mut out = Batch::new(100);

        let snap = tx.send(&mut out, 3 * MSS, Outcome::Success).unwrap();

        assert_eq!(snap.effective_window, 3 * MSS);
        assert_eq!(out.count(), 3);
    }

    #[test]
    fn burst_larger_than_batch_is_an_error() {
        let mut tx = with_flight(sender(Variant::Tahoe), 0, 0, 8 * MSS);
        let mut out = Batch::new(4);
        assert_eq!(
            tx.send(&mut out, 65536, Outcome::Success),
            Err(SimError::BatchFull { capacity: 4 })
        );
    }

    #[test]
    fn reno_enters_fast_recovery_with_inflated_window() {
        let mut tx = with_flight(sender(Variant::Reno), 8, 1, 8 * MSS);

        let outcome = tx.process_acks(&acks(&[MSS, MSS, MSS, MSS]));

        assert_eq!(outcome, Outcome::TripleDuplicateAck);
        assert_eq!(tx.mode(), Mode::FastRecovery);
        // flight = 7 segments
        assert_eq!(tx.state().slow_start_threshold(), 3584);
        assert_eq!(tx.state().congestion_window(), 3584 + 4 * MSS);
        assert_eq!(tx.state().duplicate_ack_count(), 0);
    }

    #[test]
    fn reno_further_duplicates_inflate_window() {
        let mut tx = with_flight(sender(Variant::Reno), 8, 1, 8 * MSS);
        tx.process_acks(&acks(&[MSS, MSS, MSS]));
        let inflated = tx.state().congestion_window();

        let outcome = tx.process_acks(&acks(&[MSS, MSS]));

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(tx.mode(), Mode::FastRecovery);
        assert_eq!(tx.state().congestion_window(), inflated + 2 * MSS);
    }

    #[test]
    fn reno_first_new_ack_deflates_to_threshold() {
        let mut tx = with_flight(sender(Variant::Reno), 8, 1, 8 * MSS);
        tx.process_acks(&acks(&[MSS, MSS, MSS]));
        let threshold = tx.state().slow_start_threshold();

        let outcome = tx.process_acks(&acks(&[MSS, 6 * MSS]));

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(tx.mode(), Mode::SlowStart);
        assert_eq!(tx.state().congestion_window(), threshold);
        assert_eq!(tx.state().last_byte_acked(), 6 * MSS - 1);
    }

    #[test]
    fn reno_send_after_triple_duplicate_retransmits() {
        let mut tx = with_flight(sender(Variant::Reno), 8, 1, 8 * MSS);
        let outcome = tx.process_acks(&acks(&[MSS, MSS, MSS]));
        let mut out = Batch::new(100);

        tx.send(&mut out, 65536, outcome).unwrap();

        assert_eq!(out.count(), 1);
        assert_eq!(out.get(0), Some(&Segment::data(MSS, MSS)));
        assert_eq!(tx.mode(), Mode::FastRecovery);
        assert_eq!(tx.state().last_byte_sent(), 8 * MSS - 1);
    }

    #[test]
    fn reno_congestion_avoidance_growth() {
        let mut tx = with_flight(sender(Variant::Reno), 6, 0, 4 * MSS);
        tx.state_mut().mode = Mode::CongestionAvoidance;

        tx.process_acks(&acks(&[MSS]));

        assert_eq!(tx.state().congestion_window(), 4 * MSS + 256 + 128);
    }

    #[test]
    fn reno_ignores_timer_by_default() {
        let mut tx = with_flight(sender(Variant::Reno), 4, 0, MSS);
        let empty = Batch::new(100);
        for _ in 0..10 {
            assert_eq!(tx.process_acks(&empty), Outcome::Success);
        }
        assert_eq!(tx.state().congestion_window(), MSS);
    }

    #[test]
    fn reno_timeout_when_enabled() {
        let mut tx = with_flight(reno_with_timeout(), 8, 0, 8 * MSS);
        let empty = Batch::new(100);

        for _ in 0..3 {
            assert_eq!(tx.process_acks(&empty), Outcome::Success);
        }
        assert_eq!(tx.process_acks(&empty), Outcome::Timeout);
        assert_eq!(tx.state().slow_start_threshold(), 4 * MSS);
        assert_eq!(tx.state().congestion_window(), MSS);
        assert_eq!(tx.mode(), Mode::SlowStart);

        let mut out = Batch::new(100);
        tx.send(&mut out, 65536, Outcome::Timeout).unwrap();
        assert_eq!(out.get(0), Some(&Segment::data(0, MSS)));
    }

    #[test]
    fn pointers_stay_ordered_over_a_round_trip() {
        let mut tx = sender(Variant::Reno);
        let mut out = Batch::new(100);
        let mut outcome = Outcome::Success;
        for _ in 0..6 {
            tx.send(&mut out, 65536, outcome).unwrap();
            let state = tx.state();
            assert!(state.last_byte_sent() >= state.last_byte_acked());
            // Acknowledge everything before the last segment of the round.
            let top = out.iter().map(|(_, seg)| seg.seq_num()).max().unwrap_or(0);
            let reply = acks(&[top]);
            outcome = tx.process_acks(&reply);
            let state = tx.state();
            assert!(state.last_byte_sent() >= state.last_byte_acked());
        }
    }
}
