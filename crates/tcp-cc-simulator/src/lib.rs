//! Round-based TCP congestion-control simulator.
//!
//! A [`Sender`] running Tahoe or Reno pushes bursts through a bottleneck
//! [`Relay`] to a [`Receiver`]; the [`Simulator`] drives them one round-trip
//! at a time and records the windows of every round.

pub mod engine;
pub mod receiver;
pub mod relay;
pub mod reorder;
pub mod scenario_runner;
pub mod sender;
pub mod trace;

pub use engine::Simulator;
pub use receiver::Receiver;
pub use relay::Relay;
pub use sender::{Sender, SenderState, WindowSnapshot};
pub use trace::{LinkEventSummary, RoundRecord, RunSummary, SimulationReport};
