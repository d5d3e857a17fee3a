pub mod batch;
pub mod config;
pub mod control;
pub mod error;
pub mod scenario;
pub mod segment;

pub use batch::Batch;
pub use config::{ReportingConfig, SimConfig, Tuning};
pub use control::{Mode, Outcome, Variant};
pub use error::SimError;
pub use segment::Segment;

pub use scenario::{Scenario, ScenarioAssertion, SimConfigOverride};
