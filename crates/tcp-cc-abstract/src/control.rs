use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Summary of how the previous round's transmission went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Success,
    /// Three or more duplicate ACKs were counted.
    TripleDuplicateAck,
    /// The round counter expired with bytes still outstanding.
    Timeout,
}

impl Outcome {
    pub fn is_loss(&self) -> bool {
        !matches!(self, Outcome::Success)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::Success => "success",
            Outcome::TripleDuplicateAck => "triple_duplicate_ack",
            Outcome::Timeout => "timeout",
        };
        f.write_str(name)
    }
}

/// Sending mode of the congestion controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    SlowStart,
    CongestionAvoidance,
    /// Reno only.
    FastRecovery,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::SlowStart => "slow start",
            Mode::CongestionAvoidance => "congestion avoidance",
            Mode::FastRecovery => "fast recovery",
        };
        f.write_str(name)
    }
}

/// Congestion-control algorithm run by the sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[default]
    Tahoe,
    Reno,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Tahoe => f.write_str("tahoe"),
            Variant::Reno => f.write_str("reno"),
        }
    }
}

impl FromStr for Variant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tahoe" => Ok(Variant::Tahoe),
            "reno" => Ok(Variant::Reno),
            other => Err(format!("unknown variant '{other}'. Try 'tahoe' or 'reno'.")),
        }
    }
}
