/*!
 * Scheduler Types
 * Domain types for policy selection and quantum configuration
 */

use crate::core::errors::{SimError, SimResult};
use crate::core::limits::DEFAULT_TIME_QUANTUM;
use crate::core::types::Tick;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Scheduling policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// Shortest remaining time first (preemptive)
    Srtf,
    /// Shortest job first (quantum-bounded)
    Sjf,
    /// Static priority, lower value first (preemptive)
    Priority,
    /// Round-robin with fixed time quantum
    RoundRobin,
    /// Delegates every decision to a score model (preemptive)
    Learned,
}

impl Policy {
    /// Every policy, in reporting order
    pub const ALL: [Policy; 5] = [
        Policy::Srtf,
        Policy::Sjf,
        Policy::Priority,
        Policy::RoundRobin,
        Policy::Learned,
    ];

    /// Canonical name used on the wire
    ///
    /// # Performance
    /// Hot path - used for logging and serialization
    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Srtf => "srtf",
            Self::Sjf => "sjf",
            Self::Priority => "priority",
            Self::RoundRobin => "rr",
            Self::Learned => "learned",
        }
    }

    /// Whether the policy needs a score model
    #[inline(always)]
    pub const fn requires_model(&self) -> bool {
        matches!(self, Self::Learned)
    }
}

impl FromStr for Policy {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "srtf" => Ok(Self::Srtf),
            "sjf" => Ok(Self::Sjf),
            "priority" | "prio" => Ok(Self::Priority),
            "rr" | "round_robin" | "roundrobin" => Ok(Self::RoundRobin),
            "learned" => Ok(Self::Learned),
            _ => Err(SimError::UnknownPolicy(s.to_string())),
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Maximum ticks a process may run before quantum-bounded policies reselect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TimeQuantum(Tick);

impl TimeQuantum {
    /// Create a quantum, rejecting non-positive values
    pub fn new(ticks: i64) -> SimResult<Self> {
        if ticks <= 0 {
            return Err(SimError::InvalidConfig(format!(
                "time quantum must be a positive integer, got {}",
                ticks
            )));
        }
        Ok(Self(ticks as Tick))
    }

    /// Get ticks
    ///
    /// # Performance
    /// Hot path - read on every dispatch
    #[inline(always)]
    pub const fn ticks(&self) -> Tick {
        self.0
    }
}

impl Default for TimeQuantum {
    fn default() -> Self {
        Self(DEFAULT_TIME_QUANTUM)
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = i64::deserialize(deserializer)?;
        Self::new(ticks).map_err(serde::de::Error::custom)
    }
}
