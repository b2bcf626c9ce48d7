/*!
 * Workload Generator
 * Seeded synthetic workloads
 */

use crate::core::errors::{SimError, SimResult};
use crate::core::limits::{
    DEFAULT_GENERATED_COUNT, DEFAULT_MAX_ARRIVAL_GAP, DEFAULT_MAX_PRIORITY, DEFAULT_MEAN_BURST,
};
use crate::core::types::{Pid, Priority, Tick};
use crate::process::{Process, Workload};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp, Normal};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shape of generated burst lengths
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BurstDistribution {
    /// Exponential with the given mean
    Exponential { mean: f64 },
    /// Normal with the given mean and a standard deviation of a third of it
    Normal { mean: f64 },
}

impl BurstDistribution {
    #[inline]
    fn mean(&self) -> f64 {
        match *self {
            Self::Exponential { mean } | Self::Normal { mean } => mean,
        }
    }
}

impl Default for BurstDistribution {
    fn default() -> Self {
        Self::Exponential {
            mean: DEFAULT_MEAN_BURST,
        }
    }
}

/// Generator parameters; the same config always yields the same workload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub count: usize,
    pub seed: u64,
    /// Inclusive upper bound of the gap between consecutive arrivals
    pub max_arrival_gap: Tick,
    pub burst: BurstDistribution,
    /// Draw priorities uniformly from `0..=max_priority`; otherwise all 0
    pub with_priority: bool,
    pub max_priority: Priority,
    /// Deadline = arrival + ceil(burst * slack), when set
    pub deadline_slack: Option<f64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_GENERATED_COUNT,
            seed: 0,
            max_arrival_gap: DEFAULT_MAX_ARRIVAL_GAP,
            burst: BurstDistribution::default(),
            with_priority: true,
            max_priority: DEFAULT_MAX_PRIORITY,
            deadline_slack: None,
        }
    }
}

impl GeneratorConfig {
    #[inline]
    #[must_use]
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_burst(mut self, burst: BurstDistribution) -> Self {
        self.burst = burst;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_deadline_slack(mut self, slack: f64) -> Self {
        self.deadline_slack = Some(slack);
        self
    }

    #[inline]
    #[must_use]
    pub fn without_priority(mut self) -> Self {
        self.with_priority = false;
        self
    }

    fn validate(&self) -> SimResult<()> {
        let mean = self.burst.mean();
        if !mean.is_finite() || mean <= 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "burst mean must be positive and finite, got {}",
                mean
            )));
        }
        if self.with_priority && self.max_priority < 0 {
            return Err(SimError::InvalidConfig(format!(
                "max priority must be non-negative, got {}",
                self.max_priority
            )));
        }
        if let Some(slack) = self.deadline_slack {
            if !slack.is_finite() || slack < 0.0 {
                return Err(SimError::InvalidConfig(format!(
                    "deadline slack must be non-negative and finite, got {}",
                    slack
                )));
            }
        }
        if self.count > Pid::MAX as usize {
            return Err(SimError::InvalidConfig(format!(
                "cannot generate more than {} processes",
                Pid::MAX
            )));
        }
        Ok(())
    }
}

enum Sampler {
    Exponential(Exp<f64>),
    Normal(Normal<f64>),
}

impl Sampler {
    fn new(burst: BurstDistribution) -> SimResult<Self> {
        let invalid = |e: String| SimError::InvalidConfig(format!("burst distribution: {}", e));
        Ok(match burst {
            BurstDistribution::Exponential { mean } => {
                Self::Exponential(Exp::new(1.0 / mean).map_err(|e| invalid(e.to_string()))?)
            }
            BurstDistribution::Normal { mean } => {
                Self::Normal(Normal::new(mean, mean / 3.0).map_err(|e| invalid(e.to_string()))?)
            }
        })
    }

    /// Whole ticks, at least one
    fn burst<R: Rng + ?Sized>(&self, rng: &mut R) -> Tick {
        let sample = match self {
            Self::Exponential(d) => d.sample(rng),
            Self::Normal(d) => d.sample(rng),
        };
        (sample as i64).max(1) as Tick
    }
}

fn overflow(what: &str, index: usize) -> SimError {
    SimError::InvalidConfig(format!(
        "{} of generated process #{} overflows the tick range",
        what, index
    ))
}

/// Generate a deterministic synthetic workload
pub fn generate_workload(config: &GeneratorConfig) -> SimResult<Workload> {
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let sampler = Sampler::new(config.burst)?;
    let mut arrival: Tick = 0;
    let mut processes = Vec::with_capacity(config.count);

    for index in 0..config.count {
        arrival = arrival
            .checked_add(rng.gen_range(0..=config.max_arrival_gap))
            .ok_or_else(|| overflow("arrival", index))?;
        let burst = sampler.burst(&mut rng);
        let priority = if config.with_priority {
            rng.gen_range(0..=config.max_priority)
        } else {
            0
        };

        let mut process = Process::new(index as Pid, arrival, burst).with_priority(priority);
        if let Some(slack) = config.deadline_slack {
            let deadline = arrival
                .checked_add((burst as f64 * slack).ceil() as Tick)
                .ok_or_else(|| overflow("deadline", index))?;
            process = process.with_deadline(deadline);
        }
        processes.push(process);
    }

    debug!(
        count = config.count,
        seed = config.seed,
        last_arrival = arrival,
        "Generated workload"
    );
    Workload::new(processes)
}
