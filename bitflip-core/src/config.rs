//! Environment configuration

use serde::{Deserialize, Serialize};

use crate::Result;

/// How `reset` treats the vector sampler when no explicit seed is passed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetMode {
    /// Keep drawing from the running sampler stream; every reset yields a
    /// new initial state
    #[default]
    Fresh,
    /// Reseed the sampler with the construction seed first; every reset
    /// yields the same initial state
    Deterministic,
}

/// Configuration for bit-flipping environments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BitFlipConfig {
    /// Number of bits in states and goals
    pub n: usize,
    /// Seed for the vector sampler; drawn from entropy when unset
    pub seed: Option<u64>,
    /// Reseeding behaviour of `reset`
    pub reset_mode: ResetMode,
}

impl Default for BitFlipConfig {
    fn default() -> Self {
        Self {
            n: 10,
            seed: Some(0),
            reset_mode: ResetMode::Fresh,
        }
    }
}

impl BitFlipConfig {
    /// Defaults for the goal-augmented environment: 80 bits, entropy seed
    #[must_use]
    pub fn goal_default() -> Self {
        Self {
            n: 80,
            seed: None,
            reset_mode: ResetMode::Fresh,
        }
    }

    /// Set the number of bits
    #[must_use]
    pub fn with_n(mut self, n: usize) -> Self {
        self.n = n;
        self
    }

    /// Set or clear the sampler seed
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set the reset mode
    #[must_use]
    pub fn with_reset_mode(mut self, reset_mode: ResetMode) -> Self {
        self.reset_mode = reset_mode;
        self
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
