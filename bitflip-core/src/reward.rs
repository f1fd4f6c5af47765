//! Reward signals and goal-conditioned reward functions

use serde::{Deserialize, Serialize};

use crate::{BitVector, Result};

/// Reward signal from the environment
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Reward(pub f64);

impl Reward {
    /// Reward for reaching the goal
    pub const SUCCESS: Self = Self(0.0);
    /// Reward for every other step
    pub const FAILURE: Self = Self(-1.0);

    /// Get the reward value
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Whether this is the goal-reached reward
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn is_success(&self) -> bool {
        self.0 == Self::SUCCESS.0
    }
}

impl From<f64> for Reward {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<Reward> for f64 {
    fn from(reward: Reward) -> Self {
        reward.0
    }
}

impl std::ops::Add for Reward {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self(self.0 + other.0)
    }
}

/// Inclusive bounds on per-step rewards
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardRange {
    /// Lowest possible reward
    pub low: f64,
    /// Highest possible reward
    pub high: f64,
}

/// Trait for goal-conditioned reward functions
pub trait RewardFunction: Send + Sync {
    /// Reward for having reached `achieved` while aiming for `desired`
    fn reward(&self, achieved: &BitVector, desired: &BitVector) -> Result<Reward>;

    /// Range of values `reward` can return
    fn range(&self) -> RewardRange;
}

/// Sparse reward: 0 when the goal is matched exactly, -1 otherwise
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseReward;

impl RewardFunction for SparseReward {
    fn reward(&self, achieved: &BitVector, desired: &BitVector) -> Result<Reward> {
        desired.check_len(achieved.len())?;
        Ok(if achieved == desired {
            Reward::SUCCESS
        } else {
            Reward::FAILURE
        })
    }

    fn range(&self) -> RewardRange {
        RewardRange {
            low: Reward::FAILURE.0,
            high: Reward::SUCCESS.0,
        }
    }
}

/// Best return reachable from `initial` for an episode aiming at `goal`:
/// one -1 for every bit that must be flipped except the last, or 0 when the
/// two already match.
#[allow(clippy::cast_precision_loss)]
pub fn reward_bound(initial: &BitVector, goal: &BitVector) -> Result<Reward> {
    let distance = initial.hamming(goal)?;
    if distance == 0 {
        return Ok(Reward::SUCCESS);
    }
    Ok(Reward(1.0 - distance as f64))
}
