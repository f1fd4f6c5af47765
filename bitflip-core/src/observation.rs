//! Observation representations and observation spaces

use ndarray::Array1;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::BitVector;

/// Trait for observations from an environment
pub trait Observation: Clone + Debug + Send + Sync {
    /// Convert observation to a feature vector
    fn to_vec(&self) -> Vec<f64>;

    /// Get the shape of the observation
    fn shape(&self) -> Vec<usize>;

    /// Feature vector as an `ndarray` row, ready for a network input
    fn to_array(&self) -> Array1<f64> {
        Array1::from(self.to_vec())
    }
}

/// Trait for defining observation spaces
pub trait ObservationSpace: Send + Sync {
    /// The type of observations in this space
    type Observation: Observation;

    /// Sample a random observation from the space
    fn sample(&self, rng: &mut StdRng) -> Self::Observation;

    /// Check if an observation is valid within this space
    fn contains(&self, obs: &Self::Observation) -> bool;

    /// Get the shape of observations in this space
    fn shape(&self) -> Vec<usize>;
}

impl Observation for BitVector {
    fn to_vec(&self) -> Vec<f64> {
        self.iter().map(|bit| if bit { 1.0 } else { 0.0 }).collect()
    }

    fn shape(&self) -> Vec<usize> {
        vec![self.len()]
    }
}

/// Observation split into achieved and desired goals, as consumed by
/// goal-relabeling algorithms such as hindsight experience replay
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalObservation {
    /// Raw environment state
    pub observation: BitVector,
    /// Goal the agent has reached so far (its current state)
    pub achieved_goal: BitVector,
    /// Goal the agent is asked to reach
    pub desired_goal: BitVector,
}

impl Observation for GoalObservation {
    /// `observation` followed by `desired_goal`
    fn to_vec(&self) -> Vec<f64> {
        let mut data = self.observation.to_vec();
        data.extend(self.desired_goal.to_vec());
        data
    }

    fn shape(&self) -> Vec<usize> {
        vec![self.observation.len() + self.desired_goal.len()]
    }
}

/// Space of bit vectors of a fixed length with uniform sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiBinarySpace {
    /// Number of bits
    pub n: usize,
}

impl MultiBinarySpace {
    /// Create a new multi-binary space
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl ObservationSpace for MultiBinarySpace {
    type Observation = BitVector;

    fn sample(&self, rng: &mut StdRng) -> Self::Observation {
        (0..self.n).map(|_| rng.gen::<bool>()).collect()
    }

    fn contains(&self, obs: &Self::Observation) -> bool {
        obs.len() == self.n
    }

    fn shape(&self) -> Vec<usize> {
        vec![self.n]
    }
}

/// Space of [`GoalObservation`]s whose parts are all `n` bits long
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalObservationSpace {
    /// Number of bits in each part
    pub n: usize,
}

impl GoalObservationSpace {
    /// Create a new goal observation space
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl ObservationSpace for GoalObservationSpace {
    type Observation = GoalObservation;

    fn sample(&self, rng: &mut StdRng) -> Self::Observation {
        let bits = MultiBinarySpace::new(self.n);
        let observation = bits.sample(rng);
        GoalObservation {
            achieved_goal: observation.clone(),
            observation,
            desired_goal: bits.sample(rng),
        }
    }

    fn contains(&self, obs: &Self::Observation) -> bool {
        obs.observation.len() == self.n
            && obs.achieved_goal.len() == self.n
            && obs.desired_goal.len() == self.n
    }

    /// Flattened shape, `observation` followed by `desired_goal`
    fn shape(&self) -> Vec<usize> {
        vec![2 * self.n]
    }
}
