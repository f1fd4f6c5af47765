//! Core types for goal-conditioned bit-flipping environments
//!
//! This crate provides the environment-agnostic vocabulary shared by the
//! bit-flipping environments: bit vectors, spaces and samplers, rewards,
//! configuration and the synchronous [`Environment`] trait.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod config;
pub mod environment;
pub mod error;
pub mod observation;
pub mod reward;
pub mod sampler;
pub mod seeding;
pub mod state;

// Re-export core traits and types
pub use action::{Action, ActionSpace, DiscreteAction, DiscreteSpace};
pub use config::{BitFlipConfig, ResetMode};
pub use environment::{Environment, Episode, RenderMode, Step, StepInfo, TrackedEnvironment};
pub use error::{BitFlipError, Result};
pub use observation::{
    GoalObservation, GoalObservationSpace, MultiBinarySpace, Observation, ObservationSpace,
};
pub use reward::{reward_bound, Reward, RewardFunction, RewardRange, SparseReward};
pub use sampler::{BitSampler, SeededSampler};
pub use state::BitVector;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Action, ActionSpace, BitFlipConfig, BitVector, DiscreteAction, Environment,
        GoalObservation, Observation, ObservationSpace, RenderMode, ResetMode, Result, Reward,
        Step,
    };
}
