//! Bit-flipping environments for goal-conditioned reinforcement learning
//!
//! This crate provides:
//! - [`BitFlipperEnv`], the bit-flipping state machine
//! - [`GoalBitFlipperEnv`], the same environment reporting
//!   achieved/desired goals for goal-relabeling algorithms

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bit_flipper;
pub mod goal;

#[cfg(test)]
mod testing;

// Re-export environments
pub use bit_flipper::BitFlipperEnv;
pub use goal::GoalBitFlipperEnv;

// Re-export core types
pub use bitflip_core::{
    BitFlipConfig, BitFlipError, BitSampler, BitVector, DiscreteAction, Environment,
    GoalObservation, RenderMode, ResetMode, Reward, SeededSampler, Step, TrackedEnvironment,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{BitFlipperEnv, GoalBitFlipperEnv, TrackedEnvironment};
    pub use bitflip_core::prelude::*;
}
