//! Goal-augmented bit-flipping environment
//!
//! Wraps [`BitFlipperEnv`] and reports every observation as a
//! [`GoalObservation`], the dictionary-style layout goal-relabeling
//! algorithms expect. Rewards, termination and step counting come from the
//! wrapped environment unchanged.

use bitflip_core::{
    ActionSpace, BitFlipConfig, BitFlipError, BitSampler, BitVector, DiscreteAction,
    Environment, GoalObservation, GoalObservationSpace, ObservationSpace, RenderMode, Result,
    Reward, RewardRange, SeededSampler, Step,
};

use crate::BitFlipperEnv;

/// Bit-flipping environment with achieved/desired goal observations
pub struct GoalBitFlipperEnv<S = SeededSampler> {
    env: BitFlipperEnv<S>,
}

impl GoalBitFlipperEnv<SeededSampler> {
    /// Create a goal-augmented environment; see [`BitFlipConfig::goal_default`]
    pub fn new(config: BitFlipConfig) -> Result<Self> {
        Ok(Self::from_env(BitFlipperEnv::new(config)?))
    }
}

impl<S: BitSampler> GoalBitFlipperEnv<S> {
    /// Wrap an existing environment
    pub fn from_env(env: BitFlipperEnv<S>) -> Self {
        Self { env }
    }

    /// Create a goal-augmented environment over an injected sampler
    pub fn with_sampler(config: BitFlipConfig, sampler: S) -> Result<Self> {
        Ok(Self::from_env(BitFlipperEnv::with_sampler(config, sampler)?))
    }

    /// The wrapped environment
    pub fn inner(&self) -> &BitFlipperEnv<S> {
        &self.env
    }

    /// Same sparse reward the environment pays, for relabeled goals
    pub fn compute_reward(&self, achieved: &BitVector, desired: &BitVector) -> Result<Reward> {
        self.env.compute_reward(achieved, desired)
    }

    /// Flat policy input for `obs` conditioned on a substitute `goal`:
    /// the first `n` bits of `obs` followed by `goal`
    pub fn change_obs_goal(&self, obs: &BitVector, goal: &BitVector) -> Result<BitVector> {
        let n = self.env.n();
        goal.check_len(n)?;
        if obs.len() < n {
            return Err(BitFlipError::DimensionMismatch {
                expected: n,
                actual: obs.len(),
            });
        }
        Ok(obs.truncated(n).concat(goal))
    }

    fn convert_observation(&self, obs: &BitVector) -> GoalObservation {
        GoalObservation {
            observation: obs.truncated(self.env.n()),
            achieved_goal: self.env.state().clone(),
            desired_goal: self.env.goal().clone(),
        }
    }
}

impl<S: BitSampler> Environment for GoalBitFlipperEnv<S> {
    type Observation = GoalObservation;
    type Action = DiscreteAction;

    fn observation_space(&self) -> Box<dyn ObservationSpace<Observation = Self::Observation>> {
        Box::new(GoalObservationSpace::new(self.env.n()))
    }

    fn action_space(&self) -> Box<dyn ActionSpace<Action = Self::Action>> {
        self.env.action_space()
    }

    fn reward_range(&self) -> RewardRange {
        self.env.reward_range()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Observation> {
        let obs = self.env.reset(seed)?;
        Ok(self.convert_observation(&obs))
    }

    fn step(&mut self, action: Self::Action) -> Result<Step<Self::Observation>> {
        let step = self.env.step(action)?;
        Ok(Step {
            observation: self.convert_observation(&step.observation),
            reward: step.reward,
            done: step.done,
            info: step.info,
        })
    }

    fn render(&self, mode: RenderMode) -> Option<String> {
        self.env.render(mode)
    }

    fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        self.env.seed(seed)
    }

    fn close(&mut self) {
        self.env.close();
    }
}
