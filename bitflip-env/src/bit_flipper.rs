//! The bit-flipping environment
//!
//! The agent holds an `n`-bit state and must turn it into a fixed goal by
//! flipping one bit per step. Action `i < n` flips bit `i`, action `n`
//! leaves the state alone. Every step costs -1 until the goal is matched,
//! which pays 0 and ends the episode; episodes also end after `n` steps.

use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use bitflip_core::seeding::np_random;
use bitflip_core::{
    reward_bound, ActionSpace, BitFlipConfig, BitFlipError, BitSampler, BitVector,
    DiscreteAction, DiscreteSpace, Environment, MultiBinarySpace, ObservationSpace, RenderMode,
    ResetMode, Result, Reward, RewardFunction, RewardRange, SeededSampler, SparseReward, Step,
    StepInfo,
};

/// Bit-flipping environment over vectors drawn from `S`
pub struct BitFlipperEnv<S = SeededSampler> {
    config: BitFlipConfig,
    /// Construction seed, reused by deterministic resets
    seed: u64,
    sampler: S,
    /// Drives `sample_action`; reseeded by `seed()`
    np_random: StdRng,
    reward_fn: SparseReward,
    initial_state: BitVector,
    goal: BitVector,
    state: BitVector,
    steps: usize,
    reward_max: Reward,
    finished: bool,
}

impl BitFlipperEnv<SeededSampler> {
    /// Create an environment whose sampler is seeded from `config.seed`,
    /// or from entropy when the seed is unset
    pub fn new(config: BitFlipConfig) -> Result<Self> {
        validate_length(config.n)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let sampler = SeededSampler::new(config.n, seed);
        Self::build(config, seed, sampler)
    }
}

impl<S: BitSampler> BitFlipperEnv<S> {
    /// Create an environment drawing initial states and the goal from an
    /// already seeded `sampler`.
    ///
    /// `config.seed` is only remembered for deterministic resets here; the
    /// sampler is not reseeded at construction. An unset seed is drawn from
    /// entropy and stored in [`BitFlipperEnv::config`].
    pub fn with_sampler(config: BitFlipConfig, sampler: S) -> Result<Self> {
        validate_length(config.n)?;
        let seed = config.seed.unwrap_or_else(rand::random);
        Self::build(config, seed, sampler)
    }

    /// `config.n` must already be validated and `seed` resolved
    fn build(config: BitFlipConfig, seed: u64, mut sampler: S) -> Result<Self> {
        if sampler.n() != config.n {
            return Err(BitFlipError::DimensionMismatch {
                expected: config.n,
                actual: sampler.n(),
            });
        }

        let initial_state = sampler.sample();
        initial_state.check_len(config.n)?;
        let goal = sampler.sample();
        goal.check_len(config.n)?;
        let reward_max = reward_bound(&initial_state, &goal)?;
        let (np_random, _) = np_random(None);

        info!(
            n = config.n,
            seed,
            reset_mode = ?config.reset_mode,
            "created bit-flipping environment"
        );

        Ok(Self {
            config: config.with_seed(Some(seed)),
            seed,
            sampler,
            np_random,
            reward_fn: SparseReward,
            state: initial_state.clone(),
            initial_state,
            goal,
            steps: 0,
            reward_max,
            finished: false,
        })
    }

    /// Number of bits
    #[must_use]
    pub fn n(&self) -> usize {
        self.config.n
    }

    /// Configuration the environment was built with, seed resolved
    #[must_use]
    pub fn config(&self) -> &BitFlipConfig {
        &self.config
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> &BitVector {
        &self.state
    }

    /// Goal; fixed for the lifetime of the environment
    #[must_use]
    pub fn goal(&self) -> &BitVector {
        &self.goal
    }

    /// State the current episode started from
    #[must_use]
    pub fn initial_state(&self) -> &BitVector {
        &self.initial_state
    }

    /// Steps taken in the current episode
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Best return reachable this episode. Informational only.
    #[must_use]
    pub fn reward_max(&self) -> Reward {
        self.reward_max
    }

    /// Whether the current episode has reported `done`
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Render modes accepted by `render`
    #[must_use]
    pub fn render_modes(&self) -> &'static [RenderMode] {
        &RenderMode::ALL
    }

    /// Reward for having reached `achieved` while aiming for `desired`
    pub fn compute_reward(&self, achieved: &BitVector, desired: &BitVector) -> Result<Reward> {
        self.reward_fn.reward(achieved, desired)
    }

    /// Uniformly random action from the environment's own generator
    pub fn sample_action(&mut self) -> DiscreteAction {
        DiscreteSpace::new(self.config.n + 1).sample(&mut self.np_random)
    }

    fn render_text(&self) -> String {
        format!("State: {}, Steps done: {}", self.state, self.steps)
    }
}

impl<S: BitSampler> Environment for BitFlipperEnv<S> {
    type Observation = BitVector;
    type Action = DiscreteAction;

    fn observation_space(&self) -> Box<dyn ObservationSpace<Observation = Self::Observation>> {
        Box::new(MultiBinarySpace::new(self.config.n))
    }

    /// `n + 1` actions; the last one is a no-op
    fn action_space(&self) -> Box<dyn ActionSpace<Action = Self::Action>> {
        Box::new(DiscreteSpace::new(self.config.n + 1))
    }

    fn reward_range(&self) -> RewardRange {
        self.reward_fn.range()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Observation> {
        match (seed, self.config.reset_mode) {
            (Some(seed), _) => self.sampler.seed(seed),
            (None, ResetMode::Deterministic) => self.sampler.seed(self.seed),
            (None, ResetMode::Fresh) => {}
        }

        let initial_state = self.sampler.sample();
        initial_state.check_len(self.config.n)?;
        self.reward_max = reward_bound(&initial_state, &self.goal)?;
        self.state = initial_state.clone();
        self.initial_state = initial_state;
        self.steps = 0;
        self.finished = false;

        debug!(
            state = %self.state,
            reward_max = self.reward_max.0,
            "reset bit-flipping environment"
        );
        Ok(self.state.clone())
    }

    fn step(&mut self, action: Self::Action) -> Result<Step<Self::Observation>> {
        let n = self.config.n;
        if self.finished {
            warn!(action = action.0, "step called on a finished episode");
            return Err(BitFlipError::EpisodeFinished);
        }
        if action.0 > n {
            warn!(action = action.0, n, "invalid action");
            return Err(BitFlipError::InvalidAction {
                action: action.0,
                n,
            });
        }

        if action.0 < n {
            self.state.flip(action.0);
        }
        let reward = self.reward_fn.reward(&self.state, &self.goal)?;
        self.steps += 1;
        let done = reward.is_success() || self.steps >= n;
        self.finished = done;

        debug!(
            action = action.0,
            reward = reward.0,
            done,
            steps = self.steps,
            "stepped bit-flipping environment"
        );
        Ok(Step {
            observation: self.state.clone(),
            reward,
            done,
            info: StepInfo::default(),
        })
    }

    fn render(&self, mode: RenderMode) -> Option<String> {
        let text = self.render_text();
        match mode {
            RenderMode::Human => {
                println!("{text}");
                None
            }
            RenderMode::Ansi => Some(text),
        }
    }

    fn seed(&mut self, seed: Option<u64>) -> Vec<u64> {
        let (rng, seed) = np_random(seed);
        self.np_random = rng;
        vec![seed]
    }
}

fn validate_length(n: usize) -> Result<()> {
    if n == 0 {
        return Err(BitFlipError::InvalidLength(n));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{bits, ScriptedSampler};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn scripted(n: usize, script: &[&[u8]]) -> BitFlipperEnv<ScriptedSampler> {
        let config = BitFlipConfig::default().with_n(n);
        BitFlipperEnv::with_sampler(config, ScriptedSampler::new(n, script)).unwrap()
    }

    #[test]
    fn test_reaches_goal() {
        // initial [0,0,0], goal [1,0,1]
        let mut env = scripted(3, &[&[0, 0, 0], &[1, 0, 1]]);
        assert_relative_eq!(env.reward_max().0, -1.0);

        let first = env.step(DiscreteAction(0)).unwrap();
        assert_eq!(first.observation, bits(&[1, 0, 0]));
        assert_relative_eq!(first.reward.0, -1.0);
        assert!(!first.done);
        assert!(first.info.is_empty());

        let second = env.step(DiscreteAction(2)).unwrap();
        assert_eq!(second.observation, bits(&[1, 0, 1]));
        assert_relative_eq!(second.reward.0, 0.0);
        assert!(second.done);
        assert_eq!(env.steps(), 2);
    }

    #[test]
    fn test_noop_action() {
        let mut env = scripted(2, &[&[1, 0], &[0, 1]]);

        let step = env.step(DiscreteAction(2)).unwrap();
        assert_eq!(step.observation, bits(&[1, 0]));
        assert_relative_eq!(step.reward.0, -1.0);
        assert_eq!(env.steps(), 1);
    }

    #[test]
    fn test_invalid_action_leaves_state() {
        let mut env = scripted(3, &[&[0, 1, 0], &[1, 1, 1]]);

        let err = env.step(DiscreteAction(4)).unwrap_err();
        assert!(matches!(err, BitFlipError::InvalidAction { action: 4, n: 3 }));
        assert_eq!(env.state(), &bits(&[0, 1, 0]));
        assert_eq!(env.steps(), 0);
    }

    #[test]
    fn test_done_after_n_steps() {
        let mut env = scripted(2, &[&[0, 0], &[1, 1]]);

        assert!(!env.step(DiscreteAction(2)).unwrap().done);
        let last = env.step(DiscreteAction(2)).unwrap();
        assert!(last.done);
        assert_relative_eq!(last.reward.0, -1.0);
    }

    #[test]
    fn test_step_after_done_is_rejected() {
        let mut env = scripted(1, &[&[0], &[1]]);

        assert!(env.step(DiscreteAction(0)).unwrap().done);
        let err = env.step(DiscreteAction(0)).unwrap_err();
        assert!(matches!(err, BitFlipError::EpisodeFinished));
        assert_eq!(env.state(), &bits(&[1]));
        assert_eq!(env.steps(), 1);

        env.reset(None).unwrap();
        assert!(!env.is_finished());
        assert!(env.step(DiscreteAction(1)).is_ok());
    }

    #[test]
    fn test_initial_state_equal_to_goal() {
        let env = scripted(2, &[&[1, 0], &[1, 0]]);
        assert_relative_eq!(env.reward_max().0, 0.0);
    }

    #[test]
    fn test_reset_keeps_goal_and_counts_from_zero() {
        let mut env = scripted(3, &[&[0, 0, 0], &[1, 0, 1], &[1, 1, 1]]);
        env.step(DiscreteAction(1)).unwrap();

        let state = env.reset(None).unwrap();
        assert_eq!(state, bits(&[1, 1, 1]));
        assert_eq!(env.initial_state(), &bits(&[1, 1, 1]));
        assert_eq!(env.goal(), &bits(&[1, 0, 1]));
        assert_eq!(env.steps(), 0);
        assert_relative_eq!(env.reward_max().0, 0.0);
    }

    #[test]
    fn test_zero_length_rejected() {
        let config = BitFlipConfig::default().with_n(0);
        assert!(matches!(
            BitFlipperEnv::new(config),
            Err(BitFlipError::InvalidLength(0))
        ));
    }

    #[test]
    fn test_sampler_length_must_match() {
        let config = BitFlipConfig::default().with_n(4);
        let result = BitFlipperEnv::with_sampler(config, ScriptedSampler::new(3, &[&[0, 0, 0]]));
        assert!(matches!(
            result,
            Err(BitFlipError::DimensionMismatch {
                expected: 4,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_same_seed_same_episode() {
        let config = BitFlipConfig::default().with_n(16).with_seed(Some(5));
        let a = BitFlipperEnv::new(config.clone()).unwrap();
        let b = BitFlipperEnv::new(config).unwrap();

        assert_eq!(a.initial_state(), b.initial_state());
        assert_eq!(a.goal(), b.goal());
    }

    #[test]
    fn test_deterministic_reset_replays_initial_state() {
        let config = BitFlipConfig::default()
            .with_n(24)
            .with_seed(Some(3))
            .with_reset_mode(ResetMode::Deterministic);
        let mut env = BitFlipperEnv::new(config).unwrap();
        let initial = env.initial_state().clone();
        let goal = env.goal().clone();

        for _ in 0..3 {
            assert_eq!(env.reset(None).unwrap(), initial);
        }
        assert_eq!(env.goal(), &goal);
    }

    #[test]
    fn test_fresh_reset_draws_new_states() {
        let config = BitFlipConfig::default().with_n(64).with_seed(Some(3));
        let mut env = BitFlipperEnv::new(config).unwrap();
        let goal = env.goal().clone();

        let first = env.reset(None).unwrap();
        let second = env.reset(None).unwrap();
        assert_ne!(first, second);
        assert_eq!(env.goal(), &goal);
    }

    #[test]
    fn test_explicit_reset_seed_reseeds_sampler() {
        let config = BitFlipConfig::default().with_n(32);
        let mut env = BitFlipperEnv::new(config).unwrap();

        let first = env.reset(Some(77)).unwrap();
        env.reset(None).unwrap();
        assert_eq!(env.reset(Some(77)).unwrap(), first);
    }

    #[test]
    fn test_entropy_seed_is_resolved() {
        let env = BitFlipperEnv::new(BitFlipConfig::default().with_seed(None)).unwrap();
        assert!(env.config().seed.is_some());
    }

    #[test]
    fn test_injected_sampler_entropy_seed_is_resolved() {
        let config = BitFlipConfig::default()
            .with_n(3)
            .with_seed(None)
            .with_reset_mode(ResetMode::Deterministic);
        let mut env = BitFlipperEnv::with_sampler(
            config,
            ScriptedSampler::new(3, &[&[0, 0, 1], &[1, 1, 1], &[0, 1, 0]]),
        )
        .unwrap();
        let seed = env.config().seed;
        assert!(seed.is_some());

        // Replaying the reported seed matches a seedless deterministic reset
        let replayed = env.reset(seed).unwrap();
        assert_eq!(env.reset(None).unwrap(), replayed);
        assert_eq!(env.config().seed, seed);
    }

    #[test]
    fn test_explicit_seed_kept_with_injected_sampler() {
        let config = BitFlipConfig::default().with_n(2).with_seed(Some(21));
        let env = BitFlipperEnv::with_sampler(config, ScriptedSampler::new(2, &[&[0, 1], &[1, 1]]))
            .unwrap();
        assert_eq!(env.config().seed, Some(21));
    }

    #[test]
    fn test_render_ansi() {
        let mut env = scripted(3, &[&[0, 1, 0], &[1, 1, 1]]);
        env.step(DiscreteAction(0)).unwrap();

        assert_eq!(
            env.render(RenderMode::Ansi).as_deref(),
            Some("State: [1 1 0], Steps done: 1")
        );
        assert!(env.render(RenderMode::Human).is_none());
    }

    #[test]
    fn test_seed_reports_seed_and_drives_sample_action() {
        let mut env = BitFlipperEnv::new(BitFlipConfig::default()).unwrap();

        assert_eq!(env.seed(Some(8)), vec![8]);
        let first: Vec<_> = (0..10).map(|_| env.sample_action()).collect();
        env.seed(Some(8));
        let second: Vec<_> = (0..10).map(|_| env.sample_action()).collect();

        assert_eq!(first, second);
        assert!(first.iter().all(|a| env.action_space().contains(a)));
        assert_eq!(env.seed(None).len(), 1);
    }

    #[test]
    fn test_spaces_and_metadata() {
        let env = scripted(4, &[&[0, 0, 0, 0], &[1, 1, 1, 1]]);

        assert!(env.action_space().contains(&DiscreteAction(4)));
        assert!(!env.action_space().contains(&DiscreteAction(5)));
        assert_eq!(env.observation_space().shape(), vec![4]);
        assert_eq!(env.reward_range(), RewardRange { low: -1.0, high: 0.0 });
        assert_eq!(env.render_modes(), &[RenderMode::Human, RenderMode::Ansi]);
    }

    proptest! {
        #[test]
        fn prop_step_flips_exactly_one_bit(seed in any::<u64>(), n in 1usize..48, pick in any::<usize>()) {
            let config = BitFlipConfig::default().with_n(n).with_seed(Some(seed));
            let mut env = BitFlipperEnv::new(config).unwrap();
            let before = env.state().clone();
            let action = pick % n;

            let step = env.step(DiscreteAction(action)).unwrap();
            prop_assert_eq!(before.hamming(&step.observation).unwrap(), 1);
            prop_assert_ne!(before[action], step.observation[action]);
        }

        #[test]
        fn prop_noop_keeps_state(seed in any::<u64>(), n in 1usize..48) {
            let config = BitFlipConfig::default().with_n(n).with_seed(Some(seed));
            let mut env = BitFlipperEnv::new(config).unwrap();
            let before = env.state().clone();

            let step = env.step(DiscreteAction(n)).unwrap();
            prop_assert_eq!(step.observation, before);
        }

        #[test]
        fn prop_reward_and_done_rules(
            seed in any::<u64>(),
            n in 1usize..16,
            actions in proptest::collection::vec(any::<usize>(), 1..16),
        ) {
            let config = BitFlipConfig::default().with_n(n).with_seed(Some(seed));
            let mut env = BitFlipperEnv::new(config).unwrap();

            for (i, raw) in actions.into_iter().enumerate() {
                let steps_before = env.steps();
                let step = env.step(DiscreteAction(raw % (n + 1))).unwrap();
                let at_goal = &step.observation == env.goal();

                prop_assert_eq!(env.steps(), steps_before + 1);
                prop_assert_eq!(env.steps(), i + 1);
                prop_assert_eq!(step.reward.is_success(), at_goal);
                prop_assert!(step.reward == Reward::SUCCESS || step.reward == Reward::FAILURE);
                prop_assert_eq!(step.done, at_goal || env.steps() >= n);
                if step.done {
                    break;
                }
            }
        }

        #[test]
        fn prop_double_flip_restores(seed in any::<u64>(), n in 2usize..48, pick in any::<usize>()) {
            let config = BitFlipConfig::default().with_n(n).with_seed(Some(seed));
            let mut env = BitFlipperEnv::new(config).unwrap();
            let before = env.state().clone();
            let action = DiscreteAction(pick % n);

            let first = env.step(action).unwrap();
            prop_assume!(!first.done);
            let second = env.step(action).unwrap();
            prop_assert_eq!(second.observation, before);
        }

        #[test]
        fn prop_goal_reachable_within_n_steps(seed in any::<u64>(), n in 1usize..48) {
            let config = BitFlipConfig::default().with_n(n).with_seed(Some(seed));
            let mut env = BitFlipperEnv::new(config).unwrap();
            let to_flip: Vec<usize> = (0..n).filter(|&i| env.state()[i] != env.goal()[i]).collect();
            prop_assume!(!to_flip.is_empty());

            let mut last = None;
            for i in to_flip {
                last = Some(env.step(DiscreteAction(i)).unwrap());
            }
            let last = last.unwrap();
            prop_assert!(last.done);
            prop_assert!(last.reward.is_success());
            prop_assert!(env.steps() <= n);
        }
    }
}
