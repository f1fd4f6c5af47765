//! Environment traits and types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{Action, ActionSpace, BitFlipError, Observation, ObservationSpace, Result, Reward, RewardRange};

/// Result of a single environment step
#[derive(Debug, Clone, PartialEq)]
pub struct Step<O> {
    /// Observation after the action was applied
    pub observation: O,
    /// Reward signal
    pub reward: Reward,
    /// Whether the episode is done
    pub done: bool,
    /// Additional info from the environment
    pub info: StepInfo,
}

/// Additional information from a step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepInfo {
    /// Custom fields
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl StepInfo {
    /// Whether no fields were recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Episode information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Episode {
    /// Episode ID
    pub id: String,
    /// Total reward
    pub total_reward: f64,
    /// Number of steps
    pub steps: usize,
    /// Whether the episode has reported `done`
    pub finished: bool,
    /// Start time
    pub start_time: chrono::DateTime<chrono::Utc>,
    /// End time
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
}

/// How `render` presents the environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Print to stdout
    Human,
    /// Return the text to the caller
    Ansi,
}

impl RenderMode {
    /// Every supported mode
    pub const ALL: [Self; 2] = [Self::Human, Self::Ansi];

    /// Name used in configuration and metadata
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "human",
            Self::Ansi => "ansi",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = BitFlipError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "human" => Ok(Self::Human),
            "ansi" => Ok(Self::Ansi),
            other => Err(BitFlipError::UnsupportedRenderMode(other.to_string())),
        }
    }
}

/// Core environment trait.
///
/// Callers reset once per episode and then step until a [`Step`] reports
/// `done`, after which they must reset again.
pub trait Environment: Send {
    /// Observation type
    type Observation: Observation;
    /// Action type
    type Action: Action;

    /// Get the observation space
    fn observation_space(&self) -> Box<dyn ObservationSpace<Observation = Self::Observation>>;

    /// Get the action space
    fn action_space(&self) -> Box<dyn ActionSpace<Action = Self::Action>>;

    /// Bounds on per-step rewards
    fn reward_range(&self) -> RewardRange;

    /// Start a new episode, optionally reseeding first
    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Observation>;

    /// Take a step in the environment
    fn step(&mut self, action: Self::Action) -> Result<Step<Self::Observation>>;

    /// Render the environment; `Ansi` returns the text, `Human` prints it
    fn render(&self, mode: RenderMode) -> Option<String>;

    /// Reseed the environment's own generator and report the seed used
    fn seed(&mut self, seed: Option<u64>) -> Vec<u64>;

    /// Close the environment
    fn close(&mut self) {}

    /// Get current episode info
    fn episode_info(&self) -> Option<Episode> {
        None
    }
}

/// Wrapper for environments that tracks episodes
pub struct TrackedEnvironment<E> {
    /// Inner environment
    pub env: E,
    /// Current episode
    pub episode: Option<Episode>,
    /// Step counter
    pub step_count: usize,
}

impl<E> TrackedEnvironment<E> {
    /// Create a new tracked environment
    pub fn new(env: E) -> Self {
        Self {
            env,
            episode: None,
            step_count: 0,
        }
    }
}

impl<E> Environment for TrackedEnvironment<E>
where
    E: Environment,
{
    type Observation = E::Observation;
    type Action = E::Action;

    fn observation_space(&self) -> Box<dyn ObservationSpace<Observation = Self::Observation>> {
        self.env.observation_space()
    }

    fn action_space(&self) -> Box<dyn ActionSpace<Action = Self::Action>> {
        self.env.action_space()
    }

    fn reward_range(&self) -> RewardRange {
        self.env.reward_range()
    }

    fn reset(&mut self, seed: Option<u64>) -> Result<Self::Observation> {
        let observation = self.env.reset(seed)?;

        // End current episode if exists
        if let Some(ref mut episode) = self.episode {
            if episode.end_time.is_none() {
                episode.end_time = Some(chrono::Utc::now());
            }
        }

        self.episode = Some(Episode {
            id: uuid::Uuid::new_v4().to_string(),
            total_reward: 0.0,
            steps: 0,
            finished: false,
            start_time: chrono::Utc::now(),
            end_time: None,
        });
        self.step_count = 0;

        Ok(observation)
    }

    fn step(&mut self, action: Self::Action) -> Result<Step<Self::Observation>> {
        let step = self.env.step(action)?;

        self.step_count += 1;
        if let Some(ref mut episode) = self.episode {
            episode.total_reward += step.reward.0;
            episode.steps = self.step_count;

            if step.done {
                episode.finished = true;
                episode.end_time = Some(chrono::Utc::now());
            }
        }

        Ok(step)
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

    fn episode_info(&self) -> Option<Episode> {
        self.episode.clone()
    }
}
