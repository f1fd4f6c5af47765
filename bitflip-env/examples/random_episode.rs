//! Example: random agent playing the bit-flipping environment

use bitflip_core::seeding::np_random;
use bitflip_env::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = BitFlipConfig::default().with_n(8);
    let mut env = TrackedEnvironment::new(BitFlipperEnv::new(config)?);
    let (mut rng, seed) = np_random(None);
    println!("Agent seed: {seed}");

    // Run episodes
    let num_episodes: u32 = 10;
    let mut episode_rewards = Vec::new();
    let mut successes = 0;

    for episode in 0..num_episodes {
        env.reset(None)?;
        let reward_max = env.env.reward_max();

        loop {
            let action = env.action_space().sample(&mut rng);
            let step = env.step(action)?;

            if step.done {
                if step.reward.is_success() {
                    successes += 1;
                }
                break;
            }
        }

        if let Some(info) = env.render(RenderMode::Ansi) {
            println!("{info}");
        }
        let stats = env
            .episode_info()
            .ok_or_else(|| anyhow::anyhow!("episode was not tracked"))?;
        episode_rewards.push(stats.total_reward);
        println!(
            "Episode {}: Total Reward = {:.1} (best possible {:.1}), Steps = {}",
            episode + 1,
            stats.total_reward,
            reward_max.value(),
            stats.steps
        );
    }

    // Print statistics
    let avg_reward: f64 = episode_rewards.iter().sum::<f64>() / f64::from(num_episodes);
    println!(
        "\nAverage Reward over {num_episodes} episodes: {avg_reward:.2}, goals reached: {successes}"
    );

    env.close();

    Ok(())
}
