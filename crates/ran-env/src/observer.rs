//! Episode observer hooks and a driver-side episode runner.

use ran_traffic::TrafficProvider;

use crate::state::{EpisodeSummary, StepInfo};
use crate::{EnvResult, RanEnv};

/// Callbacks invoked by [`run_episode`] at key points in the episode.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — drop-rate printer
///
/// ```rust,ignore
/// struct DropPrinter;
///
/// impl EpisodeObserver for DropPrinter {
///     fn on_step(&mut self, step: u64, info: &StepInfo, _reward: f64) {
///         if info.drop_rate > 0.1 {
///             println!("step {step}: dropping {:.1}%", info.drop_rate * 100.0);
///         }
///     }
/// }
/// ```
pub trait EpisodeObserver {
    /// Called once after `reset()`, with the initial observation.
    fn on_reset(&mut self, _observation: &[f64]) {}

    /// Called after each step with its 0-based index and metrics record.
    fn on_step(&mut self, _step: u64, _info: &StepInfo, _reward: f64) {}

    /// Called once after the final step.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary) {}
}

/// An [`EpisodeObserver`] that does nothing.
pub struct NoopObserver;

impl EpisodeObserver for NoopObserver {}

/// Drive one full episode with `policy` and return the averaged metrics.
///
/// The policy is an arbitrary observation→action mapping; the real training
/// driver owns a learned one, tests and demos pass closures.  The engine
/// keeps exclusive ownership of its episode state throughout.
pub fn run_episode<T, P, O>(
    env: &mut RanEnv<T>,
    mut policy: P,
    observer: &mut O,
) -> EnvResult<EpisodeSummary>
where
    T: TrafficProvider,
    P: FnMut(&[f64]) -> Vec<bool>,
    O: EpisodeObserver,
{
    let mut obs = env.reset();
    observer.on_reset(&obs);

    let mut steps = 0u64;
    let mut total_reward = 0.0;
    let mut power_sum = 0.0;
    let mut drop_sum = 0.0;
    let mut switch_sum = 0.0;

    loop {
        let action = policy(&obs);
        let out = env.step(&action)?;

        observer.on_step(steps, &out.info, out.reward);
        steps += 1;
        total_reward += out.reward;
        power_sum += out.info.power;
        drop_sum += out.info.drop_rate;
        switch_sum += out.info.switches as f64;

        obs = out.observation;
        if out.terminated {
            break;
        }
    }

    // The horizon is validated > 0, so at least one step ran.
    let n = steps as f64;
    let summary = EpisodeSummary {
        steps,
        total_reward,
        avg_power: power_sum / n,
        avg_drop_rate: drop_sum / n,
        avg_switches: switch_sum / n,
    };
    observer.on_episode_end(&summary);
    Ok(summary)
}
