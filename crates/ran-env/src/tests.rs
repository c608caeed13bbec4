//! Integration tests for ran-env.
//!
//! The two-cell fixtures mirror the engine's acceptance scenarios: 2 cells
//! of 1 sector each, 10 Mbps sector capacity, demand [15, 0].

use ran_core::RanConfig;
use ran_topology::{SitePosition, Topology};
use ran_traffic::TrafficTrace;

use crate::{EnvBuilder, EnvError, RanEnv};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Config for a small network with 10 Mbps sector capacity and a short
/// synthetic horizon; energy constants keep their defaults.
fn test_config(cells: u32, sectors: u32) -> RanConfig {
    let mut cfg = RanConfig::default();
    cfg.network.num_cells = cells;
    cfg.network.sectors_per_cell = sectors;
    cfg.network.sector_capacity = 10.0;
    cfg.episode.max_steps = 5;
    cfg
}

/// One-step trace with demand [15, 0] on two single-sector cells.
fn two_cell_trace() -> TrafficTrace {
    TrafficTrace::from_rows(vec![vec![3, 0]], vec![vec![15.0, 0.0]]).unwrap()
}

fn two_cell_topology() -> Topology {
    Topology::from_positions(
        vec![SitePosition::new(0.0, 0.0), SitePosition::new(1.5, 0.0)],
        1.5,
    )
    .unwrap()
}

fn two_cell_env() -> RanEnv<TrafficTrace> {
    EnvBuilder::new(test_config(2, 1), two_cell_trace())
        .topology(two_cell_topology())
        .build()
        .unwrap()
}

// ── Builder validation ────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use super::*;

    #[test]
    fn builds_with_default_topology() {
        let env = EnvBuilder::new(test_config(2, 1), two_cell_trace())
            .build()
            .unwrap();
        assert_eq!(env.action_len(), 2);
        assert_eq!(env.observation_len(), 8);
        assert_eq!(env.topology().num_cells(), 2);
    }

    #[test]
    fn sector_count_mismatch_errors() {
        // Trace covers 2 sectors, network wants 3 cells × 1.
        let r = EnvBuilder::new(test_config(3, 1), two_cell_trace()).build();
        assert!(matches!(
            r,
            Err(EnvError::SectorCountMismatch { expected: 3, got: 2 })
        ));
    }

    #[test]
    fn cell_count_mismatch_errors() {
        let one_cell = Topology::from_positions(vec![SitePosition::new(0.0, 0.0)], 1.5).unwrap();
        let r = EnvBuilder::new(test_config(2, 1), two_cell_trace())
            .topology(one_cell)
            .build();
        assert!(matches!(
            r,
            Err(EnvError::CellCountMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn invalid_config_errors() {
        let mut cfg = test_config(2, 1);
        cfg.energy.p_base = -1.0;
        assert!(EnvBuilder::new(cfg, two_cell_trace()).build().is_err());
    }

    #[test]
    fn bad_initial_formula_is_fatal_at_build() {
        let r = EnvBuilder::new(test_config(2, 1), two_cell_trace())
            .reward_formula("reward = nonsense")
            .build();
        assert!(matches!(r, Err(EnvError::Reward(_))));
    }
}

// ── State machine ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod state_machine {
    use super::*;

    #[test]
    fn step_before_reset_errors() {
        let mut env = two_cell_env();
        let r = env.step(&[true, true]);
        assert!(matches!(r, Err(EnvError::NotStarted)));
    }

    #[test]
    fn step_after_termination_errors() {
        let mut env = two_cell_env();
        env.reset();
        let out = env.step(&[true, true]).unwrap();
        assert!(out.terminated, "1-step trace terminates immediately");
        let r = env.step(&[true, true]);
        assert!(matches!(r, Err(EnvError::EpisodeOver)));
    }

    #[test]
    fn reset_revives_a_terminated_env() {
        let mut env = two_cell_env();
        env.reset();
        env.step(&[true, true]).unwrap();
        env.reset();
        assert!(env.step(&[true, true]).is_ok());
    }

    #[test]
    fn wrong_action_length_errors() {
        let mut env = two_cell_env();
        env.reset();
        let r = env.step(&[true]);
        assert!(matches!(
            r,
            Err(EnvError::ActionLength { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn reset_starts_all_active() {
        let mut env = two_cell_env();
        let obs = env.reset();
        // Activation flags are every 4th observation entry.
        assert!(obs.iter().skip(3).step_by(4).all(|&a| a == 1.0));
        assert_eq!(env.current_step(), Some(0));
    }
}

// ── Serving and offload ───────────────────────────────────────────────────────

#[cfg(test)]
mod serving {
    use super::*;

    #[test]
    fn scenario_a_capacity_bound() {
        // All sectors on: cell 0 serves 10 of its 15, drop = 1/3.
        let mut env = two_cell_env();
        env.reset();
        let out = env.step(&[true, true]).unwrap();
        assert!((out.info.drop_rate - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn scenario_b_dark_cell_offloads_to_neighbor() {
        // Cell 0 fully dark; its 15 units route to cell 1, which is credited
        // with one sector-capacity (10).  Same drop as scenario A.
        let mut env = two_cell_env();
        env.reset();
        let out = env.step(&[false, true]).unwrap();
        assert!((out.info.drop_rate - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn intra_cell_offload_uses_remaining_capacity() {
        // One cell, two sectors, capacity 10: sector 1 is dark with 12 units;
        // sector 0 is active with none of its own, so 10 of the 12 are
        // absorbed locally.  Drop = 1 - 10/12.
        let trace = TrafficTrace::from_rows(vec![vec![0, 4]], vec![vec![0.0, 12.0]]).unwrap();
        let mut env = EnvBuilder::new(test_config(1, 2), trace).build().unwrap();
        env.reset();
        let out = env.step(&[true, false]).unwrap();
        assert!((out.info.drop_rate - (1.0 - 10.0 / 12.0)).abs() < 1e-12);
    }

    #[test]
    fn lone_dark_cell_drops_everything() {
        // Single cell, no neighbor to offload to.
        let trace = TrafficTrace::from_rows(vec![vec![5]], vec![vec![8.0]]).unwrap();
        let mut env = EnvBuilder::new(test_config(1, 1), trace).build().unwrap();
        env.reset();
        let out = env.step(&[false]).unwrap();
        assert_eq!(out.info.drop_rate, 1.0);
    }

    #[test]
    fn zero_demand_is_zero_drop() {
        let trace = TrafficTrace::from_rows(vec![vec![0, 0]], vec![vec![0.0, 0.0]]).unwrap();
        let mut env = EnvBuilder::new(test_config(2, 1), trace)
            .topology(two_cell_topology())
            .build()
            .unwrap();
        env.reset();
        let out = env.step(&[false, false]).unwrap();
        assert_eq!(out.info.drop_rate, 0.0);
    }

    #[test]
    fn ample_capacity_all_on_is_zero_drop() {
        let trace = TrafficTrace::from_rows(vec![vec![2, 2]], vec![vec![4.0, 7.0]]).unwrap();
        let mut env = EnvBuilder::new(test_config(2, 1), trace)
            .topology(two_cell_topology())
            .build()
            .unwrap();
        env.reset();
        let out = env.step(&[true, true]).unwrap();
        assert_eq!(out.info.drop_rate, 0.0);
    }

    #[test]
    fn drop_rate_always_in_unit_interval() {
        use ran_core::SimRng;

        let mut env = RanEnv::synthetic(test_config(4, 3)).unwrap();
        let mut rng = SimRng::new(777);
        env.reset();
        loop {
            let action: Vec<bool> = (0..env.action_len()).map(|_| rng.gen_bool(0.5)).collect();
            let out = env.step(&action).unwrap();
            assert!((0.0..=1.0).contains(&out.info.drop_rate));
            if out.terminated {
                break;
            }
        }
    }
}

// ── Switch accounting and power ───────────────────────────────────────────────

#[cfg(test)]
mod energy {
    use super::*;

    #[test]
    fn first_step_switches_measured_from_all_on() {
        let mut env = two_cell_env();
        env.reset();
        // Episode starts all-on; turning both off toggles 2 sectors.
        let out = env.step(&[false, false]).unwrap();
        assert_eq!(out.info.switches, 2);
    }

    #[test]
    fn repeated_action_has_zero_switches() {
        let mut cfg = test_config(2, 1);
        cfg.episode.max_steps = 10;
        let mut env = RanEnv::synthetic(cfg).unwrap();
        env.reset();
        env.step(&[false, true]).unwrap();
        let out = env.step(&[false, true]).unwrap();
        assert_eq!(out.info.switches, 0);
    }

    #[test]
    fn complement_action_toggles_every_sector() {
        let mut env = RanEnv::synthetic(test_config(2, 3)).unwrap();
        env.reset();
        env.step(&[true, false, true, false, true, false]).unwrap();
        let out = env.step(&[false, true, false, true, false, true]).unwrap();
        assert_eq!(out.info.switches, 6);
    }

    #[test]
    fn power_matches_energy_model() {
        let cfg = test_config(2, 1);
        let params = cfg.energy;
        let layout = cfg.layout();
        let mut env = EnvBuilder::new(cfg, two_cell_trace())
            .topology(two_cell_topology())
            .build()
            .unwrap();
        env.reset();
        let action = [false, true];
        let out = env.step(&action).unwrap();
        assert_eq!(
            out.info.power,
            ran_energy::power(&action, &[true, true], &layout, &params),
        );
    }
}

// ── Reward plumbing ───────────────────────────────────────────────────────────

#[cfg(test)]
mod reward {
    use super::*;

    #[test]
    fn scenario_d_formula_sees_step_power() {
        let mut env = two_cell_env();
        env.set_reward_formula("reward = -power").unwrap();
        env.reset();
        let out = env.step(&[true, true]).unwrap();
        assert_eq!(out.reward, -out.info.power);
    }

    #[test]
    fn default_reward_is_baseline() {
        let mut env = two_cell_env();
        env.reset();
        let out = env.step(&[true, true]).unwrap();
        let expected = -out.info.power - 1000.0 * out.info.drop_rate;
        assert!((out.reward - expected).abs() < 1e-9);
    }

    #[test]
    fn rejected_swap_degrades_to_baseline_mid_training() {
        let mut cfg = test_config(2, 1);
        cfg.episode.max_steps = 4;
        let mut env = RanEnv::synthetic(cfg).unwrap();
        env.set_reward_formula("reward = -switches").unwrap();
        env.reset();
        env.step(&[true, true]).unwrap();

        // A bad swap mid-episode reports the error but the episode goes on.
        assert!(env.set_reward_formula("reward = = power").is_err());
        let out = env.step(&[true, true]).unwrap();
        let expected = -out.info.power - 1000.0 * out.info.drop_rate;
        assert!((out.reward - expected).abs() < 1e-9);
    }

    #[test]
    fn users_active_metric_reflects_snapshot() {
        // users [3, 0] → users_active = 3; formula exposes it directly.
        let mut env = two_cell_env();
        env.set_reward_formula("reward = users_active").unwrap();
        env.reset();
        let out = env.step(&[true, true]).unwrap();
        assert_eq!(out.reward, 3.0);
    }
}

// ── Termination and observation ───────────────────────────────────────────────

#[cfg(test)]
mod episode {
    use super::*;
    use crate::{run_episode, EpisodeObserver, NoopObserver, StepInfo};
    use crate::state::EpisodeSummary;

    #[test]
    fn scenario_c_synthetic_terminates_exactly_at_max_steps() {
        let mut cfg = test_config(2, 1);
        cfg.episode.max_steps = 7;
        let mut env = RanEnv::synthetic(cfg).unwrap();
        env.reset();
        for step in 0..7 {
            let out = env.step(&[true, true]).unwrap();
            assert_eq!(out.terminated, step == 6, "step {step}");
        }
    }

    #[test]
    fn trace_mode_terminates_at_trace_length() {
        let trace = TrafficTrace::from_rows(
            vec![vec![1, 1]; 3],
            vec![vec![1.0, 1.0]; 3],
        )
        .unwrap();
        let mut env = EnvBuilder::new(test_config(2, 1), trace)
            .topology(two_cell_topology())
            .build()
            .unwrap();
        assert_eq!(env.episode_horizon(), 3);
        env.reset();
        for step in 0..3 {
            let out = env.step(&[true, true]).unwrap();
            assert_eq!(out.terminated, step == 2, "step {step}");
        }
    }

    #[test]
    fn observation_layout_and_epsilon_guard() {
        let mut env = two_cell_env();
        let obs = env.reset();
        assert_eq!(obs.len(), 8);

        // Sector 0: users 3, load 15 → per-user ≈ 5 (epsilon-shifted).
        assert_eq!(obs[0], 3.0);
        assert!((obs[1] - 15.0 / (3.0 + crate::USERS_EPSILON)).abs() < 1e-9);
        assert_eq!(obs[2], 15.0);
        assert_eq!(obs[3], 1.0);

        // Sector 1 has zero users: the division is guarded, not NaN.
        assert_eq!(obs[4], 0.0);
        assert!(obs[5].is_finite());
        assert_eq!(obs[5], 0.0);
    }

    #[test]
    fn observation_reflects_last_action() {
        let mut cfg = test_config(2, 1);
        cfg.episode.max_steps = 3;
        let mut env = RanEnv::synthetic(cfg).unwrap();
        env.reset();
        let out = env.step(&[false, true]).unwrap();
        assert_eq!(out.observation[3], 0.0);
        assert_eq!(out.observation[7], 1.0);
    }

    #[test]
    fn run_episode_summarizes_and_calls_observer() {
        struct Counts {
            resets: usize,
            steps: usize,
            ends: usize,
        }
        impl EpisodeObserver for Counts {
            fn on_reset(&mut self, _obs: &[f64]) {
                self.resets += 1;
            }
            fn on_step(&mut self, _step: u64, _info: &StepInfo, _reward: f64) {
                self.steps += 1;
            }
            fn on_episode_end(&mut self, _summary: &EpisodeSummary) {
                self.ends += 1;
            }
        }

        let mut cfg = test_config(2, 1);
        cfg.episode.max_steps = 6;
        let mut env = RanEnv::synthetic(cfg).unwrap();
        let mut counts = Counts { resets: 0, steps: 0, ends: 0 };

        let all_on = |obs: &[f64]| vec![true; obs.len() / 4];
        let summary = run_episode(&mut env, all_on, &mut counts).unwrap();

        assert_eq!(summary.steps, 6);
        assert_eq!(counts.resets, 1);
        assert_eq!(counts.steps, 6);
        assert_eq!(counts.ends, 1);
        assert!(summary.avg_power > 0.0);
        assert!((0.0..=1.0).contains(&summary.avg_drop_rate));
    }

    #[test]
    fn summary_threshold_helper() {
        let summary = EpisodeSummary {
            steps: 1,
            total_reward: 0.0,
            avg_power: 0.0,
            avg_drop_rate: 0.2,
            avg_switches: 0.0,
        };
        assert!(summary.drop_rate_exceeds(0.1));
        assert!(!summary.drop_rate_exceeds(0.25));
    }

    #[test]
    fn seeded_synthetic_episodes_reproduce() {
        let make = || {
            let mut cfg = test_config(3, 2);
            cfg.episode.max_steps = 8;
            RanEnv::synthetic(cfg).unwrap()
        };
        let mut a = make();
        let mut b = make();
        let policy = |obs: &[f64]| vec![true; obs.len() / 4];
        let sa = run_episode(&mut a, policy, &mut NoopObserver).unwrap();
        let sb = run_episode(&mut b, policy, &mut NoopObserver).unwrap();
        assert_eq!(sa, sb);
    }
}
