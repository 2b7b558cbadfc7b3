//! Integration tests for the Dyna-Q learner
//!
//! These tests drive the learner through a small deterministic grid world
//! the way an environment harness would.

use dyna_q::{LearnerConfig, QLearner, RandomSource, StateActionPair, StateId};
use rand::rngs::StdRng;
use rand::SeedableRng;

const WIDTH: usize = 5;
const HEIGHT: usize = 5;
const START: (usize, usize) = (0, 0);
const GOAL: (usize, usize) = (4, 4);
const MAX_EPISODE_STEPS: usize = 500;

fn state_of(pos: (usize, usize)) -> StateId {
    pos.1 * WIDTH + pos.0
}

/// Moves 0=north 1=east 2=south 3=west; bumping into an edge stays put.
fn apply(pos: (usize, usize), action: usize) -> (usize, usize) {
    let (x, y) = pos;
    match action {
        0 if y > 0 => (x, y - 1),
        1 if x + 1 < WIDTH => (x + 1, y),
        2 if y + 1 < HEIGHT => (x, y + 1),
        3 if x > 0 => (x - 1, y),
        _ => pos,
    }
}

/// Runs one episode and returns the number of real steps it took.
fn run_episode<R: RandomSource>(learner: &mut QLearner<R>) -> usize {
    let mut pos = START;
    let mut action = learner.seed_state(state_of(pos)).unwrap();
    for steps in 1..=MAX_EPISODE_STEPS {
        pos = apply(pos, action);
        let reward = if pos == GOAL { 1.0 } else { -1.0 };
        action = learner.step(state_of(pos), reward).unwrap();
        if pos == GOAL {
            return steps;
        }
    }
    MAX_EPISODE_STEPS
}

/// Follows the greedy policy from the start; returns the steps to the goal.
fn greedy_rollout<R: RandomSource>(learner: &QLearner<R>) -> Option<usize> {
    let mut pos = START;
    for steps in 1..=WIDTH * HEIGHT {
        pos = apply(pos, learner.greedy_action(state_of(pos)).unwrap());
        if pos == GOAL {
            return Some(steps);
        }
    }
    None
}

fn grid_config(planning_steps: usize) -> LearnerConfig {
    LearnerConfig::new(WIDTH * HEIGHT, 4)
        .with_alpha(0.2)
        .with_gamma(0.9)
        .with_exploration(0.5, 0.99)
        .with_planning_steps(planning_steps)
}

/// Test: Dyna-Q learns a path to the goal
#[test]
fn test_dyna_learns_grid_world() {
    let mut learner = QLearner::seeded(grid_config(20), 7).unwrap();
    for _ in 0..200 {
        run_episode(&mut learner);
    }

    let steps = greedy_rollout(&learner).expect("greedy policy should reach the goal");
    assert!(steps <= 12, "greedy path took {} steps", steps);
}

/// Test: Reporting after training leaves the learner untouched
#[test]
fn test_greedy_report_does_not_train() {
    let mut learner = QLearner::seeded(grid_config(10), 13).unwrap();
    let mut last_steps = 0;
    for _ in 0..100 {
        last_steps = run_episode(&mut learner);
    }
    assert!(last_steps > 0);

    let stats = learner.stats().clone();
    let table = learner.q_table().clone();
    let memory = learner.memory();
    let rate = learner.exploration_rate();

    let first = greedy_rollout(&learner);
    assert_eq!(greedy_rollout(&learner), first);
    let _ = learner.greedy_policy();

    assert_eq!(learner.stats(), &stats);
    assert_eq!(learner.q_table(), &table);
    assert_eq!(learner.memory(), memory);
    assert_eq!(learner.exploration_rate(), rate);
}

/// Test: Planning reduces the real experience needed early on
#[test]
fn test_planning_is_more_sample_efficient() {
    let mut plain_steps = 0;
    let mut dyna_steps = 0;

    for seed in 0..5 {
        let mut plain = QLearner::seeded(grid_config(0), seed).unwrap();
        let mut dyna = QLearner::seeded(grid_config(50), seed).unwrap();
        for _ in 0..15 {
            plain_steps += run_episode(&mut plain);
            dyna_steps += run_episode(&mut dyna);
        }
    }

    assert!(
        dyna_steps < plain_steps,
        "dyna took {} real steps, plain q-learning {}",
        dyna_steps,
        plain_steps
    );
}

/// Test: Plain Q-learning never touches the world model
#[test]
fn test_plain_q_learning_keeps_model_empty() {
    let mut learner = QLearner::seeded(grid_config(0), 3).unwrap();
    for _ in 0..20 {
        run_episode(&mut learner);
    }

    assert!(learner.world_model().is_empty());
    assert_eq!(learner.stats().planning_updates, 0);
    assert_eq!(
        learner.engine().total_updates(),
        learner.stats().real_updates
    );
}

/// Test: With planning, only observed pairs ever get a value
#[test]
fn test_planning_only_updates_observed_pairs() {
    let mut learner = QLearner::seeded(grid_config(30), 11).unwrap();
    for _ in 0..5 {
        run_episode(&mut learner);
    }

    let table = learner.q_table();
    for s in 0..table.num_states() {
        for a in 0..table.num_actions() {
            if table.get(s, a).unwrap() != 0.0 {
                assert!(
                    learner.world_model().count(StateActionPair::new(s, a)) > 0,
                    "pair ({}, {}) was updated without being observed",
                    s,
                    a
                );
            }
        }
    }

    let stats = learner.stats();
    assert_eq!(stats.planning_updates, 30 * stats.steps);
    assert_eq!(
        learner.engine().total_updates(),
        stats.real_updates + stats.planning_updates
    );
}

/// Test: Identical seeds give identical runs
#[test]
fn test_seeded_runs_are_reproducible() {
    let mut a = QLearner::seeded(grid_config(10), 123).unwrap();
    let mut b = QLearner::seeded(grid_config(10), 123).unwrap();

    for _ in 0..10 {
        assert_eq!(run_episode(&mut a), run_episode(&mut b));
    }
    assert_eq!(a.q_table(), b.q_table());
    assert_eq!(a.stats(), b.stats());
}

/// Test: Any rand generator can drive the learner
#[test]
fn test_custom_rng() {
    let rng = StdRng::seed_from_u64(9);
    let mut learner = QLearner::with_rng(grid_config(5), rng).unwrap();
    let steps = run_episode(&mut learner);
    assert!(steps >= 8);
}

/// Test: Full exploration picks actions uniformly
#[test]
fn test_full_exploration_is_uniform() {
    let config = LearnerConfig::new(3, 5).with_exploration(1.0, 1.0);
    let mut learner = QLearner::seeded(config, 2024).unwrap();

    let trials = 25_000;
    let mut counts = [0usize; 5];
    for _ in 0..trials {
        counts[learner.seed_state(1).unwrap()] += 1;
    }
    for count in counts {
        let freq = count as f64 / trials as f64;
        assert!((freq - 0.2).abs() < 0.02, "frequency {} not uniform", freq);
    }
}

/// Test: No exploration always follows the table
#[test]
fn test_zero_exploration_follows_table() {
    let mut learner = QLearner::seeded(grid_config(0).with_exploration(0.0, 0.99), 1).unwrap();
    run_episode(&mut learner);

    for s in 0..WIDTH * HEIGHT {
        let expected = learner.greedy_action(s).unwrap();
        assert_eq!(learner.seed_state(s).unwrap(), expected);
    }
}

/// Test: Exploration decays geometrically across episodes
#[test]
fn test_exploration_decays_per_step() {
    let mut learner = QLearner::seeded(grid_config(0), 5).unwrap();
    let mut total = 0;
    for _ in 0..3 {
        total += run_episode(&mut learner);
    }

    let expected = 0.5 * 0.99f64.powi(total as i32);
    assert!((learner.exploration_rate() - expected).abs() < 1e-9);
    assert_eq!(learner.stats().steps, total as u64);
}
