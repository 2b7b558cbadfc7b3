//! Grid World Demonstration
//!
//! Trains a plain Q-learner and a Dyna-Q learner on the same maze and
//! compares how much real experience each needs.
//!
//! Run with: RUST_LOG=info cargo run --example grid_world

use dyna_q::{LearnerConfig, QLearner, RandomSource, StateId};

/// `#` is a wall, `S` the start, `G` the goal.
const MAZE: [&str; 6] = [
    "S..#....",
    ".#.#.##.",
    ".#...#..",
    ".####.#.",
    "......#G",
    ".##.....",
];

const EPISODES: usize = 60;
const MAX_EPISODE_STEPS: usize = 2_000;

struct Maze {
    cells: Vec<Vec<u8>>,
    start: (usize, usize),
    goal: (usize, usize),
}

impl Maze {
    fn parse(rows: &[&str]) -> Self {
        let cells: Vec<Vec<u8>> = rows.iter().map(|r| r.bytes().collect()).collect();
        let find = |c: u8| {
            cells
                .iter()
                .enumerate()
                .find_map(|(y, row)| row.iter().position(|&b| b == c).map(|x| (x, y)))
                .unwrap_or((0, 0))
        };
        let start = find(b'S');
        let goal = find(b'G');
        Self { cells, start, goal }
    }

    fn width(&self) -> usize {
        self.cells[0].len()
    }

    fn height(&self) -> usize {
        self.cells.len()
    }

    fn num_states(&self) -> usize {
        self.width() * self.height()
    }

    fn state(&self, (x, y): (usize, usize)) -> StateId {
        y * self.width() + x
    }

    /// 0=north 1=east 2=south 3=west. Walls and edges leave the robot in place.
    fn apply(&self, (x, y): (usize, usize), action: usize) -> ((usize, usize), f64) {
        let target = match action {
            0 if y > 0 => (x, y - 1),
            1 if x + 1 < self.width() => (x + 1, y),
            2 if y + 1 < self.height() => (x, y + 1),
            3 if x > 0 => (x - 1, y),
            _ => (x, y),
        };
        if self.cells[target.1][target.0] == b'#' {
            ((x, y), -1.0)
        } else if target == self.goal {
            (target, 1.0)
        } else {
            (target, -1.0)
        }
    }
}

fn run_episode<R: RandomSource>(maze: &Maze, learner: &mut QLearner<R>) -> dyna_q::Result<usize> {
    let mut pos = maze.start;
    let mut action = learner.seed_state(maze.state(pos))?;
    for steps in 1..=MAX_EPISODE_STEPS {
        let (next, reward) = maze.apply(pos, action);
        pos = next;
        action = learner.step(maze.state(pos), reward)?;
        if pos == maze.goal {
            return Ok(steps);
        }
    }
    Ok(MAX_EPISODE_STEPS)
}

/// Follows the greedy policy from the start without learning. Returns `None`
/// if the goal is not reached within one visit per cell.
fn greedy_path_len<R: RandomSource>(
    maze: &Maze,
    learner: &QLearner<R>,
) -> dyna_q::Result<Option<usize>> {
    let mut pos = maze.start;
    for steps in 1..=maze.num_states() {
        let action = learner.greedy_action(maze.state(pos))?;
        pos = maze.apply(pos, action).0;
        if pos == maze.goal {
            return Ok(Some(steps));
        }
    }
    Ok(None)
}

fn train(maze: &Maze, planning_steps: usize) -> dyna_q::Result<()> {
    let config = LearnerConfig::new(maze.num_states(), 4)
        .with_alpha(0.2)
        .with_gamma(0.9)
        .with_exploration(0.5, 0.99)
        .with_planning_steps(planning_steps);
    let mut learner = QLearner::seeded(config, 42)?;

    let mut total_steps = 0;
    let mut last_steps = 0;
    for episode in 0..EPISODES {
        let steps = run_episode(maze, &mut learner)?;
        total_steps += steps;
        last_steps = steps;
        if episode % 10 == 0 || episode + 1 == EPISODES {
            log::info!(
                "planning={} episode={} steps={} epsilon={:.4}",
                planning_steps,
                episode,
                steps,
                learner.exploration_rate()
            );
        }
    }

    println!(
        "planning {:>3}: {:>6} real steps, {:>8} planned updates, last episode {} steps",
        planning_steps,
        total_steps,
        learner.stats().planning_updates,
        last_steps
    );
    match greedy_path_len(maze, &learner)? {
        Some(steps) => println!("  greedy path reaches the goal in {} steps", steps),
        None => println!("  greedy path does not reach the goal"),
    }

    println!("  greedy policy:");
    let arrows = ['^', '>', 'v', '<'];
    let policy = learner.greedy_policy();
    for y in 0..maze.height() {
        let row: String = (0..maze.width())
            .map(|x| match maze.cells[y][x] {
                b'#' => '#',
                b'G' => 'G',
                _ => arrows[policy[maze.state((x, y))]],
            })
            .collect();
        println!("    {}", row);
    }
    Ok(())
}

fn main() -> dyna_q::Result<()> {
    env_logger::init();

    println!("=== Dyna-Q Grid World Demo ===\n");
    let maze = Maze::parse(&MAZE);

    for planning_steps in [0, 10, 100] {
        train(&maze, planning_steps)?;
        println!();
    }

    println!("=== Demo Complete ===");
    Ok(())
}
