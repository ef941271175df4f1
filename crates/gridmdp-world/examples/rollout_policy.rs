use std::path::PathBuf;

use gridmdp_core::{SolverConfig, ValueIteration};
use gridmdp_world::{GridSimulator, compile_yaml};

fn main() {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("crates/gridmdp-world/config/reference.grid.yaml"));

    let world = compile_yaml(&path).expect("failed to compile grid YAML");
    let config = SolverConfig::default();
    let solution = ValueIteration::new(config.clone())
        .expect("default config is valid")
        .solve(&world)
        .expect("value iteration failed");

    let mut simulator = GridSimulator::new(world, 12345);
    let episodes = 1_000;
    let mut total = 0.0;
    let mut finished = 0;
    for _ in 0..episodes {
        let episode = simulator
            .rollout(solution.policy(), config.gamma, 200)
            .expect("grid has no start cell");
        total += episode.discounted_return;
        if episode.reached_terminal {
            finished += 1;
        }
    }

    println!("episodes={episodes} reached_terminal={finished}");
    println!("average_discounted_return={:.6}", total / episodes as f64);
}
