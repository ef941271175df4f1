use std::{error::Error, path::PathBuf, process::ExitCode};

use gridmdp_core::{
    ActionId, IterationSnapshot, PolicyIteration, Solution, SolverConfig, ValueIteration,
    max_abs_diff,
};
use gridmdp_world::{GridWorld, compile_yaml, reference_world, render_policy, render_values};
use log::{error, info};

const USAGE: &str = "usage: gridmdp [--grid PATH] [--config PATH] [--trace] [--json]";

#[derive(Debug, Default)]
struct Args {
    grid: Option<PathBuf>,
    config: Option<PathBuf>,
    trace: bool,
    json: bool,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = String>) -> Result<Self, String> {
        let mut args = Args::default();
        while let Some(arg) = raw.next() {
            match arg.as_str() {
                "--grid" => args.grid = Some(raw.next().ok_or("--grid needs a path")?.into()),
                "--config" => {
                    args.config = Some(raw.next().ok_or("--config needs a path")?.into())
                }
                "--trace" => args.trace = true,
                "--json" => args.json = true,
                other => return Err(format!("unknown argument '{other}'")),
            }
        }
        Ok(args)
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let world = match &args.grid {
        Some(path) => compile_yaml(path)?,
        None => reference_world()?,
    };
    let config = match &args.config {
        Some(path) => SolverConfig::from_yaml_path(path)?,
        None => SolverConfig::default(),
    };
    info!(
        "solving {}x{} grid with gamma={} epsilon={:e}",
        world.rows(),
        world.cols(),
        config.gamma,
        config.epsilon
    );

    println!("== Value Iteration ==");
    let vi = ValueIteration::new(config.clone())?.solve_with_hook(&world, None, |snapshot| {
        if args.trace {
            print_snapshot(&world, snapshot);
        }
    })?;
    print_solution(&world, &vi);

    println!("\n== Policy Iteration ==");
    let pi_engine = PolicyIteration::new(config)?;
    let seed = pi_engine.initial_policy(&world, None)?;
    let pi = pi_engine.solve_with_hook(&world, seed, None, |snapshot| {
        if args.trace {
            print_snapshot(&world, snapshot);
        }
    })?;
    print_solution(&world, &pi);

    let differing = vi
        .policy()
        .actions()
        .iter()
        .zip(pi.policy().actions())
        .filter(|(a, b)| a != b)
        .count();
    println!(
        "\nmax |U_vi - U_pi| = {:.3e}, states with different actions: {differing}",
        max_abs_diff(vi.values(), pi.values())
    );

    if args.json {
        println!("{}", vi.to_json()?);
        println!("{}", pi.to_json()?);
    }
    Ok(())
}

fn print_snapshot(world: &GridWorld, snapshot: &IterationSnapshot) {
    let actions: Vec<Option<ActionId>> = snapshot
        .policy
        .iter()
        .map(|action| action.map(ActionId::from))
        .collect();
    println!(
        "\nIteration {} (delta {:.3e}, {} policy changes):",
        snapshot.iteration, snapshot.delta, snapshot.policy_changes
    );
    print!("{}", render_policy(world, &actions));
    print!("{}", render_values(world, &snapshot.values));
}

fn print_solution(world: &GridWorld, solution: &Solution) {
    println!(
        "converged after {} iterations ({} sweeps)",
        solution.iterations(),
        solution.sweeps()
    );
    println!("\nOptimal Policy:");
    print!("{}", render_policy(world, solution.policy().actions()));
    println!("\nState-Value Function:");
    print!("{}", render_values(world, solution.values()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        Args::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn flags_and_paths_parse() {
        let args = parse(&["--grid", "g.yaml", "--trace", "--config", "c.yaml"]).expect("valid");
        assert_eq!(args.grid, Some(PathBuf::from("g.yaml")));
        assert_eq!(args.config, Some(PathBuf::from("c.yaml")));
        assert!(args.trace);
        assert!(!args.json);
    }

    #[test]
    fn missing_path_and_unknown_flag_fail() {
        assert!(parse(&["--grid"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
    }

    #[test]
    fn reference_run_succeeds() {
        run(&Args::default()).expect("reference grid solves");
    }
}
