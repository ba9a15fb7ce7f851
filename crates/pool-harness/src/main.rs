//! A menu-driven CLI harness exercising the scenarios in [`scenarios`].
//!
//! Invoked with a single integer argument selecting one of the 21 named
//! scenarios (1-indexed), or `0` to run all of them.
mod scenarios;

use clap::Parser;
use colored::Colorize;

/// Scenario-driven test harness for the fixed-pool allocator and its
/// demonstration list.
#[derive(Parser)]
#[command(name = "pool-harness", version)]
struct Args {
    /// Scenario number to run (1-21), or 0 to run every scenario.
    scenario: u32,
}

fn main() {
    env_logger::init();

    println!("pool-harness {}", env!("CARGO_PKG_VERSION"));
    println!("git commit: {}", env!("POOL_ALLOC_GIT_HASH"));

    let args = Args::parse();

    if args.scenario as usize > scenarios::SCENARIOS.len() {
        eprintln!(
            "scenario must be between 0 and {} (got {})",
            scenarios::SCENARIOS.len(),
            args.scenario
        );
        std::process::exit(1);
    }

    let to_run: Vec<usize> = if args.scenario == 0 {
        (0..scenarios::SCENARIOS.len()).collect()
    } else {
        vec![args.scenario as usize - 1]
    };

    let mut failures = 0;
    for idx in to_run {
        let scenario = &scenarios::SCENARIOS[idx];
        print!("{}", format!("  Testing {} ---> ", scenario.name).yellow());
        match (scenario.run)() {
            Ok(()) => println!("{}", "[PASS]".green()),
            Err(msg) => {
                println!("{}", "[FAIL]".red());
                eprintln!("    {msg}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        eprintln!("{failures} scenario(s) failed");
        std::process::exit(1);
    }
}
