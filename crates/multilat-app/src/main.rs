//! multilat: run a multilateration scenario and log its state.
//!
//! Usage:
//!   multilat [--config scenario.json] [--seed N] [--duration SECS] [--log-level LEVEL]

use std::process;

use multilat_app::config::{CliArgs, ScenarioConfig};
use multilat_app::error::AppResult;
use multilat_app::game_loop::{self, LoopSettings};
use multilat_app::logging::init_logging;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let cli = match CliArgs::parse(&args) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}");
            print_usage();
            process::exit(1);
        }
    };
    if cli.help {
        print_usage();
        return;
    }

    let scenario = match cli.scenario() {
        Ok(scenario) => scenario,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    init_logging(scenario.log_level);

    if let Err(e) = run(&scenario) {
        tracing::error!(error = %e, "simulation failed");
        process::exit(1);
    }
}

fn run(scenario: &ScenarioConfig) -> AppResult<()> {
    let engine = scenario.build_engine()?;
    let max_ticks = (scenario.duration_secs > 0.0)
        .then(|| (scenario.duration_secs / engine.tick_duration()).ceil() as u64);
    let settings = LoopSettings {
        report_every_ticks: scenario.report_every_ticks(),
        max_ticks,
    };

    let handle = game_loop::spawn_sim_loop(engine, settings)?;
    let engine = handle.join()?;

    let snapshot = engine.snapshot();
    game_loop::report_state(&snapshot);
    tracing::info!(
        elapsed_secs = engine.current_time(),
        ticks = engine.time().tick,
        "simulation finished"
    );
    Ok(())
}

fn print_usage() {
    eprintln!(
        "multilat: N-dimensional multilateration simulator\n\
         \n\
         Options:\n\
         \n\
           --config <path>      Scenario JSON file (optional, defaults otherwise)\n\
           --seed <N>           RNG seed override\n\
           --duration <secs>    Simulated run length; 0 runs until interrupted\n\
           --log-level <level>  trace | debug | info | warn | error (RUST_LOG wins)\n\
         \n\
         Example:\n\
         \n\
           multilat --config demos/scenario_3d.json --duration 10\n"
    );
}
