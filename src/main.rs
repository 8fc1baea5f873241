use std::{io::Write, process::ExitCode};

use env_logger::Builder;
use log::{error, info};

use knn_sweep::{
    command::ShellCommandRunner,
    config::SweepConfig,
    error::SweepError,
    experiment::Experiment,
    job::SystemClock,
};

/// Optional YAML file overriding the built-in sweep.
const CONFIG_ENV: &str = "KNN_SWEEP_CONFIG";

fn load_config() -> Result<SweepConfig, SweepError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            info!("loading sweep config from {}", path.to_string_lossy());
            SweepConfig::from_yaml(path)
        }
        None => Ok(SweepConfig::default()),
    }
}

fn run() -> Result<(), SweepError> {
    let config = load_config()?;
    let results_dir = config.paths.results_dir.clone();

    let result_set = Experiment::new(config, ShellCommandRunner::new(), SystemClock::new()).run()?;
    let written = result_set.save(&results_dir)?;
    for path in &written {
        println!("✓ Results saved to: {}", path.display());
    }

    println!("\n{}", result_set.summary_table());
    println!("{}", "=".repeat(80));
    println!("Testing complete!");
    println!("{}", "=".repeat(80));
    Ok(())
}

fn main() -> ExitCode {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
