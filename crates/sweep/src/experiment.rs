//! Sweep over all combinations of datasets, block sizes and reducer counts.

use std::time::Instant;

use itertools::Itertools;

use crate::{
    command::CommandRunner,
    config::SweepConfig,
    error::SweepError,
    job::{Clock, JobSpec, KnnJob},
    report::{format_time, ResultRecord, ResultSet},
};

/// One combination of sweep parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfigurationPoint {
    pub data_file: String,
    /// Dataset size in bytes, 0 if unknown.
    pub file_size: u64,
    pub block_size: String,
    pub num_reducers: u32,
    pub mapper_hint: u32,
}

pub struct Experiment<R: CommandRunner, C: Clock> {
    config: SweepConfig,
    runner: R,
    clock: C,
}

impl<R: CommandRunner, C: Clock> Experiment<R, C> {
    pub fn new(config: SweepConfig, runner: R, clock: C) -> Self {
        Self { config, runner, clock }
    }

    /// All configuration points: dataset outermost, then block size, then reducer count.
    pub fn points(&self) -> Vec<ConfigurationPoint> {
        self.config
            .datasets
            .iter()
            .cartesian_product(self.config.block_sizes.iter().enumerate())
            .cartesian_product(self.config.reducers.iter())
            .map(|((data_file, (block_index, block_size)), num_reducers)| ConfigurationPoint {
                data_file: data_file.clone(),
                file_size: self.config.dataset_size(data_file),
                block_size: block_size.clone(),
                num_reducers: *num_reducers,
                mapper_hint: SweepConfig::mapper_hint(block_index),
            })
            .collect()
    }

    /// Runs every configuration point one after another.
    ///
    /// Failed jobs are recorded and the sweep goes on. Only a command which can't be launched stops it.
    pub fn run(mut self) -> Result<ResultSet, SweepError> {
        let points = self.points();
        let total_runs = points.len();
        self.print_banner(total_runs);

        let job = KnnJob::new(&self.config.paths);
        let start_time = Instant::now();
        let mut records = Vec::with_capacity(total_runs);
        for (i, point) in points.into_iter().enumerate() {
            println!(
                "\n[{}/{}] Data: {}, Block: {}, Reducers: {}",
                i + 1,
                total_runs,
                point.data_file,
                point.block_size,
                point.num_reducers
            );
            let spec = JobSpec {
                input_path: self.config.paths.input_path(&point.block_size, &point.data_file),
                output_path: self
                    .config
                    .paths
                    .output_path(&point.data_file, &point.block_size, point.num_reducers),
                num_reducers: point.num_reducers,
                mapper_hint: point.mapper_hint,
            };
            println!("  Running: hadoop jar ... {} reducers={}", point.data_file, point.num_reducers);

            let outcome = job.run(&spec, &mut self.runner, &self.clock)?;
            println!(
                "  {} Time: {}, Mappers: {}, Result: {}",
                if outcome.success { "✓" } else { "✗" },
                format_time(outcome.execution_time),
                outcome.counters.map_tasks,
                outcome.result.as_deref().unwrap_or("None")
            );
            records.push(ResultRecord::new(&point, outcome));
        }

        println!("\nFinished {} runs in {:.2?}", total_runs, start_time.elapsed());
        Ok(ResultSet::new(records))
    }

    fn print_banner(&self, total_runs: usize) {
        let rule = "=".repeat(80);
        println!("{}", rule);
        println!("KNN MapReduce Performance Testing");
        println!("{}", rule);
        println!("Total tests to run: {}", total_runs);
        println!("Data files: {:?}", self.config.datasets);
        println!("Block sizes: {:?}", self.config.block_sizes);
        println!("Reducers: {:?}", self.config.reducers);
        println!("{}", rule);
    }
}
