//! Running a single KNN job on the cluster.

use std::time::Instant;

use log::{info, warn};

use crate::{
    command::CommandRunner,
    config::ClusterPaths,
    dfs::{DfsClient, FIRST_PARTITION},
    error::SweepError,
    run_stats::JobCounters,
};

/// Maximum input split size forced when more than one mapper is wanted.
pub const MAX_SPLIT_SIZE: u64 = 1024 * 1024;

/// Source of wall-clock time for measuring jobs.
pub trait Clock {
    /// Seconds elapsed since some fixed moment.
    fn now(&self) -> f64;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Parameters of one job submission.
#[derive(Clone, Debug)]
pub struct JobSpec {
    pub input_path: String,
    pub output_path: String,
    pub num_reducers: u32,
    /// Desired number of mappers. Only a hint, Hadoop decides the actual number.
    pub mapper_hint: u32,
}

/// What happened to one job submission.
#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    /// Seconds spent in `hadoop jar`.
    pub execution_time: f64,
    pub success: bool,
    /// Content of the first output partition, `None` if the job failed.
    pub result: Option<String>,
    pub counters: JobCounters,
}

/// Submits the KNN job described by [ClusterPaths].
pub struct KnnJob<'a> {
    paths: &'a ClusterPaths,
}

impl<'a> KnnJob<'a> {
    pub fn new(paths: &'a ClusterPaths) -> Self {
        Self { paths }
    }

    /// Builds the `hadoop jar` command line for `spec`.
    pub fn command(&self, spec: &JobSpec) -> String {
        let mut parts = vec!["hadoop".to_string(), "jar".to_string()];
        if spec.mapper_hint > 1 {
            // Smaller splits make Hadoop launch more map tasks.
            parts.push(format!("-D mapreduce.input.fileinputformat.split.maxsize={}", MAX_SPLIT_SIZE));
        }
        parts.extend([
            self.paths.knn_jar.clone(),
            self.paths.main_class.clone(),
            spec.input_path.clone(),
            spec.output_path.clone(),
            self.paths.params_path(),
            spec.num_reducers.to_string(),
        ]);
        parts.join(" ")
    }

    /// Runs the job and collects its outcome.
    ///
    /// Only a command which can't be launched gives `Err`. A failed job is a normal outcome.
    pub fn run<R: CommandRunner, C: Clock>(
        &self,
        spec: &JobSpec,
        runner: &mut R,
        clock: &C,
    ) -> Result<RunOutcome, SweepError> {
        DfsClient::new(runner).remove_recursive(&spec.output_path)?;

        let command = self.command(spec);
        info!("submitting `{}`", command);

        let start = clock.now();
        let output = runner.run(&command)?;
        let execution_time = clock.now() - start;

        let success = output.success();
        let result = if success {
            let partition = format!("{}/{}", spec.output_path, FIRST_PARTITION);
            Some(DfsClient::new(runner).cat(&partition)?)
        } else {
            warn!("job for {} failed with exit code {}", spec.input_path, output.exit_code);
            None
        };

        Ok(RunOutcome {
            execution_time,
            success,
            result,
            counters: JobCounters::parse(&output.stderr),
        })
    }
}
