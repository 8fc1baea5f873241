//! Thin wrapper around the `hdfs dfs` command line.

use log::debug;

use crate::{command::CommandRunner, error::SweepError};

/// Name of the file written by the first reducer.
pub const FIRST_PARTITION: &str = "part-r-00000";

pub struct DfsClient<'a, R: CommandRunner> {
    runner: &'a mut R,
}

impl<'a, R: CommandRunner> DfsClient<'a, R> {
    pub fn new(runner: &'a mut R) -> Self {
        Self { runner }
    }

    /// Removes `path` with everything inside. Missing paths and failures are ignored.
    pub fn remove_recursive(&mut self, path: &str) -> Result<(), SweepError> {
        let output = self.runner.run(&format!("hdfs dfs -rm -r -f {} 2>/dev/null", path))?;
        if !output.success() {
            debug!("removing {} exited with code {}, ignoring", path, output.exit_code);
        }
        Ok(())
    }

    /// Returns trimmed content of a file. Exit code of the read is not checked.
    pub fn cat(&mut self, path: &str) -> Result<String, SweepError> {
        let output = self.runner.run(&format!("hdfs dfs -cat {} 2>/dev/null", path))?;
        Ok(output.stdout.trim().to_string())
    }
}
