//! Parameter sweep driver for the MapReduce KNN job.
//!
//! Every combination of dataset, HDFS block size and reducer count is submitted to the cluster
//! with `hadoop jar`, one job at a time. Timings and job counters of each run are collected into a
//! [ResultSet](report::ResultSet) which is saved as JSON and CSV.

pub mod command;
pub mod config;
pub mod dfs;
pub mod error;
pub mod experiment;
pub mod job;
pub mod report;
pub mod run_stats;
