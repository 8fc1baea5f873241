//! Result records and their persistence.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{config::record_count, error::SweepError, experiment::ConfigurationPoint, job::RunOutcome};

const BYTES_IN_MB: f64 = 1024.0 * 1024.0;

/// Flat outcome of one configuration point. Field order defines the JSON key order and the CSV header.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub data_file: String,
    /// Record count taken from the dataset name.
    pub records: u64,
    pub file_size: u64,
    pub file_size_str: String,
    pub block_size: String,
    pub num_reducers: u32,
    /// Observed number of launched map tasks.
    pub num_mappers: u64,
    /// Requested mapper parallelism.
    pub target_mappers: u32,
    /// Seconds, rounded to 2 digits.
    pub execution_time: f64,
    pub execution_time_str: String,
    pub success: bool,
    pub result: Option<String>,
    pub bytes_read: u64,
    pub bytes_written: u64,
    /// Observed number of launched reduce tasks.
    pub reduce_tasks: u64,
    pub throughput_records_per_sec: f64,
    pub throughput_mb_per_sec: f64,
}

impl ResultRecord {
    pub fn new(point: &ConfigurationPoint, outcome: RunOutcome) -> Self {
        let records = record_count(&point.data_file);
        let time = outcome.execution_time;
        Self {
            data_file: point.data_file.clone(),
            records,
            file_size: point.file_size,
            file_size_str: format_size(point.file_size),
            block_size: point.block_size.clone(),
            num_reducers: point.num_reducers,
            num_mappers: outcome.counters.map_tasks,
            target_mappers: point.mapper_hint,
            execution_time: round_to(time, 2),
            execution_time_str: format_time(time),
            success: outcome.success,
            result: outcome.result,
            bytes_read: outcome.counters.bytes_read,
            bytes_written: outcome.counters.bytes_written,
            reduce_tasks: outcome.counters.reduce_tasks,
            throughput_records_per_sec: round_to(throughput(records as f64, time), 2),
            throughput_mb_per_sec: round_to(throughput(point.file_size as f64 / BYTES_IN_MB, time), 4),
        }
    }
}

/// `amount / seconds`, or 0 when no positive time was measured.
pub fn throughput(amount: f64, seconds: f64) -> f64 {
    if seconds > 0.0 {
        amount / seconds
    } else {
        0.0
    }
}

fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

/// Formats seconds as `12.34s` or `2m 5.00s`.
pub fn format_time(seconds: f64) -> String {
    if seconds < 60.0 {
        format!("{:.2}s", seconds)
    } else {
        let mins = (seconds / 60.0).floor();
        format!("{}m {:.2}s", mins as u64, seconds - mins * 60.0)
    }
}

/// Formats a byte count as `B`, `KB` or `MB`.
pub fn format_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{}B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2}KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.2}MB", bytes as f64 / BYTES_IN_MB)
    }
}

/// All records of one sweep, in sweep order.
pub struct ResultSet {
    pub generated_at: DateTime<Local>,
    pub records: Vec<ResultRecord>,
}

impl ResultSet {
    pub fn new(records: Vec<ResultRecord>) -> Self {
        Self {
            generated_at: Local::now(),
            records,
        }
    }

    /// Sortable timestamp used in file names, e.g. `20240131_235959`.
    pub fn stamp(&self) -> String {
        self.generated_at.format("%Y%m%d_%H%M%S").to_string()
    }

    /// Writes JSON and CSV files twice: with the timestamp in their name and as `latest`.
    ///
    /// Returns the written paths.
    pub fn save<P: AsRef<Path>>(&self, dir: P) -> Result<Vec<PathBuf>, SweepError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let mut written = Vec::new();
        for suffix in [self.stamp(), "latest".to_string()] {
            let json_path = dir.join(format!("knn_results_{}.json", suffix));
            self.write_json(&json_path)?;
            info!("results saved to {}", json_path.display());
            written.push(json_path);

            let csv_path = dir.join(format!("knn_results_{}.csv", suffix));
            self.write_csv(&csv_path)?;
            info!("results saved to {}", csv_path.display());
            written.push(csv_path);
        }
        Ok(written)
    }

    pub fn write_json(&self, path: &Path) -> Result<(), SweepError> {
        File::create(path)?.write_all(serde_json::to_string_pretty(&self.records)?.as_bytes())?;
        Ok(())
    }

    /// Header comes from the record fields. An empty set gives an empty file.
    pub fn write_csv(&self, path: &Path) -> Result<(), SweepError> {
        let mut writer = csv::Writer::from_path(path)?;
        for record in &self.records {
            writer.serialize(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Human-readable table with one line per run.
    pub fn summary_table(&self) -> String {
        let width = self
            .records
            .iter()
            .map(|r| r.data_file.len())
            .chain(std::iter::once("data file".len()))
            .max()
            .unwrap_or_default();
        let mut table = String::new();
        table.push_str(&format!(
            "| {: <width$} | block | reducers | mappers |       time | status | records/s |     MB/s |\n",
            "data file",
            width = width
        ));
        table.push_str(&format!(
            "|-{:-<width$}-|-------|----------|---------|------------|--------|-----------|----------|\n",
            "",
            width = width
        ));
        for r in &self.records {
            table.push_str(&format!(
                "| {: <width$} | {: >5} | {: >8} | {: >7} | {: >10} | {: >6} | {: >9.2} | {: >8.4} |\n",
                r.data_file,
                r.block_size,
                r.num_reducers,
                r.num_mappers,
                r.execution_time_str,
                if r.success { "ok" } else { "failed" },
                r.throughput_records_per_sec,
                r.throughput_mb_per_sec,
                width = width
            ));
        }
        table
    }
}
