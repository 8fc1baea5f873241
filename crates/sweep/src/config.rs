//! Sweep dimensions, dataset catalog and cluster paths.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::SweepError;

/// Locations of the job artifact, its HDFS working area and the local results folder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterPaths {
    /// Packaged KNN job passed to `hadoop jar`.
    pub knn_jar: String,
    /// Main class inside [knn_jar](ClusterPaths::knn_jar).
    pub main_class: String,
    /// HDFS folder holding inputs, outputs and job parameters.
    pub hdfs_base: String,
    /// Local folder for result files.
    pub results_dir: PathBuf,
}

impl Default for ClusterPaths {
    fn default() -> Self {
        Self {
            knn_jar: "/home/hadoop/homework/mapreduce-knn/knn.jar".to_string(),
            main_class: "KnnPattern".to_string(),
            hdfs_base: "/knn/performance_test".to_string(),
            results_dir: PathBuf::from("/home/hadoop/homework/mapreduce-knn/results"),
        }
    }
}

impl ClusterPaths {
    /// File with the query point and `k`, shared by every run.
    pub fn params_path(&self) -> String {
        format!("{}/knnParams.txt", self.hdfs_base)
    }

    /// Copy of `data_file` uploaded with the given block size.
    pub fn input_path(&self, block_size: &str, data_file: &str) -> String {
        format!("{}/data_{}/{}", self.hdfs_base, block_size, data_file)
    }

    pub fn output_path(&self, data_file: &str, block_size: &str, num_reducers: u32) -> String {
        format!("{}/output/{}_{}_r{}", self.hdfs_base, data_file, block_size, num_reducers)
    }
}

/// Full description of one sweep. Built once at startup and only read afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Dataset file names, `knn_<features>_<records>.csv`.
    pub datasets: Vec<String>,
    /// HDFS block size labels. Order matters, see [SweepConfig::mapper_hint].
    pub block_sizes: Vec<String>,
    pub reducers: Vec<u32>,
    /// Known dataset sizes in bytes.
    pub dataset_sizes: BTreeMap<String, u64>,
    pub paths: ClusterPaths,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            datasets: ["knn_6_1000.csv", "knn_6_10000.csv", "knn_6_50000.csv", "knn_6_100000.csv"]
                .into_iter()
                .map(String::from)
                .collect(),
            block_sizes: ["64MB", "128MB", "256MB"].into_iter().map(String::from).collect(),
            reducers: vec![2, 4, 8],
            // 10000 and 50000 share a size on purpose: these are the measured values.
            dataset_sizes: [
                ("knn_6_1000.csv", 119432),
                ("knn_6_10000.csv", 1193107),
                ("knn_6_50000.csv", 1193107),
                ("knn_6_100000.csv", 11915930),
            ]
            .into_iter()
            .map(|(name, size)| (name.to_string(), size))
            .collect(),
            paths: ClusterPaths::default(),
        }
    }
}

impl SweepConfig {
    /// Reads config from a YAML file. Omitted fields keep their default values.
    pub fn from_yaml<P: AsRef<Path>>(file: P) -> Result<Self, SweepError> {
        let content = std::fs::read_to_string(file)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Total number of configuration points.
    pub fn total_runs(&self) -> usize {
        self.datasets.len() * self.block_sizes.len() * self.reducers.len()
    }

    /// Mapper parallelism hint for a block size at position `block_index` in [SweepConfig::block_sizes].
    pub fn mapper_hint(block_index: usize) -> u32 {
        block_index as u32 + 2
    }

    /// Size of a dataset in bytes, 0 if it is not in [SweepConfig::dataset_sizes].
    pub fn dataset_size(&self, data_file: &str) -> u64 {
        match self.dataset_sizes.get(data_file) {
            Some(size) => *size,
            None => {
                warn!("no known size for dataset {}, assuming 0", data_file);
                0
            }
        }
    }
}

/// Number of records encoded in a dataset name: `knn_6_1000.csv` has 1000 records.
///
/// Names which don't follow the convention give 0.
pub fn record_count(data_file: &str) -> u64 {
    let count = data_file
        .split('_')
        .nth(2)
        .map(|field| field.trim_end_matches(".csv"))
        .and_then(|field| field.parse().ok());
    match count {
        Some(count) => count,
        None => {
            warn!("can't read record count from dataset name {}, assuming 0", data_file);
            0
        }
    }
}
