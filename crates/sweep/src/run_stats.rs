//! Counters reported by a finished Hadoop job.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Job counters scraped from the job client output.
///
/// Every field is always present. Counters missing from the output are 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobCounters {
    /// `Launched map tasks`.
    pub map_tasks: u64,
    /// `Launched reduce tasks`.
    pub reduce_tasks: u64,
    /// `Bytes Read` of the input format.
    pub bytes_read: u64,
    /// `Bytes Written` of the output format.
    pub bytes_written: u64,
}

impl JobCounters {
    /// Extracts counters from the diagnostic output of `hadoop jar`. Never fails.
    ///
    /// The first occurrence of each counter wins.
    pub fn parse(text: &str) -> Self {
        let mut counters = Self::default();
        let mut seen = [false; 4];
        for caps in counter_regex().captures_iter(text) {
            let (index, field) = match &caps[1] {
                "Launched map tasks" => (0, &mut counters.map_tasks),
                "Launched reduce tasks" => (1, &mut counters.reduce_tasks),
                "Bytes Read" => (2, &mut counters.bytes_read),
                _ => (3, &mut counters.bytes_written),
            };
            if !seen[index] {
                seen[index] = true;
                *field = caps[2].parse().unwrap_or(0);
            }
        }
        counters
    }
}

fn counter_regex() -> &'static Regex {
    static COUNTER: OnceLock<Regex> = OnceLock::new();
    COUNTER.get_or_init(|| {
        Regex::new(r"(Launched map tasks|Launched reduce tasks|Bytes Read|Bytes Written)=(\d+)")
            .expect("counter pattern is valid")
    })
}
