//! Serializable report of a staff retrieval pass.

use crate::cluster::{ClusterId, LineCluster};
use crate::filaments::FilamentStore;
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Wall time of one retrieval stage: `seed` (cluster construction from
/// every unclustered filament), `filter` (discarding undersized clusters) or
/// `trim` (trimming survivors and ordering staves).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Stage timings of a retrieval pass, in execution order. `total_ms` is the
/// sum of the stages and excludes report building.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Record a finished stage and add it to the total.
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.total_ms += elapsed_ms;
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Snapshot of one cluster, lines listed from top to bottom.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSummary {
    pub key: ClusterId,
    pub id: u32,
    pub interline: i32,
    pub positions: Vec<i32>,
    /// Filament ids per line.
    pub lines: Vec<Vec<u32>>,
    pub true_length: i32,
    pub bounds: Option<Rect>,
    pub vip: bool,
    /// `points_at` samples, when a probe abscissa was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub samples: Option<Vec<Option<Point>>>,
}

impl ClusterSummary {
    pub fn from_cluster(cluster: &LineCluster, store: &FilamentStore) -> Self {
        Self {
            key: cluster.key(),
            id: cluster.id(),
            interline: cluster.interline(),
            positions: cluster.positions(),
            lines: cluster
                .lines()
                .map(|l| l.members().iter().map(|f| f.0).collect())
                .collect(),
            true_length: cluster.true_length(store),
            bounds: cluster.bounds(store),
            vip: cluster.is_vip(),
            samples: None,
        }
    }
}

/// Outcome counters and per-staff summaries of a retrieval pass.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusteringReport {
    pub filaments: usize,
    pub combs: usize,
    pub clusters_created: usize,
    pub clusters_merged: usize,
    pub clusters_discarded: usize,
    pub timing: TimingBreakdown,
    pub staves: Vec<ClusterSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_timings_accumulate_into_total() {
        let mut timing = TimingBreakdown::default();
        timing.push("seed", 1.5);
        timing.push("filter", 0.25);
        timing.push("trim", 0.25);
        assert!((timing.total_ms - 2.0).abs() < 1e-9);
        let labels: Vec<&str> = timing.stages.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["seed", "filter", "trim"]);

        let json = serde_json::to_value(&timing).expect("timing serializes");
        assert_eq!(json["stages"][0]["elapsedMs"], 1.5);
        assert_eq!(json["totalMs"], 2.0);
    }
}
