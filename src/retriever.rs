//! Staff retrieval pass over the filaments of one sheet.
//!
//! 1) Seed a cluster from every root filament that carries combs and is not
//!    clustered yet; growth and merges happen inside [`ClusterForest`].
//! 2) Keep the live clusters; destroy those with fewer than `min_lines`.
//! 3) Trim survivors to `line_count` lines, numbered from zero.
//! 4) Order staves longest first.
//!
//! Sheets are independent, so [`ClustersRetriever::retrieve_batch`] may run
//! them concurrently (feature `parallel`).

use crate::cluster::{ClusterForest, ClusterId, LineCluster};
use crate::config::ClusteringParams;
use crate::diagnostics::{ClusterSummary, ClusteringReport};
use crate::filaments::{FilamentId, FilamentStore};
use crate::scale::Scale;
use log::debug;
use std::time::Instant;

/// Result of one retrieval pass.
///
/// `forest` keeps every cluster built during the pass. Clusters discarded for
/// having too few lines stay in it as roots with their filaments released,
/// so `forest.roots()` is not the list of staves: use `staves`.
#[derive(Clone, Debug)]
pub struct Retrieval {
    pub forest: ClusterForest,
    /// Retained staves, longest first.
    pub staves: Vec<ClusterId>,
    pub report: ClusteringReport,
}

impl Retrieval {
    pub fn staff(&self, rank: usize) -> Option<&LineCluster> {
        self.staves.get(rank).map(|&id| self.forest.get(id))
    }
}

/// Builds, filters and trims line clusters for a sheet.
#[derive(Clone, Debug, Default)]
pub struct ClustersRetriever {
    pub params: ClusteringParams,
}

impl ClustersRetriever {
    pub fn new(params: ClusteringParams) -> Self {
        Self { params }
    }

    pub fn retrieve(&self, store: &mut FilamentStore, scale: &Scale) -> Retrieval {
        let mut report = ClusteringReport {
            filaments: store.len(),
            combs: store.combs().count(),
            ..Default::default()
        };
        let mut forest = ClusterForest::new();

        let t0 = Instant::now();
        let seeds: Vec<FilamentId> = store
            .filaments()
            .filter(|f| f.parent().is_none() && !f.combs().is_empty())
            .map(|f| f.id())
            .collect();
        for seed in seeds {
            if store.filament(seed).cluster().is_none() {
                forest.create(store, seed, scale.interline);
            }
        }
        report.clusters_created = forest.len();
        report
            .timing
            .push("seed", t0.elapsed().as_secs_f64() * 1000.0);

        let t1 = Instant::now();
        let roots: Vec<ClusterId> = forest.roots().collect();
        report.clusters_merged = forest.len() - roots.len();
        let mut staves = Vec::with_capacity(roots.len());
        for id in roots {
            if forest.get(id).size() < self.params.min_lines {
                debug!("Discarding {}", forest.get(id));
                forest.destroy(store, id);
                report.clusters_discarded += 1;
            } else {
                staves.push(id);
            }
        }
        report
            .timing
            .push("filter", t1.elapsed().as_secs_f64() * 1000.0);

        let t2 = Instant::now();
        for &id in &staves {
            forest.get_mut(id).trim(store, self.params.line_count);
        }
        let view: &FilamentStore = store;
        staves.sort_by(|&a, &b| LineCluster::by_reverse_length(forest.get(a), forest.get(b), view));
        report
            .timing
            .push("trim", t2.elapsed().as_secs_f64() * 1000.0);

        report.staves = staves
            .iter()
            .map(|&id| ClusterSummary::from_cluster(forest.get(id), store))
            .collect();
        debug!(
            "Retrieved {} staves from {} clusters ({} merged, {} discarded)",
            staves.len(),
            report.clusters_created,
            report.clusters_merged,
            report.clusters_discarded
        );

        Retrieval {
            forest,
            staves,
            report,
        }
    }

    /// Run independent sheets, each with its own store and scale.
    #[cfg(feature = "parallel")]
    pub fn retrieve_batch(&self, sheets: &mut [(FilamentStore, Scale)]) -> Vec<Retrieval> {
        use rayon::prelude::*;

        sheets
            .par_iter_mut()
            .map(|(store, scale)| self.retrieve(store, scale))
            .collect()
    }

    /// Run independent sheets, each with its own store and scale.
    #[cfg(not(feature = "parallel"))]
    pub fn retrieve_batch(&self, sheets: &mut [(FilamentStore, Scale)]) -> Vec<Retrieval> {
        sheets
            .iter_mut()
            .map(|(store, scale)| self.retrieve(store, scale))
            .collect()
    }
}
