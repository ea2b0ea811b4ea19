#![doc = include_str!("../README.md")]

// Data model handed over by the upstream stages.
pub mod filaments;
pub mod geometry;
pub mod scale;

// Clustering core.
pub mod cluster;
pub mod retriever;

// Configuration, reporting and file output for tools.
pub mod config;
pub mod diagnostics;
pub mod io;

// --- High-level re-exports -------------------------------------------------

pub use crate::cluster::{ClusterForest, ClusterId, FilamentLine, LineCluster};
pub use crate::config::ClusteringParams;
pub use crate::diagnostics::{ClusterSummary, ClusteringReport};
pub use crate::filaments::{CombId, FilamentId, FilamentStore};
pub use crate::retriever::{ClustersRetriever, Retrieval};
pub use crate::scale::Scale;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use staff_clusters::prelude::*;
///
/// let mut store = FilamentStore::new();
/// let lines: Vec<FilamentId> = (0..5)
///     .map(|k| store.add_filament(Vec::new(), vec![Section::horizontal(100 + 20 * k, 0, 300)]))
///     .collect();
/// store.add_comb(150, lines);
///
/// let retrieval = ClustersRetriever::default().retrieve(&mut store, &Scale::default());
/// assert_eq!(retrieval.staves.len(), 1);
/// ```
pub mod prelude {
    pub use crate::filaments::Section;
    pub use crate::geometry::Point;
    pub use crate::{
        ClusterForest, ClusterId, ClustersRetriever, FilamentId, FilamentStore, LineCluster,
        Scale,
    };
}
