//! Line clusters: filaments aggregated into staff candidates.
//!
//! A cluster is grown from a seed filament by following combs. Each comb
//! imposes relative positions on the filaments it crosses, so a filament at
//! comb index `idx` seen from a pivot at position `p` lands at position
//! `p - idx_pivot + idx`. Filaments found in another cluster reveal that both
//! clusters describe the same staff, and the other cluster is folded into
//! the growing one.
//!
//! - [`FilamentLine`]: filaments sharing one relative position.
//! - [`LineCluster`]: ordered lines, sampling at an abscissa, trimming to
//!   the staff line count, collision-aware insertion.
//! - [`ClusterForest`]: arena of clusters, construction from a seed and
//!   the union-find merge between clusters.
//!
//! Construction uses an explicit worklist. Combs are marked processed before
//! being dispatched, so each comb is consumed once even on cyclic comb graphs.

#[allow(clippy::module_inception)]
mod cluster;
mod forest;
mod line;

pub use cluster::LineCluster;
pub use forest::{ClusterForest, ClusterId};
pub use line::FilamentLine;
