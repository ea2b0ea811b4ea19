//! Filaments and combs: the evidence consumed by staff line clustering.
//!
//! Filaments and combs are produced upstream (skeleton tracking and vertical
//! sampling of the sheet) and handed over in a [`FilamentStore`]:
//!
//! - [`Filament`]: thin, near-horizontal fragment with its foreground
//!   [`Section`]s, a skeleton used for `y_at` sampling, a filament-level
//!   ancestor link and a back-reference to the cluster line holding it.
//! - [`Comb`]: filaments found one interline apart at a given abscissa,
//!   slot `i` being the i-th line from the top.
//!
//! Both are addressed by small copyable ids so that clusters can reference
//! them without owning them.

mod comb;
mod filament;
mod section;
mod store;

pub use comb::{Comb, CombId};
pub use filament::{ClusterRef, Filament, FilamentId};
pub use section::{thickness_at, Run, Section};
pub use store::FilamentStore;

#[cfg(test)]
mod tests;
