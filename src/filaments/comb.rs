use super::filament::FilamentId;
use serde::{Deserialize, Serialize};

/// Identifier of a comb within its [`FilamentStore`](super::FilamentStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombId(pub u32);

impl CombId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Alignment evidence sampled at one abscissa: the filaments crossed by a
/// vertical probe, spaced by one interline. Slot `i` holds the filament of
/// the i-th line counted from the top.
#[derive(Clone, Debug)]
pub struct Comb {
    id: CombId,
    x: i32,
    filaments: Vec<FilamentId>,
    processed: bool,
}

impl Comb {
    pub(crate) fn new(id: CombId, x: i32, filaments: Vec<FilamentId>) -> Self {
        Self {
            id,
            x,
            filaments,
            processed: false,
        }
    }

    pub fn id(&self) -> CombId {
        self.id
    }

    /// Abscissa where the comb was sampled.
    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn count(&self) -> usize {
        self.filaments.len()
    }

    pub fn filament(&self, index: usize) -> Option<FilamentId> {
        self.filaments.get(index).copied()
    }

    pub fn filaments(&self) -> &[FilamentId] {
        &self.filaments
    }

    pub fn is_processed(&self) -> bool {
        self.processed
    }

    pub fn set_processed(&mut self, processed: bool) {
        self.processed = processed;
    }
}
