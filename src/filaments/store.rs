use super::comb::{Comb, CombId};
use super::filament::{Filament, FilamentId};
use super::section::Section;
use crate::geometry::Point;

/// Arena owning the filaments and combs of one detection pass.
///
/// Clusters never own filaments; they refer to them by [`FilamentId`] and
/// borrow the store whenever geometry or back-references are needed.
#[derive(Clone, Debug, Default)]
pub struct FilamentStore {
    filaments: Vec<Filament>,
    combs: Vec<Comb>,
}

impl FilamentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filament from its skeleton and foreground sections. When
    /// `points` is empty the skeleton is derived from the sections.
    pub fn add_filament(&mut self, points: Vec<Point>, sections: Vec<Section>) -> FilamentId {
        let id = FilamentId(self.filaments.len() as u32);
        self.filaments.push(Filament::new(id, points, sections));
        id
    }

    /// Register a comb and link it back onto every filament it references.
    pub fn add_comb(&mut self, x: i32, filaments: Vec<FilamentId>) -> CombId {
        let id = CombId(self.combs.len() as u32);
        for fil in &filaments {
            self.filaments[fil.index()].add_comb(id);
        }
        self.combs.push(Comb::new(id, x, filaments));
        id
    }

    /// Filament-level merge: `child` becomes an alias of `parent`'s root,
    /// which also inherits the child's comb memberships.
    pub fn attach(&mut self, child: FilamentId, parent: FilamentId) {
        let root = self.ancestor(parent);
        let child_root = self.ancestor(child);
        if root == child_root {
            return;
        }
        self.filaments[child_root.index()].set_parent(Some(root));
        let combs = self.filaments[child_root.index()].combs().to_vec();
        let target = &mut self.filaments[root.index()];
        for comb in combs {
            target.add_comb(comb);
        }
    }

    /// Root filament of `id` in the filament-level union-find.
    pub fn ancestor(&self, id: FilamentId) -> FilamentId {
        let mut current = id;
        while let Some(parent) = self.filaments[current.index()].parent() {
            current = parent;
        }
        current
    }

    /// Index of `fil` within `comb`, matching slots through their ancestors.
    pub fn comb_index_of(&self, comb: CombId, fil: FilamentId) -> Option<usize> {
        let target = self.ancestor(fil);
        self.combs[comb.index()]
            .filaments()
            .iter()
            .position(|&slot| slot == fil || self.ancestor(slot) == target)
    }

    pub fn filament(&self, id: FilamentId) -> &Filament {
        &self.filaments[id.index()]
    }

    pub fn filament_mut(&mut self, id: FilamentId) -> &mut Filament {
        &mut self.filaments[id.index()]
    }

    pub fn comb(&self, id: CombId) -> &Comb {
        &self.combs[id.index()]
    }

    pub fn comb_mut(&mut self, id: CombId) -> &mut Comb {
        &mut self.combs[id.index()]
    }

    pub fn filaments(&self) -> impl Iterator<Item = &Filament> {
        self.filaments.iter()
    }

    pub fn combs(&self) -> impl Iterator<Item = &Comb> {
        self.combs.iter()
    }

    pub fn len(&self) -> usize {
        self.filaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filaments.is_empty()
    }

    /// Number of combs not yet consumed by clustering.
    pub fn pending_combs(&self) -> usize {
        self.combs.iter().filter(|c| !c.is_processed()).count()
    }
}
