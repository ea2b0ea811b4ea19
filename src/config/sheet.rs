use super::ConfigError;
use crate::filaments::{FilamentId, FilamentStore, Section};
use crate::geometry::Point;
use crate::scale::Scale;
use serde::Deserialize;

/// JSON description of one filament.
#[derive(Clone, Debug, Deserialize)]
pub struct FilamentInput {
    /// Skeleton points `[x, y]`; derived from the sections when empty.
    #[serde(default)]
    pub points: Vec<[f32; 2]>,
    #[serde(default)]
    pub sections: Vec<Section>,
    /// Index of the filament this one has been merged into, if any.
    #[serde(default)]
    pub parent: Option<u32>,
    #[serde(default)]
    pub vip: bool,
}

/// JSON description of one comb: filament indices from top to bottom.
#[derive(Clone, Debug, Deserialize)]
pub struct CombInput {
    pub x: i32,
    pub filaments: Vec<u32>,
}

/// Filaments, combs and scale of one sheet, as handed over by the upstream
/// stages.
#[derive(Clone, Debug, Deserialize)]
pub struct SheetInput {
    pub scale: Scale,
    pub filaments: Vec<FilamentInput>,
    #[serde(default)]
    pub combs: Vec<CombInput>,
}

impl SheetInput {
    /// Build the filament store. Filament `i` of the input gets id `i`.
    pub fn into_store(self) -> Result<FilamentStore, ConfigError> {
        let count = self.filaments.len();
        let check = |id: u32| -> Result<FilamentId, ConfigError> {
            if (id as usize) < count {
                Ok(FilamentId(id))
            } else {
                Err(ConfigError::InvalidReference { id, count })
            }
        };

        let mut store = FilamentStore::new();
        let mut parents = Vec::new();
        for input in self.filaments {
            let points = input
                .points
                .iter()
                .map(|p| Point::new(p[0], p[1]))
                .collect();
            let id = store.add_filament(points, input.sections);
            if input.vip {
                store.filament_mut(id).set_vip();
            }
            if let Some(parent) = input.parent {
                parents.push((id, check(parent)?));
            }
        }
        for comb in self.combs {
            let filaments = comb
                .filaments
                .into_iter()
                .map(check)
                .collect::<Result<Vec<_>, _>>()?;
            store.add_comb(comb.x, filaments);
        }
        for (child, parent) in parents {
            store.attach(child, parent);
        }
        Ok(store)
    }
}
