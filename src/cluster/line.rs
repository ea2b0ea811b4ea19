use crate::filaments::{FilamentId, FilamentStore};
use crate::geometry::{union_all, Point, Rect};
use std::fmt;

/// One physical line of a cluster: the filaments found at the same relative
/// position. Members are aliases of the same line, sampled one after the
/// other along the abscissa.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilamentLine {
    members: Vec<FilamentId>,
}

impl FilamentLine {
    pub fn new(fil: FilamentId) -> Self {
        Self { members: vec![fil] }
    }

    pub fn members(&self) -> &[FilamentId] {
        &self.members
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, fil: FilamentId) -> bool {
        self.members.contains(&fil)
    }

    /// Assimilate a filament into this line.
    pub fn add(&mut self, fil: FilamentId) {
        if !self.members.contains(&fil) {
            self.members.push(fil);
        }
    }

    /// Assimilate all members of another line.
    pub fn include(&mut self, other: &FilamentLine) {
        for &fil in &other.members {
            self.add(fil);
        }
    }

    pub fn bounds(&self, store: &FilamentStore) -> Option<Rect> {
        union_all(self.members.iter().map(|&f| store.filament(f).bounds()))
    }

    /// True when `x` lies between the leftmost start and the rightmost stop
    /// of the members, gaps between members included.
    pub fn is_within_range(&self, store: &FilamentStore, x: f32) -> bool {
        match (self.start_point(store), self.stop_point(store)) {
            (Some(start), Some(stop)) => x >= start.x && x <= stop.x,
            _ => false,
        }
    }

    /// Ordinate at `x`, taken from the member covering `x` or else from the
    /// member whose span is horizontally closest.
    pub fn y_at(&self, store: &FilamentStore, x: f32) -> Option<f32> {
        let covering = self
            .members
            .iter()
            .map(|&f| store.filament(f))
            .find(|fil| fil.within_range(x));
        if let Some(fil) = covering {
            return Some(fil.y_at(x));
        }
        self.members
            .iter()
            .map(|&f| store.filament(f))
            .min_by(|a, b| {
                span_distance(a.start_point().x, a.stop_point().x, x)
                    .partial_cmp(&span_distance(b.start_point().x, b.stop_point().x, x))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|fil| fil.y_at(x))
    }

    /// Leftmost skeleton point over all members.
    pub fn start_point(&self, store: &FilamentStore) -> Option<Point> {
        self.members
            .iter()
            .map(|&f| store.filament(f).start_point())
            .min_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Rightmost skeleton point over all members.
    pub fn stop_point(&self, store: &FilamentStore) -> Option<Point> {
        self.members
            .iter()
            .map(|&f| store.filament(f).stop_point())
            .max_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Number of combs backing this line.
    pub fn comb_count(&self, store: &FilamentStore) -> usize {
        self.members
            .iter()
            .map(|&f| store.filament(f).combs().len())
            .sum()
    }

    pub fn true_length(&self, store: &FilamentStore) -> i32 {
        self.members
            .iter()
            .map(|&f| store.filament(f).true_length())
            .sum()
    }
}

fn span_distance(start: f32, stop: f32, x: f32) -> f32 {
    if x < start {
        start - x
    } else if x > stop {
        x - stop
    } else {
        0.0
    }
}

impl fmt::Display for FilamentLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line[")?;
        for (i, fil) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "F{}", fil.0)?;
        }
        write!(f, "]")
    }
}
