use super::comb::CombId;
use super::section::Section;
use crate::cluster::ClusterId;
use crate::geometry::{union_all, Point, Rect};
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;
use std::collections::BTreeSet;

/// Identifier of a filament within its [`FilamentStore`](super::FilamentStore).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilamentId(pub u32);

impl FilamentId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Non-owning link from a filament to the cluster line holding it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClusterRef {
    pub cluster: ClusterId,
    pub position: i32,
}

/// Thin, roughly horizontal curve fragment extracted from the sheet.
///
/// Geometry is carried twice: the skeleton `points` (ordered by abscissa)
/// drive `y_at` sampling, while the foreground `sections` give the bounding
/// box, the true length and the local thickness used by collision checks.
#[derive(Clone, Debug)]
pub struct Filament {
    id: FilamentId,
    points: Vec<Point>,
    sections: Vec<Section>,
    parent: Option<FilamentId>,
    combs: Vec<CombId>,
    cluster: Option<ClusterRef>,
    vip: bool,
    bounds: OnceCell<Rect>,
    true_length: OnceCell<i32>,
}

impl Filament {
    pub(crate) fn new(id: FilamentId, mut points: Vec<Point>, sections: Vec<Section>) -> Self {
        if points.is_empty() {
            points = skeleton_from_sections(&sections);
        }
        if points.is_empty() {
            points.push(Point::origin());
        }
        points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));
        Self {
            id,
            points,
            sections,
            parent: None,
            combs: Vec::new(),
            cluster: None,
            vip: false,
            bounds: OnceCell::new(),
            true_length: OnceCell::new(),
        }
    }

    pub fn id(&self) -> FilamentId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Direct filament-level parent, if this filament was merged into another.
    pub fn parent(&self) -> Option<FilamentId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<FilamentId>) {
        self.parent = parent;
    }

    pub fn combs(&self) -> &[CombId] {
        &self.combs
    }

    pub(crate) fn add_comb(&mut self, comb: CombId) {
        if !self.combs.contains(&comb) {
            self.combs.push(comb);
        }
    }

    /// Drop all comb evidence, used when the filament is detached from a cluster.
    pub fn clear_combs(&mut self) {
        self.combs.clear();
    }

    pub fn cluster(&self) -> Option<ClusterRef> {
        self.cluster
    }

    pub fn set_cluster(&mut self, cluster: Option<ClusterRef>) {
        self.cluster = cluster;
    }

    pub fn is_vip(&self) -> bool {
        self.vip
    }

    pub fn set_vip(&mut self) {
        self.vip = true;
    }

    pub fn start_point(&self) -> Point {
        self.points[0]
    }

    pub fn stop_point(&self) -> Point {
        self.points[self.points.len() - 1]
    }

    /// True when abscissa `x` lies within the horizontal span of the skeleton.
    pub fn within_range(&self, x: f32) -> bool {
        x >= self.start_point().x && x <= self.stop_point().x
    }

    /// Ordinate of the skeleton at abscissa `x`. Outside the span the first or
    /// last skeleton segment is prolonged.
    pub fn y_at(&self, x: f32) -> f32 {
        let pts = &self.points;
        if pts.len() == 1 {
            return pts[0].y;
        }
        let upper = pts.partition_point(|p| p.x < x).clamp(1, pts.len() - 1);
        let (p0, p1) = (pts[upper - 1], pts[upper]);
        let dx = p1.x - p0.x;
        if dx.abs() <= f32::EPSILON {
            return 0.5 * (p0.y + p1.y);
        }
        p0.y + (x - p0.x) * (p1.y - p0.y) / dx
    }

    fn compute_bounds(&self) -> Rect {
        if let Some(rect) = union_all(self.sections.iter().map(Section::bounds)) {
            return rect;
        }
        let (start, stop) = (self.start_point(), self.stop_point());
        let top = self.points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let bottom = self.points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
        let x = start.x.floor() as i32;
        let y = top.floor() as i32;
        Rect::new(
            x,
            y,
            stop.x.floor() as i32 - x + 1,
            bottom.floor() as i32 - y + 1,
        )
    }

    pub fn bounds(&self) -> Rect {
        *self.bounds.get_or_init(|| self.compute_bounds())
    }

    fn compute_true_length(&self) -> i32 {
        if self.sections.is_empty() {
            return (self.stop_point().x - self.start_point().x).round() as i32 + 1;
        }
        let mut columns = BTreeSet::new();
        for section in &self.sections {
            for run in &section.runs {
                columns.extend(run.start..=run.stop());
            }
        }
        columns.len() as i32
    }

    /// Number of distinct columns actually covered by foreground pixels,
    /// ignoring the gaps a skeleton may bridge.
    pub fn true_length(&self) -> i32 {
        *self.true_length.get_or_init(|| self.compute_true_length())
    }
}

/// One skeleton point per covered column, at the middle of the vertical extent.
fn skeleton_from_sections(sections: &[Section]) -> Vec<Point> {
    let Some(bounds) = union_all(sections.iter().map(Section::bounds)) else {
        return Vec::new();
    };
    let mut points = Vec::with_capacity(bounds.width.max(0) as usize);
    for x in bounds.x..bounds.right() {
        let mut extent: Option<(i32, i32)> = None;
        for section in sections {
            if let Some((top, bottom)) = section.vertical_extent_at(x) {
                extent = Some(match extent {
                    None => (top, bottom),
                    Some((t, b)) => (t.min(top), b.max(bottom)),
                });
            }
        }
        if let Some((top, bottom)) = extent {
            points.push(Point::new(x as f32, 0.5 * (top + bottom) as f32));
        }
    }
    points
}
