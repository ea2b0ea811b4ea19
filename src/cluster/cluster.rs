use super::forest::ClusterId;
use super::line::FilamentLine;
use crate::filaments::{thickness_at, ClusterRef, FilamentId, FilamentStore};
use crate::geometry::{union_all, x_overlap, Point, Rect};
use crate::scale::Scale;
use log::{debug, info};
use std::cell::OnceCell;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Group of filament lines believed to form one staff, possibly extended by
/// virtual lines of aligned ledgers above or below.
///
/// Lines are keyed by their relative position, ascending from top to bottom.
/// Positions are only meaningful relative to each other until the cluster is
/// trimmed, which renumbers them from zero.
#[derive(Clone, Debug)]
pub struct LineCluster {
    key: ClusterId,
    id: u32,
    interline: i32,
    lines: BTreeMap<i32, FilamentLine>,
    parent: Option<ClusterId>,
    vip: bool,
    bounds: OnceCell<Option<Rect>>,
    true_length: OnceCell<i32>,
}

impl LineCluster {
    pub(crate) fn new(key: ClusterId, seed: FilamentId, interline: i32) -> Self {
        Self {
            key,
            id: seed.0,
            interline,
            lines: BTreeMap::new(),
            parent: None,
            vip: false,
            bounds: OnceCell::new(),
            true_length: OnceCell::new(),
        }
    }

    /// Slot of this cluster in its [`ClusterForest`](super::ClusterForest).
    pub fn key(&self) -> ClusterId {
        self.key
    }

    /// Debug id, inherited from the seed filament.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn interline(&self) -> i32 {
        self.interline
    }

    /// Cluster this one has been merged into, if any.
    pub fn parent(&self) -> Option<ClusterId> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: ClusterId) {
        self.parent = Some(parent);
    }

    pub fn is_vip(&self) -> bool {
        self.vip
    }

    pub fn set_vip(&mut self) {
        self.vip = true;
    }

    pub fn size(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines from top to bottom.
    pub fn lines(&self) -> impl Iterator<Item = &FilamentLine> {
        self.lines.values()
    }

    /// Lines from top to bottom, with their relative position.
    pub fn positioned_lines(&self) -> impl Iterator<Item = (i32, &FilamentLine)> {
        self.lines.iter().map(|(&pos, line)| (pos, line))
    }

    pub fn positions(&self) -> Vec<i32> {
        self.lines.keys().copied().collect()
    }

    pub fn line_at(&self, pos: i32) -> Option<&FilamentLine> {
        self.lines.get(&pos)
    }

    pub fn first_line(&self) -> Option<&FilamentLine> {
        self.lines.values().next()
    }

    pub fn last_line(&self) -> Option<&FilamentLine> {
        self.lines.values().next_back()
    }

    pub fn first_position(&self) -> Option<i32> {
        self.lines.keys().next().copied()
    }

    pub fn last_position(&self) -> Option<i32> {
        self.lines.keys().next_back().copied()
    }

    /// Position of the line holding `fil`, if any.
    pub fn position_of(&self, fil: FilamentId) -> Option<i32> {
        self.lines
            .iter()
            .find(|(_, line)| line.contains(fil))
            .map(|(&pos, _)| pos)
    }

    /// Line at `pos`, created empty if needed. Invalidates cached values.
    pub(crate) fn line_entry(&mut self, pos: i32) -> &mut FilamentLine {
        self.invalidate_cache();
        self.lines.entry(pos).or_default()
    }

    pub(crate) fn invalidate_cache(&mut self) {
        self.bounds.take();
        self.true_length.take();
    }

    /// Bounding box of all lines.
    pub fn bounds(&self, store: &FilamentStore) -> Option<Rect> {
        *self
            .bounds
            .get_or_init(|| union_all(self.lines.values().filter_map(|l| l.bounds(store))))
    }

    pub fn center(&self, store: &FilamentStore) -> Option<(i32, i32)> {
        self.bounds(store).map(|b| b.center())
    }

    /// Mean true length of the cluster lines.
    pub fn true_length(&self, store: &FilamentStore) -> i32 {
        *self.true_length.get_or_init(|| {
            if self.lines.is_empty() {
                return 0;
            }
            let total: i32 = self.lines.values().map(|l| l.true_length(store)).sum();
            let mean = total / self.lines.len() as i32;
            debug!("TrueLength: {} for {}", mean, self);
            mean
        })
    }

    /// Ordering that puts the longest clusters first.
    pub fn by_reverse_length(a: &LineCluster, b: &LineCluster, store: &FilamentStore) -> Ordering {
        b.true_length(store).cmp(&a.true_length(store))
    }

    pub fn starts(&self, store: &FilamentStore) -> Vec<Point> {
        self.lines
            .values()
            .filter_map(|l| l.start_point(store))
            .collect()
    }

    pub fn stops(&self, store: &FilamentStore) -> Vec<Point> {
        self.lines
            .values()
            .filter_map(|l| l.stop_point(store))
            .collect()
    }

    /// Sample every line of the cluster at abscissa `x`.
    ///
    /// Lines that do not cover `x` are filled, in order of preference, by
    /// interpolation between the nearest known lines above and below, by a
    /// single interline step from an adjacent known line, or by prolonging
    /// the line from its nearest end along `global_slope` when that end lies
    /// within `x_margin`. Remaining holes are reported as `None`.
    ///
    /// Holes are resolved from top to bottom, and an already resolved hole
    /// counts as known for the following ones.
    pub fn points_at(
        &self,
        store: &FilamentStore,
        x: f32,
        x_margin: i32,
        interline: i32,
        global_slope: f32,
    ) -> Vec<Option<Point>> {
        let (Some(first), Some(last)) = (self.first_position(), self.last_position()) else {
            return Vec::new();
        };

        let mut points: BTreeMap<i32, Option<Point>> = BTreeMap::new();
        let mut holes = Vec::new();
        for (&pos, line) in &self.lines {
            let y = line
                .is_within_range(store, x)
                .then(|| line.y_at(store, x))
                .flatten();
            match y {
                Some(y) => {
                    points.insert(pos, Some(Point::new(x, y)));
                }
                None => holes.push(pos),
            }
        }

        let interline = interline as f32;
        for pos in holes {
            let known = |p: i32| points.get(&p).copied().flatten().map(|pt| (p, pt.y));
            let prev = (first..pos).rev().find_map(known);
            let next = (pos + 1..=last).find_map(known);

            let y = match (prev, next) {
                (Some((p0, y0)), Some((p1, y1))) => {
                    Some(y0 + (pos - p0) as f32 * (y1 - y0) / (p1 - p0) as f32)
                }
                (Some((p0, y0)), None) if pos - p0 == 1 => Some(y0 + interline),
                (None, Some((p1, y1))) if p1 - pos == 1 => Some(y1 - interline),
                _ => self.extrapolate_horizontally(store, pos, x, x_margin, global_slope),
            };
            points.insert(pos, y.map(|y| Point::new(x, y)));
        }

        points.into_values().collect()
    }

    fn extrapolate_horizontally(
        &self,
        store: &FilamentStore,
        pos: i32,
        x: f32,
        x_margin: i32,
        global_slope: f32,
    ) -> Option<f32> {
        let line = self.lines.get(&pos)?;
        let start = line.start_point(store)?;
        let end = if x <= start.x {
            start
        } else {
            line.stop_point(store)?
        };
        let dx = x - end.x;
        (dx.abs() <= x_margin as f32).then(|| end.y + dx * global_slope)
    }

    /// Add `fil` to the line at zero-based `index` (counted among current
    /// lines, not by position), unless it would collide with a member: where
    /// the filament overlaps a member section horizontally, the combined
    /// thickness at the middle of the overlap must not exceed the scale's
    /// maximum foreground thickness.
    ///
    /// Returns false, leaving the cluster untouched, when there is no room.
    pub fn include_filament_by_index(
        &mut self,
        store: &mut FilamentStore,
        fil: FilamentId,
        index: usize,
        scale: &Scale,
    ) -> bool {
        let Some((&pos, line)) = self.lines.iter().nth(index) else {
            return false;
        };

        let candidate = store.filament(fil);
        let fil_box = candidate.bounds();
        for &member in line.members() {
            let member_fil = store.filament(member);
            for section in member_fil.sections() {
                let sct_box = section.bounds();
                let overlap = x_overlap(&fil_box, &sct_box);
                if overlap <= 0 {
                    continue;
                }
                let x = fil_box.x.max(sct_box.x) + overlap / 2;
                let thickness = thickness_at(
                    x,
                    candidate.sections().iter().chain(member_fil.sections()),
                );
                if thickness > scale.max_fore {
                    if candidate.is_vip() {
                        info!("VIP no room for F{} in {}", fil.0, self);
                    } else {
                        debug!("No room for F{} in {} thickness:{}", fil.0, self, thickness);
                    }
                    return false;
                }
            }
        }

        let vip = candidate.is_vip();
        self.line_entry(pos).add(fil);
        if vip {
            self.set_vip();
        }
        store.filament_mut(fil).set_cluster(Some(ClusterRef {
            cluster: self.key,
            position: pos,
        }));
        true
    }

    /// Shift positions so that the first line is at position zero.
    pub fn renumber_lines(&mut self, store: &mut FilamentStore) {
        if let Some(first) = self.first_position() {
            if first != 0 {
                let lines = std::mem::take(&mut self.lines);
                for (pos, line) in lines {
                    let new_pos = pos - first;
                    for &member in line.members() {
                        self.relink(store, member, Some(new_pos));
                    }
                    self.lines.insert(new_pos, line);
                }
            }
        }
        self.invalidate_cache();
    }

    /// Remove lines in excess, typically virtual lines made of aligned
    /// ledgers, until `count` lines remain, then renumber from zero.
    ///
    /// Each step drops either the top or the bottom line: the one backed by
    /// fewer combs, or on equal comb counts the one with the larger true
    /// length. Dropped filaments are detached and lose their comb evidence.
    pub fn trim(&mut self, store: &mut FilamentStore, count: usize) {
        debug!("Trim {}", self);

        while self.lines.len() > count {
            let (Some((&top_pos, top)), Some((&bot_pos, bot))) =
                (self.lines.first_key_value(), self.lines.last_key_value())
            else {
                break;
            };
            let top_count = top.comb_count(store);
            let bot_count = bot.comb_count(store);
            let remove_top = if top_count == bot_count {
                top.true_length(store) > bot.true_length(store)
            } else {
                top_count < bot_count
            };
            let pos = if remove_top { top_pos } else { bot_pos };

            if let Some(line) = self.lines.remove(&pos) {
                debug!("Cluster#{} removing {} at pos {}", self.id, line, pos);
                for &member in line.members() {
                    if self.owns(store, member) {
                        let fil = store.filament_mut(member);
                        fil.set_cluster(None);
                        fil.clear_combs();
                    }
                }
            }
        }

        self.renumber_lines(store);
    }

    /// Remove the links back from member filaments to this cluster.
    pub fn destroy(&self, store: &mut FilamentStore) {
        for line in self.lines.values() {
            for &member in line.members() {
                if self.owns(store, member) {
                    let fil = store.filament_mut(member);
                    fil.set_cluster(None);
                    fil.clear_combs();
                }
            }
        }
    }

    fn owns(&self, store: &FilamentStore, fil: FilamentId) -> bool {
        store
            .filament(fil)
            .cluster()
            .is_some_and(|r| r.cluster == self.key)
    }

    fn relink(&self, store: &mut FilamentStore, fil: FilamentId, position: Option<i32>) {
        if self.owns(store, fil) {
            store.filament_mut(fil).set_cluster(position.map(|position| ClusterRef {
                cluster: self.key,
                position,
            }));
        }
    }
}

impl fmt::Display for LineCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{Cluster#{} interline:{} size:{}",
            self.id,
            self.interline,
            self.lines.len()
        )?;
        for line in self.lines.values() {
            write!(f, " {}", line)?;
        }
        write!(f, "}}")
    }
}
