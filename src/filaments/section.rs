use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::cell::OnceCell;

/// Horizontal run of foreground pixels, `length` pixels starting at `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub start: i32,
    pub length: i32,
}

impl Run {
    pub fn new(start: i32, length: i32) -> Self {
        Self { start, length }
    }

    #[inline]
    pub fn stop(&self) -> i32 {
        self.start + self.length - 1
    }

    #[inline]
    pub fn contains(&self, x: i32) -> bool {
        x >= self.start && x <= self.stop()
    }
}

/// Vertically contiguous stack of horizontal runs: run `k` lies on row
/// `first_y + k`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Section {
    pub first_y: i32,
    pub runs: Vec<Run>,
    #[serde(skip)]
    bounds: OnceCell<Rect>,
}

impl Section {
    pub fn new(first_y: i32, runs: Vec<Run>) -> Self {
        Self {
            first_y,
            runs,
            bounds: OnceCell::new(),
        }
    }

    /// Single-row section, the usual shape of a thin staff line chunk.
    pub fn horizontal(y: i32, start: i32, length: i32) -> Self {
        Self::new(y, vec![Run::new(start, length)])
    }

    fn compute_bounds(&self) -> Rect {
        let left = self.runs.iter().map(|r| r.start).min().unwrap_or(0);
        let right = self.runs.iter().map(|r| r.stop()).max().unwrap_or(-1);
        Rect::new(left, self.first_y, right - left + 1, self.runs.len() as i32)
    }

    pub fn bounds(&self) -> Rect {
        *self.bounds.get_or_init(|| self.compute_bounds())
    }

    /// Number of foreground pixels.
    pub fn weight(&self) -> i32 {
        self.runs.iter().map(|r| r.length).sum()
    }

    /// Topmost and bottommost rows of this section that contain column `x`.
    pub fn vertical_extent_at(&self, x: i32) -> Option<(i32, i32)> {
        let mut rows = self
            .runs
            .iter()
            .enumerate()
            .filter(|(_, r)| r.contains(x))
            .map(|(k, _)| self.first_y + k as i32);
        let top = rows.next()?;
        let bottom = rows.last().unwrap_or(top);
        Some((top, bottom))
    }
}

/// Vertical thickness at column `x` of the union of the provided sections:
/// distance from the highest to the lowest foreground pixel, inclusive.
/// Zero when no section covers `x`.
pub fn thickness_at<'a, I>(x: i32, sections: I) -> f32
where
    I: IntoIterator<Item = &'a Section>,
{
    let mut extent: Option<(i32, i32)> = None;
    for section in sections {
        if let Some((top, bottom)) = section.vertical_extent_at(x) {
            extent = Some(match extent {
                None => (top, bottom),
                Some((t, b)) => (t.min(top), b.max(bottom)),
            });
        }
    }
    extent.map_or(0.0, |(top, bottom)| (bottom - top + 1) as f32)
}
