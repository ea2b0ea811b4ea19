//! Small integer/float geometry helpers shared by filaments and clusters.

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Sampled point in image coordinates (x to the right, y downwards).
pub type Point = Point2<f32>;

/// Axis-aligned pixel rectangle. `width`/`height` count pixels, so a single
/// pixel at (x, y) has width = height = 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }

    /// Center, rounded down like integer pixel arithmetic.
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.width / 2, self.y + self.height / 2)
    }
}

/// Length of the horizontal overlap between two rectangles, negative when
/// they are separated by a gap.
#[inline]
pub fn x_overlap(a: &Rect, b: &Rect) -> i32 {
    a.right().min(b.right()) - a.x.max(b.x)
}

/// Union of an iterator of rectangles, `None` when empty.
pub fn union_all<I>(boxes: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    boxes.into_iter().fold(None, |acc, b| match acc {
        None => Some(b),
        Some(r) => Some(r.union(&b)),
    })
}
