//! Sheet scale as seen by the clustering stage.

use serde::{Deserialize, Serialize};

/// Scale measurements of one sheet, produced by the scale estimation step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    /// Distance in pixels between two adjacent staff lines.
    pub interline: i32,
    /// Maximum plausible thickness (pixels) of a foreground line.
    pub max_fore: f32,
}

impl Scale {
    pub fn new(interline: i32, max_fore: f32) -> Self {
        Self {
            interline,
            max_fore,
        }
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            interline: 20,
            max_fore: 4.0,
        }
    }
}
