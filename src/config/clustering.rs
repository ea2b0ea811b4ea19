use serde::Deserialize;

/// Knobs of the staff retrieval pass.
///
/// - `line_count`: number of lines of a regular staff; surviving clusters are
///   trimmed down to it.
/// - `min_lines`: clusters with fewer lines are not considered staves and are
///   destroyed, releasing their filaments.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ClusteringParams {
    pub line_count: usize,
    pub min_lines: usize,
}

impl Default for ClusteringParams {
    fn default() -> Self {
        Self {
            line_count: 5,
            min_lines: 5,
        }
    }
}

/// Optional probe used by the demo to report `points_at` samples.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Abscissa to sample.
    pub x: f32,
    /// Maximum horizontal distance for prolonging a line from its end.
    pub x_margin: i32,
    /// Global slope of the sheet.
    pub global_slope: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            x: 0.0,
            x_margin: 40,
            global_slope: 0.0,
        }
    }
}
