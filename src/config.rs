use serde::{Deserialize, Serialize};

/// Thresholds governing one pipeline run.
///
/// Passed explicitly into [`classify`](crate::classify) so callers can
/// parameterize runs; the pipeline reads no process-wide state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Minimum overlap, as a percentage of the smaller polygon's area,
    /// for a pair to be recorded and resolved. Strictly exceeded.
    pub min_overlap_pct: f64,
    /// Exterior vertex count below which a record is flagged.
    pub min_vertex_count: usize,
    /// Projected square units per hectare.
    pub sqm_per_hectare: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_overlap_pct: 15.0,
            min_vertex_count: 12,
            sqm_per_hectare: 10_000.0,
        }
    }
}
