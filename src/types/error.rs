use serde::Serialize;

use super::RecordId;

/// Per-record failure kinds. All are non-fatal to the batch: the record
/// is dropped from the affected outputs and reported in the run's
/// diagnostics. These are deterministic, pure computations; a failure
/// recurs identically on reprocessing, so there is no retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize)]
pub enum RecordError {
    /// The geometry is not a (multi)polygon or has no usable rings.
    /// Excluded from all geometric classification, retained in raw counts.
    #[error("unparsable geometry: {0}")]
    GeometryParse(String),
    /// Zero or negative area. Excluded from overlap analysis and from
    /// every area-derived output.
    #[error("degenerate geometry: zero or negative area")]
    DegenerateGeometry,
    /// The transform to the geographic system failed. Excluded from the
    /// valid set only.
    #[error("projection failed: {0}")]
    Projection(String),
}

/// A per-record diagnostic accumulated alongside the classification sets.
#[derive(Debug, Clone, Serialize)]
pub struct RecordIssue {
    pub id: RecordId,
    pub error: RecordError,
}
