use geo::{Area, BooleanOps, BoundingRect, Intersects};
use rayon::prelude::*;
use serde::Serialize;

use super::classify::ParsedRecord;
use crate::config::PipelineConfig;
use crate::geom::{BoundsIndex, envelope};
use crate::types::{RecordError, RecordId};

/// Two distinct records whose geometries overlap beyond the configured
/// share of the smaller area. Undirected: `id_a < id_b`, one pair per
/// unordered id combination.
#[derive(Debug, Clone, Serialize)]
pub struct OverlapPair {
    pub id_a: RecordId,
    pub id_b: RecordId,
    /// Intersection area in projected square units.
    pub intersection_area: f64,
    pub area_a: f64,
    pub area_b: f64,
    /// Intersection as a percentage of the union area.
    pub pct_of_union: f64,
    /// Intersection as a percentage of `area_a`.
    pub pct_of_a: f64,
    /// Intersection as a percentage of `area_b`.
    pub pct_of_b: f64,
}

impl OverlapPair {
    /// Overlap relative to the smaller, more affected polygon: the
    /// basis of the recording threshold.
    #[inline]
    pub fn pct_of_smaller(&self) -> f64 {
        self.pct_of_a.max(self.pct_of_b)
    }
}

/// The overlap pairs found among the geometry-unique records, plus the
/// records withheld from the analysis for having no area.
pub(crate) struct OverlapGraph {
    pub pairs: Vec<OverlapPair>, // Sorted by (id_a, id_b)
    pub degenerate: Vec<(RecordId, RecordError)>,
}

/// Find all overlapping pairs among the given records.
///
/// Candidates come from a bounding-box R-tree; the exact intersection is
/// only computed for candidates whose boxes meet, and a cheap intersects
/// test runs before the boolean operation. Candidate generation fans out
/// per record; the pair list is sorted afterwards so downstream
/// resolution is independent of execution order.
pub(crate) fn build_overlap_graph(
    records: &[&ParsedRecord],
    config: &PipelineConfig,
) -> OverlapGraph {
    let mut degenerate = Vec::new();
    let mut eligible: Vec<&ParsedRecord> = Vec::with_capacity(records.len());
    for &record in records {
        if record.area > 0.0 {
            eligible.push(record);
        } else {
            degenerate.push((record.id, RecordError::DegenerateGeometry));
        }
    }

    let index = BoundsIndex::build(eligible.iter().map(|record| record.shape.bounding_rect()));

    let mut pairs: Vec<OverlapPair> = (0..eligible.len())
        .into_par_iter()
        .flat_map_iter(|i| {
            let record = eligible[i];
            let mut found = Vec::new();
            if let Some(rect) = record.shape.bounding_rect() {
                // Visit each unordered pair once, from its lower position.
                for j in index.candidates(&envelope(&rect)) {
                    if j <= i {
                        continue;
                    }
                    if let Some(pair) = measure_pair(record, eligible[j], config) {
                        found.push(pair);
                    }
                }
            }
            found
        })
        .collect();

    pairs.sort_unstable_by_key(|pair| (pair.id_a, pair.id_b));

    tracing::debug!(
        pairs = pairs.len(),
        degenerate = degenerate.len(),
        "built overlap graph"
    );
    OverlapGraph { pairs, degenerate }
}

/// Measure one candidate pair, returning it only when the intersection
/// exceeds the threshold share of the smaller area.
fn measure_pair(a: &ParsedRecord, b: &ParsedRecord, config: &PipelineConfig) -> Option<OverlapPair> {
    if !a.shape.intersects(&b.shape) {
        return None;
    }

    let intersection_area = a.shape.intersection(&b.shape).unsigned_area();
    if intersection_area <= 0.0 {
        // Boundary contact only.
        return None;
    }

    let smaller = a.area.min(b.area);
    if intersection_area / smaller * 100.0 <= config.min_overlap_pct {
        return None;
    }

    let union_area = a.area + b.area - intersection_area;
    let (first, second) = if a.id <= b.id { (a, b) } else { (b, a) };
    Some(OverlapPair {
        id_a: first.id,
        id_b: second.id,
        intersection_area,
        area_a: first.area,
        area_b: second.area,
        pct_of_union: intersection_area / union_area * 100.0,
        pct_of_a: intersection_area / first.area * 100.0,
        pct_of_b: intersection_area / second.area * 100.0,
    })
}
