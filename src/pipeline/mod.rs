mod assemble;
mod classify;
mod duplicates;
mod overlap;
mod resolve;

use ahash::AHashSet;
use anyhow::Result;
use serde::Serialize;

pub use assemble::ValidRecord;
pub use overlap::OverlapPair;

use classify::ParsedRecord;

use crate::config::PipelineConfig;
use crate::geom::GeographicTransform;
use crate::types::{Record, RecordId, RecordIssue};

/// A record flagged for a low exterior vertex count.
#[derive(Debug, Clone, Serialize)]
pub struct VertexFlag {
    pub id: RecordId,
    pub vertex_count: usize,
}

/// Every output of one pipeline run. All sequences are in stable input
/// order except `overlap_pairs` (sorted by id pair), `overlap_losers`
/// and `issues` (sorted by id).
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub geometry_unique: Vec<RecordId>,
    pub geometry_duplicate: Vec<RecordId>,
    pub attribute_unique: Vec<RecordId>,
    pub attribute_duplicate: Vec<RecordId>,
    /// Records under the vertex-count threshold. Diagnostic only: never
    /// a filter for the valid set.
    pub too_few_points: Vec<VertexFlag>,
    pub centroid_outside: Vec<RecordId>,
    pub overlap_pairs: Vec<OverlapPair>,
    pub overlap_losers: Vec<RecordId>,
    pub valid_final: Vec<ValidRecord>,
    pub issues: Vec<RecordIssue>,
}

/// Run the classification and conflict-resolution pipeline over an
/// in-memory record set.
///
/// Pure: records are never mutated, every set is computed in one pass,
/// and the same input always yields the same output. Per-record
/// failures accumulate in [`Classification::issues`] and never abort
/// the batch.
pub fn classify(records: &[Record], config: &PipelineConfig) -> Result<Classification> {
    let transform = GeographicTransform::new()?;

    // Independent per-record classification, fanned out over the set.
    let classified = classify::classify_records(records);
    let parsed = &classified.parsed;

    let too_few_points: Vec<VertexFlag> = parsed
        .iter()
        .filter(|record| record.vertex_count < config.min_vertex_count)
        .map(|record| VertexFlag {
            id: record.id,
            vertex_count: record.vertex_count,
        })
        .collect();

    let centroid_outside: Vec<RecordId> = parsed
        .iter()
        .filter(|record| !record.centroid_inside)
        .map(|record| record.id)
        .collect();

    let geometry = duplicates::partition_by_geometry(parsed);
    let attribute = duplicates::partition_by_key(records);

    // Only unique geometries are checked against each other.
    let unique_ids: AHashSet<RecordId> = geometry.unique.iter().copied().collect();
    let unique_records: Vec<&ParsedRecord> = parsed
        .iter()
        .filter(|record| unique_ids.contains(&record.id))
        .collect();

    let graph = overlap::build_overlap_graph(&unique_records, config);

    // Overlap resolution never reconsiders records already excluded by
    // the earlier filters.
    let attribute_unique_ids: AHashSet<RecordId> = attribute.unique.iter().copied().collect();
    let eligible: AHashSet<RecordId> = unique_records
        .iter()
        .filter(|record| record.centroid_inside && attribute_unique_ids.contains(&record.id))
        .map(|record| record.id)
        .collect();

    let overlap_losers = resolve::resolve_overlaps(&graph.pairs, &eligible);

    let loser_ids: AHashSet<RecordId> = overlap_losers.iter().copied().collect();
    let degenerate_ids: AHashSet<RecordId> = graph.degenerate.iter().map(|(id, _)| *id).collect();
    let survivors: Vec<&ParsedRecord> = unique_records
        .iter()
        .copied()
        .filter(|record| {
            eligible.contains(&record.id)
                && !loser_ids.contains(&record.id)
                && !degenerate_ids.contains(&record.id)
        })
        .collect();

    let assembled = assemble::assemble_valid_set(&survivors, records, &transform, config);

    let mut issues: Vec<RecordIssue> = classified
        .parse_failures
        .into_iter()
        .chain(graph.degenerate.iter().cloned())
        .chain(assembled.projection_failures)
        .map(|(id, error)| RecordIssue { id, error })
        .collect();
    issues.sort_by_key(|issue| issue.id);

    tracing::info!(
        records = records.len(),
        geometry_unique = geometry.unique.len(),
        geometry_duplicate = geometry.duplicate.len(),
        overlap_pairs = graph.pairs.len(),
        valid = assembled.valid.len(),
        issues = issues.len(),
        "classification complete"
    );

    Ok(Classification {
        geometry_unique: geometry.unique,
        geometry_duplicate: geometry.duplicate,
        attribute_unique: attribute.unique,
        attribute_duplicate: attribute.duplicate,
        too_few_points,
        centroid_outside,
        overlap_pairs: graph.pairs,
        overlap_losers,
        valid_final: assembled.valid,
        issues,
    })
}
