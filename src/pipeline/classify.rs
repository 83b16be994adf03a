use geo::{Area, MultiPolygon};
use rayon::prelude::*;

use crate::geom;
use crate::types::{Record, RecordError, RecordId};

/// Per-record geometric classification computed in the first fan-out
/// pass: parsed shape, exterior vertex count, projected area and the
/// centroid containment flag.
#[derive(Debug, Clone)]
pub(crate) struct ParsedRecord {
    pub id: RecordId,
    pub pos: usize, // Position in the input sequence
    pub shape: MultiPolygon<f64>, // Projected
    pub vertex_count: usize,
    pub area: f64, // Projected square units
    pub centroid_inside: bool,
}

/// Outcome of the first pass over the raw records.
pub(crate) struct ClassifiedRecords {
    pub parsed: Vec<ParsedRecord>, // Input order; parse failures dropped
    pub parse_failures: Vec<(RecordId, RecordError)>, // Input order
}

/// Parse and classify every record. Records run independently, so the
/// pass fans out across the record set; collection preserves input
/// order.
pub(crate) fn classify_records(records: &[Record]) -> ClassifiedRecords {
    let results: Vec<Result<ParsedRecord, (RecordId, RecordError)>> = records
        .par_iter()
        .enumerate()
        .map(|(pos, record)| {
            let shape = geom::parse_polygonal(&record.geometry).map_err(|err| (record.id, err))?;
            Ok(ParsedRecord {
                id: record.id,
                pos,
                vertex_count: geom::exterior_vertex_count(&shape),
                area: shape.unsigned_area(),
                centroid_inside: geom::centroid_inside(&shape),
                shape,
            })
        })
        .collect();

    let mut parsed = Vec::with_capacity(results.len());
    let mut parse_failures = Vec::new();
    for result in results {
        match result {
            Ok(record) => parsed.push(record),
            Err(failure) => parse_failures.push(failure),
        }
    }

    tracing::debug!(
        parsed = parsed.len(),
        failed = parse_failures.len(),
        "classified raw records"
    );
    ClassifiedRecords { parsed, parse_failures }
}
