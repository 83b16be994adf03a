use geo::Centroid;
use serde::Serialize;

use super::classify::ParsedRecord;
use crate::config::PipelineConfig;
use crate::geom::GeographicTransform;
use crate::types::{Record, RecordError, RecordId};

/// A record that survived every filter, enriched with report metrics.
#[derive(Debug, Clone, Serialize)]
pub struct ValidRecord {
    pub id: RecordId,
    pub key: Option<String>,
    /// Area in hectares, rounded to 3 decimals.
    pub area_ha: f64,
    /// Geographic centroid, rounded to 8 decimals.
    pub longitude: f64,
    pub latitude: f64,
}

pub(crate) struct AssembledSet {
    pub valid: Vec<ValidRecord>, // Input order
    pub projection_failures: Vec<(RecordId, RecordError)>,
}

/// Enrich the surviving records with `area_ha` and the geographic
/// centroid. The centroid is re-derived in the geographic system (the
/// projected system serves area and overlap math, not coordinates for
/// reporting), so records whose transform fails are dropped from the
/// valid set and reported.
pub(crate) fn assemble_valid_set(
    survivors: &[&ParsedRecord],
    records: &[Record],
    transform: &GeographicTransform,
    config: &PipelineConfig,
) -> AssembledSet {
    let mut valid = Vec::with_capacity(survivors.len());
    let mut projection_failures = Vec::new();

    for &record in survivors {
        let source = &records[record.pos];
        match geographic_centroid(record, source, transform) {
            Ok((longitude, latitude)) => valid.push(ValidRecord {
                id: record.id,
                key: source.attribute_key().map(str::to_owned),
                area_ha: round_to(record.area / config.sqm_per_hectare, 3),
                longitude: round_to(longitude, 8),
                latitude: round_to(latitude, 8),
            }),
            Err(error) => projection_failures.push((record.id, error)),
        }
    }

    tracing::debug!(
        valid = valid.len(),
        projection_failures = projection_failures.len(),
        "assembled valid set"
    );
    AssembledSet { valid, projection_failures }
}

/// Centroid in degrees: from the record's retained geographic
/// coordinates when present, otherwise by inverse-projecting the
/// working shape.
fn geographic_centroid(
    record: &ParsedRecord,
    source: &Record,
    transform: &GeographicTransform,
) -> Result<(f64, f64), RecordError> {
    let point = match &source.geographic {
        Some(geometry) => geometry.centroid(),
        None => transform.shape_to_geographic(&record.shape)?.centroid(),
    };
    let point =
        point.ok_or_else(|| RecordError::Projection("geographic centroid undefined".into()))?;
    Ok((point.x(), point.y()))
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
