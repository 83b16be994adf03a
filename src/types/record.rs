use std::sync::Arc;

use geo::Geometry;

/// Stable positional id of an input record.
pub type RecordId = u32;

/// One input row: a polygonal geometry plus the attribute used for
/// duplicate detection.
///
/// `geometry` is in the working planar projected system (meters);
/// `geographic` carries the original lon/lat coordinates when the
/// ingestion side retained them. Records are never mutated; every
/// classification result is a set of ids referring back to them.
#[derive(Debug, Clone)]
pub struct Record {
    pub id: RecordId,
    pub key: Option<Arc<str>>, // Attribute key, e.g. a plantation code
    pub geometry: Geometry<f64>, // Planar projected coordinates
    pub geographic: Option<Geometry<f64>>, // Original lon/lat, if retained
}

impl Record {
    pub fn new(id: RecordId, key: Option<&str>, geometry: Geometry<f64>) -> Self {
        Self {
            id,
            key: key.map(Arc::from),
            geometry,
            geographic: None,
        }
    }

    /// Attach the original geographic coordinates of this geometry.
    pub fn with_geographic(mut self, geographic: Geometry<f64>) -> Self {
        self.geographic = Some(geographic);
        self
    }

    /// The attribute key, with empty strings treated as missing.
    pub fn attribute_key(&self) -> Option<&str> {
        self.key.as_deref().filter(|key| !key.is_empty())
    }
}
