use geo::{Geometry, LineString, MultiPolygon};

use crate::types::RecordError;

/// Coerce an input geometry into multipolygon form.
///
/// Polygons are wrapped; anything non-areal fails. So does a
/// multipolygon with no parts or a part with an empty exterior ring,
/// since nothing downstream can classify those.
pub(crate) fn parse_polygonal(geometry: &Geometry<f64>) -> Result<MultiPolygon<f64>, RecordError> {
    let shape = match geometry {
        Geometry::Polygon(poly) => MultiPolygon(vec![poly.clone()]),
        Geometry::MultiPolygon(shape) => shape.clone(),
        other => {
            return Err(RecordError::GeometryParse(format!(
                "expected polygon or multipolygon, got {}",
                kind_name(other)
            )));
        }
    };
    if shape.0.is_empty() {
        return Err(RecordError::GeometryParse("multipolygon has no parts".into()));
    }
    if shape.0.iter().any(|poly| poly.exterior().0.is_empty()) {
        return Err(RecordError::GeometryParse("polygon has an empty exterior ring".into()));
    }
    Ok(shape)
}

fn kind_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "point",
        Geometry::Line(_) => "line",
        Geometry::LineString(_) => "linestring",
        Geometry::Polygon(_) => "polygon",
        Geometry::MultiPoint(_) => "multipoint",
        Geometry::MultiLineString(_) => "multilinestring",
        Geometry::MultiPolygon(_) => "multipolygon",
        Geometry::GeometryCollection(_) => "geometrycollection",
        Geometry::Rect(_) => "rect",
        Geometry::Triangle(_) => "triangle",
    }
}

/// Exterior-ring vertices summed across parts, with each ring's closing
/// vertex dropped. Interior rings are not counted.
pub(crate) fn exterior_vertex_count(shape: &MultiPolygon<f64>) -> usize {
    shape
        .0
        .iter()
        .map(|poly| ring_vertex_count(poly.exterior()))
        .sum()
}

fn ring_vertex_count(ring: &LineString<f64>) -> usize {
    let coords = &ring.0;
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.len() - 1
    } else {
        coords.len()
    }
}
