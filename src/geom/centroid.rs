use geo::{Centroid, Contains, MultiPolygon};

/// Whether the shape's arithmetic centroid lies strictly inside it.
///
/// Boundary-exclusive: a centroid exactly on the boundary counts as
/// outside. A shape with no computable centroid is outside as well. For
/// multipolygons the overall centroid is tested against the union of the
/// parts, so a centroid falling between two parts is outside even though
/// it sits inside the convex hull.
pub(crate) fn centroid_inside(shape: &MultiPolygon<f64>) -> bool {
    match shape.centroid() {
        Some(point) => shape.contains(&point),
        None => false,
    }
}
