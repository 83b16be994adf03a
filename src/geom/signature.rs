use std::cmp::Ordering;

use geo::{Coord, LineString, MultiPolygon};

/// Canonical, hashable form of a multipolygon, used for exact-equality
/// duplicate detection.
///
/// Two geometries compare equal iff they contain the same rings with the
/// same coordinates at the input's native precision. Ring direction and
/// starting vertex are normalized away; hole and part order as well.
/// Coordinates are compared bit-exact; there is no tolerance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometrySignature {
    parts: Vec<PartSignature>,
}

/// One polygon part: canonical exterior ring plus sorted canonical holes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct PartSignature {
    exterior: Vec<(u64, u64)>,
    holes: Vec<Vec<(u64, u64)>>,
}

impl GeometrySignature {
    pub fn of(shape: &MultiPolygon<f64>) -> Self {
        let mut parts: Vec<PartSignature> = shape
            .0
            .iter()
            .map(|poly| {
                let mut holes: Vec<Vec<(u64, u64)>> =
                    poly.interiors().iter().map(canonical_ring).collect();
                holes.sort_unstable();
                PartSignature {
                    exterior: canonical_ring(poly.exterior()),
                    holes,
                }
            })
            .collect();
        parts.sort_unstable();
        Self { parts }
    }
}

/// Rewrite one ring into canonical vertex order, as coordinate bit
/// patterns.
///
/// The closing vertex is dropped, then the ring is read from each of its
/// numerically smallest vertices in both directions; the smallest of
/// those readings is the canonical one. Equivalent rings that differ
/// only in winding or starting vertex therefore produce identical
/// sequences.
fn canonical_ring(ring: &LineString<f64>) -> Vec<(u64, u64)> {
    /// Numeric vertex order: by x, then y.
    fn cmp(a: &Coord<f64>, b: &Coord<f64>) -> Ordering {
        a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
    }

    /// One full reading of the ring from `start`, stepping forward or
    /// backward.
    fn reading(coords: &[Coord<f64>], start: usize, forward: bool) -> Vec<(u64, u64)> {
        let n = coords.len();
        (0..n)
            .map(|step| {
                let idx = if forward {
                    (start + step) % n
                } else {
                    (start + n - step) % n
                };
                (coords[idx].x.to_bits(), coords[idx].y.to_bits())
            })
            .collect()
    }

    let mut coords: &[Coord<f64>] = &ring.0;
    if coords.len() > 1 && coords.first() == coords.last() {
        coords = &coords[..coords.len() - 1];
    }
    if coords.is_empty() {
        return Vec::new();
    }

    let smallest = coords
        .iter()
        .min_by(|a, b| cmp(a, b))
        .copied()
        .unwrap_or(coords[0]);

    // Rings normally have one smallest vertex; repeated vertices just
    // widen the candidate set.
    (0..coords.len())
        .filter(|&idx| cmp(&coords[idx], &smallest) == Ordering::Equal)
        .flat_map(|start| [reading(coords, start, true), reading(coords, start, false)])
        .min()
        .unwrap_or_default()
}
