use geo::Rect;
use rstar::{AABB, RTree, RTreeObject};

/// A bounding box in the R-tree, tied to a shape by position.
#[derive(Debug, Clone)]
struct BoundingBox {
    pos: usize, // Position of the shape in the indexed slice
    rect: Rect<f64>,
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        envelope(&self.rect)
    }
}

/// The envelope of a bounding rectangle.
#[inline]
pub(crate) fn envelope(rect: &Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners(rect.min().into(), rect.max().into())
}

/// A bulk-loaded R-tree over shape bounding rectangles, used to prune
/// candidate pairs before any exact intersection is computed.
///
/// The index never drops a pair whose bounding boxes intersect; shapes
/// without a bounding rectangle (no coordinates) are simply never
/// returned as candidates.
#[derive(Debug)]
pub(crate) struct BoundsIndex {
    rtree: RTree<BoundingBox>,
}

impl BoundsIndex {
    /// Index the bounding rectangles of a slice of shapes, keyed by
    /// their position in the slice.
    pub(crate) fn build(rects: impl Iterator<Item = Option<Rect<f64>>>) -> Self {
        let boxes = rects
            .enumerate()
            .filter_map(|(pos, rect)| rect.map(|rect| BoundingBox { pos, rect }))
            .collect();
        Self {
            rtree: RTree::bulk_load(boxes),
        }
    }

    /// Positions of all shapes whose bounding boxes intersect `search`.
    pub(crate) fn candidates(&self, search: &AABB<[f64; 2]>) -> impl Iterator<Item = usize> + '_ {
        self.rtree
            .locate_in_envelope_intersecting(search)
            .map(|b| b.pos)
    }
}

#[cfg(test)]
mod tests {
    use geo::{Coord, Rect};

    use super::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect<f64> {
        Rect::new(Coord { x: x0, y: y0 }, Coord { x: x1, y: y1 })
    }

    #[test]
    fn candidates_require_bbox_intersection() {
        let index = BoundsIndex::build(
            [
                Some(rect(0.0, 0.0, 1.0, 1.0)),
                Some(rect(5.0, 5.0, 6.0, 6.0)),
                Some(rect(0.5, 0.5, 1.5, 1.5)),
            ]
            .into_iter(),
        );

        let mut found: Vec<usize> = index.candidates(&envelope(&rect(0.0, 0.0, 1.0, 1.0))).collect();
        found.sort_unstable();
        assert_eq!(found, vec![0, 2]);
    }

    #[test]
    fn touching_boxes_are_candidates() {
        // Index pruning must keep boundary contacts; the exact predicate
        // decides later whether they overlap in area.
        let index = BoundsIndex::build(
            [Some(rect(0.0, 0.0, 1.0, 1.0)), Some(rect(1.0, 0.0, 2.0, 1.0))].into_iter(),
        );
        let found: Vec<usize> = index.candidates(&envelope(&rect(0.0, 0.0, 1.0, 1.0))).collect();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn missing_rects_are_skipped() {
        let index = BoundsIndex::build([None, Some(rect(0.0, 0.0, 1.0, 1.0))].into_iter());
        let found: Vec<usize> = index.candidates(&envelope(&rect(-10.0, -10.0, 10.0, 10.0))).collect();
        assert_eq!(found, vec![1]);
    }
}
