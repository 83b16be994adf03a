use ahash::AHashSet;

use super::overlap::OverlapPair;
use crate::types::RecordId;

/// Mark a loser for every overlap pair both of whose records are still
/// eligible (geometry-unique, attribute-unique, centroid-valid).
///
/// The smaller-area record loses; on an exact area tie the pair's
/// second record (the higher id, later in stable input order) loses.
/// This is a single pass over the pair list as computed on the original
/// geometry set: a marked record still loses its other pairs, and no
/// pair is re-evaluated after a removal.
pub(crate) fn resolve_overlaps(
    pairs: &[OverlapPair],
    eligible: &AHashSet<RecordId>,
) -> Vec<RecordId> {
    let mut losers: AHashSet<RecordId> = AHashSet::new();
    for pair in pairs {
        if !eligible.contains(&pair.id_a) || !eligible.contains(&pair.id_b) {
            continue;
        }
        let loser = if pair.area_a < pair.area_b {
            pair.id_a
        } else if pair.area_b < pair.area_a {
            pair.id_b
        } else {
            pair.id_b // Equal areas: the later record loses
        };
        losers.insert(loser);
    }

    let mut losers: Vec<RecordId> = losers.into_iter().collect();
    losers.sort_unstable();
    losers
}
