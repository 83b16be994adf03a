use ahash::AHashMap;
use rayon::prelude::*;
use smallvec::SmallVec;

use super::classify::ParsedRecord;
use crate::geom::GeometrySignature;
use crate::types::{Record, RecordId};

/// A disjoint partition of record ids into unique and duplicate sets,
/// both in input order.
#[derive(Debug, Default)]
pub(crate) struct Partition {
    pub unique: Vec<RecordId>,
    pub duplicate: Vec<RecordId>,
}

/// Group parse-valid records by canonical geometry. Every member of a
/// group of two or more is a duplicate; singletons are unique. Together
/// the two sets cover exactly the parse-valid records.
pub(crate) fn partition_by_geometry(parsed: &[ParsedRecord]) -> Partition {
    let signatures: Vec<GeometrySignature> = parsed
        .par_iter()
        .map(|record| GeometrySignature::of(&record.shape))
        .collect();

    let mut groups: AHashMap<&GeometrySignature, SmallVec<[RecordId; 2]>> = AHashMap::new();
    for (record, signature) in parsed.iter().zip(&signatures) {
        groups.entry(signature).or_default().push(record.id);
    }

    let mut partition = Partition::default();
    for (record, signature) in parsed.iter().zip(&signatures) {
        if groups[signature].len() > 1 {
            partition.duplicate.push(record.id);
        } else {
            partition.unique.push(record.id);
        }
    }
    partition
}

/// Group records by non-empty attribute key, exact string equality.
/// Records without a key land in neither set.
pub(crate) fn partition_by_key(records: &[Record]) -> Partition {
    let mut groups: AHashMap<&str, SmallVec<[RecordId; 2]>> = AHashMap::new();
    for record in records {
        if let Some(key) = record.attribute_key() {
            groups.entry(key).or_default().push(record.id);
        }
    }

    let mut partition = Partition::default();
    for record in records {
        let Some(key) = record.attribute_key() else { continue };
        if groups[key].len() > 1 {
            partition.duplicate.push(record.id);
        } else {
            partition.unique.push(record.id);
        }
    }
    partition
}
