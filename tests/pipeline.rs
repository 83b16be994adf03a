// End-to-end tests for the classification pipeline, on small synthetic
// datasets in a planar metric system (meters) near the origin.

use geo::{Geometry, LineString, Point, Polygon};
use geosieve::{PipelineConfig, Record, RecordError, classify};

/// Axis-aligned rectangle from (x0, y0) to (x1, y1), closed ring.
fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Geometry<f64> {
    Geometry::Polygon(Polygon::new(
        LineString::from(vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]),
        vec![],
    ))
}

fn triangle(offset: f64) -> Geometry<f64> {
    Geometry::Polygon(Polygon::new(
        LineString::from(vec![
            (offset, 0.0),
            (offset + 100.0, 0.0),
            (offset + 100.0, 100.0),
            (offset, 0.0),
        ]),
        vec![],
    ))
}

fn record(id: u32, key: &str, geometry: Geometry<f64>) -> Record {
    Record::new(id, Some(key), geometry)
}

#[test]
fn unique_and_duplicate_geometries_partition_the_valid_records() {
    let records = vec![
        record(0, "A", triangle(0.0)),
        record(1, "B", triangle(0.0)), // duplicate of 0
        record(2, "C", triangle(1000.0)),
        record(3, "D", rect(0.0, 5000.0, 100.0, 5100.0)),
        Record::new(4, Some("E"), Geometry::Point(Point::new(0.0, 0.0))), // unparsable
    ];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    let mut covered: Vec<u32> = result
        .geometry_unique
        .iter()
        .chain(&result.geometry_duplicate)
        .copied()
        .collect();
    covered.sort_unstable();
    assert_eq!(covered, vec![0, 1, 2, 3]); // full coverage, no overlap
    assert_eq!(result.geometry_duplicate, vec![0, 1]);
    assert_eq!(result.geometry_unique, vec![2, 3]);

    assert_eq!(result.issues.len(), 1);
    assert_eq!(result.issues[0].id, 4);
    assert!(matches!(result.issues[0].error, RecordError::GeometryParse(_)));
    // The unparsable record keeps its attribute classification.
    assert!(result.attribute_unique.contains(&4));
}

#[test]
fn identical_triangles_are_both_duplicates_and_neither_is_valid() {
    let records = vec![
        record(0, "PLOT-1", triangle(0.0)),
        record(1, "PLOT-1", triangle(0.0)),
    ];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    assert_eq!(result.geometry_duplicate, vec![0, 1]);
    assert!(result.geometry_unique.is_empty());
    assert_eq!(result.attribute_duplicate, vec![0, 1]);
    assert!(result.valid_final.is_empty());
}

#[test]
fn larger_polygon_survives_a_sixty_percent_overlap() {
    // 10 ha and 6 ha rectangles; the intersection is 3.6 ha, 60% of the
    // smaller and 36% of the larger.
    let records = vec![
        record(0, "BIG", rect(0.0, 0.0, 500.0, 200.0)),
        record(1, "SMALL", rect(320.0, 0.0, 620.0, 200.0)),
    ];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    assert_eq!(result.overlap_pairs.len(), 1);
    let pair = &result.overlap_pairs[0];
    assert_eq!((pair.id_a, pair.id_b), (0, 1));
    assert!((pair.intersection_area - 36_000.0).abs() < 1e-6);
    assert!((pair.area_a - 100_000.0).abs() < 1e-6);
    assert!((pair.area_b - 60_000.0).abs() < 1e-6);
    assert!((pair.pct_of_smaller() - 60.0).abs() < 1e-9);
    assert!((pair.pct_of_a - 36.0).abs() < 1e-9);
    assert!((pair.pct_of_union - 36_000.0 / 124_000.0 * 100.0).abs() < 1e-9);

    assert_eq!(result.overlap_losers, vec![1]);
    let valid_ids: Vec<u32> = result.valid_final.iter().map(|r| r.id).collect();
    assert_eq!(valid_ids, vec![0]);
    assert_eq!(result.valid_final[0].area_ha, 10.0);
}

#[test]
fn equal_area_overlap_drops_the_second_record() {
    let records = vec![
        record(0, "A", rect(0.0, 0.0, 100.0, 100.0)),
        record(1, "B", rect(50.0, 0.0, 150.0, 100.0)),
    ];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    assert_eq!(result.overlap_losers, vec![1]);
    let valid_ids: Vec<u32> = result.valid_final.iter().map(|r| r.id).collect();
    assert_eq!(valid_ids, vec![0]);
}

#[test]
fn hundred_meter_square_is_one_hectare() {
    let records = vec![record(0, "SQ", rect(0.0, 0.0, 100.0, 100.0))];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    assert_eq!(result.valid_final.len(), 1);
    assert_eq!(result.valid_final[0].area_ha, 1.0);
}

#[test]
fn geographic_centroid_is_derived_in_degrees() {
    // Centroid at (250 m, 100 m); near the equator one degree is about
    // 111 319.49 m on the Mercator plane.
    let records = vec![record(0, "SQ", rect(0.0, 0.0, 500.0, 200.0))];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    let valid = &result.valid_final[0];
    assert!((valid.longitude - 250.0 / 111_319.490_793_273_58).abs() < 1e-6);
    assert!((valid.latitude - 100.0 / 111_319.490_793_273_58).abs() < 1e-6);
}

#[test]
fn stored_geographic_coordinates_take_precedence() {
    let records = vec![
        record(0, "SQ", rect(0.0, 0.0, 100.0, 100.0))
            .with_geographic(rect(10.0, 20.0, 11.0, 21.0)),
    ];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    let valid = &result.valid_final[0];
    assert_eq!(valid.longitude, 10.5);
    assert_eq!(valid.latitude, 20.5);
}

#[test]
fn low_vertex_count_is_diagnostic_only() {
    // A pentagon: five vertices, flagged, but still valid.
    let pentagon = Geometry::Polygon(Polygon::new(
        LineString::from(vec![
            (100.0, 0.0),
            (200.0, 80.0),
            (160.0, 200.0),
            (40.0, 200.0),
            (0.0, 80.0),
            (100.0, 0.0),
        ]),
        vec![],
    ));
    let records = vec![record(0, "PENT", pentagon)];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    assert_eq!(result.too_few_points.len(), 1);
    assert_eq!(result.too_few_points[0].id, 0);
    assert_eq!(result.too_few_points[0].vertex_count, 5);
    assert_eq!(result.valid_final.len(), 1);
}

#[test]
fn centroid_outside_excludes_from_the_valid_set() {
    // A U-shaped polygon whose centroid lands in the notch.
    let u_shape = Geometry::Polygon(Polygon::new(
        LineString::from(vec![
            (0.0, 0.0),
            (100.0, 0.0),
            (100.0, 100.0),
            (80.0, 100.0),
            (80.0, 20.0),
            (20.0, 20.0),
            (20.0, 100.0),
            (0.0, 100.0),
            (0.0, 0.0),
        ]),
        vec![],
    ));
    let records = vec![
        record(0, "U", u_shape),
        record(1, "SQ", rect(1000.0, 0.0, 1100.0, 100.0)),
    ];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    assert_eq!(result.centroid_outside, vec![0]);
    let valid_ids: Vec<u32> = result.valid_final.iter().map(|r| r.id).collect();
    assert_eq!(valid_ids, vec![1]);
}

#[test]
fn overlap_with_an_attribute_duplicate_marks_no_loser() {
    // The 6 ha rectangle overlaps the 10 ha one but shares its key with
    // a third record, so it is already excluded when overlaps are
    // resolved, and must not drag the 10 ha rectangle down with it.
    let records = vec![
        record(0, "BIG", rect(0.0, 0.0, 500.0, 200.0)),
        record(1, "DUP", rect(320.0, 0.0, 620.0, 200.0)),
        record(2, "DUP", rect(10_000.0, 0.0, 10_100.0, 100.0)),
    ];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    assert_eq!(result.overlap_pairs.len(), 1); // still reported
    assert!(result.overlap_losers.is_empty()); // but not resolved
    let valid_ids: Vec<u32> = result.valid_final.iter().map(|r| r.id).collect();
    assert_eq!(valid_ids, vec![0]);
}

#[test]
fn no_two_valid_records_share_a_surviving_overlap_pair() {
    // A chain of mutually overlapping rectangles.
    let records = vec![
        record(0, "A", rect(0.0, 0.0, 200.0, 100.0)),
        record(1, "B", rect(100.0, 0.0, 300.0, 100.0)),
        record(2, "C", rect(200.0, 0.0, 400.0, 100.0)),
        record(3, "D", rect(150.0, 0.0, 350.0, 100.0)),
    ];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    let valid_ids: Vec<u32> = result.valid_final.iter().map(|r| r.id).collect();
    for pair in &result.overlap_pairs {
        assert!(
            !(valid_ids.contains(&pair.id_a) && valid_ids.contains(&pair.id_b)),
            "pair ({}, {}) survived into the valid set",
            pair.id_a,
            pair.id_b
        );
    }
}

#[test]
fn records_without_a_key_never_reach_the_valid_set() {
    let records = vec![
        Record::new(0, None, rect(0.0, 0.0, 100.0, 100.0)),
        Record::new(1, Some(""), rect(1000.0, 0.0, 1100.0, 100.0)),
        record(2, "K", rect(2000.0, 0.0, 2100.0, 100.0)),
    ];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    assert_eq!(result.attribute_unique, vec![2]);
    assert!(result.attribute_duplicate.is_empty());
    let valid_ids: Vec<u32> = result.valid_final.iter().map(|r| r.id).collect();
    assert_eq!(valid_ids, vec![2]);
}

#[test]
fn thresholds_are_parameters_not_constants() {
    // 10% overlap of the smaller square: invisible by default, recorded
    // and resolved with a lower threshold.
    let records = vec![
        record(0, "A", rect(0.0, 0.0, 200.0, 200.0)),
        record(1, "B", rect(180.0, 0.0, 380.0, 20.0)),
    ];

    let default_run = classify(&records, &PipelineConfig::default()).unwrap();
    assert!(default_run.overlap_pairs.is_empty());
    assert_eq!(default_run.valid_final.len(), 2);

    let strict = PipelineConfig {
        min_overlap_pct: 5.0,
        ..PipelineConfig::default()
    };
    let strict_run = classify(&records, &strict).unwrap();
    assert_eq!(strict_run.overlap_pairs.len(), 1);
    assert_eq!(strict_run.overlap_losers, vec![1]);
}

#[test]
fn runs_are_deterministic() {
    let records = vec![
        record(0, "A", rect(0.0, 0.0, 200.0, 100.0)),
        record(1, "B", rect(100.0, 0.0, 300.0, 100.0)),
        record(2, "C", rect(200.0, 0.0, 400.0, 100.0)),
        record(3, "A", rect(5000.0, 0.0, 5100.0, 100.0)),
        record(4, "D", triangle(0.0)),
        record(5, "E", triangle(0.0)),
    ];

    let first = classify(&records, &PipelineConfig::default()).unwrap();
    let second = classify(&records, &PipelineConfig::default()).unwrap();

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn zero_area_records_are_kept_out_of_area_outputs() {
    let records = vec![
        record(0, "OK", rect(0.0, 0.0, 100.0, 100.0)),
        record(1, "FLAT", rect(1000.0, 0.0, 1100.0, 0.0)), // no height
    ];

    let result = classify(&records, &PipelineConfig::default()).unwrap();

    // Still classified by geometry and attribute...
    assert!(result.geometry_unique.contains(&1));
    assert!(result.attribute_unique.contains(&1));
    // ...but reported degenerate and withheld from the valid set.
    assert!(result.issues.iter().any(|issue| issue.id == 1
        && issue.error == RecordError::DegenerateGeometry));
    let valid_ids: Vec<u32> = result.valid_final.iter().map(|r| r.id).collect();
    assert_eq!(valid_ids, vec![0]);
}
