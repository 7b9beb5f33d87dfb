//! Tests for dataset parsing and the shared temperature scale.

use heatmap_common::{Dataset, HeatmapError, ThresholdScale};
use test_utils::{
    create_monthly_records, dataset_json, require_test_file, EMPTY_JSON, FULL_DATASET_FILE,
    INVALID_MONTHS_JSON, MALFORMED_JSON, SAMPLE_JSON,
};

// ============================================================================
// Parsing tests
// ============================================================================

#[test]
fn test_parse_sample_document() {
    let dataset = Dataset::from_json_str(SAMPLE_JSON).unwrap();
    assert_eq!(dataset.base_temperature, 8.66);
    assert_eq!(dataset.len(), 14);

    let bounds = dataset.bounds().unwrap();
    assert_eq!((bounds.min_year, bounds.max_year), (1753, 1754));
    assert_eq!((bounds.min_month, bounds.max_month), (1, 12));
    assert_eq!(bounds.x_domain(), (1753.0, 1755.0));
    assert_eq!(bounds.y_domain(), (0.5, 12.5));
}

#[test]
fn test_invalid_months_dropped() {
    let dataset = Dataset::from_json_str(INVALID_MONTHS_JSON).unwrap();
    let months: Vec<u32> = dataset.records.iter().map(|r| r.month).collect();
    assert_eq!(months, vec![6, 7]);
}

#[test]
fn test_malformed_and_empty_documents() {
    let err = Dataset::from_json_str(MALFORMED_JSON).unwrap_err();
    assert!(matches!(err, HeatmapError::Parse(_)));
    assert!(err.is_load_failure());

    let empty = Dataset::from_json_str(EMPTY_JSON).unwrap();
    assert!(empty.is_empty());
    assert!(empty.bounds().is_none());
}

#[test]
fn test_record_order_preserved() {
    let records = vec![(1990, 5, 0.1), (1850, 1, -0.3), (1920, 12, 0.0)];
    let dataset = Dataset::from_json_str(&dataset_json(8.0, &records)).unwrap();
    let years: Vec<i32> = dataset.records.iter().map(|r| r.year).collect();
    assert_eq!(years, vec![1990, 1850, 1920]);
}

// ============================================================================
// Classification tests
// ============================================================================

#[test]
fn test_every_record_classified() {
    let scale = ThresholdScale::temperature();
    let records = create_monthly_records(1753, 2015);
    let dataset = Dataset::from_json_str(&dataset_json(8.66, &records)).unwrap();

    for record in &dataset.records {
        let color = scale
            .color_for(record.temperature(dataset.base_temperature))
            .unwrap();
        assert!(scale.colors().contains(&color));
    }
}

#[test]
fn test_full_dataset() {
    let path = require_test_file!(FULL_DATASET_FILE);
    let bytes = std::fs::read(path).unwrap();
    let dataset = Dataset::from_json_slice(&bytes).unwrap();

    let bounds = dataset.bounds().unwrap();
    assert_eq!(bounds.min_year, 1753);
    assert_eq!((bounds.min_month, bounds.max_month), (1, 12));
    assert!(dataset.len() > 3000);
}
