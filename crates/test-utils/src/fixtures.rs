//! Small documents in the shape of the published temperature JSON.

/// A single record: 8.0 + (-1.0) = 7.0°C in January 2000.
pub const SINGLE_RECORD_JSON: &str = r#"{
    "baseTemperature": 8.0,
    "monthlyVariance": [
        {"year": 2000, "month": 1, "variance": -1.0}
    ]
}"#;

/// First months of the real dataset (base 8.66°C).
pub const SAMPLE_JSON: &str = r#"{
    "baseTemperature": 8.66,
    "monthlyVariance": [
        {"year": 1753, "month": 1, "variance": -1.366},
        {"year": 1753, "month": 2, "variance": -2.223},
        {"year": 1753, "month": 3, "variance": 0.211},
        {"year": 1753, "month": 4, "variance": -0.843},
        {"year": 1753, "month": 5, "variance": -0.771},
        {"year": 1753, "month": 6, "variance": -0.462},
        {"year": 1753, "month": 7, "variance": -0.408},
        {"year": 1753, "month": 8, "variance": -0.527},
        {"year": 1753, "month": 9, "variance": -0.394},
        {"year": 1753, "month": 10, "variance": -1.044},
        {"year": 1753, "month": 11, "variance": -1.466},
        {"year": 1753, "month": 12, "variance": -1.326},
        {"year": 1754, "month": 1, "variance": -1.9},
        {"year": 1754, "month": 2, "variance": -0.745}
    ]
}"#;

/// A valid document without any records.
pub const EMPTY_JSON: &str = r#"{"baseTemperature": 8.66, "monthlyVariance": []}"#;

/// Mixed valid and invalid months; only two records survive sanitizing.
pub const INVALID_MONTHS_JSON: &str = r#"{
    "baseTemperature": 8.66,
    "monthlyVariance": [
        {"year": 1900, "month": 0, "variance": 0.1},
        {"year": 1900, "month": 6, "variance": 0.2},
        {"year": 1900, "month": 7, "variance": 0.3},
        {"year": 1900, "month": 14, "variance": 0.4},
        {"year": 1900, "month": -1, "variance": 0.5}
    ]
}"#;

/// Not the expected shape: the records field is missing.
pub const MALFORMED_JSON: &str = r#"{"baseTemperature": 8.66, "data": []}"#;

/// File name of a full downloaded dataset, looked up with `find_test_file`.
pub const FULL_DATASET_FILE: &str = "global-temperature.json";
