//! Synthetic datasets with predictable values.

use serde_json::json;

/// Creates `(year, month, variance)` triples for every month of every year in
/// `start_year..=end_year`.
///
/// The variance follows a seasonal wave plus a slow warming trend, so colors
/// change across both axes:
/// `variance = 2 * sin(month) + 0.01 * (year - start_year) - 1`.
///
/// # Example
///
/// ```
/// use test_utils::create_monthly_records;
///
/// let records = create_monthly_records(1900, 1901);
/// assert_eq!(records.len(), 24);
/// assert_eq!(records[0].0, 1900);
/// assert_eq!(records[0].1, 1);
/// assert_eq!(records[23].1, 12);
/// ```
pub fn create_monthly_records(start_year: i32, end_year: i32) -> Vec<(i32, u32, f64)> {
    let mut records = Vec::new();
    for year in start_year..=end_year {
        for month in 1..=12u32 {
            let seasonal = 2.0 * (month as f64).sin();
            let trend = 0.01 * (year - start_year) as f64;
            records.push((year, month, seasonal + trend - 1.0));
        }
    }
    records
}

/// Serializes records into the published document shape.
pub fn dataset_json(base_temperature: f64, records: &[(i32, u32, f64)]) -> String {
    let monthly: Vec<_> = records
        .iter()
        .map(|(year, month, variance)| {
            json!({"year": year, "month": month, "variance": variance})
        })
        .collect();
    json!({
        "baseTemperature": base_temperature,
        "monthlyVariance": monthly,
    })
    .to_string()
}

/// A complete synthetic document covering `start_year..=end_year`.
pub fn create_dataset_json(base_temperature: f64, start_year: i32, end_year: i32) -> String {
    dataset_json(
        base_temperature,
        &create_monthly_records(start_year, end_year),
    )
}
