//! Monthly temperature-variance dataset as published in the reference JSON.

use chrono::Month;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::HeatmapResult;

/// One month of one year: deviation from the dataset baseline in °C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureRecord {
    pub year: i32,
    /// Calendar month, 1 = January.
    pub month: u32,
    pub variance: f64,
}

impl TemperatureRecord {
    pub fn new(year: i32, month: u32, variance: f64) -> Self {
        Self {
            year,
            month,
            variance,
        }
    }

    /// Absolute temperature given the dataset baseline.
    pub fn temperature(&self, base_temperature: f64) -> f64 {
        base_temperature + self.variance
    }

    pub fn month_name(&self) -> Option<&'static str> {
        month_name(self.month)
    }

    fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month) && self.variance.is_finite()
    }
}

/// Full English month name for 1..=12.
pub fn month_name(month: u32) -> Option<&'static str> {
    let month = u8::try_from(month).ok()?;
    Month::try_from(month).ok().map(|m| m.name())
}

/// Record as it appears on the wire. Fields are wide enough that an
/// out-of-range month or year, or a null variance, drops the record instead
/// of failing the whole document.
#[derive(Debug, Deserialize)]
struct RawRecord {
    year: i64,
    month: i64,
    variance: Option<f64>,
}

impl RawRecord {
    fn into_record(self) -> Option<TemperatureRecord> {
        let record = TemperatureRecord {
            year: i32::try_from(self.year).ok()?,
            month: u32::try_from(self.month).ok()?,
            variance: self.variance?,
        };
        record.is_valid().then_some(record)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDataset {
    base_temperature: f64,
    monthly_variance: Vec<RawRecord>,
}

impl RawDataset {
    /// The usable dataset and the number of records dropped.
    fn into_dataset(self) -> (Dataset, usize) {
        let total = self.monthly_variance.len();
        let records: Vec<TemperatureRecord> = self
            .monthly_variance
            .into_iter()
            .filter_map(RawRecord::into_record)
            .collect();
        let dropped = total - records.len();
        (Dataset::new(self.base_temperature, records), dropped)
    }
}

impl From<RawDataset> for Dataset {
    fn from(raw: RawDataset) -> Self {
        raw.into_dataset().0
    }
}

/// Baseline temperature plus the monthly records, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawDataset")]
pub struct Dataset {
    pub base_temperature: f64,
    #[serde(rename = "monthlyVariance")]
    pub records: Vec<TemperatureRecord>,
}

impl Dataset {
    pub fn new(base_temperature: f64, records: Vec<TemperatureRecord>) -> Self {
        Self {
            base_temperature,
            records,
        }
    }

    /// Parse the JSON document and drop records that cannot be placed on the chart.
    pub fn from_json_slice(bytes: &[u8]) -> HeatmapResult<Self> {
        let raw: RawDataset = serde_json::from_slice(bytes)?;
        let (dataset, dropped) = raw.into_dataset();
        if dropped > 0 {
            warn!(dropped, "Dropped records with invalid month or variance");
        }
        debug!(
            records = dataset.records.len(),
            base_temperature = dataset.base_temperature,
            "Parsed dataset"
        );
        Ok(dataset)
    }

    pub fn from_json_str(json: &str) -> HeatmapResult<Self> {
        Self::from_json_slice(json.as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Year and month extents, or `None` for an empty dataset.
    pub fn bounds(&self) -> Option<DatasetBounds> {
        let first = self.records.first()?;
        let init = DatasetBounds {
            min_year: first.year,
            max_year: first.year,
            min_month: first.month,
            max_month: first.month,
        };
        Some(self.records.iter().fold(init, |b, r| DatasetBounds {
            min_year: b.min_year.min(r.year),
            max_year: b.max_year.max(r.year),
            min_month: b.min_month.min(r.month),
            max_month: b.max_month.max(r.month),
        }))
    }
}

/// Min/max year and month observed in a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetBounds {
    pub min_year: i32,
    pub max_year: i32,
    pub min_month: u32,
    pub max_month: u32,
}

impl DatasetBounds {
    /// `[min_year, max_year + 1)`: the last year gets a full column.
    pub fn x_domain(&self) -> (f64, f64) {
        (self.min_year as f64, (self.max_year + 1) as f64)
    }

    /// Months are centered on their row: `[min - 0.5, max + 0.5)`.
    pub fn y_domain(&self) -> (f64, f64) {
        (self.min_month as f64 - 0.5, self.max_month as f64 + 0.5)
    }

    pub fn year_span(&self) -> f64 {
        let (x0, x1) = self.x_domain();
        x1 - x0
    }

    pub fn max_month_bound(&self) -> f64 {
        self.y_domain().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
        assert_eq!(month_name(u32::MAX), None);
    }

    #[test]
    fn test_parse_document() {
        let json = r#"{
            "baseTemperature": 8.66,
            "monthlyVariance": [
                {"year": 1753, "month": 1, "variance": -1.366},
                {"year": 1753, "month": 2, "variance": -2.223}
            ]
        }"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.base_temperature, 8.66);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records[1], TemperatureRecord::new(1753, 2, -2.223));
    }

    #[test]
    fn test_invalid_months_are_dropped() {
        let json = r#"{
            "baseTemperature": 8.0,
            "monthlyVariance": [
                {"year": 2000, "month": 0, "variance": 1.0},
                {"year": 2000, "month": 5, "variance": 1.0},
                {"year": 2000, "month": 13, "variance": 1.0}
            ]
        }"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.records[0].month, 5);
    }

    #[test]
    fn test_unrepresentable_records_are_dropped() {
        let json = r#"{
            "baseTemperature": 8.0,
            "monthlyVariance": [
                {"year": 2000, "month": -1, "variance": 1.0},
                {"year": 2000, "month": 5, "variance": 1.0},
                {"year": 2000, "month": 4294967300, "variance": 1.0},
                {"year": 9999999999, "month": 6, "variance": 1.0},
                {"year": 2001, "month": 7, "variance": null}
            ]
        }"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.records, vec![TemperatureRecord::new(2000, 5, 1.0)]);

        let direct: Dataset = serde_json::from_str(json).unwrap();
        assert_eq!(direct, dataset);
    }

    #[test]
    fn test_missing_field_is_parse_error() {
        let json = r#"{"monthlyVariance": []}"#;
        assert!(Dataset::from_json_str(json).is_err());
    }

    #[test]
    fn test_bounds() {
        let dataset = Dataset::new(
            8.0,
            vec![
                TemperatureRecord::new(1800, 3, 0.0),
                TemperatureRecord::new(1753, 12, 0.0),
                TemperatureRecord::new(2015, 1, 0.0),
            ],
        );
        let b = dataset.bounds().unwrap();
        assert_eq!((b.min_year, b.max_year), (1753, 2015));
        assert_eq!((b.min_month, b.max_month), (1, 12));
        assert_eq!(b.x_domain(), (1753.0, 2016.0));
        assert_eq!(b.y_domain(), (0.5, 12.5));
        assert_eq!(b.year_span(), 263.0);
        assert_eq!(b.max_month_bound(), 12.5);

        assert!(Dataset::new(8.0, vec![]).bounds().is_none());
    }
}
