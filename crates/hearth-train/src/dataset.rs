//! California Housing dataset loader.
//!
//! Two CSV layouts are accepted, detected from the header row:
//!
//! - **derived**: the eight model features plus `MedHouseVal`, already in
//!   model units;
//! - **raw census**: the block-group totals (`total_rooms`, `households`,
//!   ...) from which the per-household averages are derived. The target
//!   `median_house_value` is rescaled to units of 100,000 USD.
//!
//! Rows with missing or unparsable cells are skipped and counted.

use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;

use csv::{ReaderBuilder, StringRecord, Trim};
use hearth_core::{Feature, N_FEATURES};
use tracing::{debug, info, warn};

use crate::TrainError;

const DERIVED_TARGET: &str = "MedHouseVal";
const RAW_COLUMNS: [&str; 9] = [
    "longitude",
    "latitude",
    "housing_median_age",
    "total_rooms",
    "total_bedrooms",
    "population",
    "households",
    "median_income",
    "median_house_value",
];
const RAW_TARGET_SCALE: f64 = 100_000.0;

/// Header layout of a dataset file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvLayout {
    Derived,
    RawCensus,
}

/// Feature rows in canonical column order with their targets.
#[derive(Debug, Clone)]
pub struct HousingDataset {
    rows: Vec<[f64; N_FEATURES]>,
    targets: Vec<f64>,
    layout: CsvLayout,
    skipped: usize,
}

impl HousingDataset {
    pub fn from_csv_str(text: &str) -> Result<Self, TrainError> {
        Self::from_reader(text.as_bytes())
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TrainError> {
        // Ragged rows are skipped per row like bad cells, not fatal.
        let mut rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);
        let headers = rdr.headers()?.clone();
        let columns: HashMap<&str, usize> =
            headers.iter().enumerate().map(|(i, h)| (h, i)).collect();

        let layout = detect_layout(&columns).ok_or_else(|| {
            TrainError::UnknownLayout(headers.iter().collect::<Vec<_>>().join(","))
        })?;
        debug!("Detected {:?} dataset layout", layout);

        let mut rows = Vec::new();
        let mut targets = Vec::new();
        let mut skipped = 0usize;

        for result in rdr.records() {
            let record = result?;
            let parsed = match layout {
                CsvLayout::Derived => parse_derived(&record, &columns),
                CsvLayout::RawCensus => parse_raw(&record, &columns),
            };
            match parsed {
                Some((row, target)) => {
                    rows.push(row);
                    targets.push(target);
                }
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!("Skipped {} rows with missing or invalid values", skipped);
        }
        info!("Loaded {} rows ({:?} layout)", rows.len(), layout);

        Ok(Self {
            rows,
            targets,
            layout,
            skipped,
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[[f64; N_FEATURES]] {
        &self.rows
    }

    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    pub fn layout(&self) -> CsvLayout {
        self.layout
    }

    /// Number of input rows dropped during parsing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Copies out the rows and targets at `indices`.
    pub fn select(&self, indices: &[usize]) -> (Vec<[f64; N_FEATURES]>, Vec<f64>) {
        indices
            .iter()
            .map(|&i| (self.rows[i], self.targets[i]))
            .unzip()
    }
}

/// Reads a dataset from an `http(s)://` URL or a local path.
pub async fn fetch(source: &str) -> Result<String, TrainError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        info!("Downloading dataset from {}", source);
        let text = reqwest::get(source)
            .await?
            .error_for_status()?
            .text()
            .await?;
        info!("Downloaded {} bytes", text.len());
        return Ok(text);
    }

    info!("Reading dataset from {}", source);
    tokio::fs::read_to_string(source)
        .await
        .map_err(|e| TrainError::Io {
            path: PathBuf::from(source),
            source: e,
        })
}

fn detect_layout(columns: &HashMap<&str, usize>) -> Option<CsvLayout> {
    let has_derived = Feature::ALL
        .iter()
        .map(|f| f.name())
        .chain([DERIVED_TARGET])
        .all(|name| columns.contains_key(name));
    if has_derived {
        return Some(CsvLayout::Derived);
    }

    if RAW_COLUMNS.iter().all(|name| columns.contains_key(name)) {
        return Some(CsvLayout::RawCensus);
    }
    None
}

fn cell(record: &StringRecord, columns: &HashMap<&str, usize>, name: &str) -> Option<f64> {
    let idx = *columns.get(name)?;
    let value: f64 = record.get(idx)?.parse().ok()?;
    value.is_finite().then_some(value)
}

fn parse_derived(
    record: &StringRecord,
    columns: &HashMap<&str, usize>,
) -> Option<([f64; N_FEATURES], f64)> {
    let mut row = [0.0; N_FEATURES];
    for feature in Feature::ALL {
        row[feature.index()] = cell(record, columns, feature.name())?;
    }
    let target = cell(record, columns, DERIVED_TARGET)?;
    Some((row, target))
}

fn parse_raw(
    record: &StringRecord,
    columns: &HashMap<&str, usize>,
) -> Option<([f64; N_FEATURES], f64)> {
    let get = |name: &str| cell(record, columns, name);

    let households = get("households").filter(|h| *h > 0.0)?;
    let population = get("population")?;

    let mut row = [0.0; N_FEATURES];
    row[Feature::MedInc.index()] = get("median_income")?;
    row[Feature::HouseAge.index()] = get("housing_median_age")?;
    row[Feature::AveRooms.index()] = get("total_rooms")? / households;
    row[Feature::AveBedrms.index()] = get("total_bedrooms")? / households;
    row[Feature::Population.index()] = population;
    row[Feature::AveOccup.index()] = population / households;
    row[Feature::Latitude.index()] = get("latitude")?;
    row[Feature::Longitude.index()] = get("longitude")?;

    let target = get("median_house_value")? / RAW_TARGET_SCALE;
    Some((row, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW_CSV: &str = "\
longitude,latitude,housing_median_age,total_rooms,total_bedrooms,population,households,median_income,median_house_value,ocean_proximity
-122.23,37.88,41.0,880.0,129.0,322.0,126.0,8.3252,452600.0,NEAR BAY
-122.22,37.86,21.0,7099.0,,2401.0,1138.0,8.3014,358500.0,NEAR BAY
-122.24,37.85,52.0,1467.0,190.0,496.0,177.0,7.2574,352100.0,NEAR BAY
-122.25,37.85,52.0,1274.0,235.0,558.0,0.0,5.6431,341300.0,NEAR BAY
";

    const DERIVED_CSV: &str = "\
Longitude,MedInc,HouseAge,AveRooms,AveBedrms,Population,AveOccup,Latitude,MedHouseVal
-122.23,8.3252,41,6.984127,1.02381,322,2.555556,37.88,4.526
-122.22,8.3014,21,6.238137,0.97188,2401,2.109842,37.86,3.585
-122.24,n/a,52,8.288136,1.073446,496,2.80226,37.85,3.521
";

    #[test]
    fn test_raw_layout_derives_features() {
        let data = HousingDataset::from_csv_str(RAW_CSV).unwrap();
        assert_eq!(data.layout(), CsvLayout::RawCensus);
        assert_eq!(data.len(), 2);
        assert_eq!(data.skipped(), 2);

        let row = data.rows()[0];
        assert_eq!(row[Feature::MedInc.index()], 8.3252);
        assert_eq!(row[Feature::HouseAge.index()], 41.0);
        assert!((row[Feature::AveRooms.index()] - 6.984127).abs() < 1e-6);
        assert!((row[Feature::AveBedrms.index()] - 1.023810).abs() < 1e-6);
        assert_eq!(row[Feature::Population.index()], 322.0);
        assert!((row[Feature::AveOccup.index()] - 2.555556).abs() < 1e-6);
        assert_eq!(row[Feature::Latitude.index()], 37.88);
        assert_eq!(row[Feature::Longitude.index()], -122.23);
        assert!((data.targets()[0] - 4.526).abs() < 1e-12);
    }

    #[test]
    fn test_derived_layout_matches_by_name() {
        let data = HousingDataset::from_csv_str(DERIVED_CSV).unwrap();
        assert_eq!(data.layout(), CsvLayout::Derived);
        assert_eq!(data.len(), 2);
        assert_eq!(data.skipped(), 1);

        let row = data.rows()[1];
        assert_eq!(row[Feature::MedInc.index()], 8.3014);
        assert_eq!(row[Feature::Longitude.index()], -122.22);
        assert_eq!(data.targets()[1], 3.585);
    }

    #[test]
    fn test_ragged_rows_are_skipped() {
        let short = "-122.25,5.6431,52";
        let long = "-122.26,3.8462,52,6.281853,1.081081,565,2.181467,37.85,3.422,extra";
        let csv = format!("{DERIVED_CSV}{short}\n{long}\n");
        let data = HousingDataset::from_csv_str(&csv).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.skipped(), 2);
        assert_eq!(data.targets()[2], 3.422);
    }

    #[test]
    fn test_unknown_header() {
        let err = HousingDataset::from_csv_str("a,b,c\n1,2,3\n").unwrap_err();
        assert!(matches!(err, TrainError::UnknownLayout(h) if h == "a,b,c"));
    }

    #[test]
    fn test_select() {
        let data = HousingDataset::from_csv_str(RAW_CSV).unwrap();
        let (rows, targets) = data.select(&[1, 0]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], data.rows()[0]);
        assert_eq!(targets[0], data.targets()[1]);
    }

    #[tokio::test]
    async fn test_fetch_missing_file() {
        let err = fetch("/definitely/not/here.csv").await.unwrap_err();
        assert!(matches!(err, TrainError::Io { .. }));
    }
}
