use std::collections::BTreeSet;
use std::path::Path;

use csv::ReaderBuilder;
use once_cell::sync::OnceCell;
use tracing::info;

use crate::error::{Error, Result};
use crate::types::{RawWeatherRow, WeatherRecord};
use crate::util::{parse_datetime_safe, parse_f64_safe};

#[derive(Debug, Clone, Copy)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub skipped_rows: usize,
    pub missing_timestamps: usize,
}

/// The weather table, read-only after load. `countries` is the sorted,
/// deduplicated selector list.
#[derive(Debug)]
pub struct Dataset {
    pub records: Vec<WeatherRecord>,
    pub countries: Vec<String>,
    pub report: LoadReport,
}

static DATASET: OnceCell<Dataset> = OnceCell::new();

/// Load the dataset once for the process lifetime. Repeated calls return the
/// cached table without touching the file again.
pub fn dataset(path: &Path) -> Result<&'static Dataset> {
    DATASET.get_or_try_init(|| load(path))
}

fn load(path: &Path) -> Result<Dataset> {
    let (records, report) = load_and_clean(path)?;
    if records.is_empty() {
        return Err(Error::DataLoad(format!(
            "{}: no usable weather rows",
            path.display()
        )));
    }

    let countries: Vec<String> = records
        .iter()
        .map(|r| r.country.clone())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect();

    info!(
        rows = report.loaded_rows,
        skipped = report.skipped_rows,
        countries = countries.len(),
        "weather dataset loaded"
    );

    Ok(Dataset {
        records,
        countries,
        report,
    })
}

/// Read and clean the CSV file.
///
/// A row is kept only when its country and all three numeric columns are
/// usable; rows whose timestamp fails to parse are kept with a missing
/// `last_updated` (they drop out of the monthly aggregation only).
pub fn load_and_clean(path: &Path) -> Result<(Vec<WeatherRecord>, LoadReport)> {
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| Error::DataLoad(format!("cannot open {}: {}", path.display(), e)))?;

    let mut total_rows = 0usize;
    let mut skipped_rows = 0usize;
    let mut missing_timestamps = 0usize;
    let mut records: Vec<WeatherRecord> = Vec::new();

    for result in rdr.deserialize::<RawWeatherRow>() {
        total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(_) => {
                skipped_rows += 1;
                continue;
            }
        };

        let country = match row.country.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => {
                skipped_rows += 1;
                continue;
            }
        };
        let temperature_celsius = match parse_f64_safe(row.temperature_celsius.as_deref()) {
            Some(v) => v,
            None => {
                skipped_rows += 1;
                continue;
            }
        };
        let temperature_fahrenheit = match parse_f64_safe(row.temperature_fahrenheit.as_deref()) {
            Some(v) => v,
            None => {
                skipped_rows += 1;
                continue;
            }
        };
        let wind_kph = match parse_f64_safe(row.wind_kph.as_deref()) {
            Some(v) => v,
            None => {
                skipped_rows += 1;
                continue;
            }
        };

        let condition_text = row
            .condition_text
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        let last_updated = parse_datetime_safe(row.last_updated.as_deref());
        if last_updated.is_none() {
            missing_timestamps += 1;
        }

        records.push(WeatherRecord {
            country,
            temperature_celsius,
            temperature_fahrenheit,
            wind_kph,
            condition_text,
            last_updated,
        });
    }

    let report = LoadReport {
        total_rows,
        loaded_rows: records.len(),
        skipped_rows,
        missing_timestamps,
    };
    Ok((records, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str =
        "country,location_name,temperature_celsius,temperature_fahrenheit,wind_kph,condition_text,last_updated\n";

    fn write_csv(lines: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(HEADER.as_bytes()).unwrap();
        for line in lines {
            file.write_all(line.as_bytes()).unwrap();
            file.write_all(b"\n").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn keeps_clean_rows_and_counts_skips() {
        let file = write_csv(&[
            "India,Delhi,31.0,87.8,12.0,Sunny,2024-05-16 13:15",
            "India,Mumbai,not-a-number,87.8,12.0,Sunny,2024-05-16 13:15",
            ",Nowhere,20.0,68.0,5.0,Clear,2024-05-16 13:15",
            "France,Paris,18.5,65.3,22.0,Partly cloudy,2024-05-17 09:00",
        ]);

        let (records, report) = load_and_clean(file.path()).unwrap();
        assert_eq!(report.total_rows, 4);
        assert_eq!(report.loaded_rows, 2);
        assert_eq!(report.skipped_rows, 2);
        assert_eq!(records[0].country, "India");
        assert_eq!(records[1].wind_kph, 22.0);
    }

    #[test]
    fn bad_timestamp_keeps_row_with_missing_date() {
        let file = write_csv(&["Japan,Tokyo,25.0,77.0,10.0,Clear,yesterday-ish"]);

        let (records, report) = load_and_clean(file.path()).unwrap();
        assert_eq!(report.loaded_rows, 1);
        assert_eq!(report.missing_timestamps, 1);
        assert!(records[0].last_updated.is_none());
    }

    #[test]
    fn missing_file_is_a_data_load_error() {
        let err = load_and_clean(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, Error::DataLoad(_)));
    }

    #[test]
    fn dataset_is_cached_for_the_process() {
        let file = write_csv(&[
            "Brazil,Rio,28.0,82.4,14.0,Sunny,2024-02-01 12:00",
            "Argentina,Buenos Aires,22.0,71.6,18.0,Cloudy,2024-02-01 12:00",
        ]);

        let first = dataset(file.path()).unwrap();
        assert_eq!(first.countries, vec!["Argentina", "Brazil"]);

        // Second call must hand back the same table, not re-read the file.
        let second = dataset(file.path()).unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
