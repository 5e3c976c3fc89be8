//! Console tables and CSV export.

use std::path::{Path, PathBuf};

use tabled::{settings::Style, Table, Tabled};
use tracing::info;

use crate::error::Result;
use crate::types::{
    ExtremeDays, ExtremeRow, MonthlyMean, MonthlyRow, PreviewRow, SummaryRow, TempUnit,
    WeatherRecord, WeatherSummary,
};

pub fn print_table<T>(rows: &[T], max_rows: usize)
where
    T: Tabled + Clone,
{
    let slice: Vec<T> = rows.iter().cloned().take(max_rows).collect();
    if slice.is_empty() {
        println!("(no rows)\n");
        return;
    }
    let table_str = Table::new(slice).with(Style::markdown()).to_string();
    println!("{}\n", table_str);
}

pub fn preview_rows(filtered: &[&WeatherRecord]) -> Vec<PreviewRow> {
    filtered
        .iter()
        .map(|r| PreviewRow {
            country: r.country.clone(),
            temp_c: format!("{:.1}", r.temperature_celsius),
            temp_f: format!("{:.1}", r.temperature_fahrenheit),
            wind_kph: format!("{:.1}", r.wind_kph),
            condition: r.condition_text.clone(),
            last_updated: r
                .last_updated
                .map(|ts| ts.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        })
        .collect()
}

pub fn summary_row(summary: &WeatherSummary) -> SummaryRow {
    let unit = summary.unit.label();
    SummaryRow {
        avg_temp: format!("{:.1}°{}", summary.avg_temp, unit),
        max_temp: format!("{:.1}°{}", summary.max_temp, unit),
        avg_wind: format!("{:.1}", summary.avg_wind),
        common_condition: summary.common_condition.clone(),
    }
}

pub fn monthly_rows(months: &[MonthlyMean], unit: TempUnit) -> Vec<MonthlyRow> {
    months
        .iter()
        .map(|m| MonthlyRow {
            month: m.month.to_string(),
            avg_temp: format!("{:.1}°{}", m.avg_temp, unit.label()),
            records: m.samples,
        })
        .collect()
}

pub fn extreme_rows(extremes: &ExtremeDays, unit: TempUnit) -> Vec<ExtremeRow> {
    let date_or_unknown = |date: Option<chrono::NaiveDate>| {
        date.map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string())
    };
    vec![
        ExtremeRow {
            label: "Hottest".to_string(),
            temperature: format!("{:.1}°{}", extremes.hottest.temperature, unit.label()),
            date: date_or_unknown(extremes.hottest.date),
        },
        ExtremeRow {
            label: "Coldest".to_string(),
            temperature: format!("{:.1}°{}", extremes.coldest.temperature, unit.label()),
            date: date_or_unknown(extremes.coldest.date),
        },
    ]
}

/// Writes the filtered records for one country to `<country>_weather.csv`
/// under `out_dir` and returns the path written.
pub fn export_country_csv(
    filtered: &[&WeatherRecord],
    country: &str,
    out_dir: &Path,
) -> Result<PathBuf> {
    let path = out_dir.join(format!("{}_weather.csv", country));
    let mut wtr = csv::Writer::from_path(&path)?;
    for r in filtered {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    info!(path = %path.display(), rows = filtered.len(), "exported country csv");
    Ok(path)
}
