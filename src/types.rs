use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::util::serialize_datetime_opt;

// One row as it appears in the weather CSV. Every field is optional so a
// malformed cell never aborts the read; the loader decides what is usable.
// The real file carries ~40 columns; name-based deserialization ignores the
// rest.
#[derive(Debug, Deserialize)]
pub struct RawWeatherRow {
    pub country: Option<String>,
    pub temperature_celsius: Option<String>,
    pub temperature_fahrenheit: Option<String>,
    pub wind_kph: Option<String>,
    pub condition_text: Option<String>,
    pub last_updated: Option<String>,
}

/// A cleaned weather observation. Immutable once loaded; `last_updated` is
/// `None` when the source timestamp failed to parse.
#[derive(Debug, Clone, Serialize)]
pub struct WeatherRecord {
    pub country: String,
    pub temperature_celsius: f64,
    pub temperature_fahrenheit: f64,
    pub wind_kph: f64,
    pub condition_text: String,
    #[serde(serialize_with = "serialize_datetime_opt")]
    pub last_updated: Option<NaiveDateTime>,
}

impl WeatherRecord {
    /// Temperature in the requested display unit.
    pub fn temperature(&self, unit: TempUnit) -> f64 {
        match unit {
            TempUnit::Celsius => self.temperature_celsius,
            TempUnit::Fahrenheit => self.temperature_fahrenheit,
        }
    }
}

/// Temperature display unit. Selecting a unit switches which column feeds
/// the pipeline; nothing is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TempUnit {
    Celsius,
    Fahrenheit,
}

impl TempUnit {
    /// One-letter label used next to formatted temperatures (`°C` / `°F`).
    pub fn label(self) -> &'static str {
        match self {
            TempUnit::Celsius => "C",
            TempUnit::Fahrenheit => "F",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TempUnit::Celsius => "Celsius",
            TempUnit::Fahrenheit => "Fahrenheit",
        }
    }

    pub fn toggled(self) -> TempUnit {
        match self {
            TempUnit::Celsius => TempUnit::Fahrenheit,
            TempUnit::Fahrenheit => TempUnit::Celsius,
        }
    }
}

/// Aggregates for one country in one display unit.
#[derive(Debug, Clone)]
pub struct WeatherSummary {
    pub country: String,
    pub unit: TempUnit,
    pub avg_temp: f64,
    pub max_temp: f64,
    pub avg_wind: f64,
    pub common_condition: String,
    pub record_count: usize,
}

/// Composite climate risk, recomputed fresh on every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_score(score: u8) -> RiskLevel {
        if score >= 70 {
            RiskLevel::High
        } else if score >= 40 {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

/// Mean temperature for one calendar month.
#[derive(Debug, Clone)]
pub struct MonthlyMean {
    pub month: &'static str,
    pub avg_temp: f64,
    pub samples: usize,
}

/// One endpoint of the observed temperature range. The date is absent when
/// the underlying timestamp never parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtremeDay {
    pub temperature: f64,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtremeDays {
    pub hottest: ExtremeDay,
    pub coldest: ExtremeDay,
}

#[derive(Debug, Clone, Tabled)]
pub struct PreviewRow {
    #[tabled(rename = "Country")]
    pub country: String,
    #[tabled(rename = "Temp C")]
    pub temp_c: String,
    #[tabled(rename = "Temp F")]
    pub temp_f: String,
    #[tabled(rename = "Wind kph")]
    pub wind_kph: String,
    #[tabled(rename = "Condition")]
    pub condition: String,
    #[tabled(rename = "LastUpdated")]
    pub last_updated: String,
}

#[derive(Debug, Clone, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "AvgTemp")]
    pub avg_temp: String,
    #[tabled(rename = "MaxTemp")]
    pub max_temp: String,
    #[tabled(rename = "AvgWind (km/h)")]
    pub avg_wind: String,
    #[tabled(rename = "CommonWeather")]
    pub common_condition: String,
}

#[derive(Debug, Clone, Tabled)]
pub struct MonthlyRow {
    #[tabled(rename = "Month")]
    pub month: String,
    #[tabled(rename = "AvgTemp")]
    pub avg_temp: String,
    #[tabled(rename = "Records")]
    pub records: usize,
}

#[derive(Debug, Clone, Tabled)]
pub struct ExtremeRow {
    #[tabled(rename = "Day")]
    pub label: String,
    #[tabled(rename = "Temp")]
    pub temperature: String,
    #[tabled(rename = "Date")]
    pub date: String,
}
