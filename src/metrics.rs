use std::collections::HashMap;

use chrono::Datelike;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::types::{
    ExtremeDay, ExtremeDays, MonthlyMean, RiskAssessment, RiskLevel, TempUnit, WeatherRecord,
    WeatherSummary,
};
use crate::util::average;

// Condition texts that count toward the extreme-weather fraction.
static EXTREME_CONDITION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)storm|thunder|snow|rain").expect("static condition pattern"));

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Case-sensitive exact match against the dataset's canonical country
/// strings.
pub fn filter_country<'a>(records: &'a [WeatherRecord], country: &str) -> Vec<&'a WeatherRecord> {
    records.iter().filter(|r| r.country == country).collect()
}

/// Aggregate the filtered set for one country and display unit.
pub fn summarize(
    filtered: &[&WeatherRecord],
    country: &str,
    unit: TempUnit,
) -> Result<WeatherSummary> {
    if filtered.is_empty() {
        return Err(Error::EmptySelection(country.to_string()));
    }

    let temps: Vec<f64> = filtered.iter().map(|r| r.temperature(unit)).collect();
    let winds: Vec<f64> = filtered.iter().map(|r| r.wind_kph).collect();
    let max_temp = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Ok(WeatherSummary {
        country: country.to_string(),
        unit,
        avg_temp: average(&temps),
        max_temp,
        avg_wind: average(&winds),
        common_condition: most_common_condition(filtered),
        record_count: filtered.len(),
    })
}

// Mode of the condition text. Ties resolve to the value seen first in the
// filtered sequence, so the result never depends on map iteration order.
fn most_common_condition(filtered: &[&WeatherRecord]) -> String {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (idx, r) in filtered.iter().enumerate() {
        let entry = counts.entry(r.condition_text.as_str()).or_insert((0, idx));
        entry.0 += 1;
    }
    counts
        .into_iter()
        .max_by(|a, b| (a.1 .0).cmp(&b.1 .0).then((b.1 .1).cmp(&a.1 .1)))
        .map(|(text, _)| text.to_string())
        .unwrap_or_default()
}

/// Additive 0..=100 climate risk for the summarized selection.
///
/// Temperature and wind thresholds read the summary's raw values in its
/// display unit; extreme conditions contribute up to 30 points by the share
/// of matching records. The sum is floored to an integer and clamped.
pub fn assess_risk(filtered: &[&WeatherRecord], summary: &WeatherSummary) -> RiskAssessment {
    let mut score = 0.0_f64;

    if summary.max_temp > 35.0 {
        score += 40.0;
    } else if summary.max_temp > 30.0 {
        score += 25.0;
    }

    if summary.avg_wind > 30.0 {
        score += 30.0;
    } else if summary.avg_wind > 20.0 {
        score += 15.0;
    }

    score += extreme_points(filtered);

    let score = score.floor().clamp(0.0, 100.0) as u8;
    RiskAssessment {
        score,
        level: RiskLevel::from_score(score),
    }
}

fn extreme_points(filtered: &[&WeatherRecord]) -> f64 {
    if filtered.is_empty() {
        return 0.0;
    }
    let matching = filtered
        .iter()
        .filter(|r| EXTREME_CONDITION_RE.is_match(&r.condition_text))
        .count();
    let fraction = matching as f64 / filtered.len() as f64;
    (fraction * 30.0).min(30.0)
}

/// Mean temperature per calendar month, in calendar order (absent months
/// omitted). Records without a parsed timestamp drop out of this
/// aggregation only; an all-unparseable set yields an empty vector.
pub fn monthly_means(filtered: &[&WeatherRecord], unit: TempUnit) -> Vec<MonthlyMean> {
    let mut sums = [0.0_f64; 12];
    let mut counts = [0_usize; 12];
    for r in filtered {
        if let Some(ts) = r.last_updated {
            let idx = ts.month0() as usize;
            sums[idx] += r.temperature(unit);
            counts[idx] += 1;
        }
    }

    MONTH_NAMES
        .iter()
        .copied()
        .enumerate()
        .filter(|(idx, _)| counts[*idx] > 0)
        .map(|(idx, name)| MonthlyMean {
            month: name,
            avg_temp: sums[idx] / counts[idx] as f64,
            samples: counts[idx],
        })
        .collect()
}

/// The hottest and coldest records by the selected temperature column. Ties
/// keep the earliest record in filtered order; a missing timestamp yields a
/// dateless entry rather than an error.
pub fn extreme_days(
    filtered: &[&WeatherRecord],
    country: &str,
    unit: TempUnit,
) -> Result<ExtremeDays> {
    let first = *filtered
        .first()
        .ok_or_else(|| Error::EmptySelection(country.to_string()))?;

    let mut hottest = first;
    let mut coldest = first;
    for &r in &filtered[1..] {
        if r.temperature(unit) > hottest.temperature(unit) {
            hottest = r;
        }
        if r.temperature(unit) < coldest.temperature(unit) {
            coldest = r;
        }
    }

    Ok(ExtremeDays {
        hottest: ExtremeDay {
            temperature: hottest.temperature(unit),
            date: hottest.last_updated.map(|ts| ts.date()),
        },
        coldest: ExtremeDay {
            temperature: coldest.temperature(unit),
            date: coldest.last_updated.map(|ts| ts.date()),
        },
    })
}

/// The alert is evaluated on the raw displayed maximum and only under
/// Celsius; Fahrenheit display never raises it.
pub fn heat_alert(unit: TempUnit, max_temp: f64) -> bool {
    unit == TempUnit::Celsius && max_temp > 35.0
}
