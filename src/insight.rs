//! Templated narrative text for a country summary.

use crate::types::WeatherSummary;

/// Renders the insight paragraph for a summary. The output is a pure
/// function of its input: the base sentence always appears, the heatwave
/// clause joins when the maximum exceeds 35 and the wind clause when the
/// average wind exceeds 30, both in the summary's own unit.
pub fn generate(summary: &WeatherSummary) -> String {
    let unit = summary.unit.label();
    let mut text = format!(
        "{} shows an average temperature of {:.1}°{}. The maximum recorded temperature is {:.1}°{}, with predominant weather conditions being {}.",
        summary.country,
        summary.avg_temp,
        unit,
        summary.max_temp,
        unit,
        summary.common_condition.to_lowercase(),
    );

    if summary.max_temp > 35.0 {
        text.push_str(" This indicates a potential heatwave risk.");
    }
    if summary.avg_wind > 30.0 {
        text.push_str(" Strong wind patterns suggest unstable atmospheric conditions.");
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TempUnit;

    fn summary(avg: f64, max: f64, wind: f64) -> WeatherSummary {
        WeatherSummary {
            country: "India".to_string(),
            unit: TempUnit::Celsius,
            avg_temp: avg,
            max_temp: max,
            avg_wind: wind,
            common_condition: "Partly Cloudy".to_string(),
            record_count: 10,
        }
    }

    #[test]
    fn base_sentence_names_country_and_rounded_temps() {
        let text = generate(&summary(23.456, 31.02, 12.0));
        assert!(text.contains("India"));
        assert!(text.contains("average temperature of 23.5°C"));
        assert!(text.contains("maximum recorded temperature is 31.0°C"));
        assert!(text.contains("partly cloudy"));
    }

    #[test]
    fn calm_mild_summary_has_no_warning_clauses() {
        let text = generate(&summary(20.0, 30.0, 10.0));
        assert!(!text.contains("heatwave"));
        assert!(!text.contains("wind patterns"));
    }

    #[test]
    fn hot_maximum_appends_heatwave_clause() {
        let text = generate(&summary(28.0, 36.5, 10.0));
        assert!(text.ends_with("This indicates a potential heatwave risk."));
    }

    #[test]
    fn strong_wind_appends_wind_clause() {
        let text = generate(&summary(20.0, 25.0, 31.0));
        assert!(text.ends_with("Strong wind patterns suggest unstable atmospheric conditions."));
    }

    #[test]
    fn both_clauses_join_in_order() {
        let text = generate(&summary(30.0, 40.0, 45.0));
        let heat = text.find("heatwave").unwrap();
        let wind = text.find("wind patterns").unwrap();
        assert!(heat < wind);
    }

    #[test]
    fn output_is_deterministic() {
        let s = summary(20.0, 30.0, 10.0);
        assert_eq!(generate(&s), generate(&s));
    }
}
