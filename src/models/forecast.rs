use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Hourly forecast data from the Open-Meteo forecast API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub latitude: f64,
    pub longitude: f64,
    pub points: Vec<ForecastPoint>,
}

/// A single hourly forecast point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub timestamp: NaiveDateTime,
    pub precipitation_mm: f64,
    pub temp_c: f64,
    pub wind_kmh: f64,
}

impl HourlyForecast {
    /// Forecast points covering the next N hours from the start of the
    /// forecast window.
    pub fn next_hours(&self, hours: usize) -> &[ForecastPoint] {
        &self.points[..self.points.len().min(hours)]
    }

    /// Total precipitation over the next N hours.
    pub fn total_precipitation_within(&self, hours: usize) -> f64 {
        self.next_hours(hours)
            .iter()
            .map(|p| p.precipitation_mm)
            .filter(|mm| *mm >= 0.0)
            .sum()
    }

    /// Number of hours with wind below the threshold across the whole
    /// forecast window.
    pub fn calm_hours(&self, max_wind_kmh: f64) -> usize {
        self.points.iter().filter(|p| p.wind_kmh < max_wind_kmh).count()
    }

    /// Hours above the temperature threshold expressed in day
    /// equivalents (24 hot hours = one hot day).
    pub fn hot_day_equivalents(&self, threshold_c: f64) -> f64 {
        self.points.iter().filter(|p| p.temp_c > threshold_c).count() as f64 / 24.0
    }

    /// Maximum forecast temperature, if any points exist.
    pub fn max_temp_c(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.temp_c)
            .max_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(hour: u32, precip: f64, temp: f64, wind: f64) -> ForecastPoint {
        ForecastPoint {
            timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(hour % 24, 0, 0)
                .unwrap(),
            precipitation_mm: precip,
            temp_c: temp,
            wind_kmh: wind,
        }
    }

    fn forecast(points: Vec<ForecastPoint>) -> HourlyForecast {
        HourlyForecast {
            latitude: 46.1667,
            longitude: 21.3167,
            points,
        }
    }

    #[test]
    fn total_precipitation_respects_window() {
        let mut points: Vec<ForecastPoint> =
            (0..24).map(|h| point(h, 0.5, 20.0, 10.0)).collect();
        // Rain outside the 24h window must not count
        points.push(point(0, 100.0, 20.0, 10.0));

        let fc = forecast(points);
        assert!((fc.total_precipitation_within(24) - 12.0).abs() < 1e-9);
    }

    #[test]
    fn calm_hours_counts_below_threshold() {
        let points = vec![
            point(0, 0.0, 20.0, 5.0),
            point(1, 0.0, 20.0, 11.9),
            point(2, 0.0, 20.0, 12.0),
            point(3, 0.0, 20.0, 30.0),
        ];
        assert_eq!(forecast(points).calm_hours(12.0), 2);
    }

    #[test]
    fn hot_day_equivalents_scales_by_24() {
        let points: Vec<ForecastPoint> = (0..48).map(|h| point(h, 0.0, 35.0, 8.0)).collect();
        assert!((forecast(points).hot_day_equivalents(32.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn max_temp_on_empty_forecast_is_none() {
        assert!(forecast(vec![]).max_temp_c().is_none());
    }
}
