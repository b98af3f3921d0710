use super::AlertRule;
use crate::models::{HourlyForecast, Severity, WeatherAlert};

/// Rain delay rule - herbicide and fertilizer work should wait when
/// meaningful rain is coming.
///
/// Conditions:
/// - Total precipitation over the next 24 hours >= 3 mm
///
/// Severity levels:
/// - Warning: >= 3 mm expected
/// - Critical: >= 10 mm expected
pub struct RainDelayRule;

const RAIN_THRESHOLD_MM: f64 = 3.0;
const HEAVY_RAIN_MM: f64 = 10.0;

impl AlertRule for RainDelayRule {
    fn id(&self) -> &'static str {
        "rain_delay"
    }

    fn name(&self) -> &'static str {
        "Rain Before Application"
    }

    fn evaluate(&self, forecast: &HourlyForecast) -> Option<WeatherAlert> {
        let total_24h = forecast.total_precipitation_within(24);

        if total_24h < RAIN_THRESHOLD_MM {
            return None;
        }

        let severity = if total_24h >= HEAVY_RAIN_MM {
            Severity::Critical
        } else {
            Severity::Warning
        };

        Some(WeatherAlert::new(
            "rain_delay",
            severity,
            "Rain Expected Within 24h",
            format!(
                "{:.1} mm of rain expected in the next 24 hours. \
                 Delay herbicide application until after the rain passes.",
                total_24h
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForecastPoint;
    use chrono::NaiveDate;

    fn forecast_with_precip(per_hour_mm: f64, hours: i64) -> HourlyForecast {
        let points = (0..hours)
            .map(|h| ForecastPoint {
                timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    + chrono::Duration::hours(h),
                precipitation_mm: per_hour_mm,
                temp_c: 18.0,
                wind_kmh: 15.0,
            })
            .collect();
        HourlyForecast {
            latitude: 46.1667,
            longitude: 21.3167,
            points,
        }
    }

    #[test]
    fn light_rain_does_not_fire() {
        let alert = RainDelayRule.evaluate(&forecast_with_precip(0.1, 24));
        assert!(alert.is_none());
    }

    #[test]
    fn three_mm_in_24h_fires_warning() {
        let alert = RainDelayRule.evaluate(&forecast_with_precip(0.125, 24));
        let alert = alert.expect("3 mm over 24h should fire");
        assert_eq!(alert.severity, Severity::Warning);
    }

    #[test]
    fn heavy_rain_fires_critical() {
        let alert = RainDelayRule.evaluate(&forecast_with_precip(0.5, 24));
        let alert = alert.expect("12 mm over 24h should fire");
        assert_eq!(alert.severity, Severity::Critical);
    }

    #[test]
    fn rain_beyond_24h_is_ignored() {
        // All rain after hour 24
        let mut fc = forecast_with_precip(0.0, 24);
        for h in 24..72 {
            fc.points.push(ForecastPoint {
                timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    + chrono::Duration::hours(h),
                precipitation_mm: 2.0,
                temp_c: 18.0,
                wind_kmh: 15.0,
            });
        }
        assert!(RainDelayRule.evaluate(&fc).is_none());
    }
}
