use super::AlertRule;
use crate::models::{HourlyForecast, Severity, WeatherAlert};

/// Heat stress rule - sustained heat means nitrogen applications should
/// be skipped and crops watched for thermal stress.
///
/// Conditions:
/// - At least 2 day-equivalents (48 hourly points) above 32°C across
///   the 72h window
///
/// Severity levels:
/// - Warning: >= 2 hot days
/// - Critical: >= 2 hot days with a peak above 38°C
pub struct HeatStressRule;

const HOT_TEMP_C: f64 = 32.0;
const EXTREME_TEMP_C: f64 = 38.0;
const MIN_HOT_DAYS: f64 = 2.0;

impl AlertRule for HeatStressRule {
    fn id(&self) -> &'static str {
        "heat_stress"
    }

    fn name(&self) -> &'static str {
        "Heat Stress"
    }

    fn evaluate(&self, forecast: &HourlyForecast) -> Option<WeatherAlert> {
        let hot_days = forecast.hot_day_equivalents(HOT_TEMP_C);

        if hot_days < MIN_HOT_DAYS {
            return None;
        }

        let max_temp = forecast.max_temp_c().unwrap_or(HOT_TEMP_C);
        let severity = if max_temp > EXTREME_TEMP_C {
            Severity::Critical
        } else {
            Severity::Warning
        };

        Some(WeatherAlert::new(
            "heat_stress",
            severity,
            "Sustained Heat Expected",
            format!(
                "Roughly {:.1} days above {:.0}°C in the forecast (peak {:.1}°C). \
                 Risk of thermal stress; skip nitrogen applications.",
                hot_days, HOT_TEMP_C, max_temp
            ),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForecastPoint;
    use chrono::NaiveDate;

    fn forecast_with_temps(temps: &[f64]) -> HourlyForecast {
        let points = temps
            .iter()
            .enumerate()
            .map(|(h, temp)| ForecastPoint {
                timestamp: NaiveDate::from_ymd_opt(2024, 7, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    + chrono::Duration::hours(h as i64),
                precipitation_mm: 0.0,
                temp_c: *temp,
                wind_kmh: 10.0,
            })
            .collect();
        HourlyForecast {
            latitude: 46.1667,
            longitude: 21.3167,
            points,
        }
    }

    #[test]
    fn two_hot_days_fire_warning() {
        let temps = vec![35.0; 48];
        let alert = HeatStressRule.evaluate(&forecast_with_temps(&temps));
        let alert = alert.expect("48 hot hours should fire");
        assert_eq!(alert.severity, Severity::Warning);
    }

    #[test]
    fn extreme_peak_fires_critical() {
        let mut temps = vec![35.0; 48];
        temps[10] = 40.0;
        let alert = HeatStressRule.evaluate(&forecast_with_temps(&temps));
        let alert = alert.expect("extreme heat should fire");
        assert_eq!(alert.severity, Severity::Critical);
    }

    #[test]
    fn one_hot_day_does_not_fire() {
        let mut temps = vec![25.0; 72];
        for t in temps.iter_mut().take(24) {
            *t = 35.0;
        }
        assert!(HeatStressRule.evaluate(&forecast_with_temps(&temps)).is_none());
    }
}
