use super::AlertRule;
use crate::models::{HourlyForecast, Severity, WeatherAlert};

/// Spray window rule - flags a usable window for field treatments when
/// enough calm hours show up in the forecast.
///
/// Conditions:
/// - At least 6 hours with wind below 12 km/h across the 72h window
pub struct SprayWindowRule;

const CALM_WIND_KMH: f64 = 12.0;
const MIN_CALM_HOURS: usize = 6;

impl AlertRule for SprayWindowRule {
    fn id(&self) -> &'static str {
        "spray_window"
    }

    fn name(&self) -> &'static str {
        "Treatment Spray Window"
    }

    fn evaluate(&self, forecast: &HourlyForecast) -> Option<WeatherAlert> {
        let calm_hours = forecast.calm_hours(CALM_WIND_KMH);

        if calm_hours < MIN_CALM_HOURS {
            return None;
        }

        Some(WeatherAlert::new(
            "spray_window",
            Severity::Info,
            "Calm Window For Treatments",
            format!(
                "{} hours with wind below {:.0} km/h in the forecast. \
                 Good conditions for spraying.",
                calm_hours, CALM_WIND_KMH
            ),
        ))
    }
}
