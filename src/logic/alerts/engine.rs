use super::{
    heat_stress::HeatStressRule, rain_delay::RainDelayRule, spray_window::SprayWindowRule,
    AlertRule,
};
use crate::models::{HourlyForecast, WeatherAlert};

pub struct AlertEngine {
    rules: Vec<Box<dyn AlertRule>>,
}

impl AlertEngine {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn AlertRule>> = vec![
            Box::new(RainDelayRule),
            Box::new(SprayWindowRule),
            Box::new(HeatStressRule),
        ];

        Self { rules }
    }

    pub fn evaluate(&self, forecast: &HourlyForecast) -> Vec<WeatherAlert> {
        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(forecast))
            .collect()
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for AlertEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ForecastPoint;
    use chrono::NaiveDate;

    fn quiet_forecast() -> HourlyForecast {
        let points = (0..72)
            .map(|h| ForecastPoint {
                timestamp: NaiveDate::from_ymd_opt(2024, 6, 1)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    + chrono::Duration::hours(h),
                precipitation_mm: 0.0,
                temp_c: 22.0,
                wind_kmh: 20.0,
            })
            .collect();
        HourlyForecast {
            latitude: 46.1667,
            longitude: 21.3167,
            points,
        }
    }

    #[test]
    fn quiet_forecast_fires_no_alerts() {
        let engine = AlertEngine::new();
        assert!(engine.evaluate(&quiet_forecast()).is_empty());
    }

    #[test]
    fn engine_lists_all_rules() {
        let engine = AlertEngine::new();
        let ids: Vec<&str> = engine.list_rules().iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec!["rain_delay", "spray_window", "heat_stress"]);
    }
}
