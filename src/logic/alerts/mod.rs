pub mod engine;
pub mod heat_stress;
pub mod rain_delay;
pub mod spray_window;

pub use engine::AlertEngine;

use crate::models::{HourlyForecast, WeatherAlert};

/// Trait for forecast-driven alert rules
pub trait AlertRule: Send + Sync {
    /// Unique identifier for this rule
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return an alert if conditions are met
    fn evaluate(&self, forecast: &HourlyForecast) -> Option<WeatherAlert>;
}
