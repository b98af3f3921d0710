use crate::config::WeatherConfig;
use crate::error::{FarmOpsError, Result};
use crate::models::{ForecastPoint, HourlyForecast};
use chrono::NaiveDateTime;

const API_BASE_URL: &str = "https://api.open-meteo.com/v1";
const FORECAST_DAYS: u8 = 3;

pub struct OpenMeteoClient {
    client: reqwest::Client,
    config: WeatherConfig,
}

// Open-Meteo API response structures
#[derive(Debug, serde::Deserialize)]
struct OmForecastResponse {
    latitude: f64,
    longitude: f64,
    hourly: OmHourly,
}

#[derive(Debug, serde::Deserialize)]
struct OmHourly {
    time: Vec<String>,
    precipitation: Vec<Option<f64>>,
    temperature_2m: Vec<Option<f64>>,
    windspeed_10m: Vec<Option<f64>>,
}

impl OpenMeteoClient {
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Coordinates for a handful of known places; anything else falls
    /// back to the configured coordinates.
    pub fn resolve_place(&self, place: Option<&str>) -> (f64, f64) {
        match place.map(|p| p.trim().to_lowercase()).as_deref() {
            Some("arad") => (46.1667, 21.3167),
            Some("timisoara") => (45.7489, 21.2087),
            Some("sibiu") => (45.8, 24.15),
            _ => (self.config.latitude, self.config.longitude),
        }
    }

    /// Fetch a 3-day hourly forecast from Open-Meteo.
    pub async fn fetch_forecast(&self, place: Option<&str>) -> Result<HourlyForecast> {
        let (lat, lon) = self.resolve_place(place);
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&hourly=precipitation,temperature_2m,windspeed_10m&forecast_days={}",
            API_BASE_URL, lat, lon, FORECAST_DAYS
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FarmOpsError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FarmOpsError::DataSourceUnavailable(format!(
                "Open-Meteo returned {}: {}",
                status, body
            )));
        }

        let om_response: OmForecastResponse = response.json().await.map_err(|e| {
            FarmOpsError::DataSourceUnavailable(format!(
                "Failed to parse Open-Meteo response: {}",
                e
            ))
        })?;

        convert_response(om_response)
    }

    /// Test connection to the Open-Meteo API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}&hourly=temperature_2m&forecast_days=1",
            API_BASE_URL, self.config.latitude, self.config.longitude
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FarmOpsError::DataSourceUnavailable(format!("Open-Meteo: {}", e)))?;

        Ok(response.status().is_success())
    }
}

fn convert_response(response: OmForecastResponse) -> Result<HourlyForecast> {
    let hourly = response.hourly;

    if hourly.precipitation.len() != hourly.time.len()
        || hourly.temperature_2m.len() != hourly.time.len()
        || hourly.windspeed_10m.len() != hourly.time.len()
    {
        return Err(FarmOpsError::InvalidData(
            "Open-Meteo hourly series lengths do not match".into(),
        ));
    }

    let mut points = Vec::with_capacity(hourly.time.len());
    for (i, time) in hourly.time.iter().enumerate() {
        let timestamp = NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M")
            .map_err(|e| FarmOpsError::InvalidData(format!("bad timestamp '{}': {}", time, e)))?;

        // Missing readings count as zero, same policy as the aggregator
        points.push(ForecastPoint {
            timestamp,
            precipitation_mm: hourly.precipitation[i].unwrap_or(0.0),
            temp_c: hourly.temperature_2m[i].unwrap_or(0.0),
            wind_kmh: hourly.windspeed_10m[i].unwrap_or(0.0),
        });
    }

    Ok(HourlyForecast {
        latitude: response.latitude,
        longitude: response.longitude,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> WeatherConfig {
        WeatherConfig {
            latitude: 46.1667,
            longitude: 21.3167,
        }
    }

    #[test]
    fn client_creation() {
        let client = OpenMeteoClient::new(sample_config());
        assert_eq!(client.config.latitude, 46.1667);
    }

    #[test]
    fn resolve_known_place() {
        let client = OpenMeteoClient::new(sample_config());
        assert_eq!(client.resolve_place(Some("Timisoara")), (45.7489, 21.2087));
        assert_eq!(client.resolve_place(Some("sibiu")), (45.8, 24.15));
    }

    #[test]
    fn resolve_unknown_place_uses_config() {
        let client = OpenMeteoClient::new(sample_config());
        assert_eq!(client.resolve_place(Some("cluj")), (46.1667, 21.3167));
        assert_eq!(client.resolve_place(None), (46.1667, 21.3167));
    }

    #[test]
    fn parse_sample_response() {
        let json = r#"{
            "latitude": 46.16,
            "longitude": 21.32,
            "hourly": {
                "time": ["2024-06-01T00:00", "2024-06-01T01:00"],
                "precipitation": [0.0, 1.2],
                "temperature_2m": [18.5, null],
                "windspeed_10m": [8.0, 11.0]
            }
        }"#;
        let response: OmForecastResponse = serde_json::from_str(json).unwrap();
        let forecast = convert_response(response).unwrap();

        assert_eq!(forecast.points.len(), 2);
        assert_eq!(forecast.points[1].precipitation_mm, 1.2);
        // null reading coerces to zero
        assert_eq!(forecast.points[1].temp_c, 0.0);
        assert_eq!(forecast.points[0].wind_kmh, 8.0);
    }

    #[test]
    fn mismatched_series_lengths_are_rejected() {
        let json = r#"{
            "latitude": 46.16,
            "longitude": 21.32,
            "hourly": {
                "time": ["2024-06-01T00:00"],
                "precipitation": [],
                "temperature_2m": [18.5],
                "windspeed_10m": [8.0]
            }
        }"#;
        let response: OmForecastResponse = serde_json::from_str(json).unwrap();
        assert!(convert_response(response).is_err());
    }
}
