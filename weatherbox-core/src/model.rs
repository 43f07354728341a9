use serde::{Deserialize, Serialize};

use crate::{convert::kelvin_to_fahrenheit, error::FetchError};

/// Fixed location the weather box asks about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherQuery {
    pub zip: String,
    pub country: String,
}

impl WeatherQuery {
    pub fn new(zip: impl Into<String>, country: impl Into<String>) -> Self {
        Self { zip: zip.into(), country: country.into() }
    }

    /// Value of the `zip` query parameter, e.g. `10012,us`.
    pub fn zip_param(&self) -> String {
        format!("{},{}", self.zip, self.country)
    }
}

impl Default for WeatherQuery {
    fn default() -> Self {
        Self::new("10012", "us")
    }
}

/// Current-weather payload as served by OpenWeather. Only the fields the
/// weather box renders are kept; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub name: String,
    pub main: MainReading,
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainReading {
    /// Kelvin.
    pub temp: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
}

/// What ends up in the weather box after a successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSummary {
    pub location: String,
    pub fahrenheit: i64,
    pub description: String,
}

impl RenderedSummary {
    /// Build a summary from the first condition entry. A response without any
    /// condition entry counts as a malformed payload.
    pub fn from_response(response: &WeatherResponse) -> Result<Self, FetchError> {
        let condition = response
            .weather
            .first()
            .ok_or_else(|| FetchError::Malformed("response contained no weather entries".into()))?;

        Ok(Self {
            location: response.name.clone(),
            fahrenheit: kelvin_to_fahrenheit(response.main.temp),
            description: condition.description.clone(),
        })
    }
}

/// Lifecycle of a single weather request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestState {
    Pending,
    Resolved(RenderedSummary),
    Failed,
}

impl RequestState {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, RequestState::Resolved(_))
    }

    pub fn summary(&self) -> Option<&RenderedSummary> {
        match self {
            RequestState::Resolved(summary) => Some(summary),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(weather: Vec<Condition>) -> WeatherResponse {
        WeatherResponse {
            name: "New York".to_string(),
            main: MainReading { temp: 283.15 },
            weather,
        }
    }

    #[test]
    fn zip_param_joins_zip_and_country() {
        assert_eq!(WeatherQuery::default().zip_param(), "10012,us");
        assert_eq!(WeatherQuery::new("94103", "us").zip_param(), "94103,us");
    }

    #[test]
    fn deserializes_openweather_payload_ignoring_extra_fields() {
        let body = r#"{
            "coord": {"lon": -74.0, "lat": 40.73},
            "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
            "main": {"temp": 283.15, "humidity": 40},
            "name": "New York",
            "cod": 200
        }"#;

        let parsed: WeatherResponse = serde_json::from_str(body).expect("payload should parse");
        assert_eq!(parsed.name, "New York");
        assert_eq!(parsed.weather[0].description, "clear sky");
        assert!((parsed.main.temp - 283.15).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_uses_first_condition_only() {
        let resp = response(vec![
            Condition { description: "clear sky".into() },
            Condition { description: "mist".into() },
        ]);

        let summary = RenderedSummary::from_response(&resp).expect("summary should build");
        assert_eq!(summary.location, "New York");
        assert_eq!(summary.fahrenheit, 50);
        assert_eq!(summary.description, "clear sky");
    }

    #[test]
    fn summary_rejects_empty_conditions() {
        let err = RenderedSummary::from_response(&response(vec![])).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[test]
    fn request_state_helpers() {
        assert!(RequestState::Pending.is_pending());
        assert!(!RequestState::Failed.is_resolved());
        assert!(RequestState::Failed.summary().is_none());
    }
}
